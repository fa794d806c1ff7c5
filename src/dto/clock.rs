use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::clock::{ClockReading, ClockState};

/// Body of the staff request that starts a fresh contest clock.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartClockRequest {
    /// Full contest duration in seconds, capped at 24 hours.
    #[validate(range(min = 1, max = 86_400))]
    pub seconds: u64,
}

/// Clock projection returned by the status route and pushed on the clock
/// stream once per tick.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ClockStatusResponse {
    /// Seconds left; `0` once finished, `null` while inactive.
    pub remaining_time: Option<u64>,
    /// Derived clock state.
    pub state: ClockState,
}

impl From<ClockReading> for ClockStatusResponse {
    fn from(reading: ClockReading) -> Self {
        Self {
            remaining_time: reading.seconds_left,
            state: reading.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_CONTEST_SECONDS: u64 = 86_400;

    #[test]
    fn duration_bounds_are_enforced() {
        assert!(StartClockRequest { seconds: 0 }.validate().is_err());
        assert!(StartClockRequest { seconds: 1 }.validate().is_ok());
        assert!(StartClockRequest { seconds: 600 }.validate().is_ok());
        assert!(
            StartClockRequest {
                seconds: MAX_CONTEST_SECONDS
            }
            .validate()
            .is_ok()
        );
        assert!(
            StartClockRequest {
                seconds: MAX_CONTEST_SECONDS + 1
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn status_payload_uses_wire_field_names() {
        let payload = ClockStatusResponse {
            remaining_time: Some(480),
            state: ClockState::Active,
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"remaining_time":480,"state":"Active"}"#
        );

        let inactive = ClockStatusResponse {
            remaining_time: None,
            state: ClockState::Inactive,
        };
        assert_eq!(
            serde_json::to_string(&inactive).unwrap(),
            r#"{"remaining_time":null,"state":"Inactive"}"#
        );
    }
}
