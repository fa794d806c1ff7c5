use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of a submitted answer.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswerRequest {
    /// The answer text; compared trimmed and case-insensitively.
    #[validate(length(min = 1, max = 255))]
    pub answer: String,
}

/// How one submission attempt was arbitrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Fresh correct answer; points were awarded.
    Correct,
    /// Wrong answer; the attempt was recorded.
    Incorrect,
    /// The question was already awarded to this user; nothing recorded.
    AlreadyAwarded,
    /// The per-question attempt cap is spent; nothing recorded.
    AttemptsExhausted,
    /// The contest clock is not running; nothing recorded.
    ClockNotRunning,
}

/// Response returned to the submitting client.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitAnswerResponse {
    /// Arbitration outcome.
    pub outcome: SubmissionOutcome,
    /// Points awarded by this submission, present only on `correct`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awarded: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SubmissionOutcome::AlreadyAwarded).unwrap(),
            r#""already_awarded""#
        );
        assert_eq!(
            serde_json::to_string(&SubmissionOutcome::ClockNotRunning).unwrap(),
            r#""clock_not_running""#
        );
    }

    #[test]
    fn awarded_is_omitted_unless_present() {
        let response = SubmitAnswerResponse {
            outcome: SubmissionOutcome::Incorrect,
            awarded: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"outcome":"incorrect"}"#
        );
    }

    #[test]
    fn empty_answers_fail_validation() {
        assert!(SubmitAnswerRequest { answer: String::new() }.validate().is_err());
        assert!(
            SubmitAnswerRequest {
                answer: "flag{ok}".into()
            }
            .validate()
            .is_ok()
        );
        assert!(
            SubmitAnswerRequest {
                answer: "x".repeat(256)
            }
            .validate()
            .is_err()
        );
    }
}
