//! Staff operations against the contest clock.
//!
//! Every successful transition publishes a clock event on the bus and fires
//! the indicator; both are fire-and-forget so a slow viewer or a stalled LED
//! link never blocks the staff request.

use std::time::{Duration, Instant};

use tracing::info;

use crate::{
    dto::auth::Identity,
    error::ServiceError,
    state::{SharedState, clock::ClockReading, events::ContestEvent},
};

/// Destroy any existing clock and start a fresh one for `seconds`.
pub async fn start(
    state: &SharedState,
    identity: &Identity,
    seconds: u64,
) -> Result<ClockReading, ServiceError> {
    identity.require_staff()?;

    let reading = state
        .clock()
        .start(Duration::from_secs(seconds), Instant::now())
        .await;
    info!(user = %identity.username, seconds, "contest clock started");

    state.actuator().show_idle();
    publish_clock_event(state, reading);
    Ok(reading)
}

/// Freeze a running clock, keeping the time left.
pub async fn pause(state: &SharedState, identity: &Identity) -> Result<ClockReading, ServiceError> {
    identity.require_staff()?;

    let reading = state.clock().pause(Instant::now()).await?;
    info!(user = %identity.username, remaining = ?reading.seconds_left, "contest clock paused");

    state.actuator().show_paused();
    publish_clock_event(state, reading);
    Ok(reading)
}

/// Restart a paused clock with its stored remainder.
pub async fn resume(
    state: &SharedState,
    identity: &Identity,
) -> Result<ClockReading, ServiceError> {
    identity.require_staff()?;

    let reading = state.clock().resume(Instant::now()).await?;
    info!(user = %identity.username, remaining = ?reading.seconds_left, "contest clock resumed");

    state.actuator().show_idle();
    publish_clock_event(state, reading);
    Ok(reading)
}

/// Destroy the clock. A reset with no clock in place is a no-op success.
pub async fn reset(state: &SharedState, identity: &Identity) -> Result<ClockReading, ServiceError> {
    identity.require_staff()?;

    let reading = state.clock().reset().await;
    info!(user = %identity.username, "contest clock reset");

    state.actuator().show_idle();
    publish_clock_event(state, reading);
    Ok(reading)
}

/// Observe the clock without mutating it.
pub async fn status(state: &SharedState) -> ClockReading {
    state.clock().read(Instant::now()).await
}

fn publish_clock_event(state: &SharedState, reading: ClockReading) {
    state.events().publish(ContestEvent::Clock {
        state: reading.state,
        remaining_time: reading.seconds_left,
    });
}
