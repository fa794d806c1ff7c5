use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// Derived lifecycle state of the contest clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ClockState {
    /// No clock exists; the contest has not been scheduled.
    Inactive,
    /// The clock is counting down.
    Active,
    /// The clock is stopped with time left on it.
    Paused,
    /// The clock ran out of time.
    Finished,
}

/// Transitions that can be requested against the clock cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    /// Create a fresh clock and start it immediately.
    Start,
    /// Freeze a running clock, keeping the time left.
    Pause,
    /// Restart a paused clock with its stored remainder.
    Resume,
    /// Destroy the clock entirely.
    Reset,
}

/// Error returned when a transition is not legal from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition: {command:?} cannot be applied while the clock is {from:?}")]
pub struct InvalidTransition {
    /// State the clock was observed in when the command arrived.
    pub from: ClockState,
    /// The command that was refused.
    pub command: ClockCommand,
}

/// Point-in-time observation of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Derived state at the observation instant.
    pub state: ClockState,
    /// Whole seconds left, partial seconds rounded up: `Some(0)` when
    /// finished, `None` when inactive.
    pub seconds_left: Option<u64>,
}

impl ClockReading {
    fn inactive() -> Self {
        Self {
            state: ClockState::Inactive,
            seconds_left: None,
        }
    }
}

/// The single contest timer record.
///
/// While running, `remaining` holds the duration in force for the current run
/// segment and `started_at` the instant that segment began; while paused,
/// `remaining` holds the time left and `started_at` is empty. Every state
/// question goes through [`ContestClock::observe`] so there is exactly one
/// derivation rule in the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestClock {
    started_at: Option<Instant>,
    remaining: Duration,
}

impl ContestClock {
    /// Build a clock that starts running at `now` for `duration`.
    pub fn running(duration: Duration, now: Instant) -> Self {
        Self {
            started_at: Some(now),
            remaining: duration,
        }
    }

    /// Derive the state and the seconds left at `now`.
    pub fn observe(&self, now: Instant) -> ClockReading {
        match self.started_at {
            None => ClockReading {
                state: ClockState::Paused,
                seconds_left: Some(ceil_secs(self.remaining)),
            },
            Some(started) => match self.time_left(started, now) {
                Some(left) => ClockReading {
                    state: ClockState::Active,
                    seconds_left: Some(ceil_secs(left)),
                },
                None => ClockReading {
                    state: ClockState::Finished,
                    seconds_left: Some(0),
                },
            },
        }
    }

    /// Exact time left in the current run segment, `None` once expired.
    fn time_left(&self, started: Instant, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(started);
        self.remaining
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }
}

/// Whole seconds, rounding partial seconds up so a freshly started 600 s
/// clock reads 600 and the final partial second still reads 1.
fn ceil_secs(duration: Duration) -> u64 {
    let seconds = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        seconds + 1
    } else {
        seconds
    }
}

/// Single-owner slot holding at most one [`ContestClock`].
///
/// Reads take a snapshot under the read lock; the four transitions serialize
/// through the write lock so concurrent conflicting commands cannot produce a
/// second clock instance or a torn pause/resume.
pub struct ClockCell {
    slot: RwLock<Option<ContestClock>>,
}

impl Default for ClockCell {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockCell {
    /// Create an empty cell; the derived state is `Inactive`.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Observe the clock at `now` without mutating it.
    pub async fn read(&self, now: Instant) -> ClockReading {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some(clock) => clock.observe(now),
            None => ClockReading::inactive(),
        }
    }

    /// Replace any existing clock with a fresh running one.
    pub async fn start(&self, duration: Duration, now: Instant) -> ClockReading {
        let mut guard = self.slot.write().await;
        let clock = ContestClock::running(duration, now);
        let reading = clock.observe(now);
        *guard = Some(clock);
        reading
    }

    /// Freeze a running clock, storing the exact time left.
    pub async fn pause(&self, now: Instant) -> Result<ClockReading, InvalidTransition> {
        let mut guard = self.slot.write().await;
        let Some(clock) = guard.as_mut() else {
            return Err(InvalidTransition {
                from: ClockState::Inactive,
                command: ClockCommand::Pause,
            });
        };

        let Some(started) = clock.started_at else {
            return Err(InvalidTransition {
                from: ClockState::Paused,
                command: ClockCommand::Pause,
            });
        };

        // The stored remainder keeps sub-second precision so pause/resume
        // cycles never shorten or stretch the total active time.
        let Some(left) = clock.time_left(started, now) else {
            return Err(InvalidTransition {
                from: ClockState::Finished,
                command: ClockCommand::Pause,
            });
        };

        clock.started_at = None;
        clock.remaining = left;
        Ok(clock.observe(now))
    }

    /// Restart a paused clock; the stored remainder becomes the new run
    /// segment's duration.
    pub async fn resume(&self, now: Instant) -> Result<ClockReading, InvalidTransition> {
        let mut guard = self.slot.write().await;
        let Some(clock) = guard.as_mut() else {
            return Err(InvalidTransition {
                from: ClockState::Inactive,
                command: ClockCommand::Resume,
            });
        };

        if clock.started_at.is_some() {
            return Err(InvalidTransition {
                from: clock.observe(now).state,
                command: ClockCommand::Resume,
            });
        }

        clock.started_at = Some(now);
        Ok(clock.observe(now))
    }

    /// Destroy the clock. Succeeds even when no clock exists.
    pub async fn reset(&self) -> ClockReading {
        let mut guard = self.slot.write().await;
        *guard = None;
        ClockReading::inactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn running_clock_derives_active_with_time_left() {
        let t0 = Instant::now();
        let clock = ContestClock::running(10 * MINUTE, t0);

        let reading = clock.observe(t0 + 2 * MINUTE);
        assert_eq!(reading.state, ClockState::Active);
        assert_eq!(reading.seconds_left, Some(480));
    }

    #[test]
    fn partial_seconds_are_rounded_up_for_display() {
        let t0 = Instant::now();
        let clock = ContestClock::running(10 * MINUTE, t0);

        let just_after_start = clock.observe(t0 + Duration::from_millis(500));
        assert_eq!(just_after_start.seconds_left, Some(600));

        let final_sliver = clock.observe(t0 + 10 * MINUTE - Duration::from_millis(1));
        assert_eq!(final_sliver.state, ClockState::Active);
        assert_eq!(final_sliver.seconds_left, Some(1));
    }

    #[test]
    fn expired_clock_derives_finished_at_zero() {
        let t0 = Instant::now();
        let clock = ContestClock::running(10 * MINUTE, t0);

        let at_boundary = clock.observe(t0 + 10 * MINUTE);
        assert_eq!(at_boundary.state, ClockState::Finished);
        assert_eq!(at_boundary.seconds_left, Some(0));

        let long_after = clock.observe(t0 + 100 * MINUTE);
        assert_eq!(long_after.state, ClockState::Finished);
        assert_eq!(long_after.seconds_left, Some(0));
    }

    #[tokio::test]
    async fn empty_cell_reads_inactive() {
        let cell = ClockCell::new();
        let reading = cell.read(Instant::now()).await;
        assert_eq!(reading.state, ClockState::Inactive);
        assert_eq!(reading.seconds_left, None);
    }

    #[tokio::test]
    async fn pause_stores_time_left_and_resume_carries_it_forward() {
        let cell = ClockCell::new();
        let t0 = Instant::now();
        cell.start(10 * MINUTE, t0).await;

        let paused = cell.pause(t0 + 2 * MINUTE).await.unwrap();
        assert_eq!(paused.state, ClockState::Paused);
        assert_eq!(paused.seconds_left, Some(480));

        // How long the pause lasts is irrelevant to the remainder.
        let resumed_at = t0 + 55 * MINUTE;
        let resumed = cell.resume(resumed_at).await.unwrap();
        assert_eq!(resumed.state, ClockState::Active);
        assert_eq!(resumed.seconds_left, Some(480));

        let near_end = cell.read(resumed_at + 479 * Duration::from_secs(1)).await;
        assert_eq!(near_end.state, ClockState::Active);

        let done = cell.read(resumed_at + 480 * Duration::from_secs(1)).await;
        assert_eq!(done.state, ClockState::Finished);
        assert_eq!(done.seconds_left, Some(0));
    }

    #[tokio::test]
    async fn total_active_time_survives_repeated_pauses() {
        let cell = ClockCell::new();
        let t0 = Instant::now();
        cell.start(10 * MINUTE, t0).await;

        let t1 = t0 + 3 * MINUTE;
        cell.pause(t1).await.unwrap();
        let t2 = t1 + 17 * MINUTE;
        cell.resume(t2).await.unwrap();
        let t3 = t2 + 4 * MINUTE;
        cell.pause(t3).await.unwrap();
        let t4 = t3 + MINUTE;
        cell.resume(t4).await.unwrap();

        // 3 + 4 minutes are spent running; 3 remain after the last resume.
        let reading = cell.read(t4 + 3 * MINUTE).await;
        assert_eq!(reading.state, ClockState::Finished);
        assert_eq!(reading.seconds_left, Some(0));

        let just_before = cell.read(t4 + 3 * MINUTE - Duration::from_millis(1)).await;
        assert_eq!(just_before.state, ClockState::Active);
    }

    #[tokio::test]
    async fn pause_requires_an_active_clock() {
        let cell = ClockCell::new();
        let now = Instant::now();

        let err = cell.pause(now).await.unwrap_err();
        assert_eq!(err.from, ClockState::Inactive);
        assert_eq!(err.command, ClockCommand::Pause);

        cell.start(MINUTE, now).await;
        cell.pause(now + Duration::from_secs(10)).await.unwrap();
        let err = cell.pause(now + Duration::from_secs(11)).await.unwrap_err();
        assert_eq!(err.from, ClockState::Paused);
    }

    #[tokio::test]
    async fn pause_after_expiry_is_refused() {
        let cell = ClockCell::new();
        let t0 = Instant::now();
        cell.start(MINUTE, t0).await;

        let err = cell.pause(t0 + 2 * MINUTE).await.unwrap_err();
        assert_eq!(err.from, ClockState::Finished);
    }

    #[tokio::test]
    async fn resume_requires_a_paused_clock() {
        let cell = ClockCell::new();
        let now = Instant::now();

        let err = cell.resume(now).await.unwrap_err();
        assert_eq!(err.from, ClockState::Inactive);

        cell.start(MINUTE, now).await;
        let err = cell.resume(now + Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.from, ClockState::Active);
        assert_eq!(err.command, ClockCommand::Resume);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let cell = ClockCell::new();
        assert_eq!(cell.reset().await.state, ClockState::Inactive);

        cell.start(MINUTE, Instant::now()).await;
        assert_eq!(cell.reset().await.state, ClockState::Inactive);
        assert_eq!(cell.reset().await.state, ClockState::Inactive);
    }

    #[tokio::test]
    async fn start_replaces_an_existing_clock() {
        let cell = ClockCell::new();
        let t0 = Instant::now();
        cell.start(MINUTE, t0).await;
        cell.pause(t0 + Duration::from_secs(30)).await.unwrap();

        let reading = cell.start(10 * MINUTE, t0 + MINUTE).await;
        assert_eq!(reading.state, ClockState::Active);
        assert_eq!(reading.seconds_left, Some(600));
    }
}
