use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::state::clock::ClockState;

/// Feedback sent to viewers for one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// A fresh correct answer that awarded points.
    Correct,
    /// A wrong answer.
    Incorrect,
    /// A correct answer for a question already awarded to this user.
    Already,
}

/// Notification fanned out to every connected viewer.
///
/// Events exist only on the bus; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContestEvent {
    /// One submission attempt was arbitrated.
    Submission {
        /// User who submitted.
        username: String,
        /// Outcome shown to viewers.
        status: SubmissionStatus,
    },
    /// The contest clock changed state.
    Clock {
        /// Derived state after the transition.
        state: ClockState,
        /// Seconds left after the transition, `None` when inactive.
        remaining_time: Option<u64>,
    },
}

/// Multicast hub for contest events.
///
/// Publishing never blocks: the backing broadcast channel is bounded and a
/// subscriber that falls more than the capacity behind skips over the events
/// it missed (drop-oldest) instead of stalling producers. Each viewer
/// connection holds its own receiver, so every connected viewer sees every
/// event independently; dropping the receiver is all the cleanup a closed
/// connection needs.
pub struct EventHub {
    sender: broadcast::Sender<ContestEvent>,
}

impl EventHub {
    /// Build a hub whose per-subscriber buffer holds `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ContestEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    ///
    /// A send error only means nobody is listening right now.
    pub fn publish(&self, event: ContestEvent) {
        let _ = self.sender.send(event);
    }
}
