use serde::Serialize;
use utoipa::ToSchema;

use crate::state::events::SubmissionStatus;

/// One scoreboard row.
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct ScoreEntry {
    /// Participant name.
    pub username: String,
    /// Current total.
    pub score: u64,
}

/// Payload pushed on the scoreboard stream once per tick.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardSnapshot {
    /// Non-staff rows, descending by score; ties keep first-score order.
    pub scores: Vec<ScoreEntry>,
    /// Seconds left on the contest clock, `null` while inactive.
    pub remaining_time: Option<u64>,
}

/// Payload pushed on the submission stream for each arbitrated attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionNotice {
    /// User who submitted.
    pub username: String,
    /// Outcome shown to viewers.
    pub status: SubmissionStatus,
}
