use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

fn default_question_id() -> Uuid {
    Uuid::new_v4()
}

fn default_points() -> u32 {
    100
}

fn default_max_attempts() -> u32 {
    3
}

/// A quiz question as stored in the record store.
///
/// Questions are admin-managed content, immutable after seeding. The
/// `Deserialize` derive doubles as the seed-file format, where `id`,
/// `points`, and `max_attempts` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEntity {
    /// Stable identifier used by submission rows.
    #[serde(default = "default_question_id")]
    pub id: Uuid,
    /// Short display title.
    pub title: String,
    /// Full challenge text shown to participants.
    pub prompt: String,
    /// Category the question is filed under.
    pub category: String,
    /// Correct answer; compared case-insensitively against submissions.
    pub answer: String,
    /// Points awarded on the first correct submission.
    #[serde(default = "default_points")]
    pub points: u32,
    /// Submission attempts allowed per user, at least 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// One submitted answer. Append-only; rows are never mutated or deleted.
#[derive(Debug, Clone)]
pub struct SubmissionEntity {
    /// User who submitted.
    pub username: String,
    /// Question the answer targets.
    pub question_id: Uuid,
    /// The answer text as submitted.
    pub submitted_answer: String,
    /// Whether the answer matched.
    pub is_correct: bool,
    /// When the attempt was recorded.
    pub timestamp: OffsetDateTime,
}

/// Accumulated score for one user, mutated only through
/// [`RecordStore::increment_score`](crate::dao::record_store::RecordStore::increment_score).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScoreEntity {
    /// Owner of the row.
    pub username: String,
    /// Total points; monotonically non-decreasing.
    pub score: u64,
    /// Captured at row creation so staff rows can be excluded from the
    /// public scoreboard without consulting the identity collaborator.
    pub is_staff: bool,
}
