pub mod memory;
pub mod seed;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{PlayerScoreEntity, QuestionEntity, SubmissionEntity},
    storage::StorageResult,
};

/// Abstraction over the durable store for questions, submissions, and scores.
///
/// The contest clock is deliberately absent: one process owns it and it lives
/// in the in-memory clock cell, never in storage. Implementations must make
/// `create_submission` followed by `increment_score` safe to retry, and the
/// attempt ledger serializes both behind a per-`(user, question)` lock, so a
/// backend does not need cross-row transactions to preserve the award-once
/// invariant.
pub trait RecordStore: Send + Sync {
    /// Insert or replace a question definition.
    fn upsert_question(&self, question: QuestionEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a question by id.
    fn find_question(&self, id: Uuid)
    -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>>;
    /// List questions, optionally restricted to one category.
    fn list_questions(
        &self,
        category: Option<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Append one submission row.
    fn create_submission(
        &self,
        submission: SubmissionEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Count prior attempts for `(username, question_id)`.
    fn count_submissions(
        &self,
        username: String,
        question_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Whether a correct submission already exists for `(username, question_id)`.
    fn exists_correct_submission(
        &self,
        username: String,
        question_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// Fetch the score row for `username`, creating a zero row on first use.
    fn get_or_create_score(
        &self,
        username: String,
        is_staff: bool,
    ) -> BoxFuture<'static, StorageResult<PlayerScoreEntity>>;
    /// Add `delta` points to an existing score row, returning the new total.
    fn increment_score(
        &self,
        username: String,
        delta: u64,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Score rows in creation order, optionally hiding staff rows.
    fn list_scores(
        &self,
        exclude_staff: bool,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerScoreEntity>>>;
    /// Probe the backend for liveness.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
