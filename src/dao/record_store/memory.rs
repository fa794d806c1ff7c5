use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    models::{PlayerScoreEntity, QuestionEntity, SubmissionEntity},
    record_store::RecordStore,
    storage::{StorageError, StorageResult},
};

#[derive(Default)]
struct Inner {
    questions: RwLock<IndexMap<Uuid, QuestionEntity>>,
    submissions: RwLock<Vec<SubmissionEntity>>,
    scores: RwLock<IndexMap<String, PlayerScoreEntity>>,
}

/// In-memory record store backend.
///
/// Insertion order is preserved for questions and score rows, which gives the
/// scoreboard its deterministic tie-break (first to score ranks first among
/// equals). Suitable for single-process deployments and tests; a durable
/// backend plugs in behind the same [`RecordStore`] trait.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Inner>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn upsert_question(&self, question: QuestionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.questions.write().await.insert(question.id, question);
            Ok(())
        })
    }

    fn find_question(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.questions.read().await.get(&id).cloned()) })
    }

    fn list_questions(
        &self,
        category: Option<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.questions.read().await;
            Ok(guard
                .values()
                .filter(|question| {
                    category
                        .as_deref()
                        .is_none_or(|wanted| question.category == wanted)
                })
                .cloned()
                .collect())
        })
    }

    fn create_submission(
        &self,
        submission: SubmissionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.submissions.write().await.push(submission);
            Ok(())
        })
    }

    fn count_submissions(
        &self,
        username: String,
        question_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.submissions.read().await;
            Ok(guard
                .iter()
                .filter(|row| row.username == username && row.question_id == question_id)
                .count() as u64)
        })
    }

    fn exists_correct_submission(
        &self,
        username: String,
        question_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.submissions.read().await;
            Ok(guard.iter().any(|row| {
                row.is_correct && row.username == username && row.question_id == question_id
            }))
        })
    }

    fn get_or_create_score(
        &self,
        username: String,
        is_staff: bool,
    ) -> BoxFuture<'static, StorageResult<PlayerScoreEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut guard = inner.scores.write().await;
            let row = guard
                .entry(username.clone())
                .or_insert_with(|| PlayerScoreEntity {
                    username,
                    score: 0,
                    is_staff,
                });
            Ok(row.clone())
        })
    }

    fn increment_score(
        &self,
        username: String,
        delta: u64,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut guard = inner.scores.write().await;
            let row = guard.get_mut(&username).ok_or_else(|| {
                StorageError::Inconsistent(format!("no score row for user `{username}`"))
            })?;
            row.score += delta;
            Ok(row.score)
        })
    }

    fn list_scores(
        &self,
        exclude_staff: bool,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerScoreEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.scores.read().await;
            Ok(guard
                .values()
                .filter(|row| !(exclude_staff && row.is_staff))
                .cloned()
                .collect())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn question(category: &str) -> QuestionEntity {
        QuestionEntity {
            id: Uuid::new_v4(),
            title: "t".into(),
            prompt: "p".into(),
            category: category.into(),
            answer: "42".into(),
            points: 100,
            max_attempts: 3,
        }
    }

    fn submission(username: &str, question_id: Uuid, is_correct: bool) -> SubmissionEntity {
        SubmissionEntity {
            username: username.into(),
            question_id,
            submitted_answer: "whatever".into(),
            is_correct,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn list_questions_filters_by_category() {
        let store = MemoryRecordStore::new();
        store.upsert_question(question("web")).await.unwrap();
        store.upsert_question(question("crypto")).await.unwrap();
        store.upsert_question(question("web")).await.unwrap();

        assert_eq!(store.list_questions(None).await.unwrap().len(), 3);
        assert_eq!(
            store
                .list_questions(Some("web".into()))
                .await
                .unwrap()
                .len(),
            2
        );
        assert!(
            store
                .list_questions(Some("pwn".into()))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn submission_counts_and_correct_lookup_are_per_key() {
        let store = MemoryRecordStore::new();
        let q1 = Uuid::new_v4();
        let q2 = Uuid::new_v4();

        store.create_submission(submission("alice", q1, false)).await.unwrap();
        store.create_submission(submission("alice", q1, true)).await.unwrap();
        store.create_submission(submission("alice", q2, false)).await.unwrap();
        store.create_submission(submission("bob", q1, false)).await.unwrap();

        assert_eq!(store.count_submissions("alice".into(), q1).await.unwrap(), 2);
        assert_eq!(store.count_submissions("bob".into(), q1).await.unwrap(), 1);
        assert!(store.exists_correct_submission("alice".into(), q1).await.unwrap());
        assert!(!store.exists_correct_submission("alice".into(), q2).await.unwrap());
        assert!(!store.exists_correct_submission("bob".into(), q1).await.unwrap());
    }

    #[tokio::test]
    async fn scores_keep_creation_order_and_hide_staff() {
        let store = MemoryRecordStore::new();
        store.get_or_create_score("carol".into(), false).await.unwrap();
        store.get_or_create_score("admin".into(), true).await.unwrap();
        store.get_or_create_score("dave".into(), false).await.unwrap();
        store.increment_score("dave".into(), 50).await.unwrap();

        let all = store.list_scores(false).await.unwrap();
        assert_eq!(
            all.iter().map(|row| row.username.as_str()).collect::<Vec<_>>(),
            vec!["carol", "admin", "dave"]
        );

        let public = store.list_scores(true).await.unwrap();
        assert_eq!(
            public.iter().map(|row| row.username.as_str()).collect::<Vec<_>>(),
            vec!["carol", "dave"]
        );
        assert_eq!(public[1].score, 50);
    }

    #[tokio::test]
    async fn increment_without_a_row_is_an_inconsistency() {
        let store = MemoryRecordStore::new();
        let err = store.increment_score("ghost".into(), 10).await.unwrap_err();
        assert!(matches!(err, StorageError::Inconsistent(_)));
    }

    #[tokio::test]
    async fn get_or_create_does_not_reset_an_existing_row() {
        let store = MemoryRecordStore::new();
        store.get_or_create_score("erin".into(), false).await.unwrap();
        store.increment_score("erin".into(), 200).await.unwrap();

        let row = store.get_or_create_score("erin".into(), false).await.unwrap();
        assert_eq!(row.score, 200);
    }
}
