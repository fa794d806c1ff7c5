//! Read-only projections backing the status routes and the snapshot streams.

use std::time::Instant;

use indexmap::IndexMap;

use crate::{
    dto::{
        auth::Identity,
        clock::ClockStatusResponse,
        question::{CategorySummary, QuestionSummary},
        sse::{ScoreEntry, ScoreboardSnapshot},
    },
    error::ServiceError,
    state::{SharedState, clock::ClockState},
};

/// Current clock projection.
pub async fn clock_status(state: &SharedState) -> ClockStatusResponse {
    state.clock().read(Instant::now()).await.into()
}

/// Fresh scoreboard projection: non-staff rows ordered by descending score.
///
/// The sort is stable over the store's creation order, so users with equal
/// scores rank in the order they first scored.
pub async fn scoreboard_snapshot(state: &SharedState) -> Result<ScoreboardSnapshot, ServiceError> {
    let mut rows = state.store().list_scores(true).await?;
    rows.sort_by(|a, b| b.score.cmp(&a.score));

    let reading = state.clock().read(Instant::now()).await;
    Ok(ScoreboardSnapshot {
        scores: rows
            .into_iter()
            .map(|row| ScoreEntry {
                username: row.username,
                score: row.score,
            })
            .collect(),
        remaining_time: reading.seconds_left,
    })
}

/// Questions visible to the caller, optionally restricted to one category.
pub async fn list_questions(
    state: &SharedState,
    identity: &Identity,
    category: Option<String>,
) -> Result<Vec<QuestionSummary>, ServiceError> {
    ensure_contest_open(state, identity).await?;

    let questions = state.store().list_questions(category).await?;
    Ok(questions.into_iter().map(Into::into).collect())
}

/// Category index with question counts, in seeding order.
pub async fn list_categories(
    state: &SharedState,
    identity: &Identity,
) -> Result<Vec<CategorySummary>, ServiceError> {
    ensure_contest_open(state, identity).await?;

    let questions = state.store().list_questions(None).await?;
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for question in questions {
        *counts.entry(question.category).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(name, questions)| CategorySummary { name, questions })
        .collect())
}

/// The contest clock governs when non-staff callers may browse questions.
async fn ensure_contest_open(state: &SharedState, identity: &Identity) -> Result<(), ServiceError> {
    if identity.is_staff {
        return Ok(());
    }

    let reading = state.clock().read(Instant::now()).await;
    if reading.state != ClockState::Active {
        return Err(ServiceError::InvalidState(
            "the contest is not running".into(),
        ));
    }
    Ok(())
}
