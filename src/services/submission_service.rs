//! Submission arbitration: attempt caps, answer matching, and at-most-once
//! point awards.

use std::time::Instant;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::SubmissionEntity,
    dto::{
        auth::Identity,
        submission::{SubmitAnswerRequest, SubmitAnswerResponse, SubmissionOutcome},
    },
    error::ServiceError,
    state::{
        SharedState,
        clock::ClockState,
        events::{ContestEvent, SubmissionStatus},
    },
};

/// Arbitrate one submitted answer.
///
/// Staff callers bypass the clock gate (so they can vet questions outside the
/// contest window) but not the attempt cap or the award-once rule. The whole
/// check-then-award section for one `(user, question)` key runs under that
/// key's gate, so concurrent duplicate submissions can never award twice;
/// unrelated keys proceed in parallel.
pub async fn submit_answer(
    state: &SharedState,
    identity: &Identity,
    question_id: Uuid,
    request: &SubmitAnswerRequest,
) -> Result<SubmitAnswerResponse, ServiceError> {
    let store = state.store();

    let Some(question) = store.find_question(question_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "question `{question_id}` not found"
        )));
    };

    if !identity.is_staff {
        let reading = state.clock().read(Instant::now()).await;
        if reading.state != ClockState::Active {
            return Ok(outcome_only(SubmissionOutcome::ClockNotRunning));
        }
    }

    let key = (identity.username.clone(), question_id);
    let gate = state.submission_gate(&key);
    let _guard = gate.lock().await;

    let attempts = store
        .count_submissions(identity.username.clone(), question_id)
        .await?;
    if attempts >= u64::from(question.max_attempts) {
        return Ok(outcome_only(SubmissionOutcome::AttemptsExhausted));
    }

    if store
        .exists_correct_submission(identity.username.clone(), question_id)
        .await?
    {
        // No new row and no score change, but viewers still get feedback for
        // the redundant correct answer.
        notify(state, identity, SubmissionStatus::Already);
        return Ok(outcome_only(SubmissionOutcome::AlreadyAwarded));
    }

    let is_correct = answer_matches(&request.answer, &question.answer);
    store
        .create_submission(SubmissionEntity {
            username: identity.username.clone(),
            question_id,
            submitted_answer: request.answer.clone(),
            is_correct,
            timestamp: OffsetDateTime::now_utc(),
        })
        .await?;

    if is_correct {
        store
            .get_or_create_score(identity.username.clone(), identity.is_staff)
            .await?;
        let total = store
            .increment_score(identity.username.clone(), u64::from(question.points))
            .await?;
        info!(
            user = %identity.username,
            question = %question_id,
            points = question.points,
            total,
            "answer accepted"
        );

        notify(state, identity, SubmissionStatus::Correct);
        state.actuator().signal_correct();
        Ok(SubmitAnswerResponse {
            outcome: SubmissionOutcome::Correct,
            awarded: Some(question.points),
        })
    } else {
        notify(state, identity, SubmissionStatus::Incorrect);
        state.actuator().signal_incorrect();
        Ok(outcome_only(SubmissionOutcome::Incorrect))
    }
}

/// Trimmed, case-insensitive answer comparison.
fn answer_matches(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

fn outcome_only(outcome: SubmissionOutcome) -> SubmitAnswerResponse {
    SubmitAnswerResponse {
        outcome,
        awarded: None,
    }
}

fn notify(state: &SharedState, identity: &Identity, status: SubmissionStatus) {
    state.events().publish(ContestEvent::Submission {
        username: identity.username.clone(),
        status,
    });
}
