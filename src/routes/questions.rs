use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::{
        auth::Identity,
        question::{CategorySummary, QuestionListQuery, QuestionSummary},
        submission::{SubmitAnswerRequest, SubmitAnswerResponse},
    },
    error::AppError,
    services::{public_service, submission_service},
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "questions",
    responses(
        (status = 200, description = "Category index", body = [CategorySummary]),
        (status = 409, description = "Contest is not running")
    )
)]
/// List question categories with their question counts.
pub async fn list_categories(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<Vec<CategorySummary>>, AppError> {
    let categories = public_service::list_categories(&state, &identity).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(("category" = Option<String>, Query, description = "Restrict to one category")),
    responses(
        (status = 200, description = "Visible questions", body = [QuestionSummary]),
        (status = 409, description = "Contest is not running")
    )
)]
/// List questions visible to the caller.
pub async fn list_questions(
    State(state): State<SharedState>,
    identity: Identity,
    Query(query): Query<QuestionListQuery>,
) -> Result<Json<Vec<QuestionSummary>>, AppError> {
    let questions = public_service::list_questions(&state, &identity, query.category).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    post,
    path = "/questions/{id}/submit",
    tag = "questions",
    params(("id" = Uuid, Path, description = "Question to answer")),
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Submission arbitrated", body = SubmitAnswerResponse),
        (status = 404, description = "Unknown question")
    )
)]
/// Submit an answer for arbitration.
pub async fn submit_answer(
    State(state): State<SharedState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<SubmitAnswerRequest>>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let response = submission_service::submit_answer(&state, &identity, id, &payload).await?;
    Ok(Json(response))
}

/// Configure the question routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/categories", get(list_categories))
        .route("/questions", get(list_questions))
        .route("/questions/{id}/submit", post(submit_answer))
}
