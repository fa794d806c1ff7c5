use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{
    dto::auth::Identity,
    error::AppError,
    services::sse_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/sse/scoreboard",
    tag = "sse",
    responses(
        (status = 200, description = "Scoreboard snapshot stream", content_type = "text/event-stream", body = String),
        (status = 401, description = "Caller is not staff")
    )
)]
/// Stream scoreboard snapshots to the staff display, once per tick.
pub async fn scoreboard_stream(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>>, AppError> {
    identity.require_staff().map_err(AppError::from)?;
    info!(user = %identity.username, "new scoreboard SSE connection");
    Ok(sse_service::scoreboard_stream(state))
}

#[utoipa::path(
    get,
    path = "/sse/clock",
    tag = "sse",
    responses((status = 200, description = "Clock snapshot stream", content_type = "text/event-stream", body = String))
)]
/// Stream clock snapshots to every viewer, once per tick.
pub async fn clock_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    info!("new clock SSE connection");
    sse_service::clock_stream(state)
}

#[utoipa::path(
    get,
    path = "/sse/submissions",
    tag = "sse",
    responses((status = 200, description = "Live submission feed", content_type = "text/event-stream", body = String))
)]
/// Stream per-submission notifications to a connected viewer.
pub async fn submission_stream(
    State(state): State<SharedState>,
    identity: Identity,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    info!(user = %identity.username, "new submission SSE connection");
    sse_service::submission_stream(state)
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/sse/scoreboard", get(scoreboard_stream))
        .route("/sse/clock", get(clock_stream))
        .route("/sse/submissions", get(submission_stream))
}
