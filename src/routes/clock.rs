use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::{
        auth::Identity,
        clock::{ClockStatusResponse, StartClockRequest},
    },
    error::AppError,
    services::clock_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/clock",
    tag = "clock",
    responses((status = 200, description = "Current clock state", body = ClockStatusResponse))
)]
/// Report the derived clock state and the seconds left.
pub async fn clock_status(State(state): State<SharedState>) -> Json<ClockStatusResponse> {
    Json(clock_service::status(&state).await.into())
}

#[utoipa::path(
    post,
    path = "/clock/start",
    tag = "clock",
    request_body = StartClockRequest,
    responses(
        (status = 200, description = "Clock started", body = ClockStatusResponse),
        (status = 401, description = "Caller is not staff")
    )
)]
/// Start a fresh contest clock, replacing any existing one.
pub async fn start_clock(
    State(state): State<SharedState>,
    identity: Identity,
    Valid(Json(payload)): Valid<Json<StartClockRequest>>,
) -> Result<Json<ClockStatusResponse>, AppError> {
    let reading = clock_service::start(&state, &identity, payload.seconds).await?;
    Ok(Json(reading.into()))
}

#[utoipa::path(
    post,
    path = "/clock/pause",
    tag = "clock",
    responses(
        (status = 200, description = "Clock paused", body = ClockStatusResponse),
        (status = 401, description = "Caller is not staff"),
        (status = 409, description = "Clock is not active")
    )
)]
/// Pause the running clock, keeping the time left.
pub async fn pause_clock(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<ClockStatusResponse>, AppError> {
    let reading = clock_service::pause(&state, &identity).await?;
    Ok(Json(reading.into()))
}

#[utoipa::path(
    post,
    path = "/clock/resume",
    tag = "clock",
    responses(
        (status = 200, description = "Clock resumed", body = ClockStatusResponse),
        (status = 401, description = "Caller is not staff"),
        (status = 409, description = "Clock is not paused")
    )
)]
/// Resume a paused clock with its stored remainder.
pub async fn resume_clock(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<ClockStatusResponse>, AppError> {
    let reading = clock_service::resume(&state, &identity).await?;
    Ok(Json(reading.into()))
}

#[utoipa::path(
    post,
    path = "/clock/reset",
    tag = "clock",
    responses(
        (status = 200, description = "Clock destroyed", body = ClockStatusResponse),
        (status = 401, description = "Caller is not staff")
    )
)]
/// Destroy the clock. Succeeds even when no clock exists.
pub async fn reset_clock(
    State(state): State<SharedState>,
    identity: Identity,
) -> Result<Json<ClockStatusResponse>, AppError> {
    let reading = clock_service::reset(&state, &identity).await?;
    Ok(Json(reading.into()))
}

/// Configure the clock routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/clock", get(clock_status))
        .route("/clock/start", post(start_clock))
        .route("/clock/pause", post(pause_clock))
        .route("/clock/resume", post(resume_clock))
        .route("/clock/reset", post(reset_clock))
}
