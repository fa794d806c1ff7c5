use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for CTF Arena Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::clock::clock_status,
        crate::routes::clock::start_clock,
        crate::routes::clock::pause_clock,
        crate::routes::clock::resume_clock,
        crate::routes::clock::reset_clock,
        crate::routes::questions::list_categories,
        crate::routes::questions::list_questions,
        crate::routes::questions::submit_answer,
        crate::routes::sse::scoreboard_stream,
        crate::routes::sse::clock_stream,
        crate::routes::sse::submission_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::clock::StartClockRequest,
            crate::dto::clock::ClockStatusResponse,
            crate::dto::question::QuestionSummary,
            crate::dto::question::CategorySummary,
            crate::dto::submission::SubmitAnswerRequest,
            crate::dto::submission::SubmitAnswerResponse,
            crate::dto::submission::SubmissionOutcome,
            crate::dto::sse::ScoreboardSnapshot,
            crate::dto::sse::ScoreEntry,
            crate::dto::sse::SubmissionNotice,
            crate::state::clock::ClockState,
            crate::state::events::SubmissionStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "clock", description = "Contest clock control and status"),
        (name = "questions", description = "Question browsing and answer submission"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;
