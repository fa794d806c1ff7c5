/// Fire-and-forget bridge to the LED contest indicator.
pub mod actuator;
/// Staff operations against the contest clock.
pub mod clock_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read-only projections for status routes and snapshot streams.
pub mod public_service;
/// Server-Sent Events stream construction.
pub mod sse_service;
/// Submission arbitration and point awards.
pub mod submission_service;
