use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the record store and report the service health.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "record store health check failed");
            HealthResponse::degraded()
        }
    }
}
