use axum::extract::State;
use prometheus::{Encoder, TextEncoder};

use crate::error::ServerError;
use crate::state::ServerState;

/// Prometheus text exposition of the service counters.
pub async fn get_metrics(State(state): State<ServerState>) -> Result<String, ServerError> {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics_registry.gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|error| ServerError::Internal(error.to_string()))?;
    String::from_utf8(buffer).map_err(|error| ServerError::Internal(error.to_string()))
}
