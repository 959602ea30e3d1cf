use axum::extract::State;
use axum::http::StatusCode;

use crate::error::ServerError;
use crate::state::ServerState;

/// Check that the shared dataset is reachable.
pub async fn get_health(State(state): State<ServerState>) -> Result<StatusCode, ServerError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|error| ServerError::Database(error.to_string()))?;

    Ok(StatusCode::OK)
}
