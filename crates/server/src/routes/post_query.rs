use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use query_engine_execution::query::{execute, RowMap};
use query_engine_translation::translation::query::translate;

use crate::error::ServerError;
use crate::state::ServerState;

/// A fixed-menu selection: domain and sub-option codes plus filter values.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub crew_id: String,
    #[serde(default)]
    pub month: Option<String>,
    pub domain: String,
    pub sub: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub rows: Vec<RowMap>,
}

pub async fn post_query(
    State(state): State<ServerState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ServerError> {
    let plan = translate(
        &state.templates,
        &request.domain,
        &request.sub,
        &request.crew_id,
        request.month.as_deref(),
    )?;

    let rows = execute(&state.pool, &state.metrics, &plan).await?;
    Ok(Json(QueryResponse { rows }))
}
