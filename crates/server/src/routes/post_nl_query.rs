use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use query_engine_execution::query::{execute, execute_raw, RowMap};
use query_engine_translation::translation::fallback;
use query_engine_translation::translation::query::translate;

use crate::error::ServerError;
use crate::state::ServerState;

/// A free-text question plus the filter values the ladder needs.
#[derive(Debug, Clone, Deserialize)]
pub struct NlQueryRequest {
    pub crew_id: String,
    #[serde(default)]
    pub month: Option<String>,
    pub query: String,
}

/// Tagged by the pipeline stage that produced the answer.
#[derive(Debug, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum NlQueryResponse {
    /// The model produced SQL that executed successfully.
    Model { sql: String, rows: Vec<RowMap> },
    /// The model stage failed and a ladder keyword matched.
    Fallback {
        domain: String,
        sub: String,
        keyword: String,
        rows: Vec<RowMap>,
    },
    /// Neither stage could interpret the question. Not an error.
    Unmatched { message: String },
}

/// The two-stage resolution pipeline: model first, keyword ladder second.
pub async fn post_nl_query(
    State(state): State<ServerState>,
    Json(request): Json<NlQueryRequest>,
) -> Result<Json<NlQueryResponse>, ServerError> {
    if request.crew_id.is_empty() || request.query.is_empty() {
        return Err(ServerError::MissingField("crew_id and query are required"));
    }

    // Model stage. A failure anywhere in it, translation or execution of the
    // generated SQL, falls through to the ladder without failing the request.
    let model_failure = match state.translator.translate(&request.query).await {
        Ok(sql) => match execute_raw(&state.pool, &state.metrics, &sql).await {
            Ok(rows) => return Ok(Json(NlQueryResponse::Model { sql, rows })),
            Err(error) => error.to_string(),
        },
        Err(error) => error.to_string(),
    };
    state.metrics.record_nl_model_error();
    tracing::warn!(
        error = %model_failure,
        "model stage failed, trying the keyword ladder"
    );

    match fallback::route(&request.query) {
        Some(matched) => {
            let plan = translate(
                &state.templates,
                matched.domain,
                matched.sub,
                &request.crew_id,
                request.month.as_deref(),
            )?;
            let rows = execute(&state.pool, &state.metrics, &plan).await?;
            Ok(Json(NlQueryResponse::Fallback {
                domain: matched.domain.to_string(),
                sub: matched.sub.to_string(),
                keyword: matched.keyword.to_string(),
                rows,
            }))
        }
        None => Ok(Json(NlQueryResponse::Unmatched {
            message: "Could not interpret query. Try rephrasing or use menu options.".to_string(),
        })),
    }
}
