//! Mapping service failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use query_engine_execution::error::Error as ExecutionError;
use query_engine_translation::translation::error::Error as TranslationError;

/// Everything a request handler can fail with.
pub enum ServerError {
    /// Bad menu selection or missing month; the message names the field.
    Translation(TranslationError),
    /// A required request field was absent or empty.
    MissingField(&'static str),
    /// Missing or wrong bearer token.
    Unauthorized,
    /// The database rejected the finalized query.
    Database(String),
    Internal(String),
}

#[derive(Serialize)]
struct JsonErrorResponse {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Translation(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            ServerError::MissingField(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "missing or invalid bearer token".to_string(),
            ),
            ServerError::Database(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ServerError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!("returning error: {message} with status code: {status}");
        (status, Json(JsonErrorResponse { message })).into_response()
    }
}

impl From<TranslationError> for ServerError {
    fn from(error: TranslationError) -> Self {
        ServerError::Translation(error)
    }
}

impl From<ExecutionError> for ServerError {
    fn from(error: ExecutionError) -> Self {
        ServerError::Database(error.to_string())
    }
}
