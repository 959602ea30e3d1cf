//! Bearer-token screening for the query endpoints.
//!
//! Verification only; issuing tokens is someone else's job. The expected
//! token comes from configuration and never changes while running.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ServerError;
use crate::state::ServerState;

pub async fn require_service_token<B>(
    State(state): State<ServerState>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, ServerError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map_or(false, |token| token == state.service_token);

    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(ServerError::Unauthorized)
    }
}
