mod get_health;
mod get_metrics;
mod post_nl_query;
mod post_query;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::require_service_token;
use crate::state::ServerState;

pub use get_health::get_health;
pub use get_metrics::get_metrics;
pub use post_nl_query::{post_nl_query, NlQueryRequest, NlQueryResponse};
pub use post_query::{post_query, QueryRequest, QueryResponse};

pub fn create_router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/query", post(post_query))
        .route("/nlquery", post(post_nl_query))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_service_token,
        ));

    Router::new()
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .merge(protected)
        .with_state(state)
}
