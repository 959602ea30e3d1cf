//! Transient state used by the server.
//!
//! This is initialized on startup and read-only afterwards.

use std::sync::Arc;

use prometheus::Registry;
use sqlx::sqlite::SqlitePool;
use thiserror::Error;

use crewchat_configuration::Configuration;
use query_engine_execution::metrics::Metrics;
use query_engine_translation::translation::templates::Templates;

use crate::nlsql::{DisabledTranslator, HttpModelClient, NlSqlTranslator};

/// State shared by every request handler.
#[derive(Clone)]
pub struct ServerState {
    pub templates: Arc<Templates>,
    pub pool: SqlitePool,
    pub metrics: Metrics,
    pub metrics_registry: Arc<Registry>,
    pub translator: Arc<dyn NlSqlTranslator>,
    pub service_token: String,
}

impl ServerState {
    /// Wire up the template table, metrics and model client around an
    /// already-ingested dataset pool.
    pub fn initialize(
        configuration: &Configuration,
        pool: SqlitePool,
    ) -> Result<ServerState, InitializationError> {
        let mut metrics_registry = Registry::new();
        let metrics = Metrics::initialize(&mut metrics_registry)
            .map_err(InitializationError::MetricsError)?;

        let translator: Arc<dyn NlSqlTranslator> = match &configuration.model.endpoint {
            Some(endpoint) => Arc::new(HttpModelClient::new(endpoint.clone())),
            None => Arc::new(DisabledTranslator),
        };

        Ok(ServerState {
            templates: Arc::new(Templates::standard()),
            pool,
            metrics,
            metrics_registry: Arc::new(metrics_registry),
            translator,
            service_token: configuration.service_token.clone(),
        })
    }
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
