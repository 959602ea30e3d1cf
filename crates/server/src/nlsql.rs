//! Client for the external NL→SQL inference service.
//!
//! The model is a collaborator, not part of this service: we post the raw
//! question and get back a single SQL string. The call is opaque, with no
//! timeout or cancellation.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Failure of the model stage. Every variant is logged and counted, then
/// control passes to the keyword ladder; it never fails the request.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("no model endpoint is configured")]
    Disabled,
    #[error("could not reach the model endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the model endpoint answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("the model answered with an empty SQL string")]
    EmptySql,
}

/// Translate free text into a single SQL statement.
#[async_trait]
pub trait NlSqlTranslator: Send + Sync {
    async fn translate(&self, query: &str) -> Result<String, TranslatorError>;
}

/// Talks to the fine-tuned model over HTTP.
pub struct HttpModelClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpModelClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct ModelResponse {
    sql: String,
}

#[async_trait]
impl NlSqlTranslator for HttpModelClient {
    async fn translate(&self, query: &str) -> Result<String, TranslatorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslatorError::Status(response.status()));
        }

        let body: ModelResponse = response.json().await?;
        let sql = body.sql.trim().to_string();
        if sql.is_empty() {
            return Err(TranslatorError::EmptySql);
        }
        Ok(sql)
    }
}

/// Stands in when no model endpoint is configured: the model stage always
/// fails over to the keyword ladder.
pub struct DisabledTranslator;

#[async_trait]
impl NlSqlTranslator for DisabledTranslator {
    async fn translate(&self, _query: &str) -> Result<String, TranslatorError> {
        Err(TranslatorError::Disabled)
    }
}
