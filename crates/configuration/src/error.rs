//! Errors that occur while parsing or resolving the configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::environment;

/// The configuration file could not be read or deserialized.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("could not read configuration file {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("could not parse configuration file {path}: {error}")]
    ParseError {
        path: PathBuf,
        error: serde_json::Error,
    },
}

/// The parsed configuration could not be turned into a runtime configuration.
#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("when resolving the service token: {0}")]
    ServiceToken(environment::Error),
}
