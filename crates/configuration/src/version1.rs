//! Version 1 of the configuration format, and its elaboration into the
//! runtime configuration.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::environment::Environment;
use crate::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use crate::values::{Secret, ServiceToken};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const DEFAULT_SERVICE_TOKEN_VARIABLE: &str = "CREWCHAT_SERVICE_TOKEN";

/// Initial configuration, as serialized in `configuration.json`: just enough
/// to locate the dataset sources and the collaborating services.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format we are using.
    pub version: Version,
    /// The spreadsheet-derived CSV exports the dataset is built from.
    pub sources: SourcePaths,
    /// Settings for the external NL→SQL inference service.
    #[serde(default)]
    pub model: ModelSettings,
    /// The bearer token required on the query endpoints.
    pub service_token: ServiceToken,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        Self {
            version: Version::This,
            sources: SourcePaths {
                mileage: vec![],
                crew: PathBuf::new(),
                slot: PathBuf::new(),
            },
            model: ModelSettings::default(),
            service_token: ServiceToken(Secret::FromEnvironment {
                variable: DEFAULT_SERVICE_TOKEN_VARIABLE.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// Paths to the three spreadsheet-derived sources merged into the shared
/// dataset at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourcePaths {
    /// Per-depot mileage sheets; concatenated during ingestion.
    pub mileage: Vec<PathBuf>,
    /// Crew biodata, joined on the crew identifier.
    pub crew: PathBuf,
    /// Slot windows, joined on the slot number and headquarters code.
    pub slot: PathBuf,
}

/// Settings for the external NL→SQL inference service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    /// Endpoint accepting `{"query": ...}` and answering `{"sql": ...}`.
    /// When absent the model stage is disabled and free-text requests go
    /// straight to the keyword ladder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// The runtime configuration, with every secret resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub sources: SourcePaths,
    pub model: ModelSettings,
    pub service_token: String,
}

/// Read `configuration.json` from the configuration directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_text =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|error| ParseConfigurationError::IoError {
                path: configuration_file.clone(),
                error,
            })?;

    serde_json::from_str(&configuration_text).map_err(|error| {
        ParseConfigurationError::ParseError {
            path: configuration_file,
            error,
        }
    })
}

/// Elaborate a [`ParsedConfiguration`] into a runtime [`Configuration`],
/// resolving secrets against the given environment.
pub fn make_runtime_configuration(
    parsed: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let service_token = match parsed.service_token.0 {
        Secret::Plain(token) => token,
        Secret::FromEnvironment { variable } => environment
            .read(&variable)
            .map_err(MakeRuntimeConfigurationError::ServiceToken)?,
    };

    Ok(Configuration {
        sources: parsed.sources,
        model: parsed.model,
        service_token,
    })
}
