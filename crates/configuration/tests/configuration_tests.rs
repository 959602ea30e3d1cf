//! Tests for configuration parsing and secret resolution.

use similar_asserts::assert_eq;

use crewchat_configuration::environment::FixedEnvironment;
use crewchat_configuration::values::{Secret, ServiceToken};
use crewchat_configuration::version1::DEFAULT_SERVICE_TOKEN_VARIABLE;
use crewchat_configuration::{
    make_runtime_configuration, parse_configuration, MakeRuntimeConfigurationError,
    ParseConfigurationError, ParsedConfiguration,
};

fn sample_configuration() -> serde_json::Value {
    serde_json::json!({
        "version": "1",
        "sources": {
            "mileage": ["data/mileage_tdl.csv", "data/mileage_bsp.csv"],
            "crew": "data/crew_biodata.csv",
            "slot": "data/slot_data.csv"
        },
        "model": {
            "endpoint": "http://localhost:9009/nl2sql"
        },
        "serviceToken": { "variable": "CREWCHAT_SERVICE_TOKEN" }
    })
}

#[test]
fn parses_the_sample_configuration() {
    let parsed: ParsedConfiguration = serde_json::from_value(sample_configuration()).unwrap();

    assert_eq!(parsed.sources.mileage.len(), 2);
    assert_eq!(
        parsed.model.endpoint.as_deref(),
        Some("http://localhost:9009/nl2sql")
    );
    assert_eq!(
        parsed.service_token,
        ServiceToken(Secret::FromEnvironment {
            variable: DEFAULT_SERVICE_TOKEN_VARIABLE.into(),
        })
    );
}

#[test]
fn configuration_round_trips_through_json() {
    let parsed: ParsedConfiguration = serde_json::from_value(sample_configuration()).unwrap();
    let serialized = serde_json::to_value(&parsed).unwrap();
    assert_eq!(serialized, sample_configuration());
}

#[test]
fn service_token_resolves_from_the_environment() {
    let parsed: ParsedConfiguration = serde_json::from_value(sample_configuration()).unwrap();

    let environment = FixedEnvironment::from([(
        DEFAULT_SERVICE_TOKEN_VARIABLE.into(),
        "sesame".to_string(),
    )]);

    let configuration = make_runtime_configuration(parsed, environment).unwrap();
    assert_eq!(configuration.service_token, "sesame");
}

#[test]
fn missing_token_variable_is_an_error() {
    let parsed: ParsedConfiguration = serde_json::from_value(sample_configuration()).unwrap();

    let err = make_runtime_configuration(parsed, FixedEnvironment::default()).unwrap_err();
    assert!(matches!(
        err,
        MakeRuntimeConfigurationError::ServiceToken(_)
    ));
}

#[test]
fn plain_token_needs_no_environment() {
    let mut parsed: ParsedConfiguration =
        serde_json::from_value(sample_configuration()).unwrap();
    parsed.service_token = "inline-token".into();

    let configuration = make_runtime_configuration(parsed, FixedEnvironment::default()).unwrap();
    assert_eq!(configuration.service_token, "inline-token");
}

#[tokio::test]
async fn missing_configuration_file_is_an_io_error() {
    let directory = tempfile::tempdir().unwrap();
    let err = parse_configuration(directory.path()).await.unwrap_err();
    assert!(matches!(err, ParseConfigurationError::IoError { .. }));
}
