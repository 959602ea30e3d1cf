//! Configuration for the crewchat service.

pub mod environment;
pub mod error;
pub mod values;
pub mod version1;

pub use error::{MakeRuntimeConfigurationError, ParseConfigurationError};
pub use version1::{
    make_runtime_configuration, parse_configuration, Configuration, ModelSettings,
    ParsedConfiguration, SourcePaths,
};
