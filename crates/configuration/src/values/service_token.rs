use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;

/// The bearer token request handlers require on the query endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ServiceToken(pub Secret);

impl From<String> for ServiceToken {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ServiceToken {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
