use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationContext {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationDetail {
    pub message: String,
    pub context: ValidationContext,
}

impl ValidationDetail {
    pub fn required(key: &str) -> Self {
        Self {
            message: format!("\"{}\" is required", key),
            context: ValidationContext {
                key: key.to_string(),
                label: key.to_string(),
            },
        }
    }
}

/// Body of a 400 response: every violation found in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationErrors {
    pub data: Vec<ValidationDetail>,
}
