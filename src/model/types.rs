//! Shared model types

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Ordered variable mapping carried by a view model
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Flavour of a view model, used to pick a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Template-backed HTML model
    #[default]
    View,
    /// JSON payload model
    Json,
    /// Console output model
    Console,
}

impl ModelKind {
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::View => "view",
            ModelKind::Json => "json",
            ModelKind::Console => "console",
        }
    }

    pub fn all() -> &'static [ModelKind] {
        &[ModelKind::View, ModelKind::Json, ModelKind::Console]
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ModelKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" | "html" => Ok(ModelKind::View),
            "json" => Ok(ModelKind::Json),
            "console" => Ok(ModelKind::Console),
            _ => Err(ModelKindParseError::Unknown(s.to_string())),
        }
    }
}

/// Error type for model kind parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ModelKindParseError {
    Unknown(String),
}

impl Display for ModelKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKindParseError::Unknown(kind) => write!(
                f,
                "Unknown model kind: '{}'. Available kinds: {}",
                kind,
                ModelKind::all()
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl std::error::Error for ModelKindParseError {}
