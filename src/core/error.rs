//! Error handling for the viewkit rendering library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Template lookups that simply miss are *not* errors: resolvers return
//! `Ok(None)` and the aggregate records a [`LookupFailure`] instead.
//!
//! # Examples
//!
//! ```
//! use viewkit::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::domain("both a scalar and extra variables were given"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```
//!
//! [`LookupFailure`]: crate::resolver::LookupFailure

use thiserror::Error;

use crate::resolver::{LookupFailure, ResolverError};

/// Result type for viewkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for viewkit operations
#[derive(Debug, Error)]
pub enum Error {
    /// A renderer was called with an argument combination it cannot handle
    #[error("Domain error: {0}")]
    Domain(String),

    /// A helper was invoked without the collaborators it depends on
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// An argument had the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No resolver produced a source for the template
    #[error("Unable to render template \"{name}\"; resolver could not resolve to a file ({reason})")]
    TemplateNotFound { name: String, reason: String },

    /// Template engine failed while rendering
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Resolver error surfaced outside of an aggregate lookup
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),
}

impl Error {
    /// Create a new domain error
    pub fn domain<S: Into<String>>(msg: S) -> Self {
        Self::Domain(msg.into())
    }

    /// Create a new runtime error
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        Self::Runtime(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a template-not-found error from an aggregate lookup outcome
    pub fn template_not_found<S: Into<String>>(name: S, failure: Option<LookupFailure>) -> Self {
        let reason = failure
            .map(|f| f.to_string())
            .unwrap_or_else(|| "not found".to_string());
        Self::TemplateNotFound {
            name: name.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_domain_creation() {
        let error = Error::domain("cannot render");
        assert!(matches!(error, Error::Domain(_)));
        assert_eq!(error.to_string(), "Domain error: cannot render");
    }

    #[test]
    fn test_error_runtime_creation() {
        let error = Error::runtime("No RouteMatch instance provided");
        assert!(matches!(error, Error::Runtime(_)));
        assert_eq!(
            error.to_string(),
            "Runtime error: No RouteMatch instance provided"
        );
    }

    #[test]
    fn test_error_template_not_found() {
        let error = Error::template_not_found("layout/layout", Some(LookupFailure::NoResolvers));
        let message = error.to_string();
        assert!(message.contains("layout/layout"));
        assert!(message.contains("no resolvers"));

        let error = Error::template_not_found("index", None);
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json");
        let error: Error = json_result.unwrap_err().into();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_from_resolver_error() {
        let error: Error = ResolverError::ParentTraversal("../secret".to_string()).into();
        assert!(matches!(error, Error::Resolver(_)));
        assert!(error.to_string().contains("../secret"));
    }
}
