//! Value types produced by resolvers

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// Where a resolved template lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Template file on disk
    Path(PathBuf),
    /// Template text held in memory
    Inline(String),
}

impl TemplateSource {
    /// Create an in-memory template source
    pub fn inline<S: Into<String>>(content: S) -> Self {
        Self::Inline(content.into())
    }

    /// Filesystem path, if this source is a file
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            TemplateSource::Path(path) => Some(path),
            TemplateSource::Inline(_) => None,
        }
    }

    /// Load the template text
    pub fn read(&self) -> std::io::Result<String> {
        match self {
            TemplateSource::Path(path) => std::fs::read_to_string(path),
            TemplateSource::Inline(content) => Ok(content.clone()),
        }
    }
}

impl From<&str> for TemplateSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for TemplateSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for TemplateSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for TemplateSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Path(path) => write!(f, "{}", path.display()),
            TemplateSource::Inline(_) => write!(f, "<inline template>"),
        }
    }
}

/// Why the last aggregate lookup produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupFailure {
    /// Resolvers were attached but none knew the template
    NotFound,
    /// The aggregate had no resolvers attached
    NoResolvers,
    /// At least one attached resolver failed and none succeeded
    InvalidResolver,
}

impl LookupFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupFailure::NotFound => "not found",
            LookupFailure::NoResolvers => "no resolvers",
            LookupFailure::InvalidResolver => "invalid resolver",
        }
    }
}

impl Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
