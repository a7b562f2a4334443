//! Error types for template resolvers

use thiserror::Error;

/// Errors a resolver reports when it cannot take part in a lookup.
///
/// A template that simply is not known to a resolver is not an error;
/// see [`Resolver::resolve`](super::Resolver::resolve).
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Template name tried to escape the configured base paths
    #[error("Requested scripts may not include parent directory traversal (\"../\", \"..\\\\\" notation): {0}")]
    ParentTraversal(String),

    /// IO error while probing the filesystem
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
