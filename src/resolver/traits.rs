//! Resolver trait shared by every template source strategy

use crate::resolver::{LookupFailure, ResolverError, TemplateSource};

/// Maps a template name to a template source
pub trait Resolver: Send + Sync {
    /// Resolve a template name.
    ///
    /// `Ok(None)` means this resolver does not know the template; `Err` means
    /// the resolver itself is unusable for this lookup.
    fn resolve(&self, name: &str) -> Result<Option<TemplateSource>, ResolverError>;

    /// Short identifier used in log output
    fn kind(&self) -> &'static str {
        "resolver"
    }

    /// Why the most recent lookup missed, for resolvers that track it
    fn last_lookup_failure(&self) -> Option<LookupFailure> {
        None
    }
}
