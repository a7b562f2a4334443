//! Priority-ordered chain of resolvers

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

use crate::resolver::{LookupFailure, Resolver, ResolverError, TemplateSource};

/// Priority used by [`AggregateResolver::attach`]
pub const DEFAULT_PRIORITY: i32 = 1;

struct ResolverEntry {
    resolver: Arc<dyn Resolver>,
    priority: i32,
}

#[derive(Default)]
struct LastLookup {
    resolver: Option<Arc<dyn Resolver>>,
    failure: Option<LookupFailure>,
}

/// Tries attached resolvers from highest to lowest priority and returns the
/// first hit. Resolvers of equal priority are tried in attach order.
///
/// The outcome of the most recent lookup (which resolver answered, or why
/// nothing did) is kept on the instance and reset at the start of every
/// lookup.
#[derive(Default)]
pub struct AggregateResolver {
    // Kept sorted by descending priority; equal priorities stay in attach order.
    entries: Vec<ResolverEntry>,
    last_lookup: Mutex<LastLookup>,
}

impl AggregateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a resolver with the default priority
    pub fn attach(&mut self, resolver: Arc<dyn Resolver>) -> &mut Self {
        self.attach_with_priority(resolver, DEFAULT_PRIORITY)
    }

    /// Attach a resolver; higher priorities are consulted first
    pub fn attach_with_priority(&mut self, resolver: Arc<dyn Resolver>, priority: i32) -> &mut Self {
        let position = self.entries.partition_point(|entry| entry.priority >= priority);
        trace!(kind = resolver.kind(), priority, position, "Attaching resolver");
        self.entries
            .insert(position, ResolverEntry { resolver, priority });
        self
    }

    /// Number of attached resolvers
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolvers in lookup order
    pub fn resolvers(&self) -> impl Iterator<Item = &Arc<dyn Resolver>> {
        self.entries.iter().map(|entry| &entry.resolver)
    }

    /// The resolver that answered the most recent lookup, if any
    pub fn last_successful_resolver(&self) -> Option<Arc<dyn Resolver>> {
        self.state().resolver.clone()
    }

    /// Why the most recent lookup failed; `None` after a success or before
    /// any lookup
    pub fn last_lookup_failure(&self) -> Option<LookupFailure> {
        self.state().failure
    }

    fn state(&self) -> MutexGuard<'_, LastLookup> {
        self.last_lookup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Resolver for AggregateResolver {
    fn resolve(&self, name: &str) -> Result<Option<TemplateSource>, ResolverError> {
        let mut state = self.state();
        *state = LastLookup::default();

        if self.entries.is_empty() {
            debug!(template = %name, "No resolvers attached");
            state.failure = Some(LookupFailure::NoResolvers);
            return Ok(None);
        }

        let mut saw_invalid = false;
        for entry in &self.entries {
            match entry.resolver.resolve(name) {
                Ok(Some(source)) => {
                    debug!(
                        template = %name,
                        kind = entry.resolver.kind(),
                        priority = entry.priority,
                        source = %source,
                        "Template resolved"
                    );
                    state.resolver = Some(Arc::clone(&entry.resolver));
                    return Ok(Some(source));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(template = %name, kind = entry.resolver.kind(), error = %e, "Resolver failed");
                    saw_invalid = true;
                }
            }
        }

        let failure = if saw_invalid {
            LookupFailure::InvalidResolver
        } else {
            LookupFailure::NotFound
        };
        debug!(template = %name, %failure, "Template could not be resolved");
        state.failure = Some(failure);
        Ok(None)
    }

    fn kind(&self) -> &'static str {
        "aggregate"
    }

    fn last_lookup_failure(&self) -> Option<LookupFailure> {
        self.state().failure
    }
}

impl fmt::Debug for AggregateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateResolver")
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|entry| (entry.resolver.kind(), entry.priority))
                    .collect::<Vec<_>>(),
            )
            .field("last_lookup_failure", &self.last_lookup_failure())
            .finish()
    }
}
