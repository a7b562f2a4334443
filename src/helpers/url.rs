//! URL generation from named routes
//!
//! The router itself is an external collaborator: anything implementing
//! [`RouteStack`] can assemble URLs. This helper only decides *which* route
//! and *which* parameters to hand over.

use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

use crate::core::error::{Error, Result};
use crate::model::Variables;

/// Route match parameter carrying the module namespace of the controller
pub const MODULE_NAMESPACE: &str = "__NAMESPACE__";
/// Route match parameter carrying the controller name before namespacing
pub const ORIGINAL_CONTROLLER: &str = "__CONTROLLER__";

/// Assembles URLs for named routes
pub trait RouteStack: Send + Sync {
    /// Assemble the URL of the route named in `options["name"]`
    fn assemble(&self, params: &Variables, options: &Variables) -> Result<String>;
}

/// Outcome of routing the current request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMatch {
    params: Variables,
    matched_route_name: Option<String>,
}

impl RouteMatch {
    pub fn new(params: Variables) -> Self {
        Self {
            params,
            matched_route_name: None,
        }
    }

    pub fn set_matched_route_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.matched_route_name = Some(name.into());
        self
    }

    pub fn matched_route_name(&self) -> Option<&str> {
        self.matched_route_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn params(&self) -> &Variables {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn set_param<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Helper generating URLs from route names and parameters
#[derive(Clone, Default)]
pub struct UrlHelper {
    router: Option<Arc<dyn RouteStack>>,
    route_match: Option<RouteMatch>,
}

impl UrlHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_router(router: Arc<dyn RouteStack>) -> Self {
        Self {
            router: Some(router),
            route_match: None,
        }
    }

    pub fn set_router(&mut self, router: Arc<dyn RouteStack>) -> &mut Self {
        self.router = Some(router);
        self
    }

    pub fn set_route_match(&mut self, route_match: RouteMatch) -> &mut Self {
        self.route_match = Some(route_match);
        self
    }

    pub fn route_match(&self) -> Option<&RouteMatch> {
        self.route_match.as_ref()
    }

    /// Generate a URL for `name` (or the matched route when `None`)
    pub fn url(&self, name: Option<&str>, params: Variables, reuse_matched_params: bool) -> Result<String> {
        self.url_with_options(name, params, Variables::new(), reuse_matched_params)
    }

    /// Generate a URL, passing extra assembly options (query, fragment, ...)
    /// through to the router
    pub fn url_with_options(
        &self,
        name: Option<&str>,
        params: Variables,
        mut options: Variables,
        reuse_matched_params: bool,
    ) -> Result<String> {
        let router = self
            .router
            .as_ref()
            .ok_or_else(|| Error::runtime("No RouteStackInterface instance provided"))?;

        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let route_match = self.route_match.as_ref().ok_or_else(|| {
                    Error::runtime("No RouteMatch instance provided")
                })?;
                route_match
                    .matched_route_name()
                    .ok_or_else(|| Error::runtime("RouteMatch does not contain a matched route name"))?
                    .to_string()
            }
        };

        let params = match (&self.route_match, reuse_matched_params) {
            (Some(route_match), true) => merge_matched_params(route_match, params),
            _ => params,
        };

        trace!(route = %name, "Assembling URL");
        options.insert("name".to_string(), Value::String(name));
        router.assemble(&params, &options)
    }
}

/// Matched parameters underneath explicit ones, with the module namespace
/// prefix undone
fn merge_matched_params(route_match: &RouteMatch, params: Variables) -> Variables {
    let mut merged = route_match.params().clone();

    if let Some(controller) = merged.remove(ORIGINAL_CONTROLLER) {
        merged.insert("controller".to_string(), controller);
    }
    merged.remove(MODULE_NAMESPACE);

    merged.extend(params);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Variables {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_prefers_explicit_params() {
        let route_match = RouteMatch::new(vars(json!({"controller": "foo", "action": "index"})));
        let merged = merge_matched_params(&route_match, vars(json!({"action": "bar"})));
        assert_eq!(merged, vars(json!({"controller": "foo", "action": "bar"})));
    }

    #[test]
    fn test_merge_restores_original_controller() {
        let route_match = RouteMatch::new(vars(json!({
            MODULE_NAMESPACE: "App\\Controller",
            ORIGINAL_CONTROLLER: "Rainbow",
            "controller": "App\\Controller\\Rainbow"
        })));
        let merged = merge_matched_params(&route_match, Variables::new());

        assert_eq!(merged.get("controller"), Some(&json!("Rainbow")));
        assert!(!merged.contains_key(MODULE_NAMESPACE));
        assert!(!merged.contains_key(ORIGINAL_CONTROLLER));
    }

    #[test]
    fn test_empty_matched_route_name_counts_as_missing() {
        let mut route_match = RouteMatch::default();
        route_match.set_matched_route_name("");
        assert_eq!(route_match.matched_route_name(), None);
    }
}
