//! Navigation page filtering against an ACL
//!
//! The ACL itself is an external collaborator behind the [`Acl`] trait. The
//! helper decides which pages are shown: invisible pages are dropped unless
//! `render_invisible` is set, and pages carrying a resource or privilege are
//! checked against the ACL for the current role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

/// Access control list queried by navigation helpers
pub trait Acl: Send + Sync {
    fn has_resource(&self, resource: &str) -> bool;

    fn is_allowed(&self, role: Option<&str>, resource: Option<&str>, privilege: Option<&str>) -> bool;
}

/// A navigation entry and its sub-pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub label: String,
    pub uri: Option<String>,
    pub visible: bool,
    pub resource: Option<String>,
    pub privilege: Option<String>,
    pub pages: Vec<Page>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            label: String::new(),
            uri: None,
            visible: true,
            resource: None,
            privilege: None,
            pages: Vec::new(),
        }
    }
}

impl Page {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_resource<S: Into<String>>(mut self, resource: S) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_privilege<S: Into<String>>(mut self, privilege: S) -> Self {
        self.privilege = Some(privilege.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }
}

#[derive(Default)]
struct DefaultsInner {
    acl: Option<Arc<dyn Acl>>,
    role: Option<String>,
}

/// ACL and role shared by every navigation helper holding this handle.
///
/// Clones share state; setting a default through one clone is visible to all.
#[derive(Clone, Default)]
pub struct NavigationDefaults {
    inner: Arc<RwLock<DefaultsInner>>,
}

impl NavigationDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_acl(&self, acl: Option<Arc<dyn Acl>>) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).acl = acl;
    }

    pub fn acl(&self) -> Option<Arc<dyn Acl>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .acl
            .clone()
    }

    pub fn set_role(&self, role: Option<String>) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).role = role;
    }

    pub fn role(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .role
            .clone()
    }
}

impl fmt::Debug for NavigationDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("NavigationDefaults")
            .field("has_acl", &inner.acl.is_some())
            .field("role", &inner.role)
            .finish()
    }
}

/// Filters navigation pages by visibility and ACL
#[derive(Clone)]
pub struct NavigationHelper {
    defaults: NavigationDefaults,
    acl: Option<Arc<dyn Acl>>,
    role: Option<String>,
    use_acl: bool,
    render_invisible: bool,
}

impl NavigationHelper {
    pub fn new(defaults: NavigationDefaults) -> Self {
        Self {
            defaults,
            acl: None,
            role: None,
            use_acl: true,
            render_invisible: false,
        }
    }

    pub fn defaults(&self) -> &NavigationDefaults {
        &self.defaults
    }

    pub fn set_acl(&mut self, acl: Option<Arc<dyn Acl>>) -> &mut Self {
        self.acl = acl;
        self
    }

    /// The helper's own ACL, falling back to the shared default
    pub fn acl(&self) -> Option<Arc<dyn Acl>> {
        self.acl.clone().or_else(|| self.defaults.acl())
    }

    pub fn has_acl(&self) -> bool {
        self.acl.is_some() || self.defaults.acl().is_some()
    }

    pub fn set_role<S: Into<String>>(&mut self, role: Option<S>) -> &mut Self {
        self.role = role.map(Into::into);
        self
    }

    /// The helper's own role, falling back to the shared default
    pub fn role(&self) -> Option<String> {
        self.role.clone().or_else(|| self.defaults.role())
    }

    pub fn has_role(&self) -> bool {
        self.role.is_some() || self.defaults.role().is_some()
    }

    pub fn set_use_acl(&mut self, use_acl: bool) -> &mut Self {
        self.use_acl = use_acl;
        self
    }

    pub fn use_acl(&self) -> bool {
        self.use_acl
    }

    pub fn set_render_invisible(&mut self, render_invisible: bool) -> &mut Self {
        self.render_invisible = render_invisible;
        self
    }

    pub fn render_invisible(&self) -> bool {
        self.render_invisible
    }

    /// Whether `page` should be shown
    pub fn accept(&self, page: &Page) -> bool {
        if !page.visible && !self.render_invisible {
            trace!(label = %page.label, "Rejecting invisible page");
            return false;
        }
        if self.use_acl && !self.accept_acl(page) {
            debug!(
                label = %page.label,
                resource = ?page.resource,
                privilege = ?page.privilege,
                "Page rejected by ACL"
            );
            return false;
        }
        true
    }

    /// Accepted pages, depth-first; a rejected page takes its sub-pages
    /// with it
    pub fn accepted_pages(&self, pages: &[Page]) -> Vec<Page> {
        pages
            .iter()
            .filter(|page| self.accept(page))
            .map(|page| Page {
                pages: self.accepted_pages(&page.pages),
                ..page.clone()
            })
            .collect()
    }

    fn accept_acl(&self, page: &Page) -> bool {
        let Some(acl) = self.acl() else {
            return true;
        };
        let resource = page.resource.as_deref();
        let privilege = page.privilege.as_deref();
        if resource.is_none() && privilege.is_none() {
            return true;
        }

        let resource_known = resource.is_some_and(|r| acl.has_resource(r));
        let role = self.role();
        resource_known && acl.is_allowed(role.as_deref(), resource, privilege)
    }
}

impl fmt::Debug for NavigationHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationHelper")
            .field("defaults", &self.defaults)
            .field("has_acl", &self.acl.is_some())
            .field("role", &self.role)
            .field("use_acl", &self.use_acl)
            .field("render_invisible", &self.render_invisible)
            .finish()
    }
}
