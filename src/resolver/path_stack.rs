//! Filesystem-backed template resolver
//!
//! Searches a stack of base directories for a template file. Paths are
//! searched last-in, first-out, so directories added later override
//! templates shipped by directories added earlier.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

use crate::resolver::{Resolver, ResolverError, TemplateSource};

/// Suffix appended to template names that carry no extension
pub const DEFAULT_SUFFIX: &str = "html";

/// Resolves template names against a LIFO stack of directories
#[derive(Debug, Clone)]
pub struct TemplatePathStack {
    paths: Vec<PathBuf>,
    default_suffix: String,
    lfi_protection: bool,
}

impl TemplatePathStack {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            default_suffix: DEFAULT_SUFFIX.to_string(),
            lfi_protection: true,
        }
    }

    /// Push a base directory on top of the stack
    pub fn add_path<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.paths.push(path.into());
        self
    }

    /// Push several base directories, in order
    pub fn add_paths<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.add_path(path);
        }
        self
    }

    pub fn clear_paths(&mut self) -> &mut Self {
        self.paths.clear();
        self
    }

    /// Base directories in search order (most recently added first)
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().rev().map(PathBuf::as_path)
    }

    pub fn set_default_suffix<S: AsRef<str>>(&mut self, suffix: S) -> &mut Self {
        self.default_suffix = suffix.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn default_suffix(&self) -> &str {
        &self.default_suffix
    }

    /// Toggle rejection of `..` components in template names
    pub fn set_lfi_protection(&mut self, enabled: bool) -> &mut Self {
        self.lfi_protection = enabled;
        self
    }

    pub fn is_lfi_protection_on(&self) -> bool {
        self.lfi_protection
    }

    fn file_name_for(&self, name: &str) -> PathBuf {
        let candidate = PathBuf::from(name);
        if candidate.extension().is_some() || self.default_suffix.is_empty() {
            candidate
        } else {
            PathBuf::from(format!("{name}.{}", self.default_suffix))
        }
    }
}

impl Default for TemplatePathStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for TemplatePathStack {
    fn resolve(&self, name: &str) -> Result<Option<TemplateSource>, ResolverError> {
        if self.paths.is_empty() {
            debug!(template = %name, "Template path stack has no paths");
            return Ok(None);
        }

        let file_name = self.file_name_for(name);

        if self.lfi_protection
            && file_name
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ResolverError::ParentTraversal(name.to_string()));
        }

        for base in self.paths() {
            let candidate = base.join(&file_name);
            trace!(candidate = %candidate.display(), "Probing template path");
            if candidate.is_file() {
                let resolved = candidate.canonicalize()?;
                debug!(template = %name, path = %resolved.display(), "Resolved template from path stack");
                return Ok(Some(TemplateSource::Path(resolved)));
            }
        }

        Ok(None)
    }

    fn kind(&self) -> &'static str {
        "path_stack"
    }
}
