//! View layer configuration
//!
//! Loaded from TOML, or YAML when the file ends in `.yml`/`.yaml`:
//!
//! ```toml
//! default_suffix = "html"
//! doctype = "HTML5"
//! template_path_stack = ["views"]
//!
//! [template_map]
//! "layout/layout" = "views/layout.html"
//!
//! [json]
//! merge_unnamed_children = true
//! jsonp_callback = "callback"
//!
//! [server_url]
//! use_proxy = false
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::helpers::{Doctype, ServerEnv, ServerUrl};
use crate::renderer::{HtmlRenderer, JsonRenderer};
use crate::resolver::{AggregateResolver, DEFAULT_SUFFIX, TemplateMapResolver, TemplatePathStack};
use crate::view::View;

/// Directory under the platform config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "viewkit";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Template name to file path
    pub template_map: BTreeMap<String, PathBuf>,
    /// Directories searched for templates; later entries win
    pub template_path_stack: Vec<PathBuf>,
    pub default_suffix: String,
    pub doctype: Doctype,
    pub json: JsonConfig,
    pub server_url: ServerUrlConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            template_map: BTreeMap::new(),
            template_path_stack: Vec::new(),
            default_suffix: DEFAULT_SUFFIX.to_string(),
            doctype: Doctype::default(),
            json: JsonConfig::default(),
            server_url: ServerUrlConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub merge_unnamed_children: bool,
    pub jsonp_callback: Option<String>,
    pub pretty_print: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerUrlConfig {
    pub use_proxy: bool,
}

impl ViewConfig {
    /// `<config dir>/viewkit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a configuration file, picking the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        let config = Self::parse(&content, path)?;
        info!(path = %path.display(), "Loaded view configuration");
        Ok(config)
    }

    /// Load `path` when given, else the default location; a missing default
    /// file yields the default configuration
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let config = match extension.as_deref() {
            Some("yml") | Some("yaml") => serde_yaml::from_str(content)?,
            _ => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Paths in the configuration are taken relative to `base`
    pub fn resolve_relative_to(&mut self, base: &Path) -> &mut Self {
        for path in self.template_map.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        for path in &mut self.template_path_stack {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Aggregate of the template map followed by the path stack
    pub fn build_resolver(&self) -> AggregateResolver {
        let map: TemplateMapResolver = self.template_map.clone().into_iter().collect();
        let mut stack = TemplatePathStack::new();
        stack
            .add_paths(self.template_path_stack.iter().cloned())
            .set_default_suffix(&self.default_suffix);

        let mut aggregate = AggregateResolver::new();
        aggregate.attach(Arc::new(map)).attach(Arc::new(stack));
        debug!(
            mapped = self.template_map.len(),
            paths = self.template_path_stack.len(),
            "Built template resolver"
        );
        aggregate
    }

    pub fn build_json_renderer(&self) -> JsonRenderer {
        let mut renderer = JsonRenderer::new();
        renderer
            .set_merge_unnamed_children(self.json.merge_unnamed_children)
            .set_pretty_print(self.json.pretty_print);
        if let Some(callback) = &self.json.jsonp_callback {
            renderer.set_jsonp_callback(callback);
        }
        renderer
    }

    pub fn build_server_url(&self, env: ServerEnv) -> ServerUrl {
        let mut server_url = ServerUrl::new(env);
        server_url.set_use_proxy(self.server_url.use_proxy);
        server_url
    }

    /// A view wired with every renderer this configuration describes
    pub fn build_view(&self, env: ServerEnv) -> View {
        let mut html = HtmlRenderer::new(Arc::new(self.build_resolver()));
        html.set_doctype(self.doctype)
            .set_server_url(self.build_server_url(env));

        let mut view = View::with_html(html);
        *view.json_renderer_mut() = self.build_json_renderer();
        view
    }
}
