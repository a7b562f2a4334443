//! Tera-backed HTML renderer
//!
//! Template names are resolved through a [`Resolver`], loaded into a fresh
//! Tera instance and rendered with the model's variables. Autoescaping is on,
//! so captured child output has to be emitted with `| safe` in layouts.
//!
//! View helpers are exposed to templates as Tera functions:
//! `server_url(path=..., current=true)`, `url(name=..., params=..., reuse=true)`,
//! `doctype()`, `html_tag()` and `navigation()`.

use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{debug, trace};

use crate::core::error::{Error, Result};
use crate::helpers::{Doctype, HtmlTag, NavigationHelper, Page, RequestPath, ServerUrl, UrlHelper};
use crate::model::Variables;
use crate::renderer::{Renderable, Renderer};
use crate::resolver::Resolver;

/// Renders view models through resolved Tera templates
#[derive(Clone)]
pub struct HtmlRenderer {
    resolver: Arc<dyn Resolver>,
    server_url: Option<ServerUrl>,
    url_helper: Option<UrlHelper>,
    html_tag: HtmlTag,
    navigation: Option<(NavigationHelper, Vec<Page>)>,
}

impl HtmlRenderer {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            server_url: None,
            url_helper: None,
            html_tag: HtmlTag::default(),
            navigation: None,
        }
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }

    pub fn set_resolver(&mut self, resolver: Arc<dyn Resolver>) -> &mut Self {
        self.resolver = resolver;
        self
    }

    pub fn set_server_url(&mut self, server_url: ServerUrl) -> &mut Self {
        self.server_url = Some(server_url);
        self
    }

    pub fn set_url_helper(&mut self, url_helper: UrlHelper) -> &mut Self {
        self.url_helper = Some(url_helper);
        self
    }

    pub fn set_doctype(&mut self, doctype: Doctype) -> &mut Self {
        self.html_tag.set_doctype(doctype);
        self
    }

    pub fn html_tag(&self) -> &HtmlTag {
        &self.html_tag
    }

    pub fn html_tag_mut(&mut self) -> &mut HtmlTag {
        &mut self.html_tag
    }

    /// Pages offered to templates through `navigation()`, filtered by `helper`
    pub fn set_navigation(&mut self, helper: NavigationHelper, pages: Vec<Page>) -> &mut Self {
        self.navigation = Some((helper, pages));
        self
    }

    fn load_template(&self, name: &str) -> Result<String> {
        let source = self
            .resolver
            .resolve(name)?
            .ok_or_else(|| Error::template_not_found(name, self.resolver.last_lookup_failure()))?;
        trace!(template = %name, source = %source, "Loading template");
        Ok(source.read()?)
    }

    fn engine(&self, name: &str, content: &str) -> Result<Tera> {
        let mut tera = Tera::default();
        // Template names rarely carry an extension; escape everything.
        tera.autoescape_on(vec![""]);
        tera.add_raw_template(name, content)
            .map_err(|e| Error::Render(format!("Failed to add template '{}': {}", name, error_chain(&e))))?;
        self.register_helpers(&mut tera);
        Ok(tera)
    }

    fn register_helpers(&self, tera: &mut Tera) {
        if let Some(server_url) = self.server_url.clone() {
            tera.register_function("server_url", move |args: &HashMap<String, Value>| {
                let path = match (args.get("path").and_then(Value::as_str), args.get("current")) {
                    (Some(path), _) => RequestPath::from(path),
                    (None, Some(Value::Bool(current))) => RequestPath::from(*current),
                    (None, _) => RequestPath::None,
                };
                Ok(Value::String(server_url.url(path)))
            });
        }

        if let Some(url_helper) = self.url_helper.clone() {
            tera.register_function("url", move |args: &HashMap<String, Value>| {
                let name = args.get("name").and_then(Value::as_str);
                let params = object_arg(args, "params");
                let options = object_arg(args, "options");
                let reuse = args.get("reuse").and_then(Value::as_bool).unwrap_or(false);
                url_helper
                    .url_with_options(name, params, options, reuse)
                    .map(Value::String)
                    .map_err(|e| tera::Error::msg(e.to_string()))
            });
        }

        let doctype = self.html_tag.doctype();
        tera.register_function("doctype", move |_: &HashMap<String, Value>| {
            Ok(Value::String(doctype.declaration().to_string()))
        });

        let html_tag = self.html_tag.clone();
        tera.register_function("html_tag", move |args: &HashMap<String, Value>| {
            let close = args.get("close").and_then(Value::as_bool).unwrap_or(false);
            let tag = if close {
                html_tag.close_tag().to_string()
            } else {
                html_tag.open_tag()
            };
            Ok(Value::String(tag))
        });

        if let Some((helper, pages)) = &self.navigation {
            let accepted = helper.accepted_pages(pages);
            tera.register_function("navigation", move |_: &HashMap<String, Value>| {
                serde_json::to_value(&accepted).map_err(|e| tera::Error::msg(e.to_string()))
            });
        }
    }

    fn render_template(&self, name: &str, variables: Variables) -> Result<String> {
        let content = self.load_template(name)?;
        let tera = self.engine(name, &content)?;
        let context = Context::from_serialize(Value::Object(variables))?;

        debug!(template = %name, "Rendering template");
        tera.render(name, &context)
            .map_err(|e| Error::Render(format!("Failed to render template '{}': {}", name, error_chain(&e))))
    }
}

fn object_arg(args: &HashMap<String, Value>, key: &str) -> Variables {
    args.get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Tera wraps the interesting message in its error sources
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl Renderer for HtmlRenderer {
    fn render(&self, renderable: Renderable, values: Option<Variables>) -> Result<String> {
        match renderable {
            Renderable::Model(model) => {
                let name = model.template().ok_or_else(|| {
                    Error::domain("HtmlRenderer cannot render a view model without a template")
                })?;
                let mut variables = model.variables().clone();
                if let Some(values) = values {
                    for (key, value) in values {
                        variables.entry(key).or_insert(value);
                    }
                }
                self.render_template(name, variables)
            }
            Renderable::Scalar(Value::String(name)) => {
                self.render_template(&name, values.unwrap_or_default())
            }
            other => Err(Error::domain(format!(
                "HtmlRenderer expects a view model or a template name, got {other:?}"
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("resolver", &self.resolver.kind())
            .field("server_url", &self.server_url.is_some())
            .field("url_helper", &self.url_helper.is_some())
            .field("html_tag", &self.html_tag)
            .field("navigation", &self.navigation.as_ref().map(|(_, pages)| pages.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{HTTP_HOST, NavigationDefaults, ServerEnv};
    use crate::model::ViewModel;
    use crate::resolver::{AggregateResolver, TemplateMapResolver, TemplateSource};
    use serde_json::json;

    fn renderer_with(templates: &[(&str, &str)]) -> HtmlRenderer {
        let map: TemplateMapResolver = templates
            .iter()
            .map(|(name, content)| (name.to_string(), TemplateSource::inline(*content)))
            .collect();
        HtmlRenderer::new(Arc::new(map))
    }

    fn model(template: &str, variables: Value) -> ViewModel {
        let mut model = ViewModel::with_variables(variables.as_object().cloned().unwrap());
        model.set_template(template);
        model
    }

    #[test]
    fn test_renders_model_variables() {
        let renderer = renderer_with(&[("hello", "Hello {{ name }}!")]);
        let rendered = renderer
            .render(model("hello", json!({"name": "World"})).into(), None)
            .unwrap();
        assert_eq!(rendered, "Hello World!");
    }

    #[test]
    fn test_variables_are_escaped() {
        let renderer = renderer_with(&[("page", "{{ body }}|{{ body | safe }}")]);
        let rendered = renderer
            .render(model("page", json!({"body": "<b>"})).into(), None)
            .unwrap();
        assert_eq!(rendered, "&lt;b&gt;|<b>");
    }

    #[test]
    fn test_template_name_with_values() {
        let renderer = renderer_with(&[("greet", "Hi {{ who }}")]);
        let values = json!({"who": "there"}).as_object().cloned();
        assert_eq!(renderer.render("greet".into(), values).unwrap(), "Hi there");
    }

    #[test]
    fn test_model_without_template_is_domain_error() {
        let renderer = renderer_with(&[]);
        let err = renderer.render(ViewModel::new().into(), None).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn test_unresolved_template_reports_reason() {
        let renderer = HtmlRenderer::new(Arc::new(AggregateResolver::new()));
        let err = renderer.render("missing".into(), None).unwrap_err();
        match err {
            Error::TemplateNotFound { name, reason } => {
                assert_eq!(name, "missing");
                assert_eq!(reason, "no resolvers");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_url_function() {
        let mut renderer = renderer_with(&[("link", "{{ server_url(path='/about') | safe }}")]);
        renderer.set_server_url(ServerUrl::new(ServerEnv::new().with(HTTP_HOST, "example.com")));
        assert_eq!(
            renderer.render("link".into(), None).unwrap(),
            "http://example.com/about"
        );
    }

    #[test]
    fn test_doctype_and_html_tag_functions() {
        let mut renderer = renderer_with(&[(
            "layout",
            "{{ doctype() | safe }}{{ html_tag() | safe }}{{ html_tag(close=true) | safe }}",
        )]);
        renderer.set_doctype(Doctype::Xhtml1Strict);
        renderer
            .html_tag_mut()
            .set_use_namespaces(true)
            .set_attribute("lang", "en");

        let rendered = renderer.render("layout".into(), None).unwrap();
        assert!(rendered.starts_with("<!DOCTYPE html PUBLIC"));
        assert!(rendered.ends_with(
            r#"<html xmlns="http:&#x2F;&#x2F;www.w3.org&#x2F;1999&#x2F;xhtml" lang="en"></html>"#
        ));
    }

    #[test]
    fn test_navigation_function_lists_accepted_pages() {
        let mut renderer = renderer_with(&[(
            "menu",
            "{% for page in navigation() %}{{ page.label }};{% endfor %}",
        )]);
        let pages = vec![Page::new("Home"), Page::new("Hidden").hidden(), Page::new("About")];
        renderer.set_navigation(NavigationHelper::new(NavigationDefaults::new()), pages);

        assert_eq!(renderer.render("menu".into(), None).unwrap(), "Home;About;");
    }
}
