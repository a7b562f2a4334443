//! Renderer selection and child capture for non-tree renderers

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::error::{Error, Result};
use crate::model::console_model::error_level_of;
use crate::model::{ModelKind, ViewModel};
use crate::renderer::{ConsoleRenderer, HtmlRenderer, JsonRenderer, Renderer};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JAVASCRIPT: &str = "application/javascript";
pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Output of one view render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub content: String,
    pub content_type: &'static str,
    pub error_level: Option<i32>,
}

/// Picks a renderer for a view model by its kind and renders it
#[derive(Debug, Clone, Default)]
pub struct View {
    json: JsonRenderer,
    console: ConsoleRenderer,
    html: Option<HtmlRenderer>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(html: HtmlRenderer) -> Self {
        Self {
            html: Some(html),
            ..Self::default()
        }
    }

    pub fn json_renderer(&self) -> &JsonRenderer {
        &self.json
    }

    pub fn json_renderer_mut(&mut self) -> &mut JsonRenderer {
        &mut self.json
    }

    pub fn console_renderer_mut(&mut self) -> &mut ConsoleRenderer {
        &mut self.console
    }

    pub fn html_renderer(&self) -> Option<&HtmlRenderer> {
        self.html.as_ref()
    }

    pub fn set_html_renderer(&mut self, html: HtmlRenderer) -> &mut Self {
        self.html = Some(html);
        self
    }

    /// Renderer used for models of `kind`
    pub fn renderer_for(&self, kind: ModelKind) -> Result<&dyn Renderer> {
        match kind {
            ModelKind::Json => Ok(&self.json),
            ModelKind::Console => Ok(&self.console),
            ModelKind::View => self
                .html
                .as_ref()
                .map(|html| html as &dyn Renderer)
                .ok_or_else(|| Error::runtime("No HTML renderer configured")),
        }
    }

    pub fn render(&self, model: ViewModel) -> Result<RenderedView> {
        let kind = model.kind();
        let renderer = self.renderer_for(kind)?;
        debug!(kind = %kind, renderer = renderer.name(), "Rendering view");

        match kind {
            ModelKind::Json => {
                let content_type = if self.json.effective_jsonp_callback(Some(&model)).is_some() {
                    CONTENT_TYPE_JAVASCRIPT
                } else {
                    CONTENT_TYPE_JSON
                };
                Ok(RenderedView {
                    content: renderer.render(model.into(), None)?,
                    content_type,
                    error_level: None,
                })
            }
            ModelKind::Console => {
                let error_level = error_level_of(&model);
                Ok(RenderedView {
                    content: renderer.render(model.into(), None)?,
                    content_type: CONTENT_TYPE_TEXT,
                    error_level,
                })
            }
            ModelKind::View => Ok(RenderedView {
                content: self.render_tree(renderer, model)?,
                content_type: CONTENT_TYPE_HTML,
                error_level: None,
            }),
        }
    }

    /// Render children first and capture their output into the parent's
    /// variables, unless the renderer walks trees itself
    fn render_tree(&self, renderer: &dyn Renderer, mut model: ViewModel) -> Result<String> {
        if renderer.can_render_trees() || !model.has_children() {
            return renderer.render(model.into(), None);
        }

        let children = model.children().to_vec();
        model.clear_children();

        for child in children {
            if child.is_terminal() {
                return Err(Error::domain(
                    "Inconsistent state; child view model is marked as terminal",
                ));
            }
            let capture_to = child.capture_to().map(str::to_string);
            let append = child.is_append();
            let rendered = self.render_tree(renderer, child)?;

            let Some(key) = capture_to else {
                trace!("Discarding output of child without capture key");
                continue;
            };
            let value = match model.variable(&key) {
                Some(Value::String(previous)) if append => format!("{previous}{rendered}"),
                _ => rendered,
            };
            model.set_variable(key, value);
        }

        renderer.render(model.into(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConsoleModel, JsonModel};
    use crate::resolver::{TemplateMapResolver, TemplateSource};
    use serde_json::json;
    use std::sync::Arc;

    fn html_view(templates: &[(&str, &str)]) -> View {
        let map: TemplateMapResolver = templates
            .iter()
            .map(|(name, content)| (name.to_string(), TemplateSource::inline(*content)))
            .collect();
        View::with_html(HtmlRenderer::new(Arc::new(map)))
    }

    fn page(template: &str) -> ViewModel {
        let mut model = ViewModel::new();
        model.set_template(template);
        model
    }

    #[test]
    fn test_layout_captures_children() {
        let view = html_view(&[
            ("layout", "<main>{{ content | safe }}</main>"),
            ("index", "<p>{{ text }}</p>"),
        ]);
        let mut child = page("index");
        child.set_variable("text", "hello");
        let mut layout = page("layout");
        layout.add_child(child);

        let rendered = view.render(layout).unwrap();
        assert_eq!(rendered.content, "<main><p>hello</p></main>");
        assert_eq!(rendered.content_type, CONTENT_TYPE_HTML);
    }

    #[test]
    fn test_append_concatenates_child_output() {
        let view = html_view(&[("list", "{{ items | safe }}"), ("item", "[{{ n }}]")]);
        let mut list = page("list");
        for n in 1..=3 {
            let mut item = page("item");
            item.set_variable("n", n).set_capture_to(Some("items")).set_append(true);
            list.add_child(item);
        }

        assert_eq!(view.render(list).unwrap().content, "[1][2][3]");
    }

    #[test]
    fn test_terminal_child_is_rejected() {
        let view = html_view(&[("layout", "x"), ("child", "y")]);
        let mut child = page("child");
        child.set_terminal(true);
        let mut layout = page("layout");
        layout.add_child(child);

        assert!(matches!(view.render(layout), Err(Error::Domain(_))));
    }

    #[test]
    fn test_json_content_types() {
        let mut view = View::new();
        let model = JsonModel::with_variables(json!({"a": 1}).as_object().cloned().unwrap());

        let rendered = view.render(model.clone().into()).unwrap();
        assert_eq!(rendered.content_type, CONTENT_TYPE_JSON);

        view.json_renderer_mut().set_jsonp_callback("cb");
        let rendered = view.render(model.into()).unwrap();
        assert_eq!(rendered.content, r#"cb({"a":1});"#);
        assert_eq!(rendered.content_type, CONTENT_TYPE_JAVASCRIPT);
    }

    #[test]
    fn test_console_error_level() {
        let mut model = ConsoleModel::with_result("failed\n");
        model.set_error_level(3);

        let rendered = View::new().render(model.into()).unwrap();
        assert_eq!(rendered.content, "failed\n");
        assert_eq!(rendered.content_type, CONTENT_TYPE_TEXT);
        assert_eq!(rendered.error_level, Some(3));
    }

    #[test]
    fn test_view_model_without_html_renderer() {
        let err = View::new().render(page("index")).unwrap_err();
        assert!(matches!(err, Error::Runtime(_)));
    }
}
