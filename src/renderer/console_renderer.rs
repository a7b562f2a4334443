//! Console renderer: concatenates model result texts

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::core::error::Result;
use crate::model::{Variables, ViewModel, console_model::RESULT};
use crate::renderer::{Renderable, Renderer};

/// Output filter applied to each result text
pub type OutputFilter = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Renders the `result` text of a model followed by the output of its
/// children, depth-first
#[derive(Clone, Default)]
pub struct ConsoleRenderer {
    filters: Vec<OutputFilter>,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter; filters run in registration order
    pub fn add_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    fn apply_filters(&self, text: String) -> String {
        self.filters.iter().fold(text, |text, filter| filter(text))
    }

    fn render_model(&self, model: &ViewModel, output: &mut String) {
        match model.variable(RESULT) {
            Some(Value::String(text)) => output.push_str(&self.apply_filters(text.clone())),
            Some(Value::Null) | None => {}
            Some(other) => output.push_str(&self.apply_filters(other.to_string())),
        }
        for child in model.children() {
            self.render_model(child, output);
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&self, renderable: Renderable, _values: Option<Variables>) -> Result<String> {
        let Renderable::Model(model) = renderable else {
            trace!("Console renderer ignores non-model input");
            return Ok(String::new());
        };
        let mut output = String::new();
        self.render_model(&model, &mut output);
        Ok(output)
    }

    fn can_render_trees(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

impl fmt::Debug for ConsoleRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleRenderer")
            .field("filters", &self.filters.len())
            .finish()
    }
}
