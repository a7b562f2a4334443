//! JSON renderer: flattens a view model tree into one JSON document

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::error::{Error, Result};
use crate::model::json_model::{
    encode_json, jsonp_callback_of, normalize_jsonp_callback, pretty_print_of, wrap_jsonp,
};
use crate::model::{Variables, ViewModel};
use crate::renderer::{Renderable, Renderer};

/// Renders view models, mappings and plain values as JSON or JSONP
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    merge_unnamed_children: bool,
    jsonp_callback: Option<String>,
    pretty_print: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the variables of children without a capture key into their
    /// parent instead of dropping them
    pub fn set_merge_unnamed_children(&mut self, merge: bool) -> &mut Self {
        self.merge_unnamed_children = merge;
        self
    }

    pub fn can_merge_unnamed_children(&self) -> bool {
        self.merge_unnamed_children
    }

    /// Wrap output as `callback(<json>);`. `""` and `"0"` switch wrapping off.
    pub fn set_jsonp_callback<S: AsRef<str>>(&mut self, callback: S) -> &mut Self {
        self.jsonp_callback = normalize_jsonp_callback(callback.as_ref());
        self
    }

    pub fn clear_jsonp_callback(&mut self) -> &mut Self {
        self.jsonp_callback = None;
        self
    }

    pub fn has_jsonp_callback(&self) -> bool {
        self.jsonp_callback.is_some()
    }

    pub fn jsonp_callback(&self) -> Option<&str> {
        self.jsonp_callback.as_deref()
    }

    pub fn set_pretty_print(&mut self, pretty_print: bool) -> &mut Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Callback used for `model`: the renderer's own wins over the model's
    pub fn effective_jsonp_callback<'a>(&'a self, model: Option<&'a ViewModel>) -> Option<&'a str> {
        self.jsonp_callback
            .as_deref()
            .or_else(|| model.and_then(jsonp_callback_of))
    }

    /// Render a model and its captured children into one mapping
    pub fn recurse_model(&self, model: &ViewModel) -> Variables {
        let mut output = model.variables().clone();

        for child in model.children() {
            match child.capture_to() {
                Some(key) if child.is_append() => {
                    trace!(capture_to = key, "Appending child to capture");
                    append_capture(&mut output, key, Value::Object(self.recurse_model(child)));
                }
                Some(key) => {
                    output.insert(key.to_string(), Value::Object(self.recurse_model(child)));
                }
                None if self.merge_unnamed_children => {
                    let rendered = self.recurse_model(child);
                    trace!(keys = rendered.len(), "Merging unnamed child");
                    output.extend(rendered);
                }
                None => {
                    trace!("Dropping child without capture key");
                }
            }
        }

        output
    }

    fn encode(&self, value: &Value, pretty_print: bool, callback: Option<&str>) -> Result<String> {
        let payload = encode_json(value, pretty_print)?;
        Ok(match callback {
            Some(callback) => {
                debug!(callback, "Wrapping JSON payload as JSONP");
                wrap_jsonp(callback, &payload)
            }
            None => payload,
        })
    }
}

/// Store `value` under `key`, turning an existing entry into an array (or
/// extending an existing array)
pub fn append_capture(output: &mut Variables, key: &str, value: Value) {
    match output.get_mut(key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
        None => {
            output.insert(key.to_string(), value);
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, renderable: Renderable, values: Option<Variables>) -> Result<String> {
        let values = values.filter(|values| !values.is_empty());

        let Renderable::Model(model) = renderable else {
            if values.is_some() {
                return Err(Error::domain(
                    "JsonRenderer does not support rendering a non-model together with extra values",
                ));
            }
            let value = renderable.into_value()?;
            return self.encode(&value, self.pretty_print, self.jsonp_callback.as_deref());
        };

        if let Some(values) = values {
            debug!(ignored = values.len(), "Ignoring extra values passed with a view model");
        }

        let output = self.recurse_model(&model);
        let pretty_print = self.pretty_print || pretty_print_of(&model);
        let callback = self.effective_jsonp_callback(Some(&model));
        self.encode(&Value::Object(output), pretty_print, callback)
    }

    fn can_render_trees(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
