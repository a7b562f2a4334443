//! JSON view model and the JSON/JSONP encoding helpers shared with the renderer

use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::core::error::Result;
use crate::model::{ModelKind, Variables, ViewModel};

/// Option key holding a model's JSONP callback name
pub const JSONP_CALLBACK_OPTION: &str = "jsonp_callback";
/// Option key toggling pretty-printed output
pub const PRETTY_PRINT_OPTION: &str = "pretty_print";

/// Normalise a JSONP callback name.
///
/// Only a non-empty name enables wrapping; `""` and `"0"` are treated as
/// "no callback" so a falsy value never produces `0(...)` style output.
pub fn normalize_jsonp_callback(callback: &str) -> Option<String> {
    usable_callback(callback).map(str::to_string)
}

fn usable_callback(callback: &str) -> Option<&str> {
    let callback = callback.trim();
    (!callback.is_empty() && callback != "0").then_some(callback)
}

/// Encode a value as compact or pretty JSON text
pub fn encode_json(value: &Value, pretty_print: bool) -> Result<String> {
    let encoded = if pretty_print {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(encoded)
}

/// Wrap an encoded payload as `callback(<json>);`
pub fn wrap_jsonp(callback: &str, payload: &str) -> String {
    format!("{callback}({payload});")
}

/// View model whose variables are serialized as a JSON document.
///
/// JSON models are terminal and have no capture key of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonModel(ViewModel);

impl JsonModel {
    pub fn new() -> Self {
        Self::with_variables(Variables::new())
    }

    pub fn with_variables(variables: Variables) -> Self {
        Self(ViewModel::of_kind(ModelKind::Json, variables))
    }

    /// Set the JSONP callback used when this model serializes itself
    pub fn set_jsonp_callback<S: AsRef<str>>(&mut self, callback: S) -> &mut Self {
        match normalize_jsonp_callback(callback.as_ref()) {
            Some(callback) => {
                self.0.set_option(JSONP_CALLBACK_OPTION, callback);
            }
            None => {
                self.0.set_option(JSONP_CALLBACK_OPTION, Value::Null);
            }
        }
        self
    }

    pub fn jsonp_callback(&self) -> Option<&str> {
        jsonp_callback_of(&self.0)
    }

    pub fn set_pretty_print(&mut self, pretty_print: bool) -> &mut Self {
        self.0.set_option(PRETTY_PRINT_OPTION, pretty_print);
        self
    }

    pub fn is_pretty_print(&self) -> bool {
        pretty_print_of(&self.0)
    }

    /// Serialize this model's own variables (children are not walked)
    pub fn serialize(&self) -> Result<String> {
        let payload = encode_json(&Value::Object(self.0.variables().clone()), self.is_pretty_print())?;
        Ok(match self.jsonp_callback() {
            Some(callback) => wrap_jsonp(callback, &payload),
            None => payload,
        })
    }

    pub fn into_inner(self) -> ViewModel {
        self.0
    }
}

pub(crate) fn jsonp_callback_of(model: &ViewModel) -> Option<&str> {
    model
        .option(JSONP_CALLBACK_OPTION)
        .and_then(Value::as_str)
        .and_then(usable_callback)
}

pub(crate) fn pretty_print_of(model: &ViewModel) -> bool {
    model
        .option(PRETTY_PRINT_OPTION)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

impl Default for JsonModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for JsonModel {
    type Target = ViewModel;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonModel {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<JsonModel> for ViewModel {
    fn from(model: JsonModel) -> Self {
        model.0
    }
}
