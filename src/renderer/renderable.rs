//! Input accepted by renderers

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::core::error::Result;
use crate::model::{ConsoleModel, JsonModel, Variables, ViewModel};

/// A value able to produce its own JSON representation
pub trait JsonSerializable: Send + Sync {
    fn json_value(&self) -> Result<Value>;
}

/// Anything a renderer can be asked to render
pub enum Renderable {
    /// A plain value (string, number, list, ...)
    Scalar(Value),
    /// A bare variable mapping
    Mapping(Variables),
    /// A view model, possibly with children
    Model(ViewModel),
    /// Key/value pairs; later duplicate keys win
    Iterable(Vec<(String, Value)>),
    /// A value that serializes itself
    SelfSerializing(Box<dyn JsonSerializable>),
}

impl Renderable {
    /// Flatten any serializable value to its JSON form.
    ///
    /// Structs and maps become [`Renderable::Mapping`], everything else a
    /// [`Renderable::Scalar`].
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(match serde_json::to_value(value)? {
            Value::Object(map) => Renderable::Mapping(map),
            other => Renderable::Scalar(other),
        })
    }

    pub fn iterable<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Renderable::Iterable(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn serializing<T: JsonSerializable + 'static>(value: T) -> Self {
        Renderable::SelfSerializing(Box::new(value))
    }

    pub fn is_model(&self) -> bool {
        matches!(self, Renderable::Model(_))
    }

    pub fn as_model(&self) -> Option<&ViewModel> {
        match self {
            Renderable::Model(model) => Some(model),
            _ => None,
        }
    }

    /// JSON value of a non-model renderable; a model yields its own
    /// variables only
    pub fn into_value(self) -> Result<Value> {
        Ok(match self {
            Renderable::Scalar(value) => value,
            Renderable::Mapping(map) => Value::Object(map),
            Renderable::Model(model) => Value::Object(model.variables().clone()),
            Renderable::Iterable(pairs) => {
                let mut map = Variables::new();
                for (key, value) in pairs {
                    map.insert(key, value);
                }
                if is_list_shaped(&map) {
                    Value::Array(map.into_iter().map(|(_, value)| value).collect())
                } else {
                    Value::Object(map)
                }
            }
            Renderable::SelfSerializing(value) => value.json_value()?,
        })
    }
}

/// Keys are exactly `0..n` in order
fn is_list_shaped(map: &Variables) -> bool {
    map.keys()
        .enumerate()
        .all(|(index, key)| *key == index.to_string())
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderable::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Renderable::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Renderable::Model(model) => f.debug_tuple("Model").field(model).finish(),
            Renderable::Iterable(pairs) => f.debug_tuple("Iterable").field(pairs).finish(),
            Renderable::SelfSerializing(_) => f.write_str("SelfSerializing(..)"),
        }
    }
}

impl From<ViewModel> for Renderable {
    fn from(model: ViewModel) -> Self {
        Renderable::Model(model)
    }
}

impl From<JsonModel> for Renderable {
    fn from(model: JsonModel) -> Self {
        Renderable::Model(model.into())
    }
}

impl From<ConsoleModel> for Renderable {
    fn from(model: ConsoleModel) -> Self {
        Renderable::Model(model.into())
    }
}

impl From<Variables> for Renderable {
    fn from(map: Variables) -> Self {
        Renderable::Mapping(map)
    }
}

impl From<Value> for Renderable {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Renderable::Mapping(map),
            other => Renderable::Scalar(other),
        }
    }
}

impl From<&str> for Renderable {
    fn from(value: &str) -> Self {
        Renderable::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for Renderable {
    fn from(value: String) -> Self {
        Renderable::Scalar(Value::String(value))
    }
}
