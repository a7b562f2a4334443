//! View model tree node

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{Error, Result};
use crate::model::{ModelKind, Variables};

/// Capture key a freshly created view model is nested under
pub const DEFAULT_CAPTURE_TO: &str = "content";

/// A node of the view tree.
///
/// Holds its own variables, the template it renders with, and an ordered list
/// of children. Each child carries the key it is captured under in its
/// parent's output (`capture_to`); a child without a key is left out of tree
/// output unless the renderer merges unnamed children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewModel {
    kind: ModelKind,
    variables: Variables,
    options: Variables,
    template: Option<String>,
    children: Vec<ViewModel>,
    capture_to: Option<String>,
    terminal: bool,
    append: bool,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            kind: ModelKind::View,
            variables: Variables::new(),
            options: Variables::new(),
            template: None,
            children: Vec::new(),
            capture_to: Some(DEFAULT_CAPTURE_TO.to_string()),
            terminal: false,
            append: false,
        }
    }
}

impl ViewModel {
    /// Create an empty view model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view model owning the given variables
    pub fn with_variables(variables: Variables) -> Self {
        Self {
            variables,
            ..Self::default()
        }
    }

    /// Create a view model from a JSON object (`null` yields an empty model)
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(variables) => Ok(Self::with_variables(variables)),
            Value::Null => Ok(Self::new()),
            other => Err(Error::invalid_argument(format!(
                "View model variables must be a JSON object, got {other}"
            ))),
        }
    }

    pub(crate) fn of_kind(kind: ModelKind, variables: Variables) -> Self {
        let terminal = kind != ModelKind::View;
        Self {
            kind,
            variables,
            capture_to: if terminal {
                None
            } else {
                Some(DEFAULT_CAPTURE_TO.to_string())
            },
            terminal,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Switch the renderer this model is meant for. JSON and console models
    /// become terminal; capture settings are left alone.
    pub fn set_kind(&mut self, kind: ModelKind) -> &mut Self {
        self.kind = kind;
        if kind != ModelKind::View {
            self.terminal = true;
        }
        self
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set_variable<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> &mut Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Merge variables into the model, or replace them all when `overwrite`
    pub fn set_variables(&mut self, variables: Variables, overwrite: bool) -> &mut Self {
        if overwrite {
            self.variables = variables;
        } else {
            self.variables.extend(variables);
        }
        self
    }

    pub fn clear_variables(&mut self) -> &mut Self {
        self.variables.clear();
        self
    }

    pub fn options(&self) -> &Variables {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn set_option<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> &mut Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.is_empty())
    }

    pub fn set_template<S: Into<String>>(&mut self, template: S) -> &mut Self {
        self.template = Some(template.into());
        self
    }

    /// Append a child; its own capture key is kept
    pub fn add_child<M: Into<ViewModel>>(&mut self, child: M) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Append a child and capture it under `capture_to`
    pub fn add_child_as<M: Into<ViewModel>>(&mut self, child: M, capture_to: &str) -> &mut Self {
        let mut child = child.into();
        child.set_capture_to(Some(capture_to));
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[ViewModel] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ViewModel] {
        &mut self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn clear_children(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Key this model is nested under in its parent; `None` when disabled
    pub fn capture_to(&self) -> Option<&str> {
        self.capture_to.as_deref().filter(|key| !key.is_empty())
    }

    /// Set the capture key; `None` or an empty key disables capturing
    pub fn set_capture_to(&mut self, capture_to: Option<&str>) -> &mut Self {
        self.capture_to = capture_to.filter(|key| !key.is_empty()).map(str::to_string);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_terminal(&mut self, terminal: bool) -> &mut Self {
        self.terminal = terminal;
        self
    }

    /// Whether the rendered child is appended to an existing capture
    pub fn is_append(&self) -> bool {
        self.append
    }

    pub fn set_append(&mut self, append: bool) -> &mut Self {
        self.append = append;
        self
    }
}

impl From<Variables> for ViewModel {
    fn from(variables: Variables) -> Self {
        Self::with_variables(variables)
    }
}
