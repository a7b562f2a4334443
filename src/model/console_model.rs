//! Console view model: a result text plus a process error level

use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::model::{ModelKind, Variables, ViewModel};

/// Variable holding the console result text
pub const RESULT: &str = "result";
/// Option holding the error level returned once the application ends
pub const ERROR_LEVEL_OPTION: &str = "error_level";

/// View model rendered to the console.
///
/// Console output doesn't support containers, so console models are always
/// terminal and never captured into a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleModel(ViewModel);

impl ConsoleModel {
    pub fn new() -> Self {
        Self(ViewModel::of_kind(ModelKind::Console, Variables::new()))
    }

    /// Shorthand for a console model carrying only a result text
    pub fn with_result<S: Into<String>>(text: S) -> Self {
        let mut model = Self::new();
        model.set_result(text);
        model
    }

    pub fn set_result<S: Into<String>>(&mut self, text: S) -> &mut Self {
        self.0.set_variable(RESULT, text.into());
        self
    }

    pub fn result(&self) -> Option<&str> {
        self.0.variable(RESULT).and_then(Value::as_str)
    }

    pub fn set_error_level(&mut self, error_level: i32) -> &mut Self {
        self.0.set_option(ERROR_LEVEL_OPTION, error_level);
        self
    }

    pub fn error_level(&self) -> Option<i32> {
        error_level_of(&self.0)
    }

    pub fn into_inner(self) -> ViewModel {
        self.0
    }
}

pub(crate) fn error_level_of(model: &ViewModel) -> Option<i32> {
    model
        .option(ERROR_LEVEL_OPTION)
        .and_then(Value::as_i64)
        .and_then(|level| i32::try_from(level).ok())
}

impl Default for ConsoleModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ConsoleModel {
    type Target = ViewModel;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ConsoleModel {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<ConsoleModel> for ViewModel {
    fn from(model: ConsoleModel) -> Self {
        model.0
    }
}
