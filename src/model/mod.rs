//! View models
//!
//! A [`ViewModel`] is a node of the view tree: variables, options, a template
//! name and ordered children, each captured under a key in its parent's
//! output. [`JsonModel`] and [`ConsoleModel`] are terminal flavours that pick
//! the JSON and console renderers.

pub mod console_model;
pub mod json_model;
pub mod types;
pub mod view_model;

pub use console_model::ConsoleModel;
pub use json_model::JsonModel;
pub use types::*;
pub use view_model::*;
