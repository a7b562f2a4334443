//! View rendering layer
//!
//! Template names are mapped to sources by a chain of [`resolver`]s. Pages are
//! described as trees of [`model::ViewModel`]s and turned into HTML, JSON or
//! console text by the [`renderer`]s, with [`view::View`] picking the renderer
//! for a model. [`helpers`] cover URL generation, the `<html>` tag and
//! navigation filtering.

#![deny(unsafe_code)]

pub mod core;
pub mod helpers;
pub mod model;
pub mod renderer;
pub mod resolver;
pub mod view;

pub use crate::core::{Error, Result, ViewConfig};
pub use model::{ConsoleModel, JsonModel, ModelKind, Variables, ViewModel};
pub use renderer::{ConsoleRenderer, HtmlRenderer, JsonRenderer, Renderable, Renderer};
pub use resolver::{AggregateResolver, Resolver, TemplateMapResolver, TemplatePathStack, TemplateSource};
pub use view::{RenderedView, View};
