//! Renderers turning view models into output text
//!
//! Each renderer is a strategy behind the [`Renderer`] trait; [`crate::view::View`]
//! picks one per model kind.

pub mod console_renderer;
pub mod html_renderer;
pub mod json_renderer;
pub mod renderable;
pub mod traits;

pub use console_renderer::*;
pub use html_renderer::*;
pub use json_renderer::*;
pub use renderable::*;
pub use traits::*;
