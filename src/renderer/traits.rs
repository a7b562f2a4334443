//! Renderer strategy trait

use crate::core::error::Result;
use crate::model::Variables;
use crate::renderer::Renderable;

/// Turns a renderable (usually a view model) into output text
pub trait Renderer: Send + Sync {
    /// Render `renderable`; `values` are extra variables for renderers that
    /// accept them alongside a template name
    fn render(&self, renderable: Renderable, values: Option<Variables>) -> Result<String>;

    /// Whether the renderer walks a model's children itself
    fn can_render_trees(&self) -> bool {
        false
    }

    /// Short identifier used in log output
    fn name(&self) -> &'static str;
}
