//! Template resolvers
//!
//! A resolver maps a template name to a [`TemplateSource`]. Concrete
//! strategies are an exact-match [`TemplateMapResolver`], a filesystem-backed
//! [`TemplatePathStack`], and the [`AggregateResolver`] which chains any of
//! them by priority.

pub mod aggregate;
pub mod errors;
pub mod path_stack;
pub mod template_map;
pub mod traits;
pub mod types;

pub use aggregate::*;
pub use errors::*;
pub use path_stack::*;
pub use template_map::*;
pub use traits::*;
pub use types::*;
