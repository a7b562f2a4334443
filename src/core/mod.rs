//! Crate-wide error type and configuration

pub mod config;
pub mod error;

pub use config::ViewConfig;
pub use error::{Error, Result};
