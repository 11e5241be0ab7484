//! Mustache Data - concrete data views and partial resolvers
//!
//! This crate provides the glue around the `mustache-core` engine:
//! - `JsonContext`: a data view over `serde_json::Value`
//! - `Tree` / `TreeContext`: a property-tree-style backend with dotted paths
//! - Partial resolvers (in-memory map, cached file loader)
//! - Named section transforms
//! - One-shot `render_json` / `render_tree` helpers
//!
//! # Example
//!
//! ```ignore
//! use mustache_data::render_json;
//!
//! let data: serde_json::Value = serde_json::from_str(r#"{"name": "John"}"#)?;
//! assert_eq!(render_json("Hello {{name}}!", &data), "Hello John!");
//! ```

mod json;
mod number;
mod resolver;
mod transform;
mod tree;

pub use json::JsonContext;
pub use resolver::{PartialFileLoader, PartialMap};
pub use transform::{SectionTransform, TransformRegistry};
pub use tree::{Tree, TreeContext};

use mustache_core::Renderer;
use thiserror::Error;

/// Errors that can occur while building data trees
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to parse data: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Render a template against JSON data, discarding error details.
///
/// For error inspection or partials, drive a [`mustache_core::Renderer`]
/// with a [`JsonContext`] directly.
pub fn render_json(template: &str, data: &serde_json::Value) -> String {
    let mut context = JsonContext::new(data);
    let mut renderer = Renderer::new();
    renderer.render(template, &mut context)
}

/// Render a template against a [`Tree`], discarding error details.
pub fn render_tree(template: &str, data: &Tree) -> String {
    let mut context = TreeContext::new(data);
    let mut renderer = Renderer::new();
    renderer.render(template, &mut context)
}
