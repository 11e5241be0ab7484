//! Mustache Core - logic-less template rendering
//!
//! This crate provides:
//! - Tag scanning with configurable delimiters (`{{` / `}}` by default)
//! - Sections, inverted sections, comments, and partials
//! - Standalone-tag whitespace handling and indented partial expansion
//! - A `Context` abstraction for name lookup over any data tree
//! - HTML escaping helpers
//!
//! # Example
//!
//! ```ignore
//! use mustache_core::Renderer;
//! use mustache_data::JsonContext;
//!
//! let data: serde_json::Value = serde_json::from_str(r#"{"name": "John"}"#)?;
//! let mut context = JsonContext::new(&data);
//! let mut renderer = Renderer::new();
//! let output = renderer.render("Hello {{name}}!", &mut context);
//! assert!(renderer.error().is_none());
//! ```

mod context;
mod escape;
mod renderer;
mod scanner;

pub use context::{Context, PartialResolver};
pub use escape::{escape_html, unescape_html};
pub use renderer::Renderer;

use thiserror::Error;

/// Failures detected while scanning or matching template tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("No matching end tag found for section")]
    UnterminatedSection,

    #[error("No matching end tag found for inverted section")]
    UnterminatedInvertedSection,

    #[error("Tag start/end key mismatch")]
    SectionKeyMismatch,

    #[error("Unexpected end tag")]
    UnexpectedEndTag,

    #[error("Custom delimiters may not contain '='")]
    InvalidDelimiter,
}

/// Sticky render error: the first failure wins and rendering unwinds.
///
/// Rendering never panics or returns early with a `Result`; already-emitted
/// output is preserved and the caller inspects this record afterwards via
/// [`Renderer::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {position}")]
pub struct RenderError {
    /// What went wrong
    pub kind: ErrorKind,

    /// Byte offset in the template where the error was detected
    pub position: usize,

    /// Name of the innermost partial being expanded, if any
    pub partial: Option<String>,
}
