//! Data view and partial resolver contracts

use crate::renderer::Renderer;

/// Lookup from partial name to template text.
///
/// Unknown names resolve to the empty string; a missing partial is never an
/// error.
pub trait PartialResolver {
    fn get_partial(&self, name: &str) -> String;
}

/// Abstraction over a hierarchical data tree.
///
/// The renderer resolves every tag key through this trait and never touches
/// the data representation directly. Lookups scan a context stack from the
/// innermost node outwards; the special key `.` names the innermost node.
///
/// `push` and `pop` are always called in balanced pairs around section
/// bodies, including on error paths. Pushing a missing key must push an
/// empty sentinel so the paired `pop` stays valid and inner lookups fall
/// through to outer frames.
pub trait Context {
    /// String form of the value at `key`; empty for missing keys.
    fn string_value(&self, key: &str) -> String;

    /// Falsiness of `key`: missing/null and empty or `"false"` strings are
    /// false, booleans use their value, everything else is true.
    fn is_false(&self, key: &str) -> bool;

    /// Number of elements when `key` resolves to a list; 0 otherwise.
    fn list_count(&self, key: &str) -> usize;

    /// Push the child named `key` onto the context stack; with an index,
    /// push the i-th element of the named list.
    fn push(&mut self, key: &str, index: Option<usize>);

    /// Pop the top of the context stack; no-op when empty.
    fn pop(&mut self);

    /// Whether `key` names a registered section transform.
    fn can_eval(&self, _key: &str) -> bool {
        false
    }

    /// Run the transform named `key` on the unrendered section `body`.
    ///
    /// The transform may re-render the body through
    /// [`Renderer::render_fragment`].
    fn eval(&mut self, _key: &str, _body: &str, _renderer: &mut Renderer) -> String {
        String::new()
    }

    /// Template text of the partial named `key`; empty when unknown.
    fn partial_value(&self, _key: &str) -> String {
        String::new()
    }
}
