//! Property-tree data backend
//!
//! A [`Tree`] node carries a string value plus an ordered list of keyed
//! children. Arrays follow the property-tree convention: a list is a node
//! whose children all have empty keys. [`TreeContext`] adapts a tree to the
//! engine's `Context` contract.

use crate::number::format_float;
use crate::transform::TransformRegistry;
use crate::Result;
use mustache_core::{Context, PartialResolver, Renderer};
use serde_json::Value;
use std::path::Path;
use std::rc::Rc;

static EMPTY_TREE: Tree = Tree::new();

/// Ordered string-keyed tree with string leaf values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    value: String,
    children: Vec<(String, Tree)>,
}

impl Tree {
    pub const fn new() -> Self {
        Tree {
            value: String::new(),
            children: Vec::new(),
        }
    }

    /// A childless node holding `value`.
    pub fn leaf(value: impl Into<String>) -> Self {
        Tree {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Set the value at a dotted path, creating intermediate nodes.
    pub fn put(&mut self, path: &str, value: impl Into<String>) {
        self.ensure(path).value = value.into();
    }

    /// Append a child under `key`. Repeated empty keys form a list node.
    pub fn add_child(&mut self, key: impl Into<String>, child: Tree) {
        self.children.push((key.into(), child));
    }

    /// Resolve a dotted path, taking the first child matching each segment.
    pub fn get(&self, path: &str) -> Option<&Tree> {
        let mut node = self;
        for segment in path.split('.') {
            node = node
                .children
                .iter()
                .find(|(key, _)| key == segment)
                .map(|(_, child)| child)?;
        }
        Some(node)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Tree)> {
        self.children.iter().map(|(key, child)| (key.as_str(), child))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Build a tree from JSON text.
    pub fn from_json_str(json: &str) -> Result<Tree> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Tree::from(&value))
    }

    /// Build a tree from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Tree> {
        let json = std::fs::read_to_string(path)?;
        Tree::from_json_str(&json)
    }

    fn is_list(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(|(key, _)| key.is_empty())
    }

    fn ensure(&mut self, path: &str) -> &mut Tree {
        let mut node = self;
        for segment in path.split('.') {
            let index = match node.children.iter().position(|(key, _)| key == segment) {
                Some(i) => i,
                None => {
                    node.children.push((segment.to_string(), Tree::new()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index].1;
        }
        node
    }
}

impl From<&Value> for Tree {
    fn from(value: &Value) -> Tree {
        match value {
            Value::Null => Tree::new(),
            Value::Bool(b) => Tree::leaf(b.to_string()),
            Value::Number(n) => Tree::leaf(n.to_string()),
            Value::String(s) => Tree::leaf(s.clone()),
            Value::Array(items) => {
                let mut node = Tree::new();
                for item in items {
                    node.add_child("", Tree::from(item));
                }
                node
            }
            Value::Object(map) => {
                let mut node = Tree::new();
                for (key, item) in map {
                    node.add_child(key.clone(), Tree::from(item));
                }
                node
            }
        }
    }
}

/// Data view over a borrowed [`Tree`].
pub struct TreeContext<'a> {
    stack: Vec<&'a Tree>,
    resolver: Option<Rc<dyn PartialResolver>>,
    transforms: TransformRegistry,
}

impl<'a> TreeContext<'a> {
    pub fn new(root: &'a Tree) -> Self {
        TreeContext {
            stack: vec![root],
            resolver: None,
            transforms: TransformRegistry::new(),
        }
    }

    /// Attach a partial resolver for `{{>name}}` tags.
    pub fn with_resolver(mut self, resolver: Rc<dyn PartialResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Register a section transform under `name`.
    pub fn register_transform<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&str, &mut Renderer, &mut dyn Context) -> String + 'static,
    {
        self.transforms.register(name, transform);
    }

    fn get_value(&self, key: &str) -> Option<&'a Tree> {
        if key == "." {
            return self.stack.last().copied();
        }
        for frame in self.stack.iter().rev() {
            if let Some(node) = frame.get(key) {
                return Some(node);
            }
        }
        None
    }
}

/// Scalar coercion: stored strings that parse as finite numbers take the
/// numeric formatting, everything else passes through.
fn coerce_scalar(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => format_float(n),
        _ => raw.to_string(),
    }
}

impl Context for TreeContext<'_> {
    fn string_value(&self, key: &str) -> String {
        match self.get_value(key) {
            Some(node) => coerce_scalar(node.value()),
            None => String::new(),
        }
    }

    fn is_false(&self, key: &str) -> bool {
        match self.get_value(key) {
            None => true,
            Some(node) => {
                if node.child_count() > 0 {
                    false
                } else {
                    node.value().is_empty() || node.value().eq_ignore_ascii_case("false")
                }
            }
        }
    }

    fn list_count(&self, key: &str) -> usize {
        match self.get_value(key) {
            Some(node) if node.is_list() => node.child_count(),
            _ => 0,
        }
    }

    fn push(&mut self, key: &str, index: Option<usize>) {
        let frame = match (self.get_value(key), index) {
            (Some(node), Some(i)) => node
                .children
                .get(i)
                .map(|(_, child)| child)
                .unwrap_or(&EMPTY_TREE),
            (Some(node), None) => node,
            (None, _) => &EMPTY_TREE,
        };
        self.stack.push(frame);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn can_eval(&self, key: &str) -> bool {
        self.transforms.contains(key)
    }

    fn eval(&mut self, key: &str, body: &str, renderer: &mut Renderer) -> String {
        match self.transforms.get(key) {
            Some(transform) => transform(body, renderer, self),
            None => String::new(),
        }
    }

    fn partial_value(&self, key: &str) -> String {
        match &self.resolver {
            Some(resolver) => resolver.get_partial(key),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_put_and_get() {
        let mut tree = Tree::new();
        tree.put("name", "John");
        tree.put("user.address.city", "Berlin");

        assert_eq!(tree.get("name").map(Tree::value), Some("John"));
        assert_eq!(tree.get("user.address.city").map(Tree::value), Some("Berlin"));
        assert!(tree.get("user.phone").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let mut tree = Tree::new();
        tree.put("k", "1");
        tree.put("k", "2");
        assert_eq!(tree.get("k").map(Tree::value), Some("2"));
        assert_eq!(tree.child_count(), 1);
    }

    #[test]
    fn test_from_json() {
        let tree = Tree::from_json_str(
            r#"{ "name": "John", "items": [ { "n": "a" }, { "n": "b" } ] }"#,
        )
        .unwrap();

        assert_eq!(tree.get("name").map(Tree::value), Some("John"));
        let items = tree.get("items").unwrap();
        assert!(items.is_list());
        assert_eq!(items.child_count(), 2);
    }

    #[test]
    fn test_object_is_not_a_list() {
        let mut tree = Tree::new();
        tree.put("user.name", "John");
        tree.put("user.age", "30");
        let ctx = TreeContext::new(&tree);
        assert_eq!(ctx.list_count("user"), 0);
    }

    #[test]
    fn test_context_scalar_coercion() {
        let mut tree = Tree::new();
        tree.put("n", "123.456");
        tree.put("i", "042");
        tree.put("s", "John");
        let ctx = TreeContext::new(&tree);
        assert_eq!(ctx.string_value("n"), "123.456");
        assert_eq!(ctx.string_value("i"), "42");
        assert_eq!(ctx.string_value("s"), "John");
    }

    #[test]
    fn test_context_truthiness() {
        let mut tree = Tree::new();
        tree.put("yes", "true");
        tree.put("no", "false");
        tree.put("empty", "");
        tree.put("user.name", "John");
        let ctx = TreeContext::new(&tree);
        assert!(!ctx.is_false("yes"));
        assert!(ctx.is_false("no"));
        assert!(ctx.is_false("empty"));
        assert!(!ctx.is_false("user"));
        assert!(ctx.is_false("missing"));
    }

    #[test]
    fn test_context_stack_fallthrough() {
        let mut tree = Tree::new();
        tree.put("outer", "o");
        tree.put("child.inner", "i");
        let mut ctx = TreeContext::new(&tree);
        ctx.push("child", None);
        assert_eq!(ctx.string_value("inner"), "i");
        assert_eq!(ctx.string_value("outer"), "o");
        ctx.pop();
    }

    #[test]
    fn test_indexed_push_into_list() {
        let tree =
            Tree::from_json_str(r#"{ "items": [ { "n": "a" }, { "n": "b" } ] }"#).unwrap();
        let mut ctx = TreeContext::new(&tree);
        ctx.push("items", Some(1));
        assert_eq!(ctx.string_value("n"), "b");
        ctx.pop();
    }
}
