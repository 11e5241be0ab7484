//! JSON data view

use crate::number::format_number;
use crate::transform::TransformRegistry;
use mustache_core::{Context, PartialResolver, Renderer};
use serde_json::Value;
use std::rc::Rc;

static JSON_NULL: Value = Value::Null;

/// Data view over a borrowed `serde_json::Value` tree.
///
/// The context stack holds references into the root value; pushing a
/// missing key pushes a null sentinel so lookups fall through to outer
/// frames and the paired pop stays valid.
pub struct JsonContext<'a> {
    stack: Vec<&'a Value>,
    resolver: Option<Rc<dyn PartialResolver>>,
    transforms: TransformRegistry,
}

impl<'a> JsonContext<'a> {
    pub fn new(root: &'a Value) -> Self {
        JsonContext {
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

    /// Resolve a possibly dotted key: the first segment lexically against
    /// the context stack, the rest by descending into objects.
    fn get_value(&self, key: &str) -> Option<&'a Value> {
        if key == "." {
            return self.stack.last().copied();
        }

        let mut segments = key.split('.');
        let mut current = self.lookup(segments.next()?)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    fn lookup(&self, name: &str) -> Option<&'a Value> {
        for frame in self.stack.iter().rev() {
            if let Value::Object(map) = frame {
                if let Some(value) = map.get(name) {
                    return Some(value);
                }
            }
        }
        None
    }
}

impl Context for JsonContext<'_> {
    fn string_value(&self, key: &str) -> String {
        match self.get_value(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => format_number(n),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    fn is_false(&self, key: &str) -> bool {
        match self.get_value(key) {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(Value::String(s)) => s.is_empty() || s.eq_ignore_ascii_case("false"),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }

    fn list_count(&self, key: &str) -> usize {
        match self.get_value(key) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    fn push(&mut self, key: &str, index: Option<usize>) {
        let frame = match (self.get_value(key), index) {
            (Some(Value::Array(items)), Some(i)) => items.get(i).unwrap_or(&JSON_NULL),
            (Some(value), _) if !value.is_null() => value,
            _ => &JSON_NULL,
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
