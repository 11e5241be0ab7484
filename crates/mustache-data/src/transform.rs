//! Named section transforms
//!
//! A transform is attached to a context under a name; a section tag whose
//! key matches the name hands its unrendered body to the transform instead
//! of resolving data. The transform may re-render the body through
//! [`Renderer::render_fragment`].

use mustache_core::{Context, Renderer};
use std::collections::HashMap;
use std::rc::Rc;

/// A section transform: receives the raw section body, the renderer, and
/// the context it was registered on.
pub type SectionTransform = Rc<dyn Fn(&str, &mut Renderer, &mut dyn Context) -> String>;

/// Name → transform registry embedded in each data view.
#[derive(Default, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, SectionTransform>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        TransformRegistry::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&str, &mut Renderer, &mut dyn Context) -> String + 'static,
    {
        self.transforms.insert(name.into(), Rc::new(transform));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<SectionTransform> {
        self.transforms.get(name).cloned()
    }
}
