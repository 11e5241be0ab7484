//! Partial resolvers

use mustache_core::PartialResolver;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory name → template map.
#[derive(Debug, Default, Clone)]
pub struct PartialMap {
    partials: HashMap<String, String>,
}

impl PartialMap {
    pub fn new() -> Self {
        PartialMap::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.partials.insert(name.into(), content.into());
    }
}

impl PartialResolver for PartialMap {
    fn get_partial(&self, name: &str) -> String {
        self.partials.get(name).cloned().unwrap_or_default()
    }
}

/// Loads partials from `<base>/<name>.mustache`, caching file contents.
///
/// Unreadable or missing files resolve to the empty string.
pub struct PartialFileLoader {
    base_path: PathBuf,
    extension: String,
    cache: RefCell<HashMap<String, String>>,
}

impl PartialFileLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        PartialFileLoader {
            base_path: base_path.into(),
            extension: ".mustache".to_string(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Use a file extension other than `.mustache`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl PartialResolver for PartialFileLoader {
    fn get_partial(&self, name: &str) -> String {
        if let Some(content) = self.cache.borrow().get(name) {
            return content.clone();
        }

        let path = self.base_path.join(format!("{name}{}", self.extension));
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                self.cache
                    .borrow_mut()
                    .insert(name.to_string(), content.clone());
                content
            }
            Err(_) => String::new(),
        }
    }
}
