//! WASM bindings for the mustache template engine
//!
//! This crate provides a JavaScript-friendly API for:
//! - Rendering templates with JSON data
//! - Registering named partials
//! - Inspecting render errors (rendering itself never throws)
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { Mustache, render } from 'mustache-wasm';
//!
//! await init();
//!
//! // One-shot rendering
//! const text = render("Hello {{name}}!", { name: "John" });
//!
//! // With partials and error inspection
//! const mustache = new Mustache();
//! mustache.add_partial("greet", "Hello {{name}}!");
//! const output = mustache.render("{{>greet}}", { name: "John" });
//! if (mustache.last_error()) {
//!     console.warn(mustache.last_error());
//! }
//! ```

use mustache_core::Renderer;
use mustache_data::{JsonContext, PartialMap};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Template renderer with registered partials
#[wasm_bindgen]
#[derive(Default)]
pub struct Mustache {
    partials: PartialMap,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl Mustache {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Mustache {
        Mustache::default()
    }

    /// Register a partial for `{{>name}}` tags.
    pub fn add_partial(&mut self, name: &str, content: &str) {
        self.partials.insert(name, content);
    }

    /// Render a template with JSON data.
    ///
    /// Malformed templates still produce the output emitted before the
    /// failure; the failure itself is reported by `last_error()`.
    ///
    /// @param template - Template text
    /// @param data - Data object for tag lookups
    /// @returns Rendered string
    pub fn render(&mut self, template: &str, data: JsValue) -> Result<String, JsValue> {
        let data: serde_json::Value =
            serde_wasm_bindgen::from_value(data).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut context =
            JsonContext::new(&data).with_resolver(Rc::new(self.partials.clone()));
        let mut renderer = Renderer::new();
        let output = renderer.render(template, &mut context);

        self.last_error = renderer.error().map(|e| e.to_string());
        Ok(output)
    }

    /// Error message of the last render, if it failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

/// One-shot rendering without partials.
#[wasm_bindgen]
pub fn render(template: &str, data: JsValue) -> Result<String, JsValue> {
    Mustache::new().render(template, data)
}
