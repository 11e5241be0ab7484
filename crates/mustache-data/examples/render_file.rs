//! Render a template file with JSON data.
//!
//! Usage:
//!   cargo run --example render_file -- <template.mustache> <data.json> [partials_dir]
//!
//! Partials referenced as {{>name}} are resolved from the optional partials
//! directory as <partials_dir>/<name>.mustache.

use mustache_core::Renderer;
use mustache_data::{JsonContext, PartialFileLoader};
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <template.mustache> <data.json> [partials_dir]", args[0]);
        std::process::exit(1);
    }

    let template = std::fs::read_to_string(&args[1])?;
    let data: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&args[2])?)?;

    let mut context = JsonContext::new(&data);
    if let Some(dir) = args.get(3) {
        context = context.with_resolver(Rc::new(PartialFileLoader::new(dir)));
    }

    let mut renderer = Renderer::new();
    let output = renderer.render(&template, &mut context);
    print!("{output}");

    if let Some(error) = renderer.error() {
        eprintln!("render error: {error}");
        std::process::exit(2);
    }

    Ok(())
}
