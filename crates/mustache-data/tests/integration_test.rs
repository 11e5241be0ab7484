//! End-to-end rendering tests over both data backends

use mustache_core::{ErrorKind, Renderer};
use mustache_data::{render_json, render_tree, JsonContext, PartialMap, Tree, TreeContext};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::rc::Rc;

#[test]
fn test_variable_interpolation() {
    let data = json!({ "name": "John" });
    assert_eq!(render_json("Hello {{name}}!", &data), "Hello John!");
}

#[test]
fn test_variable_interpolation_tree() {
    let mut tree = Tree::new();
    tree.put("name", "John");
    assert_eq!(render_tree("Hello {{name}}!", &tree), "Hello John!");
}

#[test]
fn test_boolean_sections() {
    let template = "{{#isActive}}A{{/isActive}}{{^isActive}}I{{/isActive}}";
    assert_eq!(render_json(template, &json!({ "isActive": true })), "A");
    assert_eq!(render_json(template, &json!({ "isActive": false })), "I");
    assert_eq!(render_json(template, &json!({})), "I");
}

#[test]
fn test_list_iteration() {
    let data = json!({ "items": [ { "name": "I1" }, { "name": "I2" } ] });
    assert_eq!(
        render_json("{{#items}}- {{name}}\n{{/items}}", &data),
        "- I1\n- I2\n"
    );
}

#[test]
fn test_list_iteration_tree() {
    let tree = Tree::from_json_str(r#"{ "items": [ { "name": "I1" }, { "name": "I2" } ] }"#)
        .unwrap();
    assert_eq!(
        render_tree("{{#items}}- {{name}}\n{{/items}}", &tree),
        "- I1\n- I2\n"
    );
}

#[test]
fn test_html_escaping_modes() {
    let data = json!({ "html": "<p>Hi & Bye</p>" });
    assert_eq!(
        render_json("{{html}} vs {{{html}}} vs {{&html}}", &data),
        "&lt;p&gt;Hi &amp; Bye&lt;/p&gt; vs <p>Hi & Bye</p> vs <p>Hi & Bye</p>"
    );
}

#[test]
fn test_nested_sections() {
    let data = json!({ "user": { "name": "John", "details": { "age": 30 } } });
    assert_eq!(
        render_json(
            "{{#user}}Name: {{name}}, Age: {{#details}}{{age}}{{/details}}{{/user}}",
            &data
        ),
        "Name: John, Age: 30"
    );
}

#[test]
fn test_numeric_formatting() {
    assert_eq!(
        render_json("Value: {{number}}", &json!({ "number": 123.456 })),
        "Value: 123.456"
    );
    assert_eq!(render_json("{{n}}", &json!({ "n": 30 })), "30");
    assert_eq!(render_json("{{n}}", &json!({ "n": 30.0 })), "30");
    assert_eq!(render_json("{{b}}", &json!({ "b": true })), "true");
    assert_eq!(render_json("[{{missing}}]", &json!({})), "[]");
}

#[test]
fn test_custom_delimiters() {
    let data = json!({ "name": "John" });
    assert_eq!(render_json("{{= <% %> =}}<% name %>", &data), "John");
}

#[test]
fn test_section_key_mismatch() {
    let data = json!({ "a": true });
    let mut context = JsonContext::new(&data);
    let mut renderer = Renderer::new();

    let output = renderer.render("pre {{#a}}X{{/b}}", &mut context);
    assert_eq!(output, "pre ");

    let error = renderer.error().expect("error expected");
    assert_eq!(error.kind, ErrorKind::SectionKeyMismatch);
    assert_eq!(error.position, 11);
    assert_eq!(error.partial, None);
}

#[test]
fn test_unterminated_inverted_section() {
    let data = json!({});
    let mut context = JsonContext::new(&data);
    let mut renderer = Renderer::new();
    renderer.render("{{^gone}}x", &mut context);
    assert_eq!(
        renderer.error().map(|e| e.kind),
        Some(ErrorKind::UnterminatedInvertedSection)
    );
}

#[test]
fn test_dotted_keys() {
    let data = json!({ "user": { "address": { "city": "Berlin" } } });
    assert_eq!(render_json("{{user.address.city}}", &data), "Berlin");
}

#[test]
fn test_dot_iteration() {
    let data = json!({ "items": ["a", "b"] });
    assert_eq!(render_json("{{#items}}{{.}},{{/items}}", &data), "a,b,");
}

#[test]
fn test_inverted_section_over_lists() {
    let template = "{{^items}}none{{/items}}";
    assert_eq!(render_json(template, &json!({ "items": [] })), "none");
    assert_eq!(render_json(template, &json!({ "items": [1] })), "");
}

#[test]
fn test_section_inverted_complementarity() {
    // Exactly one branch renders, for lists and scalars alike.
    for data in [
        json!({ "k": [] }),
        json!({ "k": [1, 2] }),
        json!({ "k": true }),
        json!({ "k": false }),
        json!({}),
    ] {
        let section = render_json("{{#k}}X{{/k}}", &data);
        let inverted = render_json("{{^k}}X{{/k}}", &data);
        assert!(
            section.is_empty() != inverted.is_empty(),
            "data {data}: section {section:?} vs inverted {inverted:?}"
        );
    }
}

#[test]
fn test_standalone_section_lines_consume_once() {
    let data = json!({ "items": ["a", "b"] });
    let output = render_json("Items:\n{{#items}}\n- {{.}}\n{{/items}}\nDone", &data);
    assert_eq!(output, "Items:\n- a\n- b\nDone");
}

#[test]
fn test_partials() {
    let mut partials = PartialMap::new();
    partials.insert("greet", "Hello {{name}}!");

    let data = json!({ "name": "John" });
    let mut context = JsonContext::new(&data).with_resolver(Rc::new(partials));
    let mut renderer = Renderer::new();

    assert_eq!(renderer.render(">> {{>greet}}", &mut context), ">> Hello John!");
    assert!(renderer.error().is_none());
}

#[test]
fn test_partial_indentation() {
    let mut partials = PartialMap::new();
    partials.insert("item", "<li>{{name}}</li>\n");

    let data = json!({ "name": "x" });
    let mut context = JsonContext::new(&data).with_resolver(Rc::new(partials));
    let mut renderer = Renderer::new();

    let output = renderer.render("<ul>\n  {{>item}}\n</ul>", &mut context);
    assert_eq!(output, "<ul>\n  <li>x</li>\n</ul>");
}

#[test]
fn test_partial_delimiter_locality() {
    let mut partials = PartialMap::new();
    partials.insert("p", "{{=<% %>=}}<%name%>;");

    let data = json!({ "name": "John" });
    let mut context = JsonContext::new(&data).with_resolver(Rc::new(partials));
    let mut renderer = Renderer::new();

    // The marker switch inside the partial must not leak into the caller.
    assert_eq!(renderer.render("{{>p}}{{name}}", &mut context), "John;John");
}

#[test]
fn test_error_inside_partial_names_it() {
    let mut partials = PartialMap::new();
    partials.insert("broken", "{{#a}}x");

    let data = json!({ "a": true });
    let mut context = JsonContext::new(&data).with_resolver(Rc::new(partials));
    let mut renderer = Renderer::new();

    renderer.render("{{>broken}}", &mut context);
    let error = renderer.error().expect("error expected");
    assert_eq!(error.kind, ErrorKind::UnterminatedSection);
    assert_eq!(error.partial.as_deref(), Some("broken"));
}

#[test]
fn test_section_transform() {
    let data = json!({ "name": "John" });
    let mut context = JsonContext::new(&data);
    context.register_transform("UPPER", |body, renderer, ctx| {
        renderer.render_fragment(body, ctx).to_uppercase()
    });

    let mut renderer = Renderer::new();
    let output = renderer.render("Hello {{#UPPER}}{{name}}{{/UPPER}}!", &mut context);
    assert_eq!(output, "Hello JOHN!");
}

#[test]
fn test_transform_on_tree_context() {
    let mut tree = Tree::new();
    tree.put("name", "John");
    let mut context = TreeContext::new(&tree);
    context.register_transform("shout", |body, renderer, ctx| {
        format!("{}!!", renderer.render_fragment(body, ctx))
    });

    let mut renderer = Renderer::new();
    assert_eq!(
        renderer.render("{{#shout}}{{name}}{{/shout}}", &mut context),
        "John!!"
    );
}

#[test]
fn test_render_is_idempotent_on_tag_free_output() {
    let data = json!({ "name": "John & Jane" });
    let output = render_json("Hello {{&name}}!", &data);
    assert_eq!(render_json(&output, &data), output);
}

#[test]
fn test_renderer_reusable_after_error() {
    let data = json!({ "name": "John" });
    let mut context = JsonContext::new(&data);
    let mut renderer = Renderer::new();

    renderer.render("{{/stray}}", &mut context);
    assert!(renderer.error().is_some());

    assert_eq!(renderer.render("{{name}}", &mut context), "John");
    assert!(renderer.error().is_none());
}
