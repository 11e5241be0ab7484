//! HTML entity escaping

/// Escape `&`, `<`, `>`, and `"` as HTML entities.
///
/// No other characters are touched (notably `'` passes through).
pub fn escape_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Reverse [`escape_html`].
///
/// `&amp;` is replaced last so that escaped entities such as `&amp;lt;`
/// come out as `&lt;` rather than `<`.
pub fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
