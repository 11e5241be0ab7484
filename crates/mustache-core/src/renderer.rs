//! Template rendering

use crate::context::Context;
use crate::escape::{escape_html, unescape_html};
use crate::scanner::{expand_tag, find_from, read_tag_name, Delimiters, EscapeMode, Tag, TagKind};
use crate::{ErrorKind, RenderError};

/// Recursive template renderer.
///
/// A renderer owns the delimiter state, the partial stack, and the sticky
/// error record for one `render` call. It holds no reference to the data;
/// every lookup goes through the [`Context`] passed in.
///
/// Rendering never fails hard: on a malformed template the output produced
/// so far is returned and [`Renderer::error`] reports what went wrong.
pub struct Renderer {
    delimiters: Delimiters,
    default_delimiters: Delimiters,
    partial_stack: Vec<String>,
    error: Option<RenderError>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            delimiters: Delimiters::default(),
            default_delimiters: Delimiters::default(),
            partial_stack: Vec::new(),
            error: None,
        }
    }

    /// Replace the default `{{` / `}}` markers for this renderer.
    ///
    /// Takes effect on the next `render` call; templates can still switch
    /// markers locally with a set-delimiter tag.
    pub fn set_tag_markers(&mut self, start: &str, end: &str) {
        self.default_delimiters = Delimiters::new(start, end);
    }

    /// The first error of the last `render` call, if any.
    pub fn error(&self) -> Option<&RenderError> {
        self.error.as_ref()
    }

    /// Render `template` against `context` and return the output.
    ///
    /// Clears any previous error and resets the delimiters to their
    /// defaults before scanning.
    pub fn render(&mut self, template: &str, context: &mut dyn Context) -> String {
        self.error = None;
        self.delimiters = self.default_delimiters.clone();
        self.render_slice(template, 0, template.len(), context)
    }

    /// Render a fragment with the current scanning state.
    ///
    /// Unlike [`Renderer::render`] this neither clears the error record nor
    /// resets the delimiters; section transforms use it to re-render the
    /// body they receive.
    pub fn render_fragment(&mut self, template: &str, context: &mut dyn Context) -> String {
        self.render_slice(template, 0, template.len(), context)
    }

    fn render_slice(
        &mut self,
        template: &str,
        from: usize,
        to: usize,
        context: &mut dyn Context,
    ) -> String {
        let mut output = String::new();
        let mut cursor = from;

        while self.error.is_none() {
            let tag = self.find_tag(template, cursor, to);
            if tag.kind == TagKind::Null {
                // Expanded tags may leave the cursor past the window end.
                if cursor < to {
                    output.push_str(&template[cursor..to]);
                }
                break;
            }

            output.push_str(&template[cursor..tag.start]);

            match tag.kind {
                TagKind::Value => {
                    let value = context.string_value(&tag.key);
                    match tag.escape_mode {
                        EscapeMode::Escape => output.push_str(&escape_html(&value)),
                        EscapeMode::Unescape => output.push_str(&unescape_html(&value)),
                        EscapeMode::Raw => output.push_str(&value),
                    }
                    cursor = tag.end;
                }

                TagKind::SectionStart => match self.find_end_tag(template, &tag, to) {
                    None => {
                        if self.error.is_none() {
                            self.set_error(ErrorKind::UnterminatedSection, tag.start);
                        }
                    }
                    Some(end_tag) => {
                        let count = context.list_count(&tag.key);
                        if count > 0 {
                            for i in 0..count {
                                context.push(&tag.key, Some(i));
                                let rendered =
                                    self.render_slice(template, tag.end, end_tag.start, context);
                                output.push_str(&rendered);
                                context.pop();
                            }
                        } else if context.can_eval(&tag.key) {
                            let body = &template[tag.end..end_tag.start];
                            let evaluated = context.eval(&tag.key, body, self);
                            output.push_str(&evaluated);
                        } else if !context.is_false(&tag.key) {
                            context.push(&tag.key, None);
                            let rendered =
                                self.render_slice(template, tag.end, end_tag.start, context);
                            output.push_str(&rendered);
                            context.pop();
                        }
                        cursor = end_tag.end;
                    }
                },

                TagKind::InvertedSectionStart => match self.find_end_tag(template, &tag, to) {
                    None => {
                        if self.error.is_none() {
                            self.set_error(ErrorKind::UnterminatedInvertedSection, tag.start);
                        }
                    }
                    Some(end_tag) => {
                        if context.is_false(&tag.key) {
                            let rendered =
                                self.render_slice(template, tag.end, end_tag.start, context);
                            output.push_str(&rendered);
                        }
                        cursor = end_tag.end;
                    }
                },

                TagKind::Partial => {
                    let saved = self.delimiters.clone();
                    self.delimiters = self.default_delimiters.clone();
                    self.partial_stack.push(tag.key.clone());

                    let mut content = context.partial_value(&tag.key);
                    if tag.indentation > 0 {
                        let indent = " ".repeat(tag.indentation);
                        output.push_str(&indent);
                        content = indent_lines(&content, &indent);
                    }

                    let rendered = self.render_slice(&content, 0, content.len(), context);
                    output.push_str(&rendered);

                    self.partial_stack.pop();
                    self.delimiters = saved;
                    cursor = tag.end;
                }

                TagKind::SetDelimiter | TagKind::Comment => {
                    cursor = tag.end;
                }

                TagKind::SectionEnd => {
                    self.set_error(ErrorKind::UnexpectedEndTag, tag.start);
                    cursor = tag.end;
                }

                TagKind::Null => break,
            }
        }

        output
    }

    /// Locate the next tag whose start lies in `[from, limit)`.
    fn find_tag(&mut self, content: &str, from: usize, limit: usize) -> Tag {
        let start = match find_from(content, &self.delimiters.start, from) {
            Some(pos) if pos < limit => pos,
            _ => return Tag::null(),
        };

        let marker_end = start + self.delimiters.start.len();
        let end = match find_from(content, &self.delimiters.end, marker_end) {
            Some(pos) => pos + self.delimiters.end.len(),
            None => return Tag::null(),
        };

        let mut inner_start = marker_end;
        let mut inner_end = end - self.delimiters.end.len();

        let mut tag = Tag::null();
        tag.start = start;
        tag.end = end;

        match content.as_bytes()[inner_start] {
            b'#' => {
                tag.kind = TagKind::SectionStart;
                tag.key = read_tag_name(content, inner_start + 1, inner_end).to_string();
            }
            b'^' => {
                tag.kind = TagKind::InvertedSectionStart;
                tag.key = read_tag_name(content, inner_start + 1, inner_end).to_string();
            }
            b'/' => {
                tag.kind = TagKind::SectionEnd;
                tag.key = read_tag_name(content, inner_start + 1, inner_end).to_string();
            }
            b'!' => {
                tag.kind = TagKind::Comment;
            }
            b'>' => {
                tag.kind = TagKind::Partial;
                tag.key = read_tag_name(content, inner_start + 1, inner_end).to_string();
            }
            b'=' => {
                tag.kind = TagKind::SetDelimiter;
                self.read_set_delimiter(content, inner_start + 1, inner_end);
            }
            first => {
                if first == b'&' {
                    tag.escape_mode = EscapeMode::Unescape;
                    inner_start += 1;
                } else if first == b'{' {
                    // A `{{{key}}}` form is recognized when the first `}`
                    // after the key sits exactly where the end marker was
                    // matched; the trailing `}` is then absorbed into the
                    // tag. Any earlier `}` just shortens the key window.
                    tag.escape_mode = EscapeMode::Raw;
                    inner_start += 1;
                    match find_from(content, "}", inner_start) {
                        Some(pos) if pos == tag.end - self.delimiters.end.len() => tag.end += 1,
                        Some(pos) if pos < inner_end => inner_end = pos,
                        _ => {}
                    }
                }
                tag.kind = TagKind::Value;
                tag.key = read_tag_name(content, inner_start, inner_end).to_string();
            }
        }

        if tag.kind != TagKind::Value {
            expand_tag(&mut tag, content);
        }

        tag
    }

    /// Locate the close tag matching `start_tag`, honoring nesting by depth
    /// counting. Returns `None` on an unterminated section; a key mismatch
    /// additionally records the error.
    fn find_end_tag(&mut self, content: &str, start_tag: &Tag, limit: usize) -> Option<Tag> {
        let mut depth = 1;
        let mut pos = start_tag.end;

        loop {
            let next = self.find_tag(content, pos, limit);
            match next.kind {
                TagKind::Null => return None,
                TagKind::SectionStart | TagKind::InvertedSectionStart => depth += 1,
                TagKind::SectionEnd => {
                    depth -= 1;
                    if depth == 0 {
                        if next.key != start_tag.key {
                            self.set_error(ErrorKind::SectionKeyMismatch, next.start);
                            return None;
                        }
                        return Some(next);
                    }
                }
                _ => {}
            }
            pos = next.end;
        }
    }

    /// Parse the body of a `{{= newStart newEnd =}}` tag and install the new
    /// marker pair. On failure the error is recorded and the markers stay
    /// unchanged.
    fn read_set_delimiter(&mut self, content: &str, from: usize, limit: usize) {
        let bytes = content.as_bytes();
        let mut pos = from;

        while pos < limit && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let start_from = pos;
        while pos < limit && !bytes[pos].is_ascii_whitespace() {
            if bytes[pos] == b'=' {
                self.set_error(ErrorKind::InvalidDelimiter, pos);
                return;
            }
            pos += 1;
        }
        let start_marker = String::from_utf8_lossy(&bytes[start_from..pos]).into_owned();

        while pos < limit && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        // The final byte of the window belongs to the closing `=`.
        let end_from = pos;
        while pos + 1 < limit && !bytes[pos].is_ascii_whitespace() {
            if bytes[pos] == b'=' {
                self.set_error(ErrorKind::InvalidDelimiter, pos);
                return;
            }
            pos += 1;
        }
        let end_marker = String::from_utf8_lossy(&bytes[end_from..pos]).into_owned();

        // An empty marker would match at every position.
        if !start_marker.is_empty() && !end_marker.is_empty() {
            self.delimiters = Delimiters::new(&start_marker, &end_marker);
        }
    }

    fn set_error(&mut self, kind: ErrorKind, position: usize) {
        if self.error.is_none() {
            self.error = Some(RenderError {
                kind,
                position,
                partial: self.partial_stack.last().cloned(),
            });
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

/// Re-apply a standalone partial's indentation to every line of its content
/// except a terminal empty one.
fn indent_lines(content: &str, indent: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find('\n') {
        result.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        if !rest.is_empty() {
            result.push_str(indent);
        }
    }
    result.push_str(rest);
    result
}
