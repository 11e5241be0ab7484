//! Template tag scanning primitives

/// Tag classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    /// No tag found in the scan window
    Null,
    Value,
    SectionStart,
    InvertedSectionStart,
    SectionEnd,
    Partial,
    Comment,
    SetDelimiter,
}

/// How a value tag treats its resolved string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeMode {
    Escape,
    Unescape,
    Raw,
}

/// One scanned tag.
///
/// `start` and `end` are byte offsets delimiting the text the tag consumes.
/// For standalone non-value tags they are widened beyond the literal tag to
/// swallow the surrounding whitespace and newline.
#[derive(Debug, Clone)]
pub(crate) struct Tag {
    pub kind: TagKind,
    pub key: String,
    pub start: usize,
    pub end: usize,
    pub escape_mode: EscapeMode,
    /// Leading spaces on the line of a standalone partial tag
    pub indentation: usize,
}

impl Tag {
    pub fn null() -> Self {
        Tag {
            kind: TagKind::Null,
            key: String::new(),
            start: 0,
            end: 0,
            escape_mode: EscapeMode::Escape,
            indentation: 0,
        }
    }
}

/// Current tag marker pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Delimiters {
    pub start: String,
    pub end: String,
}

impl Delimiters {
    pub fn new(start: &str, end: &str) -> Self {
        Delimiters {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new("{{", "}}")
    }
}

/// Find `pattern` in `content` at or after byte offset `from`.
pub(crate) fn find_from(content: &str, pattern: &str, from: usize) -> Option<usize> {
    if from > content.len() {
        return None;
    }
    content[from..].find(pattern).map(|pos| pos + from)
}

/// Extract a tag key from `content[from..limit)`: skip leading whitespace,
/// then take the maximal run of non-whitespace bytes.
pub(crate) fn read_tag_name(content: &str, from: usize, limit: usize) -> &str {
    let bytes = content.as_bytes();
    let limit = limit.min(bytes.len());
    let mut pos = from;

    while pos < limit && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let start = pos;

    while pos < limit && !bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    &content[start..pos]
}

/// Widen a non-value tag that stands alone on its line.
///
/// Walks backward to the previous newline and forward through the trailing
/// newline; if anything other than whitespace is met on either side the tag
/// is left untouched. On success the tag consumes the whole line and records
/// the leading whitespace count as `indentation`.
pub(crate) fn expand_tag(tag: &mut Tag, content: &str) {
    let bytes = content.as_bytes();
    let mut start = tag.start;
    let mut end = tag.end;
    let mut indentation = 0;

    while start > 0 && bytes[start - 1] != b'\n' {
        start -= 1;
        if !bytes[start].is_ascii_whitespace() {
            return;
        }
        indentation += 1;
    }

    while end < bytes.len() && bytes[end - 1] != b'\n' {
        if !bytes[end].is_ascii_whitespace() {
            return;
        }
        end += 1;
    }

    tag.start = start;
    tag.end = end;
    tag.indentation = indentation;
}
