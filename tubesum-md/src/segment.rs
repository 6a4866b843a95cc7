//! Block segmenter.
//!
//! Partitions a document into table candidates and the plain text between
//! them. A candidate starts at a newline followed by a pipe-delimited line and
//! runs to the next blank line or the end of input.

use std::sync::LazyLock;

use regex::Regex;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\|.*\|\n(?s:.*?)(?:\n\n|\z)").expect("table pattern is valid")
});

/// A raw span of the document, routed by its leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Trimmed span begins with `|`: handed to the table parser.
    Table(&'a str),
    /// Anything else, unmodified (may be empty).
    Text(&'a str),
}

impl<'a> Segment<'a> {
    fn route(span: &'a str) -> Self {
        if span.trim().starts_with('|') {
            Segment::Table(span)
        } else {
            Segment::Text(span)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Table(s) | Segment::Text(s) => s,
        }
    }
}

/// Split `text` at table-candidate boundaries, keeping matched and unmatched
/// spans in source order. Unmatched spans are kept even when empty, so the
/// output always alternates `text, candidate, text, ...` and starts and ends
/// with an unmatched span.
pub fn split(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in TABLE_RE.find_iter(text) {
        spans.push(&text[last..m.start()]);
        spans.push(m.as_str());
        last = m.end();
    }
    spans.push(&text[last..]);
    spans
}

/// Split `text` and route every span to table or text handling.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    split(text).into_iter().map(Segment::route).collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
