use serde::{Deserialize, Serialize};

/// A top-level renderable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Block {
    /// Pipe-delimited table. The separator row is consumed during parsing.
    Table {
        header: Vec<Cell>,
        rows: Vec<Vec<Cell>>,
    },
    /// A run of independently classified physical lines.
    TextRun { lines: Vec<Line> },
}

impl Block {
    /// Header cell texts, for tables. Empty for text runs.
    pub fn header_texts(&self) -> Vec<&str> {
        match self {
            Block::Table { header, .. } => header.iter().map(|c| c.text.as_str()).collect(),
            Block::TextRun { .. } => Vec::new(),
        }
    }

    /// Data row cell texts, for tables. Empty for text runs.
    pub fn row_texts(&self) -> Vec<Vec<&str>> {
        match self {
            Block::Table { rows, .. } => rows
                .iter()
                .map(|row| row.iter().map(|c| c.text.as_str()).collect())
                .collect(),
            Block::TextRun { .. } => Vec::new(),
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table { .. })
    }
}

/// One table cell: the trimmed source text and its inline spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub spans: Vec<InlineSpan>,
}

/// A classified physical line inside a [`Block::TextRun`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Line {
    /// Empty or whitespace-only. Rendered as vertical spacing.
    Blank,
    Heading2 { spans: Vec<InlineSpan> },
    Heading3 { spans: Vec<InlineSpan> },
    ListItem {
        marker: ListMarker,
        spans: Vec<InlineSpan>,
    },
    Paragraph { spans: Vec<InlineSpan> },
}

impl Line {
    /// Inline spans carried by this line (`Blank` has none).
    pub fn spans(&self) -> &[InlineSpan] {
        match self {
            Line::Blank => &[],
            Line::Heading2 { spans }
            | Line::Heading3 { spans }
            | Line::ListItem { spans, .. }
            | Line::Paragraph { spans } => spans.as_slice(),
        }
    }

    /// Concatenated visible text of all spans.
    pub fn visible_text(&self) -> String {
        visible_text(self.spans())
    }
}

/// List marker for a [`Line::ListItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListMarker {
    Bullet,
    /// Numeric prefix exactly as written in the source.
    Ordinal { value: String },
}

/// Smallest styled unit of text within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    PlainText { text: String },
    Bold { text: String },
    Link { label: String, url: String },
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::PlainText { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold { text: text.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// The text a reader sees, with markup delimiters removed.
    pub fn visible_text(&self) -> &str {
        match self {
            InlineSpan::PlainText { text } | InlineSpan::Bold { text } => text,
            InlineSpan::Link { label, .. } => label,
        }
    }
}

/// Concatenate the visible text of a span sequence.
pub fn visible_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::visible_text).collect()
}
