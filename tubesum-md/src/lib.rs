//! `tubesum-md` — renderer for the Markdown subset used by tubesum summaries.
//!
//! The accepted subset is small on purpose: `##`/`###` headings, `**bold**`,
//! `[links](url)`, `-`/`*`/`1.` list lines and pipe tables. Input is turned
//! into a flat sequence of [`Block`]s that a display layer maps onto its own
//! primitives (see [`render_html`] and [`render_term`]).
//!
//! # Quick start
//!
//! ```
//! let blocks = tubesum_md::render("## Intro\nHello **world**");
//! assert_eq!(blocks.len(), 1);
//! assert!(!blocks[0].is_table());
//! ```

pub mod inline;
pub mod lines;
pub mod render_html;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod segment;
pub mod table;
pub mod types;

pub use render_html::PageConfig;
pub use segment::Segment;
pub use types::*;

/// Render a complete Markdown document into blocks.
///
/// Never fails: table candidates with fewer than two rows are dropped and
/// malformed inline markup is kept as plain text. Empty text spans between
/// tables still produce a text run holding one blank line.
pub fn render(text: &str) -> Vec<Block> {
    segment::segment(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Table(raw) => table::parse_table(raw),
            Segment::Text(raw) => Some(Block::TextRun {
                lines: lines::classify_text(raw),
            }),
        })
        .collect()
}

/// Render `text` and serialize the blocks as JSON.
pub fn render_json(text: &str) -> String {
    serde_json::to_string(&render(text)).unwrap_or_else(|_| "[]".to_string())
}

/// Render `text` straight to an HTML fragment.
pub fn to_html(text: &str) -> String {
    render_html::to_html(&render(text))
}

/// Render `text` to ANSI-colored terminal output.
#[cfg(feature = "terminal")]
pub fn to_terminal(text: &str) -> String {
    render_term::to_terminal(&render(text))
}
