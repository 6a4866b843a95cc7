//! ANSI terminal renderer.
//!
//! Produces colored terminal output using the `colored` crate: bold
//! headings, bullet glyphs, box-drawn tables and underlined links.

use colored::Colorize;

use crate::types::{Block, Cell, InlineSpan, Line, ListMarker, visible_text};

/// Render blocks as ANSI-colored terminal text.
pub fn to_terminal(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in blocks {
        match block {
            Block::Table { header, rows } => lines.push(render_table(header, rows)),
            Block::TextRun { lines: text } => lines.extend(text.iter().map(render_line)),
        }
    }

    lines.join("\n")
}

fn render_line(line: &Line) -> String {
    match line {
        Line::Blank => String::new(),
        Line::Heading2 { spans } => {
            let text = visible_text(spans);
            format!("{}", text.to_uppercase().red().bold())
        }
        Line::Heading3 { spans } => {
            let text = visible_text(spans);
            format!("{}", text.bold())
        }
        Line::ListItem { marker, spans } => {
            let marker = match marker {
                ListMarker::Bullet => format!("{}", "\u{2022}".red()), // •
                ListMarker::Ordinal { value } => format!("{}", format!("{value}.").bold()),
            };
            format!("  {marker} {}", render_spans(spans))
        }
        Line::Paragraph { spans } => render_spans(spans),
    }
}

fn render_spans(spans: &[InlineSpan]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &InlineSpan) -> String {
    match span {
        InlineSpan::PlainText { text } => text.clone(),
        InlineSpan::Bold { text } => format!("{}", text.bold()),
        InlineSpan::Link { label, url } => {
            format!("{} {}", label.underline(), format!("({url})").dimmed())
        }
    }
}

/// Width of a cell as displayed (links include their dimmed url).
fn display_width(cell: &Cell) -> usize {
    cell.spans
        .iter()
        .map(|span| match span {
            InlineSpan::Link { label, url } => label.chars().count() + url.chars().count() + 3,
            other => other.visible_text().chars().count(),
        })
        .sum()
}

fn render_table(header: &[Cell], rows: &[Vec<Cell>]) -> String {
    if header.is_empty() {
        return String::new();
    }

    // Column widths span the widest row, so ragged rows still line up.
    let columns = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let separator: String = widths
        .iter()
        .map(|&w| "\u{2500}".repeat(w + 2)) // ─
        .collect::<Vec<_>>()
        .join("\u{253C}"); // ┼

    let mut lines = vec![
        render_row(header, &widths, true),
        format!("\u{251C}{separator}\u{2524}"), // ├ ┤
    ];
    for row in rows {
        lines.push(render_row(row, &widths, false));
    }
    lines.join("\n")
}

fn render_row(row: &[Cell], widths: &[usize], bold: bool) -> String {
    let cells: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| match row.get(i) {
            Some(cell) => {
                // Header cells print labels only, so they pad by visible width.
                let (text, width) = if bold {
                    let text = visible_text(&cell.spans);
                    let width = text.chars().count();
                    (format!("{}", text.bold()), width)
                } else {
                    (render_spans(&cell.spans), display_width(cell))
                };
                let pad = w.saturating_sub(width);
                format!(" {text}{} ", " ".repeat(pad))
            }
            None => " ".repeat(w + 2),
        })
        .collect();
    format!("\u{2502}{}\u{2502}", cells.join("\u{2502}")) // │
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
