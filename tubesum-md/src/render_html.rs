//! HTML fragment renderer.
//!
//! Maps blocks onto semantic HTML with `tubesum-*` CSS classes. All text and
//! attribute values are HTML-escaped; link urls are emitted as written.

use crate::types::{Block, Cell, InlineSpan, Line, ListMarker};

/// Configuration for full-page HTML rendering.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// Page title. Falls back to "Video Summary".
    pub title: Option<String>,
    /// Canonical url of the summarized video, shown as a source link.
    pub source_url: Option<String>,
    /// Optional language code (default: "en").
    pub lang: Option<String>,
}

/// Render blocks as an HTML fragment (no `<html>`/`<body>` wrapper).
pub fn to_html(blocks: &[Block]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for block in blocks {
        match block {
            Block::Table { header, rows } => parts.push(render_table(header, rows)),
            Block::TextRun { lines } => parts.extend(lines.iter().map(render_line)),
        }
    }

    parts.join("\n")
}

/// Render blocks as a standalone page with the default stylesheet embedded.
pub fn to_html_page(blocks: &[Block], config: &PageConfig) -> String {
    let body = to_html(blocks);
    let lang = escape_html(config.lang.as_deref().unwrap_or("en"));
    let title = escape_html(config.title.as_deref().unwrap_or("Video Summary"));

    let source = match &config.source_url {
        Some(url) => format!(
            "\n<p class=\"tubesum-source\">Source: <a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{url}</a></p>",
            url = escape_html(url)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="generator" content="tubesum">
    <title>{title}</title>
    <style>{SUMMARY_CSS}</style>
</head>
<body>
<article class="tubesum">{source}
{body}
</article>
</body>
</html>
"#
    )
}

const SUMMARY_CSS: &str = r#"
.tubesum { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; font-family: system-ui, sans-serif; color: #1f2937; line-height: 1.6; }
.tubesum h2 { font-size: 1.5rem; font-weight: 700; color: #111827; margin: 1.5rem 0 0.75rem; }
.tubesum h3 { font-size: 1.25rem; font-weight: 600; color: #1f2937; margin: 1.25rem 0 0.5rem; }
.tubesum p { margin: 0 0 0.5rem; }
.tubesum strong { font-weight: 700; color: #111827; }
.tubesum a { color: #ff0000; font-weight: 500; text-decoration: none; }
.tubesum a:hover { text-decoration: underline; }
.tubesum-gap { height: 0.5rem; }
.tubesum-li { display: flex; align-items: flex-start; margin: 0 0 0.5rem 1rem; }
.tubesum-marker { margin-right: 0.5rem; }
.tubesum-bullet { color: #ff0000; }
.tubesum-ordinal { font-weight: 600; color: #4b5563; }
.tubesum-table-wrap { overflow-x: auto; margin: 1.5rem 0; border: 1px solid #e5e7eb; border-radius: 0.5rem; }
.tubesum-table { min-width: 100%; border-collapse: collapse; }
.tubesum-table th { padding: 0.75rem 1.5rem; text-align: left; font-size: 0.75rem; font-weight: 500; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; background: #f9fafb; }
.tubesum-table td { padding: 1rem 1.5rem; font-size: 0.875rem; color: #374151; white-space: pre-wrap; border-top: 1px solid #e5e7eb; }
.tubesum-source { font-size: 0.875rem; color: #6b7280; }
"#;

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_line(line: &Line) -> String {
    match line {
        Line::Blank => "<div class=\"tubesum-gap\"></div>".to_string(),
        Line::Heading2 { spans } => format!("<h2>{}</h2>", render_spans(spans)),
        Line::Heading3 { spans } => format!("<h3>{}</h3>", render_spans(spans)),
        Line::ListItem { marker, spans } => {
            let marker_html = match marker {
                ListMarker::Bullet => {
                    "<span class=\"tubesum-marker tubesum-bullet\">\u{2022}</span>".to_string()
                }
                ListMarker::Ordinal { value } => format!(
                    "<span class=\"tubesum-marker tubesum-ordinal\">{}.</span>",
                    escape_html(value)
                ),
            };
            format!(
                "<div class=\"tubesum-li\">{marker_html}<span>{}</span></div>",
                render_spans(spans)
            )
        }
        Line::Paragraph { spans } => format!("<p>{}</p>", render_spans(spans)),
    }
}

fn render_table(header: &[Cell], rows: &[Vec<Cell>]) -> String {
    let head: String = header
        .iter()
        .map(|cell| format!("<th scope=\"col\">{}</th>", render_spans(&cell.spans)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", render_spans(&cell.spans)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(
        "<div class=\"tubesum-table-wrap\"><table class=\"tubesum-table\"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>"
    )
}

fn render_spans(spans: &[InlineSpan]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &InlineSpan) -> String {
    match span {
        InlineSpan::PlainText { text } => escape_html(text),
        InlineSpan::Bold { text } => format!("<strong>{}</strong>", escape_html(text)),
        InlineSpan::Link { label, url } if is_safe_href(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(url),
            escape_html(label)
        ),
        InlineSpan::Link { label, .. } => escape_html(label),
    }
}

/// Only web and mail links become anchors; anything else (`javascript:`,
/// `data:`, relative paths) renders as its label.
fn is_safe_href(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_and_paragraph() {
        let html = to_html(&render("## Intro\nHello **world**"));
        assert_eq!(html, "<h2>Intro</h2>\n<p>Hello <strong>world</strong></p>");
    }

    #[test]
    fn list_markers() {
        let html = to_html(&render("- a\n2. b"));
        assert!(html.contains("tubesum-bullet\">\u{2022}</span><span>a</span>"));
        assert!(html.contains("tubesum-ordinal\">2.</span><span>b</span>"));
    }

    #[test]
    fn blank_line_is_spacer() {
        let html = to_html(&render("a\n\nb"));
        assert_eq!(html, "<p>a</p>\n<div class=\"tubesum-gap\"></div>\n<p>b</p>");
    }

    #[test]
    fn table_markup() {
        let html = to_html(&render("x\n| Time | Topic |\n|---|---|\n| 00:01 | **Intro** |"));
        assert!(html.contains("<thead><tr><th scope=\"col\">Time</th><th scope=\"col\">Topic</th></tr></thead>"));
        assert!(html.contains("<tbody><tr><td>00:01</td><td><strong>Intro</strong></td></tr></tbody>"));
    }

    #[test]
    fn link_opens_new_tab() {
        let html = to_html(&render("[Docs](http://x.com)"));
        assert_eq!(
            html,
            "<p><a href=\"http://x.com\" target=\"_blank\" rel=\"noopener noreferrer\">Docs</a></p>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let html = to_html(&render("<script>alert(\"x\")</script> & more"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn link_url_attribute_is_escaped() {
        let html = to_html(&render("[x](http://a\"onmouseover=\"b)"));
        assert!(html.contains("href=\"http://a&quot;onmouseover=&quot;b\""));
    }

    #[test]
    fn script_links_render_as_text() {
        let html = to_html(&render("[click](javascript:alert(document.cookie))"));
        assert_eq!(html, "<p>click)</p>");

        let html = to_html(&render("[x]( JavaScript:void(0)) [d](data:text/html,hi)"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("href"));
    }

    #[test]
    fn mail_and_https_links_kept() {
        let html = to_html(&render("[mail](mailto:a@b.c) [web](HTTPS://x.com)"));
        assert!(html.contains("href=\"mailto:a@b.c\""));
        assert!(html.contains("href=\"HTTPS://x.com\""));
    }

    #[test]
    fn page_wraps_fragment() {
        let config = PageConfig {
            title: Some("Summary of <Talk>".into()),
            source_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".into()),
            ..Default::default()
        };
        let page = to_html_page(&render("## Hi"), &config);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Summary of &lt;Talk&gt;</title>"));
        assert!(page.contains("<h2>Hi</h2>"));
        assert!(page.contains("tubesum-source"));
        assert!(page.contains("<html lang=\"en\">"));
    }
}
