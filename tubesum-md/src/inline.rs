//! Inline tokenizer.
//!
//! Splits one line of text into plain, bold and link spans. Bold
//! (`**text**`) and link (`[label](url)`) are scanned by a single
//! alternation so a span claimed by one pattern is never re-entered by the
//! other.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::InlineSpan;

static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*|\[(.*?)\]\((.*?)\)").expect("inline pattern is valid")
});

/// Tokenize `text` into inline spans, left to right.
///
/// Text outside bold/link matches becomes `PlainText`; zero-length plain
/// fragments are omitted. Unterminated markup is left as plain text.
pub fn tokenize(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&mut spans, &text[last..whole.start()]);

        if let Some(bold) = caps.get(1) {
            spans.push(InlineSpan::bold(bold.as_str()));
        } else if let (Some(label), Some(url)) = (caps.get(2), caps.get(3)) {
            // The url ends at the first `](`, as if the bracket body were split on it.
            let url = url.as_str().split("](").next().unwrap_or_default();
            spans.push(InlineSpan::link(label.as_str(), url));
        }

        last = whole.end();
    }

    push_plain(&mut spans, &text[last..]);
    spans
}

fn push_plain(spans: &mut Vec<InlineSpan>, fragment: &str) {
    if !fragment.is_empty() {
        spans.push(InlineSpan::plain(fragment));
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::visible_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_only() {
        assert_eq!(tokenize("just words"), vec![InlineSpan::plain("just words")]);
    }

    #[test]
    fn empty_line_has_no_spans() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn bold_at_end() {
        assert_eq!(
            tokenize("Hello **world**"),
            vec![InlineSpan::plain("Hello "), InlineSpan::bold("world")]
        );
    }

    #[test]
    fn link_then_text() {
        assert_eq!(
            tokenize("[Docs](http://x.com) here"),
            vec![InlineSpan::link("Docs", "http://x.com"), InlineSpan::plain(" here")]
        );
    }

    #[test]
    fn bold_is_non_greedy() {
        assert_eq!(
            tokenize("**a** and **b**"),
            vec![
                InlineSpan::bold("a"),
                InlineSpan::plain(" and "),
                InlineSpan::bold("b"),
            ]
        );
    }

    #[test]
    fn link_inside_bold_stays_bold() {
        assert_eq!(tokenize("**[a](b)**"), vec![InlineSpan::bold("[a](b)")]);
    }

    #[test]
    fn bold_inside_link_label_stays_in_label() {
        assert_eq!(
            tokenize("[**x**](http://y)"),
            vec![InlineSpan::link("**x**", "http://y")]
        );
    }

    #[test]
    fn unterminated_markup_is_plain() {
        assert_eq!(
            tokenize("**open and [label](no close"),
            vec![InlineSpan::plain("**open and [label](no close")]
        );
    }

    #[test]
    fn url_cut_at_second_bracket_paren() {
        assert_eq!(tokenize("[a](b](c)"), vec![InlineSpan::link("a", "b")]);
    }

    #[test]
    fn timestamp_link() {
        let spans = tokenize("[01:05](https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=01m05s)");
        assert_eq!(
            spans,
            vec![InlineSpan::link(
                "01:05",
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=01m05s"
            )]
        );
    }

    #[test]
    fn visible_text_drops_delimiters() {
        let spans = tokenize("See **this** and [that](http://t) now");
        assert_eq!(visible_text(&spans), "See this and that now");
    }
}
