//! Line classifier for text runs.
//!
//! Every physical line is classified on its own by an ordered rule list; the
//! first rule that accepts the line wins. Consecutive list items are never
//! merged.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::tokenize;
use crate::types::{Line, ListMarker};

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.\s(.*)").expect("ordinal pattern is valid"));

/// A classification rule: returns a line when it applies.
type Rule = fn(&str) -> Option<Line>;

/// Rules in priority order. Keep `blank` first; `paragraph` accepts anything
/// and must stay last.
const RULES: &[Rule] = &[blank, heading2, heading3, bullet_item, ordinal_item, paragraph];

/// Classify every physical line of `text`.
pub fn classify_text(text: &str) -> Vec<Line> {
    text.split('\n').map(classify_line).collect()
}

/// Classify one physical line.
pub fn classify_line(line: &str) -> Line {
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(Line::Blank)
}

fn blank(line: &str) -> Option<Line> {
    line.trim().is_empty().then_some(Line::Blank)
}

fn heading2(line: &str) -> Option<Line> {
    line.strip_prefix("## ").map(|rest| Line::Heading2 {
        spans: tokenize(rest),
    })
}

fn heading3(line: &str) -> Option<Line> {
    line.strip_prefix("### ").map(|rest| Line::Heading3 {
        spans: tokenize(rest),
    })
}

fn bullet_item(line: &str) -> Option<Line> {
    let trimmed = line.trim();
    let rest = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))?;
    Some(Line::ListItem {
        marker: ListMarker::Bullet,
        spans: tokenize(rest),
    })
}

fn ordinal_item(line: &str) -> Option<Line> {
    let caps = ORDINAL_RE.captures(line.trim())?;
    let value = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some(Line::ListItem {
        marker: ListMarker::Ordinal {
            value: value.to_string(),
        },
        spans: tokenize(rest),
    })
}

fn paragraph(line: &str) -> Option<Line> {
    Some(Line::Paragraph {
        spans: tokenize(line),
    })
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineSpan;
    use pretty_assertions::assert_eq;

    fn ordinal(value: &str) -> ListMarker {
        ListMarker::Ordinal {
            value: value.to_string(),
        }
    }

    #[test]
    fn whitespace_is_blank() {
        assert_eq!(classify_line(""), Line::Blank);
        assert_eq!(classify_line("   \t"), Line::Blank);
    }

    #[test]
    fn headings() {
        assert_eq!(
            classify_line("## Intro"),
            Line::Heading2 {
                spans: vec![InlineSpan::plain("Intro")]
            }
        );
        assert_eq!(
            classify_line("### **Key** points"),
            Line::Heading3 {
                spans: vec![InlineSpan::bold("Key"), InlineSpan::plain(" points")]
            }
        );
    }

    #[test]
    fn heading_marker_is_not_trimmed() {
        assert!(matches!(classify_line("  ## Intro"), Line::Paragraph { .. }));
        assert!(matches!(classify_line("#### Deep"), Line::Paragraph { .. }));
        assert!(matches!(classify_line("##NoSpace"), Line::Paragraph { .. }));
    }

    #[test]
    fn bullets_are_trimmed() {
        assert_eq!(
            classify_line("   - item"),
            Line::ListItem {
                marker: ListMarker::Bullet,
                spans: vec![InlineSpan::plain("item")]
            }
        );
        assert_eq!(
            classify_line("* star"),
            Line::ListItem {
                marker: ListMarker::Bullet,
                spans: vec![InlineSpan::plain("star")]
            }
        );
    }

    #[test]
    fn bold_line_is_not_a_bullet() {
        assert_eq!(
            classify_line("**Note** this"),
            Line::Paragraph {
                spans: vec![InlineSpan::bold("Note"), InlineSpan::plain(" this")]
            }
        );
    }

    #[test]
    fn ordinal_prefix_kept_verbatim() {
        assert_eq!(
            classify_line("07. Seventh"),
            Line::ListItem {
                marker: ordinal("07"),
                spans: vec![InlineSpan::plain("Seventh")]
            }
        );
    }

    #[test]
    fn ordinal_needs_space_after_dot() {
        assert!(matches!(classify_line("3.14 is pi"), Line::Paragraph { .. }));
    }

    #[test]
    fn consecutive_ordinals_stay_independent() {
        let lines = classify_text("1. First step\n2. Second step");
        assert_eq!(
            lines,
            vec![
                Line::ListItem {
                    marker: ordinal("1"),
                    spans: vec![InlineSpan::plain("First step")]
                },
                Line::ListItem {
                    marker: ordinal("2"),
                    spans: vec![InlineSpan::plain("Second step")]
                },
            ]
        );
    }

    #[test]
    fn paragraph_keeps_leading_whitespace() {
        assert_eq!(
            classify_line("  indented"),
            Line::Paragraph {
                spans: vec![InlineSpan::plain("  indented")]
            }
        );
    }
}
