//! Pipe-table parser.

use crate::inline::tokenize;
use crate::types::{Block, Cell};

/// Parse a raw table candidate into a [`Block::Table`].
///
/// Returns `None` when fewer than two non-empty rows remain. Row 0 is the
/// header, row 1 is skipped as the separator without looking at its content,
/// and every later row is data with its own cell count.
pub fn parse_table(candidate: &str) -> Option<Block> {
    let mut rows: Vec<Vec<&str>> = candidate
        .trim()
        .split('\n')
        .map(split_row)
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() < 2 {
        tracing::debug!(rows = rows.len(), "discarding table candidate with fewer than 2 rows");
        return None;
    }

    let data: Vec<Vec<Cell>> = rows
        .drain(2..)
        .map(|row| row.into_iter().map(to_cell).collect())
        .collect();
    let header = rows.swap_remove(0).into_iter().map(to_cell).collect();

    Some(Block::Table { header, rows: data })
}

/// Split one physical row on `|`, dropping cells that are empty once trimmed.
fn split_row(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

fn to_cell(text: &str) -> Cell {
    Cell {
        text: text.to_string(),
        spans: tokenize(text),
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineSpan;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_and_one_row() {
        let block = parse_table("\n| Time | Topic |\n|---|---|\n| 00:01 | Intro |\n\n").unwrap();
        assert_eq!(block.header_texts(), vec!["Time", "Topic"]);
        assert_eq!(block.row_texts(), vec![vec!["00:01", "Intro"]]);
    }

    #[test]
    fn single_row_is_discarded() {
        assert_eq!(parse_table("| only | header |"), None);
    }

    #[test]
    fn blank_candidate_is_discarded() {
        assert_eq!(parse_table("  \n \n"), None);
    }

    #[test]
    fn header_and_separator_gives_zero_rows() {
        let block = parse_table("| a | b |\n|---|---|").unwrap();
        assert_eq!(block.header_texts(), vec!["a", "b"]);
        assert!(block.row_texts().is_empty());
    }

    #[test]
    fn ragged_rows_keep_their_width() {
        let block = parse_table("| a | b |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |").unwrap();
        assert_eq!(block.row_texts(), vec![vec!["1"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn stray_blank_lines_are_ignored() {
        let block = parse_table("| a |\n\n|---|\n   \n| 1 |").unwrap();
        assert_eq!(block.row_texts(), vec![vec!["1"]]);
    }

    #[test]
    fn separator_is_never_validated() {
        // The second row is consumed even though it is real data.
        let block = parse_table("| a | b |\n| 1 | 2 |\n| 3 | 4 |").unwrap();
        assert_eq!(block.row_texts(), vec![vec!["3", "4"]]);
    }

    #[test]
    fn cells_are_tokenized() {
        let block = parse_table("| Time | Topic |\n|---|---|\n| [00:01](http://t) | **Intro** |").unwrap();
        let Block::Table { rows, .. } = block else {
            panic!("expected table");
        };
        assert_eq!(rows[0][0].spans, vec![InlineSpan::link("00:01", "http://t")]);
        assert_eq!(rows[0][1].spans, vec![InlineSpan::bold("Intro")]);
    }

    #[test]
    fn empty_middle_cells_are_dropped() {
        let block = parse_table("| a | | b |\n|---|---|---|").unwrap();
        assert_eq!(block.header_texts(), vec!["a", "b"]);
    }
}
