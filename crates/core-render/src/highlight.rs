//! Search-term highlighting: locate every occurrence of the term in a row so
//! the writer can render those byte ranges in reverse video.

use std::ops::Range;

/// All non-overlapping occurrences of `term` in `row`, left to right, each
/// scan resuming at the end of the previous match. Byte ranges, suitable for
/// slicing `row` directly. An empty term highlights nothing.
pub fn spans(row: &str, term: &str) -> Vec<Range<usize>> {
    if term.is_empty() {
        return Vec::new();
    }
    row.match_indices(term)
        .map(|(start, m)| start..start + m.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_every_occurrence() {
        assert_eq!(spans("abcabcabc", "abc"), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn matches_do_not_overlap() {
        // "aaaa" contains "aa" at 0, 1 and 2, but scanning resumes after
        // each match so only 0..2 and 2..4 are reported.
        assert_eq!(spans("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn empty_term_highlights_nothing() {
        assert!(spans("anything", "").is_empty());
    }

    #[test]
    fn absent_term_yields_no_spans() {
        assert!(spans("abc", "xyz").is_empty());
    }

    #[test]
    fn spans_are_valid_slice_ranges() {
        let row = "pre \u{6f22}match\u{5b57} post match";
        for span in spans(row, "match") {
            assert_eq!(&row[span], "match");
        }
    }
}
