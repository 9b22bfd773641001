//! Tab expansion and width wrapping of source lines into display rows.
//!
//! Both passes are column-aware: a column is a terminal cell, so CJK and
//! other wide glyphs count as two and combining marks as zero. Wrapping is
//! iterative; a pathological multi-megabyte line costs heap, not stack.

use core_events::WindowSpec;
use unicode_width::UnicodeWidthChar;

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Replace every tab with spaces up to the next multiple of `tab_width`
/// display columns.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = tab_width - (col % tab_width);
            for _ in 0..pad {
                out.push(' ');
            }
            col += pad;
        } else {
            out.push(c);
            col += char_width(c);
        }
    }
    out
}

/// Split a (tab-free) line into consecutive chunks of display width at most
/// `cols`, preserving order. An empty line yields a single empty row. A wide
/// glyph that would straddle the boundary moves whole to the next chunk.
///
/// One exception to the width bound: a wide glyph on a window narrower than
/// itself (cols = 1) cannot be split, so it occupies a row of width 2 alone
/// and the terminal truncates it. Every row still makes progress.
pub fn wrap_line(line: &str, cols: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut width = 0usize;
    for c in line.chars() {
        let w = char_width(c);
        if width + w > cols && width > 0 {
            rows.push(std::mem::take(&mut row));
            width = 0;
        }
        row.push(c);
        width += w;
    }
    rows.push(row);
    rows
}

/// Derive the full render buffer for a document under the given geometry:
/// tab expansion first, then width wrapping, preserving source-line order.
pub fn render_rows(source: &[String], spec: &WindowSpec) -> Vec<String> {
    let mut rows = Vec::with_capacity(source.len());
    for line in source {
        let expanded = expand_tabs(line, spec.tab_width());
        rows.extend(wrap_line(&expanded, spec.cols()));
    }
    rows
}
