//! Redraw decision and frame emission for the pager.
//!
//! Given a window of render rows, an optional highlight term and the signed
//! viewport delta, this crate decides between a full repaint and a hardware
//! scroll that repaints only the newly revealed rows, pads short windows with
//! the `~` filler, and emits everything through the queued [`writer::Writer`].
//!
//! The crate performs no input handling and owns no viewport state; the
//! controller hands it plain data per frame.

use core_events::WindowSpec;

pub mod highlight;
pub mod status;
pub mod writer;

use status::StatusLine;
use writer::Writer;

/// How much of the screen a navigation event requires repainting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintPlan {
    /// Repaint every content row.
    Full,
    /// Shift already-drawn content by `delta` rows (positive = content moves
    /// up) and repaint only the rows the shift revealed.
    Scroll { delta: isize },
}

/// Choose the repaint strategy for a viewport delta: deltas of a full window
/// height or more repaint everything, smaller ones scroll incrementally.
pub fn plan_for_delta(moved: isize, spec: &WindowSpec) -> RepaintPlan {
    if moved.unsigned_abs() >= spec.rows() {
        RepaintPlan::Full
    } else {
        RepaintPlan::Scroll { delta: moved }
    }
}

/// Filler marker shown on rows past the end of the render buffer.
const FILLER: &str = "~";

/// Extend a short window with filler rows so the viewport is always exactly
/// `rows` tall. Trailing cells are blanked by the per-row line clear.
pub fn pad_window(rows: &[String], spec: &WindowSpec) -> Vec<String> {
    let mut padded = rows.to_vec();
    while padded.len() < spec.rows() {
        padded.push(FILLER.to_string());
    }
    padded
}

/// Repaint every content row of the window.
pub fn draw_full(w: &mut Writer, spec: &WindowSpec, padded: &[String], term: &str) {
    for (y, row) in padded.iter().enumerate().take(spec.rows()) {
        draw_row(w, y as u16, row, term);
    }
}

/// Shift the screen by `delta` rows and repaint only the revealed rows.
/// Caller guarantees `|delta| < rows` (larger deltas take the full path).
/// A zero delta emits nothing; it occurs when a slide hit a buffer edge.
pub fn draw_scroll(w: &mut Writer, spec: &WindowSpec, padded: &[String], delta: isize, term: &str) {
    let rows = spec.rows();
    if delta > 0 {
        let revealed = delta as usize;
        w.scroll_up(revealed as u16);
        for y in rows - revealed..rows {
            draw_row(w, y as u16, &padded[y], term);
        }
    } else if delta < 0 {
        let revealed = delta.unsigned_abs();
        w.scroll_down(revealed as u16);
        for y in 0..revealed {
            draw_row(w, y as u16, &padded[y], term);
        }
    }
}

/// Repaint one content row, rendering highlight spans in reverse video.
pub fn draw_row(w: &mut Writer, y: u16, row: &str, term: &str) {
    w.move_to(0, y);
    w.clear_line();
    let spans = highlight::spans(row, term);
    if spans.is_empty() {
        w.print(row);
        return;
    }
    let mut cursor = 0;
    for span in spans {
        w.print(&row[cursor..span.start]);
        w.print_reversed(&row[span.clone()]);
        cursor = span.end;
    }
    w.print(&row[cursor..]);
}

/// Repaint the status line on the row below the content window.
pub fn draw_status(w: &mut Writer, spec: &WindowSpec, line: &StatusLine) {
    let (text, reversed) = status::text(line);
    w.move_to(0, spec.rows() as u16);
    w.clear_line();
    if reversed {
        w.print_reversed(text);
    } else {
        w.print(text);
    }
}
