//! Windowing, wrapping and search engine over a fixed text source.
//!
//! `LineBuffer` owns the source document (immutable after load) and derives a
//! render buffer from it whenever the terminal geometry changes. All viewport
//! movement flows through its slide/search operations, so the invariant
//! `0 <= top <= max(0, len - rows)` holds after every navigation call; a
//! successful search may additionally park `top` on any matched row, even one
//! close enough to the end that the window runs short (padding is the
//! renderer's job).
//!
//! The buffer binds one render buffer to one geometry at a time: replacing the
//! `WindowSpec` discards the previous derivation outright rather than caching
//! per-geometry variants.

use core_events::WindowSpec;
use tracing::debug;

pub mod wrap;

/// Result of a slide operation: how far the viewport actually moved, whether
/// the buffer end is visible, and the resulting window.
#[derive(Debug)]
pub struct Slide<'a> {
    pub moved: isize,
    pub at_end: bool,
    pub rows: &'a [String],
}

/// Result of a search: signed viewport delta, whether the pattern was found,
/// end-of-buffer visibility, and the resulting window.
#[derive(Debug)]
pub struct SearchHit<'a> {
    pub moved: isize,
    pub found: bool,
    pub at_end: bool,
    pub rows: &'a [String],
}

pub struct LineBuffer {
    source: Vec<String>,
    rendered: Vec<String>,
    spec: WindowSpec,
    top: usize,
}

impl LineBuffer {
    pub fn new(source: Vec<String>, spec: WindowSpec) -> Self {
        let rendered = wrap::render_rows(&source, &spec);
        Self {
            source,
            rendered,
            spec,
            top: 0,
        }
    }

    /// Rebuild the render buffer for a new geometry, discarding the old one,
    /// then clamp `top` into the valid range for the new buffer. Row
    /// boundaries shift with the width, so the viewport may land on different
    /// source text, but it never points past the end.
    pub fn set_window_spec(&mut self, spec: WindowSpec) {
        self.spec = spec;
        self.rendered = wrap::render_rows(&self.source, &spec);
        self.top = self.top.min(self.max_top());
        debug!(
            target: "buffer",
            rows = spec.rows(),
            cols = spec.cols(),
            rendered = self.rendered.len(),
            top = self.top,
            "render_buffer_rebuilt"
        );
    }

    /// The currently visible slice (length <= rows) and whether the last
    /// render row is visible. Total even for an empty document.
    pub fn window(&self) -> (bool, &[String]) {
        let start = self.top.min(self.rendered.len());
        let end = (self.top + self.spec.rows()).min(self.rendered.len());
        (self.at_end(), &self.rendered[start..end])
    }

    /// Advance the viewport by up to `n` rows, clamped so the window never
    /// scrolls past the last render row. Returns the actual movement, which
    /// is less than `n` when the end is near and 0 when already there.
    pub fn slide_down(&mut self, n: usize) -> Slide<'_> {
        if self.at_end() {
            // Covers top parked past max_top by a search near the buffer end.
            return Slide {
                moved: 0,
                at_end: true,
                rows: self.window().1,
            };
        }
        let target = (self.top + n).min(self.max_top());
        let moved = (target - self.top) as isize;
        self.top = target;
        Slide {
            moved,
            at_end: self.at_end(),
            rows: self.window().1,
        }
    }

    /// Retreat the viewport toward the top. Moves at most one row per call
    /// regardless of `n`; the controller never asks for more.
    pub fn slide_up(&mut self, n: usize) -> Slide<'_> {
        let step = n.min(1).min(self.top);
        self.top -= step;
        Slide {
            moved: -(step as isize),
            at_end: self.at_end(),
            rows: self.window().1,
        }
    }

    /// Scan forward from `skip` rows below the current top (inclusive of the
    /// starting row when `skip` is 0) for a row containing `pattern` as a
    /// literal substring. The first hit becomes the new top; a miss leaves
    /// the viewport exactly where it was.
    pub fn search_forward(&mut self, pattern: &str, skip: usize) -> SearchHit<'_> {
        let start = self.top + skip;
        let hit = self
            .rendered
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, row)| row.contains(pattern))
            .map(|(r, _)| r);
        self.conclude_search(pattern, hit)
    }

    /// Scan backward from the row just above `top - skip` toward row 0. The
    /// first hit becomes the new top; a miss leaves the viewport unchanged.
    /// Neither direction wraps around the buffer ends.
    pub fn search_backward(&mut self, pattern: &str, skip: usize) -> SearchHit<'_> {
        let limit = self.top.saturating_sub(skip);
        let hit = self.rendered[..limit]
            .iter()
            .rposition(|row| row.contains(pattern));
        self.conclude_search(pattern, hit)
    }

    fn conclude_search(&mut self, pattern: &str, hit: Option<usize>) -> SearchHit<'_> {
        let moved = match hit {
            Some(row) => {
                let moved = row as isize - self.top as isize;
                self.top = row;
                moved
            }
            None => 0,
        };
        debug!(target: "buffer", pattern, found = hit.is_some(), moved, top = self.top, "search");
        SearchHit {
            moved,
            found: hit.is_some(),
            at_end: self.at_end(),
            rows: self.window().1,
        }
    }

    /// First visible render-buffer row.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Total render-buffer rows under the current geometry.
    pub fn render_len(&self) -> usize {
        self.rendered.len()
    }

    fn at_end(&self) -> bool {
        self.top + self.spec.rows() >= self.rendered.len()
    }

    fn max_top(&self) -> usize {
        self.rendered.len().saturating_sub(self.spec.rows())
    }
}
