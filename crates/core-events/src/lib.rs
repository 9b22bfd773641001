//! Input event model and terminal geometry shared across the pager crates.
//!
//! This crate is the leaf of the workspace: `core-buffer`, `core-render` and
//! `core-control` all consume `WindowSpec` and `Key` without depending on the
//! terminal backend. The only crossterm coupling here is the translation from
//! raw `crossterm::event::Event` values into our own event vocabulary.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Immutable snapshot of the terminal geometry in effect at a given moment.
///
/// `rows` counts content rows only; the status line occupies one additional
/// terminal row below them. A fresh `WindowSpec` is built on every resize
/// notification and replaces the previous one wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    rows: u16,
    cols: u16,
    tab_width: u16,
}

impl WindowSpec {
    /// Build a spec, clamping every dimension to at least 1 so downstream
    /// arithmetic never divides or slices by zero.
    pub fn new(rows: u16, cols: u16, tab_width: u16) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            tab_width: tab_width.max(1),
        }
    }

    /// Number of content rows (excludes the status line).
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of display columns.
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Tab stops occur at multiples of this column count.
    pub fn tab_width(&self) -> usize {
        self.tab_width as usize
    }
}

/// Keys the pager reacts to. Anything else is dropped at translation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
    PageDown,
}

/// Top-level event consumed by the controller loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    Key(Key),
    /// Raw terminal dimensions (cols, rows) as reported by the driver. The
    /// status-line reservation is applied by whoever builds the `WindowSpec`.
    Resize(u16, u16),
}

/// Map a raw crossterm event into a pager event. Returns `None` for events
/// the pager has no use for (mouse, focus, paste, unmapped keys).
pub fn map_event(event: &CrosstermEvent) -> Option<PagerEvent> {
    match event {
        CrosstermEvent::Key(key) => map_key_event(key).map(PagerEvent::Key),
        CrosstermEvent::Resize(cols, rows) => Some(PagerEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

/// Map a crossterm key event into a pager key.
///
/// Release events are dropped so keys fire once per press; repeat events pass
/// through so held-down navigation keys keep scrolling.
pub fn map_key_event(event: &KeyEvent) -> Option<Key> {
    if matches!(event.kind, KeyEventKind::Release) {
        return None;
    }
    map_key_code(&event.code)
}

fn map_key_code(code: &KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(*c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(key)
}
