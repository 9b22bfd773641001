//! Event-driven navigation and search state machine.
//!
//! The controller turns key events into `LineBuffer` operations and decides
//! what subset of the screen changed, producing an [`Update`] of draw
//! instructions per event. It performs no I/O itself: the binary executes
//! each `Update` through `core-render`, which keeps the entire state machine
//! testable without a terminal.
//!
//! Input modes: `Normal` handles navigation and starts searches,
//! `SearchEntry` accumulates a pattern character by character, and
//! `AwaitingAck` swallows the Enter that dismisses a "not found" message so
//! it cannot accidentally scroll. Exactly one mode is active at a time.
//! No event can raise a fatal condition; the session only ends on `q`.

use core_buffer::LineBuffer;
use core_events::{Key, WindowSpec};
use core_render::status::StatusLine;
use core_render::{RepaintPlan, plan_for_delta};
use tracing::debug;

/// Search direction. `N` repeats with the direction inverted for that one
/// invocation; the committed direction itself is never toggled in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    fn prompt_prefix(self) -> char {
        match self {
            Direction::Forward => '/',
            Direction::Backward => '?',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Normal,
    SearchEntry {
        direction: Direction,
        partial: String,
    },
    AwaitingAck,
}

/// Content repaint instruction: which strategy, the (unpadded) window rows
/// and the term to render in reverse video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaint {
    pub plan: RepaintPlan,
    pub rows: Vec<String>,
    pub highlight: String,
}

/// Draw instructions produced for one input event. `None` fields mean "leave
/// that part of the screen alone"; an all-`None` update is a silently ignored
/// key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub repaint: Option<Repaint>,
    pub status: Option<StatusLine>,
    pub quit: bool,
}

impl Update {
    fn ignored() -> Self {
        Self {
            repaint: None,
            status: None,
            quit: false,
        }
    }

    fn status_only(status: StatusLine) -> Self {
        Self {
            repaint: None,
            status: Some(status),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            repaint: None,
            status: None,
            quit: true,
        }
    }

    /// True when the event changed nothing on screen.
    pub fn is_noop(&self) -> bool {
        self.repaint.is_none() && self.status.is_none() && !self.quit
    }
}

pub struct Controller {
    buffer: LineBuffer,
    spec: WindowSpec,
    mode: InputMode,
    last_search: String,
    direction: Direction,
    /// Highlight term of the last emitted content repaint. A scroll plan
    /// repaints only revealed rows, so it is only valid while the term on
    /// screen matches the term to draw; otherwise plans escalate to Full.
    painted_highlight: String,
}

impl Controller {
    pub fn new(lines: Vec<String>, spec: WindowSpec) -> Self {
        Self {
            buffer: LineBuffer::new(lines, spec),
            spec,
            mode: InputMode::Normal,
            last_search: String::new(),
            direction: Direction::Forward,
            painted_highlight: String::new(),
        }
    }

    /// Build a content repaint, recording its term as the one now on screen.
    fn make_repaint(&mut self, plan: RepaintPlan, rows: Vec<String>) -> Repaint {
        self.painted_highlight = self.last_search.clone();
        Repaint {
            plan,
            rows,
            highlight: self.last_search.clone(),
        }
    }

    /// Full repaint of the current viewport; used for the first render.
    pub fn initial_update(&mut self) -> Update {
        self.full_window()
    }

    /// Apply a new geometry: rebuild the render buffer (the buffer clamps the
    /// viewport into range) and repaint everything. The input mode survives a
    /// resize untouched.
    pub fn resize(&mut self, spec: WindowSpec) -> Update {
        self.spec = spec;
        self.buffer.set_window_spec(spec);
        self.full_window()
    }

    /// Advance the state machine by one key event.
    pub fn handle_key(&mut self, key: Key) -> Update {
        debug!(target: "control", ?key, mode = ?self.mode, "key");
        match self.mode.clone() {
            InputMode::Normal => self.handle_normal(key),
            InputMode::SearchEntry { direction, partial } => {
                self.handle_search_entry(key, direction, partial)
            }
            InputMode::AwaitingAck => self.handle_awaiting_ack(key),
        }
    }

    fn handle_normal(&mut self, key: Key) -> Update {
        match key {
            Key::Char('j') | Key::Down | Key::Enter => self.slide_down(1),
            Key::Char(' ') | Key::PageDown => self.slide_down(self.spec.rows()),
            Key::Char('k') | Key::Up => self.slide_up(),
            Key::Char('/') => self.start_search_entry(Direction::Forward),
            Key::Char('?') => self.start_search_entry(Direction::Backward),
            Key::Char('n') => self.repeat_search(self.direction),
            Key::Char('N') => self.repeat_search(self.direction.flipped()),
            Key::Char('q') => Update::quit(),
            _ => Update::ignored(),
        }
    }

    /// The pending "not found" message: Enter dismisses it, any key that does
    /// something acts normally and drops the flag, and keys the pager ignores
    /// leave the message (and the flag) in place. An action that would leave
    /// the status untouched still clears the message, since the flag it
    /// belonged to is gone.
    fn handle_awaiting_ack(&mut self, key: Key) -> Update {
        if key == Key::Enter {
            self.mode = InputMode::Normal;
            return Update::status_only(StatusLine::Idle);
        }
        self.mode = InputMode::Normal;
        let mut update = self.handle_normal(key);
        if update.is_noop() {
            self.mode = InputMode::AwaitingAck;
        } else if update.status.is_none() && !update.quit {
            update.status = Some(StatusLine::Idle);
        }
        update
    }

    fn handle_search_entry(
        &mut self,
        key: Key,
        direction: Direction,
        mut partial: String,
    ) -> Update {
        match key {
            Key::Enter => {
                self.mode = InputMode::Normal;
                self.commit_search(direction, partial)
            }
            Key::Backspace => {
                partial.pop();
                self.echo_prompt(direction, partial)
            }
            Key::Char(c) => {
                partial.push(c);
                self.echo_prompt(direction, partial)
            }
            _ => Update::ignored(),
        }
    }

    fn echo_prompt(&mut self, direction: Direction, partial: String) -> Update {
        let status = StatusLine::Prompt {
            prefix: direction.prompt_prefix(),
            partial: partial.clone(),
        };
        self.mode = InputMode::SearchEntry { direction, partial };
        Update::status_only(status)
    }

    fn start_search_entry(&mut self, direction: Direction) -> Update {
        self.direction = direction;
        self.echo_prompt(direction, String::new())
    }

    /// Commit a search entry. An empty entry repeats the last committed
    /// pattern, moving past the current position; a non-empty entry becomes
    /// the new pattern and may match the row already at the top.
    fn commit_search(&mut self, direction: Direction, partial: String) -> Update {
        let skip = if partial.is_empty() {
            if self.last_search.is_empty() {
                return Update::status_only(StatusLine::NoPrevious);
            }
            1
        } else {
            self.last_search = partial;
            0
        };
        self.run_search(direction, skip)
    }

    fn repeat_search(&mut self, direction: Direction) -> Update {
        if self.last_search.is_empty() {
            return Update::status_only(StatusLine::NoPrevious);
        }
        self.run_search(direction, 1)
    }

    fn run_search(&mut self, direction: Direction, skip: usize) -> Update {
        let hit = match direction {
            Direction::Forward => self.buffer.search_forward(&self.last_search, skip),
            Direction::Backward => self.buffer.search_backward(&self.last_search, skip),
        };
        let (moved, found, at_end) = (hit.moved, hit.found, hit.at_end);
        let rows = hit.rows.to_vec();
        if found {
            // Scrolling repaints only the revealed rows, which is wrong when
            // the rows already on screen carry a stale highlight term (a
            // fresh commit) or when nothing moved but the term did; both
            // cases repaint fully so every occurrence is marked.
            let plan = if moved == 0 || self.painted_highlight != self.last_search {
                RepaintPlan::Full
            } else {
                plan_for_delta(moved, &self.spec)
            };
            let repaint = self.make_repaint(plan, rows);
            Update {
                repaint: Some(repaint),
                status: Some(if at_end {
                    StatusLine::End
                } else {
                    StatusLine::Idle
                }),
                quit: false,
            }
        } else {
            // Repaint the unchanged window fully so highlights reflect the
            // (possibly new) pattern, and swallow the next Enter.
            self.mode = InputMode::AwaitingAck;
            let repaint = self.make_repaint(RepaintPlan::Full, rows);
            Update {
                repaint: Some(repaint),
                status: Some(StatusLine::NotFound),
                quit: false,
            }
        }
    }

    fn slide_down(&mut self, n: usize) -> Update {
        let slide = self.buffer.slide_down(n);
        let (moved, at_end) = (slide.moved, slide.at_end);
        let rows = slide.rows.to_vec();
        let repaint = self.make_repaint(plan_for_delta(moved, &self.spec), rows);
        Update {
            repaint: Some(repaint),
            status: at_end.then_some(StatusLine::End),
            quit: false,
        }
    }

    fn slide_up(&mut self) -> Update {
        let slide = self.buffer.slide_up(1);
        let (moved, at_end) = (slide.moved, slide.at_end);
        let rows = slide.rows.to_vec();
        let repaint = self.make_repaint(plan_for_delta(moved, &self.spec), rows);
        Update {
            repaint: Some(repaint),
            status: Some(if at_end {
                StatusLine::End
            } else {
                StatusLine::Idle
            }),
            quit: false,
        }
    }

    fn full_window(&mut self) -> Update {
        let (at_end, rows) = self.buffer.window();
        let rows = rows.to_vec();
        let status = match &self.mode {
            InputMode::SearchEntry { direction, partial } => StatusLine::Prompt {
                prefix: direction.prompt_prefix(),
                partial: partial.clone(),
            },
            _ if at_end => StatusLine::End,
            _ => StatusLine::Idle,
        };
        let repaint = self.make_repaint(RepaintPlan::Full, rows);
        Update {
            repaint: Some(repaint),
            status: Some(status),
            quit: false,
        }
    }

    /// Current first visible render row, for tests and diagnostics.
    pub fn top(&self) -> usize {
        self.buffer.top()
    }
}
