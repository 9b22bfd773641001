//! Terminal session abstraction and crossterm implementation.
//!
//! The pager core never talks to the terminal driver directly; it consumes
//! this capability for geometry, blocking event reads and raw-mode lifecycle.
//! Restoring the terminal on every exit path (including panic) is the one
//! piece of RAII discipline the program needs, handled by [`TerminalGuard`].

use anyhow::Result;
use core_events::{PagerEvent, WindowSpec, map_event};
use crossterm::{
    cursor::{Hide, Show},
    event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

/// One content row is reserved for the status line at the bottom.
const STATUS_ROWS: u16 = 1;

/// Tab stops every 8 columns. The terminal offers no portable probe for its
/// own tab width; since the render buffer expands tabs itself the value only
/// has to be self-consistent.
const TAB_WIDTH: u16 = 8;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// Current geometry with the status row already reserved.
    fn window_spec(&self) -> Result<WindowSpec>;
    /// Block until the next event the pager cares about arrives.
    fn next_event(&mut self) -> Result<PagerEvent>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if the caller
/// early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter raw mode and the alternate screen, returning a guard that
    /// leaves on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn window_spec(&self) -> Result<WindowSpec> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(WindowSpec::new(
            rows.saturating_sub(STATUS_ROWS),
            cols,
            TAB_WIDTH,
        ))
    }

    fn next_event(&mut self) -> Result<PagerEvent> {
        // Events outside the pager's vocabulary (mouse, focus, releases) are
        // swallowed here so the caller only ever blocks on meaningful input.
        loop {
            let raw = event::read()?;
            if let Some(ev) = map_event(&raw) {
                return Ok(ev);
            }
        }
    }
}

impl TerminalGuard<'_> {
    /// Geometry query, delegated so the event loop can hold only the guard.
    pub fn window_spec(&self) -> Result<WindowSpec> {
        self.backend.window_spec()
    }

    /// Blocking event read, delegated likewise.
    pub fn next_event(&mut self) -> Result<PagerEvent> {
        self.backend.next_event()
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
