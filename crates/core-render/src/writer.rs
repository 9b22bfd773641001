//! Queued terminal writer.
//!
//! Draw functions append primitive commands; nothing touches the terminal
//! until `flush`, which translates the queue into crossterm commands and
//! flushes stdout once per frame. Commands stay inspectable so render tests
//! can assert on emitted sequences without a live terminal.
//!
//! Invariants:
//! * Command order is preserved; no mid-frame flushing.
//! * Positions are absolute with origin (0,0); callers ensure bounds.
//! * The writer is a short-lived object, one per frame, holding no state
//!   across frames.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType, ScrollDown, ScrollUp},
};
use std::io::{Write, stdout};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clears the full line the cursor is on; callers precede this with a
    /// `MoveTo(0, y)` so leftovers from longer prior text are wiped.
    ClearLine,
    Print(String),
    PrintReversed(String),
    /// Hardware scroll: content moves up, new blank rows appear at bottom.
    ScrollUp(u16),
    /// Hardware scroll: content moves down, new blank rows appear at top.
    ScrollDown(u16),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn print_reversed<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::PrintReversed(s));
        }
    }

    pub fn scroll_up(&mut self, n: u16) {
        if n > 0 {
            self.cmds.push(Command::ScrollUp(n));
        }
    }

    pub fn scroll_down(&mut self, n: u16) {
        if n > 0 {
            self.cmds.push(Command::ScrollDown(n));
        }
    }

    /// Queued commands, for tests.
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Consume the writer without touching the terminal, for tests that
    /// assert on full frames.
    pub fn into_commands(self) -> Vec<Command> {
        self.cmds
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::PrintReversed(s) => queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(s),
                    SetAttribute(Attribute::NoReverse)
                )?,
                Command::ScrollUp(n) => queue!(out, ScrollUp(n))?,
                Command::ScrollDown(n) => queue!(out, ScrollDown(n))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prints_are_dropped() {
        let mut w = Writer::new();
        w.print("");
        w.print_reversed("");
        w.print("x");
        assert_eq!(w.commands(), [Command::Print("x".to_string())]);
    }

    #[test]
    fn zero_row_scrolls_are_dropped() {
        let mut w = Writer::new();
        w.scroll_up(0);
        w.scroll_down(0);
        assert!(w.commands().is_empty());
    }

    #[test]
    fn commands_preserve_order() {
        let mut w = Writer::new();
        w.move_to(0, 3);
        w.clear_line();
        w.print("row");
        assert_eq!(
            w.commands(),
            [
                Command::MoveTo(0, 3),
                Command::ClearLine,
                Command::Print("row".to_string()),
            ]
        );
    }
}
