//! Status line composition for the bottom terminal row.
//!
//! The controller decides *which* status to show; this module decides what
//! it looks like. Split kept so controller tests can assert on the variant
//! and writer tests on the rendered text.

/// What the bottom row should display after a redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Idle marker, the pager is waiting for input.
    Idle,
    /// The last render row is visible.
    End,
    /// Live echo of a search entry in progress.
    Prompt { prefix: char, partial: String },
    /// The committed search found no match; the next Enter dismisses this.
    NotFound,
    /// Repeat was requested before any search was committed.
    NoPrevious,
}

/// Render a status into its text and whether it is shown in reverse video.
pub fn text(status: &StatusLine) -> (String, bool) {
    match status {
        StatusLine::Idle => (":".to_string(), false),
        StatusLine::End => ("(END)".to_string(), true),
        StatusLine::Prompt { prefix, partial } => (format!("{prefix}{partial}"), false),
        StatusLine::NotFound => ("Pattern not found  (press RETURN)".to_string(), true),
        StatusLine::NoPrevious => ("No previous search".to_string(), true),
    }
}
