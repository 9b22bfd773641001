//! Terminal capability probing.
//!
//! Records what the renderer may assume about the terminal. Detection runs
//! once at startup. The struct is non-exhaustive so further capabilities
//! (truecolor, kitty keyboard protocol) can be added without breaking
//! downstream code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// When false, every incremental scroll plan degrades to a full repaint.
    pub supports_scroll_region: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        // CSI S/T scrolling is universal among terminals crossterm targets;
        // assume support rather than round-trip probing.
        Self {
            supports_scroll_region: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_enables_scroll_region() {
        assert!(TerminalCapabilities::detect().supports_scroll_region);
    }
}
