//! Terminal width probing (spec.md §6): `ioctl`/`GetConsoleScreenBufferInfo`
//! underneath, `COLUMNS` override, and the canvas's `[50, 200]` envelope.
//! Non-TTY streams default to 50.
//!
//! Actual OS width queries are the caller's job per spec.md §1 ("OS/terminal
//! capability detection ... out of scope, specified only as external
//! contracts"); this module owns the override/clamp policy and a
//! conservative default for when no real probe is wired up, matching
//! `solar-interface`'s reliance on `is-terminal` rather than hand-rolled
//! `ioctl`/WinAPI calls.

use std::io::IsTerminal;

use crate::canvas::{MAX_WIDTH, MIN_WIDTH};

/// A fallback width used when a stream is a TTY but no `COLUMNS` override
/// and no caller-supplied probe are available.
const DEFAULT_TTY_WIDTH: usize = 80;

/// Returns the terminal width to render at, honoring a `COLUMNS` override
/// and clamping into the canvas's `[50, 200]` envelope. `probed` is the
/// caller's own OS-level width query (ioctl/`GetConsoleScreenBufferInfo`),
/// if it has one; `is_tty` gates the non-TTY "defaults to 50" rule.
pub fn terminal_width(is_tty: bool, probed: Option<usize>) -> usize {
    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(n) = cols.trim().parse::<usize>() {
            return n.clamp(MIN_WIDTH, MAX_WIDTH);
        }
    }
    if !is_tty {
        return MIN_WIDTH;
    }
    probed.unwrap_or(DEFAULT_TTY_WIDTH).clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Probes the real stderr handle's terminal-ness; no OS-level column query.
pub fn terminal_width_stderr() -> usize {
    terminal_width(std::io::stderr().is_terminal(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_tty_defaults_to_min_width() {
        std::env::remove_var("COLUMNS");
        assert_eq!(terminal_width(false, None), MIN_WIDTH);
    }

    #[test]
    fn columns_override_is_clamped() {
        std::env::set_var("COLUMNS", "10000");
        assert_eq!(terminal_width(true, None), MAX_WIDTH);
        std::env::remove_var("COLUMNS");
    }
}
