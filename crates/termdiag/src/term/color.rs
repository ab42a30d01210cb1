//! Color mode selection (spec.md §6): `disable`/`enable`/`auto`, the latter
//! consulting `isatty` and `TERM`.
//!
//! Grounded on `solar-interface`'s use of `anstream`/`anstyle`/
//! `colorchoice` "under a `# diagnostics` comment" in its `Cargo.toml` for
//! exactly this job; `is-terminal` supplies the isatty check `anstream`
//! itself builds on.

use std::io::IsTerminal;

/// Whether to emit ANSI color codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    Disable,
    Enable,
    #[default]
    Auto,
}

impl ColorMode {
    /// Resolves `Auto` by checking whether `stream_is_tty` is a terminal and
    /// `TERM` isn't `"dumb"`; `Disable`/`Enable` pass through unconditionally.
    pub fn resolve(self, stream_is_tty: bool) -> bool {
        match self {
            Self::Disable => false,
            Self::Enable => true,
            Self::Auto => stream_is_tty && std::env::var("TERM").as_deref() != Ok("dumb"),
        }
    }

    /// Resolves against the real stderr handle's terminal-ness.
    pub fn resolve_stderr(self) -> bool {
        self.resolve(std::io::stderr().is_terminal())
    }

    /// Converts to a [`colorchoice::ColorChoice`] for crates (like
    /// `anstream`) that consult the global choice.
    pub fn to_colorchoice(self) -> colorchoice::ColorChoice {
        match self {
            Self::Disable => colorchoice::ColorChoice::Never,
            Self::Enable => colorchoice::ColorChoice::Always,
            Self::Auto => colorchoice::ColorChoice::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_is_always_false() {
        assert!(!ColorMode::Disable.resolve(true));
    }

    #[test]
    fn enable_is_always_true() {
        assert!(ColorMode::Enable.resolve(false));
    }
}
