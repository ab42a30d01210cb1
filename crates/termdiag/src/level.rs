//! Diagnostic / annotation level.
//!
//! Modified from `solar-interface`'s `Level` (`diagnostics/mod.rs`),
//! extended with `Remark`/`Insert`/`Delete` — the annotation-only levels
//! spec.md §3 requires for `DiagnosticMessage` — alongside the richer
//! compiler-grade levels (`Bug`, `Fatal`, `Help`, ...) the teacher carries
//! for top-level `Diag`s.

use std::fmt;

/// Diagnostic / annotation level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// For bugs in the renderer's caller. Manifests as an ICE-style panic
    /// when emitted through [`EmissionGuarantee`](crate::builder::EmissionGuarantee) `BugAbort`.
    Bug,
    /// An error that causes an immediate abort (configuration errors,
    /// unrecoverable I/O).
    Fatal,
    /// An error in the input being diagnosed. The common case.
    Error,
    /// A warning. Does not prevent the caller from continuing.
    Warning,
    /// Additional context, rare as a top-level diagnostic.
    Note,
    /// A note emitted at most once.
    OnceNote,
    /// A remark: lower priority than a warning, used for style/lint-ish
    /// commentary.
    Remark,
    /// A suggestion for how to fix something.
    Help,
    /// A help message emitted at most once.
    OnceHelp,
    /// Similar to `Note` but used once compilation/processing has already
    /// failed.
    FailureNote,
    /// Suppressed; only meaningful for lint-like annotations.
    Allow,
    /// An annotation describing a suggested insertion.
    Insert,
    /// An annotation describing a suggested deletion.
    Delete,
}

impl Level {
    /// The string label rendered in the diagnostic header / gutter.
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Bug => "error: internal error",
            Self::Fatal | Self::Error => "error",
            Self::Warning => "warning",
            Self::Note | Self::OnceNote => "note",
            Self::Remark => "remark",
            Self::Help | Self::OnceHelp => "help",
            Self::FailureNote => "failure-note",
            Self::Allow => "allow",
            Self::Insert => "insert",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` if this level represents an error.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Bug | Self::Fatal | Self::Error | Self::FailureNote)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
