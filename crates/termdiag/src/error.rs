//! The crate's small error taxonomy (spec.md §7).
//!
//! Grounded on spec.md §7's three categories (user data, configuration,
//! I/O) plus the teacher's blanket use of `thiserror` for its own error
//! types (`solar-interface`/`solar-config` both derive `thiserror::Error`
//! for their leaf error enums).

use thiserror::Error;

/// Failure to acquire the advisory lock a [`crate::consumer::StreamConsumer`]
/// takes around one diagnostic's render+flush (spec.md §4.8/§5).
#[derive(Debug, Error)]
pub enum LockError {
    #[error("failed to acquire advisory lock on diagnostic output: {0}")]
    Io(#[from] std::io::Error),
}

/// A configuration-level error (spec.md §7): a note-or-weaker diagnostic
/// used as a top-level primary with no anchoring span. In debug builds this
/// is asserted against at construction (see [`crate::diagnostic::Diag::coerce_illegal_top_level`]);
/// this type exists for callers that want to detect the condition instead of
/// relying on the release-mode coercion.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a note-or-weaker diagnostic cannot be a top-level primary with no anchoring span")]
    UnanchoredWeakPrimary,
}
