//! The top-level `Diag` value and its nested `SubDiagnostic`s.
//!
//! Grounded on `examples/malik672-solar/crates/interface/src/diagnostics/
//! mod.rs`'s `Diag`/`SubDiagnostic` (level, messages, span, children,
//! code, `created_at`), adapted to this crate's `Annotation`/`MessageBody`/
//! `DiagnosticLocation` types per spec.md §3.

use std::panic::Location;

use crate::level::Level;
use crate::message::{Annotation, DiagMsg, MessageBody, MultiSpan};
use crate::source::DiagnosticLocation;

/// A diagnostic code, e.g. `E0308`. Constructed via [`error_code!`] for a
/// compile-time-checked literal, or [`DiagId::new_str`] for a dynamic one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiagId(&'static str);

impl DiagId {
    pub const fn new_str(s: &'static str) -> Self {
        Self(s)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for DiagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Validates a 4-digit error code literal at compile time into a
/// [`DiagId`] (teacher's `error_code!`, `diagnostics/mod.rs` lines
/// 128-141).
#[macro_export]
macro_rules! error_code {
    ($prefix:ident $code:literal) => {{
        const _: () = {
            let s = stringify!($code);
            assert!(s.len() == 4, "error code must be exactly 4 digits");
        };
        $crate::diagnostic::DiagId::new_str(concat!(stringify!($prefix), stringify!($code)))
    }};
}

/// A sub-diagnostic: a secondary message bound to its own location, with
/// no further nesting (spec.md §3 "same shape minus nested
/// sub-diagnostics").
#[derive(Clone, Debug)]
pub struct SubDiagnostic {
    pub level: Level,
    pub messages: Vec<MessageBody>,
    pub span: MultiSpan,
}

impl SubDiagnostic {
    pub fn new(level: Level, message: impl Into<DiagMsg>) -> Self {
        Self { level, messages: vec![MessageBody::Plain(message.into())], span: MultiSpan::new() }
    }

    pub fn with_span(mut self, span: MultiSpan) -> Self {
        self.span = span;
        self
    }
}

/// A finalized, top-level diagnostic value: a level, the rendered primary
/// message, a resolved location, the annotations touching that location,
/// and any sub-diagnostics at other locations.
///
/// Lifecycle (spec.md §3): built only through [`crate::builder::DiagBuilder`],
/// finalised at `.emit()`, consumed at most once.
#[derive(Clone, Debug)]
pub struct Diag {
    pub level: Level,
    pub kind: Option<String>,
    pub message: String,
    pub location: DiagnosticLocation,
    pub annotations: Vec<Annotation>,
    pub sub_diagnostics: Vec<SubDiagnostic>,
    pub code: Option<DiagId>,
    pub created_at: &'static Location<'static>,
}

impl Diag {
    #[track_caller]
    pub fn new(level: Level, message: impl Into<String>, location: DiagnosticLocation) -> Self {
        Self {
            level,
            kind: None,
            message: message.into(),
            location,
            annotations: Vec::new(),
            sub_diagnostics: Vec::new(),
            code: None,
            created_at: Location::caller(),
        }
    }

    /// Coerces a configuration-illegal level (a note-or-weaker top-level
    /// diagnostic with no anchoring span, spec.md §7) up to `Error`. Debug
    /// builds assert instead; see [`crate::error::ConfigError`].
    pub fn coerce_illegal_top_level(&mut self) {
        let anchored = self.location.has_valid_line() && self.location.has_filename();
        let weak = matches!(self.level, Level::Note | Level::OnceNote | Level::Remark | Level::Allow);
        if weak && !anchored {
            debug_assert!(
                false,
                "a note-or-weaker diagnostic must anchor to a span; coercing to Error in release"
            );
            self.level = Level::Error;
        }
    }
}
