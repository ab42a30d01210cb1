//! Emitters: the render sinks that turn a finalized [`Diag`] into text
//! (spec.md §4/§7).
//!
//! Grounded on `examples/malik672-solar/crates/interface/src/diagnostics/
//! mod.rs`'s `pub use emitter::{DynEmitter, Emitter, HumanBufferEmitter,
//! HumanEmitter, LocalEmitter, SilentEmitter}` re-export shape. The teacher's
//! `Emitter` trait renders a whole session; this crate's renders one
//! finalized `Diag` at a time, since rendering here owns no session state
//! beyond what the caller's `DiagCtxt` already tracks.

pub mod human;
#[cfg(feature = "json")]
pub mod json;

pub use human::{HumanBufferEmitter, HumanEmitter};
#[cfg(feature = "json")]
pub use json::JsonEmitter;

use crate::diagnostic::Diag;

/// Renders one finalized diagnostic to its final string form.
pub trait Emitter {
    fn emit_diagnostic(&mut self, diag: &Diag) -> String;
}

/// A boxed, dynamically-dispatched emitter.
pub type DynEmitter = Box<dyn Emitter + Send>;

/// Discards every diagnostic, rendering nothing. Useful for tests and for
/// callers that only care about [`crate::consumer::ErrorTrackingConsumer`]'s
/// side effect.
#[derive(Default)]
pub struct SilentEmitter;

impl SilentEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Emitter for SilentEmitter {
    fn emit_diagnostic(&mut self, _diag: &Diag) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::source::DiagnosticLocation;

    #[test]
    fn silent_emitter_renders_nothing() {
        let mut e = SilentEmitter::new();
        let diag = Diag::new(Level::Error, "boom", DiagnosticLocation::empty());
        assert_eq!(e.emit_diagnostic(&diag), "");
    }
}
