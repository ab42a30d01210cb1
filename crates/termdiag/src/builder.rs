//! `DiagBuilder` and the `EmissionGuarantee` typestate.
//!
//! Grounded on `examples/malik672-solar/crates/interface/src/diagnostics/
//! mod.rs`'s `ErrorGuaranteed`/`BugAbort`/`FatalAbort`/`ExplicitBug`
//! pattern: emitting a `Level::Error` diagnostic hands the caller a real
//! token proving "an error was already reported", so it can be threaded
//! through a `Result` instead of re-reported. Carried over unchanged in
//! shape (spec.md §9 "design notes" calls out exactly this kind of ambient
//! texture as implied, not distilled away).

use crate::context::DiagCtxt;
use crate::converter::Converter;
use crate::diagnostic::{Diag, DiagId, SubDiagnostic};
use crate::level::Level;
use crate::message::{DiagMsg, MessageBody, MultiSpan};
use crate::source::DiagnosticLocation;
use crate::span::Span;

/// A token proving a `Level::Error`-or-worse diagnostic has already been
/// emitted through this context. Cannot be constructed by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn unchecked() -> Self {
        Self(())
    }
}

/// Marker returned by emitting a `Level::Bug`: the process aborts before
/// this value is ever observed, so it carries no data.
#[derive(Clone, Copy, Debug)]
pub struct BugAbort(());

/// Marker returned by emitting a `Level::Fatal`: same contract as
/// [`BugAbort`] but for fatal (recoverable-in-theory, abort-in-practice)
/// errors.
#[derive(Clone, Copy, Debug)]
pub struct FatalAbort(());

/// What emitting a diagnostic at a given level hands back to the caller.
pub trait EmissionGuarantee: Sized {
    fn make_guarantee(ctxt: &DiagCtxt, diag: &Diag) -> Self;
}

impl EmissionGuarantee for ErrorGuaranteed {
    fn make_guarantee(_ctxt: &DiagCtxt, _diag: &Diag) -> Self {
        ErrorGuaranteed::unchecked()
    }
}

impl EmissionGuarantee for BugAbort {
    fn make_guarantee(_ctxt: &DiagCtxt, diag: &Diag) -> Self {
        panic!("internal error: {}", diag.message);
    }
}

impl EmissionGuarantee for FatalAbort {
    fn make_guarantee(ctxt: &DiagCtxt, diag: &Diag) -> Self {
        ctxt.flush_pending();
        std::process::exit(1);
    }
}

impl EmissionGuarantee for () {
    fn make_guarantee(_ctxt: &DiagCtxt, _diag: &Diag) -> Self {}
}

/// A diagnostic under construction. Mutated only through its own methods
/// (spec.md §3 lifecycle); finalised and consumed by [`DiagBuilder::emit`].
#[must_use = "a DiagBuilder does nothing until `.emit()` is called"]
pub struct DiagBuilder<'a, G: EmissionGuarantee = ErrorGuaranteed> {
    ctxt: &'a DiagCtxt,
    diag: Diag,
    _guarantee: std::marker::PhantomData<G>,
}

impl<'a, G: EmissionGuarantee> DiagBuilder<'a, G> {
    pub(crate) fn new(ctxt: &'a DiagCtxt, level: Level, message: impl Into<String>, location: DiagnosticLocation) -> Self {
        Self { ctxt, diag: Diag::new(level, message, location), _guarantee: std::marker::PhantomData }
    }

    /// Builds a diagnostic anchored at a caller-supplied location `L`,
    /// resolving it through `converter` (spec.md §6 "invoked exactly once
    /// per `Diagnostic.location`") and merging in any supplementary
    /// annotations the converter pushed onto its [`crate::converter::ConverterCx`].
    #[track_caller]
    pub(crate) fn from_converted<L>(
        ctxt: &'a DiagCtxt,
        level: Level,
        message: impl Into<String>,
        converter: &dyn Converter<L>,
        location: L,
    ) -> Self {
        let mut cx = crate::converter::ConverterCx::new();
        let resolved = converter.convert_loc(location, &mut cx);
        let mut builder = Self::new(ctxt, level, message, resolved);
        builder.diag.annotations.extend(cx.into_annotations());
        builder
    }

    pub fn code(mut self, code: DiagId) -> Self {
        self.diag.code = Some(code);
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.diag.kind = Some(kind.into());
        self
    }

    pub fn span_label(mut self, span: Span, label: impl Into<DiagMsg>) -> Self {
        // Annotations carry their own level; span labels without an
        // explicit one inherit the diagnostic's own level.
        self.diag.annotations.push(crate::message::Annotation::new(self.diag.level, label, vec![span]));
        self
    }

    pub fn annotate(mut self, level: Level, message: impl Into<DiagMsg>, spans: Vec<Span>) -> Self {
        self.diag.annotations.push(crate::message::Annotation::new(level, message, spans));
        self
    }

    pub fn note(self, message: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Note, message, MultiSpan::new())
    }

    pub fn span_note(self, span: MultiSpan, message: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Note, message, span)
    }

    pub fn help(self, message: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Help, message, MultiSpan::new())
    }

    pub fn warn(self, message: impl Into<DiagMsg>) -> Self {
        self.sub(Level::Warning, message, MultiSpan::new())
    }

    fn sub(mut self, level: Level, message: impl Into<DiagMsg>, span: MultiSpan) -> Self {
        self.diag.sub_diagnostics.push(SubDiagnostic {
            level,
            messages: vec![MessageBody::Plain(message.into())],
            span,
        });
        self
    }

    /// Finalises and consumes the diagnostic, handing it to the context's
    /// consumer chain, and returns this level's emission guarantee.
    pub fn emit(mut self) -> G {
        self.diag.coerce_illegal_top_level();
        let guarantee = G::make_guarantee(self.ctxt, &self.diag);
        self.ctxt.consume(self.diag);
        guarantee
    }
}
