//! The emission entrypoint: wires a finalized [`Diag`] into the consumer
//! chain configured for this context (spec.md §5).
//!
//! Grounded on `examples/malik672-solar/crates/interface/src/diagnostics/
//! mod.rs`'s `pub use context::{DiagCtxt, DiagCtxtFlags}` name/role (the
//! module body itself wasn't in the retrieved slice) and on `session.rs`'s
//! `derive_builder` owned-pattern `SessionBuilder` — `build_fn(name =
//! "try_build", private)` plus a hand-written public `build()` doing
//! cross-field work the derive can't express.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::builder::{BugAbort, DiagBuilder, ErrorGuaranteed, FatalAbort};
use crate::consumer::{Consumer, DynConsumer, StreamConsumer};
use crate::converter::Converter;
use crate::diagnostic::Diag;
use crate::emitter::{HumanEmitter, SilentEmitter};
use crate::level::Level;
use crate::source::DiagnosticLocation;
use crate::term::RenderConfig;
use tracing::debug;

/// Behavior flags independent of any one diagnostic (spec §5).
#[derive(Clone, Copy, Debug)]
pub struct DiagCtxtFlags {
    /// If `false`, `Level::Warning` diagnostics are counted but never reach
    /// the consumer chain (a `-w`/`--quiet`-style suppression switch).
    pub can_emit_warnings: bool,
}

impl Default for DiagCtxtFlags {
    fn default() -> Self {
        Self { can_emit_warnings: true }
    }
}

#[derive(derive_builder::Builder)]
#[builder(
    pattern = "owned",
    name = "DiagCtxtBuilder",
    build_fn(name = "try_build", private),
    setter(strip_option)
)]
struct DiagCtxtInner {
    #[builder(setter(custom))]
    consumer: Mutex<DynConsumer>,
    #[builder(default)]
    flags: DiagCtxtFlags,
    #[builder(setter(skip), default)]
    err_count: AtomicUsize,
}

impl DiagCtxtBuilder {
    /// Sets the consumer chain finalized diagnostics are forwarded to.
    pub fn consumer(mut self, consumer: DynConsumer) -> Self {
        self.consumer = Some(Mutex::new(consumer));
        self
    }

    /// A plain stream consumer writing human-readable output to `stderr`
    /// (teacher's `with_stderr_emitter`).
    pub fn with_stderr_emitter(self, config: RenderConfig) -> Self {
        self.consumer(Box::new(StreamConsumer::new(HumanEmitter::new(config), std::io::stderr())))
    }

    /// A consumer that discards every diagnostic (teacher's
    /// `with_silent_emitter`); only the `err_count`/
    /// [`crate::consumer::ErrorTrackingConsumer`] side effects remain
    /// observable.
    pub fn with_silent_emitter(self) -> Self {
        self.consumer(Box::new(StreamConsumer::new(SilentEmitter::new(), std::io::sink())))
    }

    /// Finalizes the builder into a [`DiagCtxt`] handle.
    #[track_caller]
    pub fn build(self) -> DiagCtxt {
        let inner = self.try_build().unwrap_or_else(|e| panic!("DiagCtxt not fully configured: {e}"));
        DiagCtxt { inner: Arc::new(inner) }
    }
}

/// The emission entrypoint: every finalized [`Diag`] passes through
/// [`DiagCtxt::consume`] on its way to the configured consumer chain.
/// Cheaply [`Clone`]-able (an `Arc` handle) so a caller running a parallel
/// front end can share one context across worker threads; the renderer
/// itself performs no threading of its own (spec §5).
#[derive(Clone)]
pub struct DiagCtxt {
    inner: Arc<DiagCtxtInner>,
}

impl DiagCtxt {
    pub fn builder() -> DiagCtxtBuilder {
        DiagCtxtBuilder::default()
    }

    pub fn flags(&self) -> DiagCtxtFlags {
        self.inner.flags
    }

    /// Number of `Error`-or-worse diagnostics consumed so far.
    pub fn err_count(&self) -> usize {
        self.inner.err_count.load(Ordering::Relaxed)
    }

    pub fn has_errors(&self) -> bool {
        self.err_count() > 0
    }

    pub(crate) fn consume(&self, diag: Diag) {
        if diag.level == Level::Warning && !self.inner.flags.can_emit_warnings {
            debug!(message = %diag.message, "warning suppressed by DiagCtxtFlags");
            return;
        }
        if diag.level.is_error() {
            self.inner.err_count.fetch_add(1, Ordering::Relaxed);
        }
        debug!(level = ?diag.level, message = %diag.message, "consuming diagnostic");
        let mut consumer = self.inner.consumer.lock().unwrap_or_else(|poison| poison.into_inner());
        consumer.consume(diag);
    }

    /// Flushes the consumer chain — a [`crate::consumer::SortingConsumer`]
    /// only emits its buffered diagnostics here, in `(filename, line,
    /// column)` order (spec §5).
    pub fn flush_pending(&self) {
        debug!("flushing pending diagnostics");
        let mut consumer = self.inner.consumer.lock().unwrap_or_else(|poison| poison.into_inner());
        consumer.flush();
    }

    #[track_caller]
    pub fn struct_err(&self, message: impl Into<String>) -> DiagBuilder<'_, ErrorGuaranteed> {
        DiagBuilder::new(self, Level::Error, message, DiagnosticLocation::empty())
    }

    #[track_caller]
    pub fn struct_span_err(
        &self,
        location: DiagnosticLocation,
        message: impl Into<String>,
    ) -> DiagBuilder<'_, ErrorGuaranteed> {
        DiagBuilder::new(self, Level::Error, message, location)
    }

    #[track_caller]
    pub fn struct_warn(&self, message: impl Into<String>) -> DiagBuilder<'_, ()> {
        DiagBuilder::new(self, Level::Warning, message, DiagnosticLocation::empty())
    }

    #[track_caller]
    pub fn struct_span_warn(&self, location: DiagnosticLocation, message: impl Into<String>) -> DiagBuilder<'_, ()> {
        DiagBuilder::new(self, Level::Warning, message, location)
    }

    /// Builds an error diagnostic anchored at a caller's own location type,
    /// resolved through `converter` (spec.md §6's location-to-text contract).
    #[track_caller]
    pub fn struct_err_with<L>(&self, converter: &dyn Converter<L>, location: L, message: impl Into<String>) -> DiagBuilder<'_, ErrorGuaranteed> {
        DiagBuilder::from_converted(self, Level::Error, message, converter, location)
    }

    /// Builds a warning diagnostic anchored at a caller's own location type,
    /// resolved through `converter`.
    #[track_caller]
    pub fn struct_warn_with<L>(&self, converter: &dyn Converter<L>, location: L, message: impl Into<String>) -> DiagBuilder<'_, ()> {
        DiagBuilder::from_converted(self, Level::Warning, message, converter, location)
    }

    #[track_caller]
    pub fn struct_fatal(&self, message: impl Into<String>) -> DiagBuilder<'_, FatalAbort> {
        DiagBuilder::new(self, Level::Fatal, message, DiagnosticLocation::empty())
    }

    #[track_caller]
    pub fn struct_bug(&self, message: impl Into<String>) -> DiagBuilder<'_, BugAbort> {
        DiagBuilder::new(self, Level::Bug, message, DiagnosticLocation::empty())
    }
}
