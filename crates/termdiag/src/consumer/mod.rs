//! The consumer chain: plain stream, sorting, and error-tracking consumers
//! (spec.md §5).
//!
//! Grounded on `examples/original_source/include/diagnostics/consumers/
//! {base,stream,sorting,error_tracking}.hpp`'s three-consumer shape
//! (`DiagnosticConsumer::consume`/`flush`, `BasicStreamDiagnosticConsumer`,
//! `BasicSortingDiagnosticConsumer`, `BasicErrorTrackingDiagnosticConsumer`),
//! reimplemented in idiomatic Rust (`Vec` buffering + stable sort) rather
//! than translated.

pub mod error_tracking;
pub mod sorting;
pub mod stream;

pub use error_tracking::ErrorTrackingConsumer;
pub use sorting::SortingConsumer;
pub use stream::StreamConsumer;

use crate::diagnostic::Diag;

/// Consumes finalized diagnostics in whatever order its implementation
/// decides, with an explicit `flush` hook for buffering consumers (spec.md
/// §5: "ordering" / "`flush()` ... emits in (filename, line, column) order").
pub trait Consumer {
    fn consume(&mut self, diag: Diag);

    fn flush(&mut self) {}
}

/// A boxed, dynamically-dispatched consumer, for [`crate::context::DiagCtxt`]
/// to hold without a generic parameter (mirrors the teacher's `DynEmitter`
/// type alias for the analogous emitter-side trait object).
pub type DynConsumer = Box<dyn Consumer + Send>;
