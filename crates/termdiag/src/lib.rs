//! Compiler-style terminal diagnostics: source excerpts, annotation
//! balloons, and orthogonal connector routing over a resizable styled-cell
//! canvas.
//!
//! A [`Diag`] is built through [`DiagCtxt`]/[`DiagBuilder`], finalized at
//! `.emit()`, and handed to the context's configured
//! [`consumer`]/[`emitter`] chain, which renders it through the
//! [`placer`]/[`canvas`] layout engine. See `DESIGN.md` for how each module
//! is grounded.

pub mod annotated_string;
pub mod builder;
pub mod canvas;
pub mod consumer;
pub mod context;
pub mod converter;
pub mod diagnostic;
pub mod emitter;
pub mod error;
pub mod format;
pub mod level;
pub mod line_decomp;
pub mod lock;
pub mod message;
pub mod placer;
pub mod router;
pub mod source;
pub mod span;
pub mod style;
pub mod term;

#[cfg(test)]
mod tests;

pub use builder::{BugAbort, DiagBuilder, EmissionGuarantee, ErrorGuaranteed, FatalAbort};
pub use consumer::{Consumer, DynConsumer, ErrorTrackingConsumer, SortingConsumer, StreamConsumer};
pub use context::{DiagCtxt, DiagCtxtBuilder, DiagCtxtFlags};
pub use diagnostic::{Diag, DiagId, SubDiagnostic};
pub use emitter::{DynEmitter, Emitter, HumanBufferEmitter, HumanEmitter, SilentEmitter};
#[cfg(feature = "json")]
pub use emitter::JsonEmitter;
pub use level::Level;
pub use message::{Annotation, DiagMsg, MessageBody, MultiSpan, SpanLabel};
pub use source::DiagnosticLocation;
pub use span::{Span, SpanKind};
pub use term::{ColorMode, RenderConfig};
