//! Diagnostic messages and the spans they are attached to.
//!
//! Modified from `solar-interface`'s `pub use message::{DiagMsg, MultiSpan,
//! SpanLabel}` re-export in `diagnostics/mod.rs` (the module body itself
//! wasn't in the retrieved slice; rebuilt from that usage plus spec.md §3's
//! `DiagnosticMessage` field list).

use std::borrow::Cow;
use std::fmt;

use crate::annotated_string::AnnotatedString;
use crate::level::Level;
use crate::source::SourceLocationTokens;
use crate::span::Span;

/// A diagnostic message: either a plain owned/borrowed string or a lazily
/// evaluated closure, so that expensive message construction (formatting a
/// large type) is deferred until the diagnostic is actually rendered.
#[derive(Clone)]
pub enum DiagMsg {
    Str(Cow<'static, str>),
    Lazy(std::sync::Arc<dyn Fn() -> String + Send + Sync>),
}

impl DiagMsg {
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(s.as_ref()),
            Self::Lazy(f) => Cow::Owned(f()),
        }
    }

    pub fn lazy(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Lazy(std::sync::Arc::new(f))
    }
}

impl fmt::Debug for DiagMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl PartialEq for DiagMsg {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl std::hash::Hash for DiagMsg {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for DiagMsg {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl From<&'static str> for DiagMsg {
    fn from(s: &'static str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<Cow<'static, str>> for DiagMsg {
    fn from(s: Cow<'static, str>) -> Self {
        Self::Str(s)
    }
}

/// The free-text body of an annotation, either plain or pre-built as an
/// [`AnnotatedString`] (used for highlighted sub-messages).
#[derive(Clone, Debug)]
pub enum MessageBody {
    Plain(DiagMsg),
    Rich(AnnotatedString),
}

impl MessageBody {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(m) => m.as_str().is_empty(),
            Self::Rich(s) => s.is_empty(),
        }
    }

    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            Self::Plain(m) => m.as_str(),
            Self::Rich(s) => Cow::Owned(s.to_plain_string()),
        }
    }
}

/// A single `(span, label)` pair attached to a diagnostic or annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanLabel {
    pub span: Span,
    pub label: Option<DiagMsg>,
    /// `true` for the span that anchors the diagnostic's primary marker
    /// (`^`); only one span in a `MultiSpan` should be primary.
    pub is_primary: bool,
}

/// A set of spans attached to a diagnostic, at most one of them primary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiSpan {
    pub span_labels: Vec<SpanLabel>,
}

impl MultiSpan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_span(span: Span) -> Self {
        Self { span_labels: vec![SpanLabel { span, label: None, is_primary: true }] }
    }

    pub fn push_span_label(&mut self, span: Span, label: impl Into<DiagMsg>) {
        self.span_labels.push(SpanLabel { span, label: Some(label.into()), is_primary: false });
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.span_labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_empty(&self) -> bool {
        self.span_labels.is_empty()
    }

    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.span_labels.iter().map(|l| l.span)
    }
}

impl From<Span> for MultiSpan {
    fn from(span: Span) -> Self {
        Self::from_span(span)
    }
}

/// An annotation: a level, free-text message, zero or more spans, and an
/// optional token payload for insertions that replace/add styled tokens
/// (spec.md §3 `DiagnosticMessage`).
///
/// An annotation with an empty message and zero spans is illegal
/// (`debug_assert!`ed at construction). Zero spans with a non-empty message
/// becomes an *orphan*, rendered with no gutter arrow (spec.md §4.5).
#[derive(Clone, Debug)]
pub struct Annotation {
    pub level: Level,
    pub message: MessageBody,
    pub spans: Vec<Span>,
    pub tokens: Option<SourceLocationTokens>,
}

impl Annotation {
    #[track_caller]
    pub fn new(level: Level, message: impl Into<DiagMsg>, spans: Vec<Span>) -> Self {
        let message = MessageBody::Plain(message.into());
        debug_assert!(
            !(message.is_empty() && spans.is_empty()),
            "an annotation must have a message or at least one span"
        );
        Self { level, message, spans, tokens: None }
    }

    pub fn is_orphan(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn with_tokens(mut self, tokens: SourceLocationTokens) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// A suggested insertion at `span` with no callout of its own: the
    /// inserted text lives in `tokens`, not `message` (spec.md §3 — the
    /// token payload is what "replaces or adds" source text; the message
    /// field is the annotation's free-text callout).
    #[track_caller]
    pub fn insert(span: Span, text: impl Into<String>) -> Self {
        Self {
            level: Level::Insert,
            message: MessageBody::Plain(DiagMsg::from(String::new())),
            spans: vec![span],
            tokens: Some(SourceLocationTokens::single(text)),
        }
    }

    /// A suggested insertion at `span` that also carries its own callout
    /// message, e.g. spec.md §8 scenario S2's `insert("))))", col=1,
    /// "Missing parens.")`.
    #[track_caller]
    pub fn insert_with_message(span: Span, text: impl Into<String>, message: impl Into<DiagMsg>) -> Self {
        Self {
            level: Level::Insert,
            message: MessageBody::Plain(message.into()),
            spans: vec![span],
            tokens: Some(SourceLocationTokens::single(text)),
        }
    }
}
