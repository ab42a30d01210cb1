//! The location-to-text converter contract (spec.md §6): the caller's
//! opaque location type is turned into a [`DiagnosticLocation`] plus,
//! optionally, supplementary annotations the renderer treats like any
//! other.
//!
//! Named after `solar-interface`'s role split (its `SourceMap`/line-
//! converter machinery plays the same "location → text" part, though under
//! a different name); the trait shape itself is spec.md §6 verbatim.

use crate::message::Annotation;
use crate::source::DiagnosticLocation;

/// A handle the converter may use to push supplementary annotations that
/// the renderer will treat exactly like annotations the caller attached
/// directly.
#[derive(Default)]
pub struct ConverterCx {
    pub(crate) extra: Vec<Annotation>,
}

impl ConverterCx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a supplementary annotation to be merged into the diagnostic
    /// being built.
    pub fn push_annotation(&mut self, annotation: Annotation) {
        self.extra.push(annotation);
    }

    pub fn into_annotations(self) -> Vec<Annotation> {
        self.extra
    }
}

/// Converts the caller's location type `L` into a [`DiagnosticLocation`].
///
/// Invoked exactly once per [`crate::diagnostic::Diag::location`] and once
/// per sub-diagnostic location (spec.md §6).
pub trait Converter<L> {
    fn convert_loc(&self, location: L, cx: &mut ConverterCx) -> DiagnosticLocation;
}

/// A converter built from a plain closure, for callers that don't need the
/// full trait machinery.
pub struct FnConverter<F>(pub F);

impl<L, F> Converter<L> for FnConverter<F>
where
    F: Fn(L, &mut ConverterCx) -> DiagnosticLocation,
{
    fn convert_loc(&self, location: L, cx: &mut ConverterCx) -> DiagnosticLocation {
        (self.0)(location, cx)
    }
}

/// The identity converter: used when the caller already hands over a
/// resolved [`DiagnosticLocation`] directly.
pub struct IdentityConverter;

impl Converter<DiagnosticLocation> for IdentityConverter {
    fn convert_loc(&self, location: DiagnosticLocation, _cx: &mut ConverterCx) -> DiagnosticLocation {
        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_converter_passes_through() {
        let loc = DiagnosticLocation::empty();
        let mut cx = ConverterCx::new();
        let out = IdentityConverter.convert_loc(loc.clone(), &mut cx);
        assert_eq!(out, loc);
    }

    #[test]
    fn fn_converter_can_push_supplementary_annotations() {
        let converter = FnConverter(|n: u32, cx: &mut ConverterCx| {
            cx.push_annotation(crate::message::Annotation::new(
                crate::level::Level::Note,
                "supplementary",
                vec![],
            ));
            DiagnosticLocation::Basic {
                filename: "f".into(),
                source: String::new(),
                line_number: n as usize,
                column_number: 1,
                source_location: 0,
                length: 0,
            }
        });
        let mut cx = ConverterCx::new();
        let loc = converter.convert_loc(3, &mut cx);
        assert_eq!(loc.line_number(), 3);
        assert_eq!(cx.into_annotations().len(), 1);
    }
}
