//! Human-readable rendering: assembles a [`Diag`] into [`PlacerLine`]s and
//! [`Orphan`]s, then drives the [`Placer`] and renders the resulting canvas.
//!
//! Grounded on `examples/malik672-solar/crates/interface/src/diagnostics/
//! mod.rs`'s `HumanEmitter`/`HumanBufferEmitter` pair (one writes straight to
//! a terminal stream honoring its color choice, the other renders into an
//! owned buffer for tests/LSP-style consumers); the excerpt/marker/balloon
//! layout itself is this crate's own (spec.md §4), not the teacher's.

use std::collections::HashSet;

use rustc_hash::FxHashMap;

use crate::annotated_string::AnnotatedString;
use crate::diagnostic::Diag;
use crate::level::Level;
use crate::line_decomp::{decompose_line, LineAnnotation};
use crate::message::MessageBody;
use crate::placer::{Callout, Orphan, Placer, PlacerLine};
use crate::source::{DiagnosticLocation, SourceLocationTokens, Token};
use crate::span::Span;
use crate::style::Style;
use crate::term::RenderConfig;

use super::Emitter;

/// Renders diagnostics for a real terminal: applies [`RenderConfig::color_mode`]
/// by stripping ANSI escapes when color is resolved off.
pub struct HumanEmitter {
    config: RenderConfig,
}

impl HumanEmitter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Emitter for HumanEmitter {
    fn emit_diagnostic(&mut self, diag: &Diag) -> String {
        let rendered = assemble(diag, &self.config);
        if self.config.color_mode.resolve_stderr() {
            rendered
        } else {
            anstream::adapter::strip_str(&rendered).to_string()
        }
    }
}

/// Renders diagnostics into an owned, always-plain buffer — no color
/// resolution against a real terminal, used for tests and for capturing
/// output to re-display elsewhere (e.g. an editor extension).
pub struct HumanBufferEmitter {
    config: RenderConfig,
}

impl HumanBufferEmitter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Emitter for HumanBufferEmitter {
    fn emit_diagnostic(&mut self, diag: &Diag) -> String {
        let rendered = assemble(diag, &self.config);
        anstream::adapter::strip_str(&rendered).to_string()
    }
}

/// One gathered source line: its 1-based number, the absolute char offset of
/// its first character, its text, and (for a tokenized location) the tokens
/// backing it.
struct GatheredLine<'a> {
    line_number: usize,
    start: i64,
    text: String,
    tokens: Option<&'a [Token]>,
}

fn gather_lines(location: &DiagnosticLocation) -> Vec<GatheredLine<'_>> {
    match location {
        DiagnosticLocation::Basic { source, line_number, source_location, .. } => {
            let mut out = Vec::new();
            let mut line_no = *line_number;
            let mut offset = *source_location as i64;
            for line in source.split('\n') {
                let char_len = line.chars().count() as i64;
                out.push(GatheredLine { line_number: line_no, start: offset, text: line.to_string(), tokens: None });
                offset += char_len + 1;
                line_no += 1;
            }
            out
        }
        DiagnosticLocation::Tokens { tokens, .. } => tokens
            .lines
            .iter()
            .map(|tl| {
                let text: String = tl.tokens.iter().map(|t| t.text.as_str()).collect();
                GatheredLine {
                    line_number: tl.line_number,
                    start: tl.line_start_offset as i64,
                    text,
                    tokens: Some(&tl.tokens),
                }
            })
            .collect(),
    }
}

/// The diagnostic's primary marker span, in absolute coordinates (spec.md
/// §4.1's "the marker's full span"): a `Basic` location's `source_location`/
/// `length`, or a `Tokens` location's own `marker`.
fn primary_span(location: &DiagnosticLocation) -> Option<Span> {
    match location {
        DiagnosticLocation::Basic { source_location, length, .. } => {
            Some(Span::absolute(*source_location, *source_location + *length))
        }
        DiagnosticLocation::Tokens { tokens, .. } => Some(tokens.marker),
    }
}

/// Projects an absolute `span` onto one gathered line, yielding a
/// location-relative span if it touches `[line_start, line_end)` — shared
/// between annotation spans and the diagnostic's primary span.
fn project_onto_line(span: Span, line_start: i64, line_end: i64) -> Option<Span> {
    let touches = span.intersects(Span::absolute(line_start as u32, line_end as u32))
        || (span.is_empty() && span.start() >= line_start && span.start() <= line_end);
    if !touches {
        return None;
    }
    let clipped = span.clip(line_start, line_end);
    let rel_start = (clipped.start() - line_start).max(0) as u32;
    let rel_end = (clipped.end() - line_start).max(0) as u32;
    Some(Span::location_relative(rel_start, rel_end))
}

/// Concatenates the text of every token in a [`SourceLocationTokens`]
/// payload — the inserted text for a `Level::Insert` annotation built via
/// [`crate::message::Annotation::insert`]/`insert_with_message`.
fn insert_text_from_tokens(tokens: &SourceLocationTokens) -> String {
    tokens.lines.iter().flat_map(|l| l.tokens.iter()).map(|t| t.text.as_str()).collect()
}

fn message_to_annotated(body: &MessageBody) -> AnnotatedString {
    match body {
        MessageBody::Rich(s) => s.clone(),
        MessageBody::Plain(m) => {
            let mut s = AnnotatedString::new();
            s.push_str(&m.as_str(), Style::PLAIN);
            s
        }
    }
}

/// Annotations with no spans and a non-empty message render as a trailing
/// `= level: message` block with no connector (spec.md §4.5), independent
/// of whether the diagnostic has a source location at all.
fn collect_orphans(diag: &Diag) -> Vec<Orphan> {
    diag.annotations
        .iter()
        .filter(|ann| ann.is_orphan() && !ann.message.is_empty())
        .map(|ann| Orphan { level: ann.level, text: message_to_annotated(&ann.message) })
        .collect()
}

/// Projects every non-orphan annotation's spans onto the gathered lines,
/// decomposes each line, and builds the callouts attached to each marked
/// item.
fn build_placer_lines(diag: &Diag, lines: &[GatheredLine<'_>], primary: Option<Span>) -> Vec<PlacerLine> {
    let mut placer_lines = Vec::with_capacity(lines.len());
    for line in lines {
        let line_len = line.text.chars().count() as i64;
        let line_end = line.start + line_len;
        let line_primary = primary.and_then(|p| project_onto_line(p, line.start, line_end));

        let mut line_anns: Vec<LineAnnotation> = Vec::new();
        for (id, ann) in diag.annotations.iter().enumerate() {
            if ann.is_orphan() {
                continue;
            }
            for span in &ann.spans {
                let Some(rel) = project_onto_line(*span, line.start, line_end) else { continue };
                let insert_text = (ann.level == Level::Insert)
                    .then(|| ann.tokens.as_ref().map(insert_text_from_tokens).unwrap_or_default());
                line_anns.push(LineAnnotation { id, level: ann.level, span: rel, insert_text });
            }
        }

        let items = decompose_line(&line.text, &line_anns, line.tokens, line_primary);

        let mut callouts: FxHashMap<usize, Vec<Callout>> = FxHashMap::default();
        let mut assigned: HashSet<usize> = HashSet::new();
        for (item_idx, item) in items.iter().enumerate() {
            for &id in &item.message_ids {
                if !assigned.insert(id) {
                    continue;
                }
                let ann = &diag.annotations[id];
                if ann.message.is_empty() {
                    continue;
                }
                let plain_text = ann.message.plain_text().into_owned();
                let text = message_to_annotated(&ann.message);
                callouts.entry(item_idx).or_default().push(Callout { level: ann.level, text, plain_text });
            }
        }

        placer_lines.push(PlacerLine { line_number: line.line_number, items, callouts });
    }

    placer_lines
        .retain(|l| !l.items.is_empty() && !(l.items.len() == 1 && l.items[0].text.is_empty() && l.callouts.is_empty()));

    placer_lines
}

fn header_line(diag: &Diag) -> String {
    let mut s = String::new();
    s.push_str(diag.level.to_str());
    if let Some(code) = diag.code {
        s.push('[');
        s.push_str(code.as_str());
        s.push(']');
    }
    s.push_str(": ");
    s.push_str(&diag.message);
    s
}

fn location_line(diag: &Diag) -> Option<String> {
    if diag.location.has_filename() && diag.location.has_valid_line() {
        Some(format!(
            " --> {}:{}:{}",
            diag.location.filename(),
            diag.location.line_number(),
            diag.location.column_number()
        ))
    } else {
        None
    }
}

/// Builds the full rendered text for one diagnostic: header, location,
/// source excerpt with markers/balloons, and sub-diagnostics (spec.md §4.2,
/// §7). Sub-diagnostics carry their own [`crate::message::MultiSpan`] rather
/// than a full [`DiagnosticLocation`], so they render as trailing `= level:
/// message` lines rather than their own excerpt.
fn assemble(diag: &Diag, config: &RenderConfig) -> String {
    let mut out = String::new();
    out.push_str(&header_line(diag));
    out.push('\n');
    if let Some(loc) = location_line(diag) {
        out.push_str(&loc);
        out.push('\n');
    }

    let placer_lines = if diag.location.is_empty() {
        Vec::new()
    } else {
        build_placer_lines(diag, &gather_lines(&diag.location), primary_span(&diag.location))
    };
    let orphans = collect_orphans(diag);
    if !placer_lines.is_empty() || !orphans.is_empty() {
        let mut placer = Placer::new(config.width);
        placer.set_deletion_glyph(config.deletion_glyph);
        placer.set_glyphs(config.glyphs);
        placer.place(&placer_lines, &orphans, 0);
        out.push_str(&placer.into_canvas().render());
    }

    for sub in &diag.sub_diagnostics {
        for msg in &sub.messages {
            out.push_str(&format!("= {}: {}\n", sub.level, msg.plain_text()));
        }
    }

    out.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn header_includes_code_when_present() {
        let mut diag = Diag::new(Level::Error, "unexpected token", DiagnosticLocation::empty());
        diag.code = Some(crate::diagnostic::DiagId::new_str("E0001"));
        assert_eq!(header_line(&diag), "error[E0001]: unexpected token");
    }

    #[test]
    fn location_line_suppressed_without_filename() {
        let diag = Diag::new(Level::Warning, "unused", DiagnosticLocation::empty());
        assert!(location_line(&diag).is_none());
    }

    #[test]
    fn buffer_emitter_renders_plain_header_and_body() {
        let loc = DiagnosticLocation::Basic {
            filename: "a.sol".to_string(),
            source: "uint x = 1;".to_string(),
            line_number: 1,
            column_number: 1,
            source_location: 0,
            length: 1,
        };
        let mut diag = Diag::new(Level::Error, "bad literal", loc);
        diag.annotations.push(crate::message::Annotation::new(
            Level::Error,
            "here",
            vec![Span::absolute(9, 10)],
        ));

        let mut emitter = HumanBufferEmitter::new(RenderConfig::default());
        let rendered = emitter.emit_diagnostic(&diag);
        assert!(rendered.starts_with("error: bad literal"));
        assert!(rendered.contains("--> a.sol:1:1"));
        assert!(rendered.contains("uint x = 1;"));
    }

    #[test]
    fn orphan_note_renders_with_no_span() {
        let diag = {
            let mut d = Diag::new(Level::Error, "bad", DiagnosticLocation::empty());
            d.annotations.push(crate::message::Annotation::new(Level::Note, "consider this", vec![]));
            d
        };
        let mut emitter = HumanBufferEmitter::new(RenderConfig::default());
        let rendered = emitter.emit_diagnostic(&diag);
        assert!(rendered.contains("note: consider this"));
    }
}
