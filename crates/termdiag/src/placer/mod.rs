//! The placer: lays out the source excerpt, balloons, markers, and
//! connector paths for one diagnostic, owning all coordinate arithmetic
//! (spec.md §4.2–§4.6).

pub mod balloon;
pub mod excerpt;
pub mod marker;

use rustc_hash::FxHashMap;

use crate::annotated_string::AnnotatedString;
use crate::canvas::glyphs::GlyphSet;
use crate::canvas::Canvas;
use crate::level::Level;
use crate::line_decomp::RenderItem;
use crate::router;
use crate::style::Style;

use balloon::{place_balloon, Balloon, BalloonCache};
use excerpt::{render_excerpt, DisplaySpan, ExcerptLine};
use marker::{choose_arrow, draw_marker, marker_style, ArrowDirection, Marker, MarkerGlyph};

/// One callout attached to a marked render item: the message text/level
/// plus whether it carries its own span (non-orphan).
pub struct Callout {
    pub level: Level,
    pub text: AnnotatedString,
    pub plain_text: String,
}

/// Everything the placer needs about one source line: its 1-based number,
/// decomposed render items, and the callouts attached to each marked item
/// (by item index within that line).
pub struct PlacerLine {
    pub line_number: usize,
    pub items: Vec<RenderItem>,
    pub callouts: FxHashMap<usize, Vec<Callout>>,
}

/// A message with no attached spans, rendered at the bottom of the
/// diagnostic with no connector (spec.md §4.5).
pub struct Orphan {
    pub level: Level,
    pub text: AnnotatedString,
}

/// Lays out one diagnostic onto a fresh or existing canvas.
pub struct Placer {
    canvas: Canvas,
    balloons: BalloonCache,
    /// Glyph drawn for a `Delete`-kind marker's underline run, overriding
    /// [`MarkerGlyph::Delete`]'s default `-` (spec.md §9's open question on
    /// the deletion glyph; configurable via `RenderConfig::deletion_glyph`).
    deletion_glyph: char,
    /// Box-glyph set used to draw balloon borders (spec.md §6's ASCII/
    /// rounded/doubled/dotted fallback sets; `RenderConfig::glyphs`).
    glyphs: GlyphSet,
}

impl Placer {
    pub fn new(width: usize) -> Self {
        Self { canvas: Canvas::new(width), balloons: BalloonCache::new(), deletion_glyph: 'x', glyphs: GlyphSet::Rounded }
    }

    /// Overrides the glyph drawn under `Delete`-kind markers (default `x`).
    pub fn set_deletion_glyph(&mut self, glyph: char) {
        self.deletion_glyph = glyph;
    }

    /// Overrides the box-glyph set balloons are drawn with (default
    /// [`GlyphSet::Rounded`]).
    pub fn set_glyphs(&mut self, glyphs: GlyphSet) {
        self.glyphs = glyphs;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Renders the excerpt, then balloons + markers + connectors for every
    /// marked item, then the orphan block. Returns the row immediately
    /// after the last thing drawn.
    pub fn place(&mut self, lines: &[PlacerLine], orphans: &[Orphan], start_row: usize) -> usize {
        let max_line_number = lines.iter().map(|l| l.line_number).max().unwrap_or(0);
        let excerpt_lines: Vec<ExcerptLine<'_>> =
            lines.iter().map(|l| ExcerptLine { line_number: l.line_number, items: &l.items }).collect();
        let gutter_width = excerpt::gutter_width_for(max_line_number);

        let (mut row, display_spans) =
            render_excerpt(&mut self.canvas, &excerpt_lines, max_line_number, start_row, 6);

        row = self.place_markers_and_balloons(lines, &display_spans, gutter_width, row);
        row = self.place_orphans(orphans, row);
        row
    }

    fn place_markers_and_balloons(
        &mut self,
        lines: &[PlacerLine],
        display_spans: &[DisplaySpan],
        gutter_width: usize,
        mut row: usize,
    ) -> usize {
        for ds in display_spans {
            let line = &lines[ds.context_line_idx];
            let Some(callouts) = line.callouts.get(&ds.item_idx) else { continue };
            if callouts.is_empty() {
                continue;
            }
            let item = &line.items[ds.item_idx];
            let shared = callouts.len() > 1;

            // Reserve one marker row beneath the source row, per distinct
            // callout (spec.md §4.4: "a cell simultaneously marked error and
            // warning gets two rows").
            let marker_row = ds.cursor.1 + 1;
            self.canvas.grow_to(marker_row + callouts.len());
            row = row.max(marker_row + callouts.len() + 1);

            for (k, callout) in callouts.iter().enumerate() {
                let is_primary = k == 0 && item.message_ids.len() == 1;
                let marker_cell = (ds.cursor.0, marker_row + k);
                let style = marker_style(callout.level).with_group((ds.item_idx as u32) * 97 + k as u32);

                let balloon: Balloon = place_balloon(
                    &mut self.canvas,
                    &mut self.balloons,
                    &callout.text,
                    &callout.plain_text,
                    callout.level,
                    marker_cell.0,
                    marker_cell.1,
                    gutter_width,
                    self.glyphs,
                );

                let arrow = choose_arrow(&self.canvas, marker_cell, Some(balloon.attach), shared);
                let marker = Marker {
                    cell: marker_cell,
                    balloon_attach: Some(balloon.attach),
                    glyph: MarkerGlyph::for_annotation(is_primary, item.kind),
                    is_primary,
                    arrow,
                };
                draw_marker(&mut self.canvas, &marker, style, ds.width, self.deletion_glyph);

                if arrow != ArrowDirection::Down {
                    if let Some(path) = router::find_path(
                        &self.canvas,
                        balloon.attach,
                        marker_cell,
                        style.group.unwrap(),
                        style,
                        2000,
                    ) {
                        router::draw_route(&mut self.canvas, &path, style, arrow.tip());
                    }
                }
                row = row.max(balloon.bbox.y + balloon.bbox.h + 1);
            }
        }
        row
    }

    fn place_orphans(&mut self, orphans: &[Orphan], mut row: usize) -> usize {
        if orphans.is_empty() {
            return row;
        }
        let mut sorted: Vec<&Orphan> = orphans.iter().collect();
        sorted.sort_by_key(|o| Style::for_level(o.level).z);
        for orphan in sorted {
            let prefix = format!("= {}: ", orphan.level);
            let (final_row, _) = self.canvas.try_write(&prefix, 0, row, Style::for_level(orphan.level));
            let (bbox, _overflow) = self.canvas.draw_text(
                &orphan.text,
                prefix.chars().count(),
                final_row,
                &crate::canvas::TextStyle { max_width: self.canvas.width(), ..Default::default() },
            );
            row = final_row + bbox.h;
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap as Map;

    #[test]
    fn places_single_unmarked_line_without_panicking() {
        let mut placer = Placer::new(80);
        let items = vec![RenderItem {
            text: "void test();".to_string(),
            start_col: 0,
            message_ids: Default::default(),
            style: Style::PLAIN,
            kind: None,
        }];
        let lines = vec![PlacerLine { line_number: 1, items, callouts: Map::default() }];
        let row = placer.place(&lines, &[], 2);
        assert!(row > 2);
    }
}
