//! A resizable grid of styled cells supporting pixel writes, line/box/path
//! drawing, and word-wrapped text rendering.
//!
//! Grounded on `examples/original_source/include/diagnostics/core/term/
//! canvas.hpp` (`TerminalScreen`, `append_rows`, `insert_row`, `try_write`)
//! for the contract shapes spec.md §4.7 names, and on
//! `examples/other_examples/29bca7db_brendanzab-codespan__codespan-
//! reporting-src-term-display_list.rs.rs` for idiomatic Rust framing of a
//! grid-of-cells renderer.

pub mod glyphs;

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::annotated_string::AnnotatedString;
use crate::style::Style;
use glyphs::BoxChars;

/// Width is clamped to this envelope (spec.md §4.7/§6).
pub const MIN_WIDTH: usize = 50;
pub const MAX_WIDTH: usize = 200;

/// One cell of the grid. Empty cells render as a space.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub grapheme: String,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        // z=0, non-immutable: an empty cell must lose to any real write,
        // unlike `Style::PLAIN` (z=IMMUTABLE_Z) which marks rendered source
        // text as no longer overwritable.
        Self { grapheme: String::new(), style: Style::new(0) }
    }
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.grapheme.is_empty()
    }

    fn display(&self) -> &str {
        if self.grapheme.is_empty() {
            " "
        } else {
            &self.grapheme
        }
    }
}

/// Horizontal alignment for [`Canvas::draw_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Overflow handling for [`Canvas::draw_text`] when a line exceeds
/// `max_lines`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    None,
    Ellipsis,
    MiddleEllipsis,
    StartEllipsis,
}

/// Options controlling [`Canvas::draw_text`].
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub max_width: usize,
    pub word_wrap: bool,
    pub max_lines: Option<usize>,
    pub overflow: Overflow,
    pub align: Align,
    pub padding: usize,
    pub prevent_wordbreak: bool,
    pub end_padding: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            word_wrap: true,
            max_lines: None,
            overflow: Overflow::None,
            align: Align::Left,
            padding: 0,
            prevent_wordbreak: false,
            end_padding: 0,
        }
    }
}

/// An axis-aligned rectangular region of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// A resizable grid of styled cells.
#[derive(Clone, Debug)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    max_rows_written: usize,
}

impl Canvas {
    /// Creates a canvas with the given target width, clamped to
    /// `[MIN_WIDTH, MAX_WIDTH]`, and an initial height of two rows.
    pub fn new(target_width: usize) -> Self {
        let cols = target_width.clamp(MIN_WIDTH, MAX_WIDTH);
        let rows = 2;
        Self { cols, rows, cells: vec![Cell::default(); cols * rows], max_rows_written: 0 }
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn max_rows_written(&self) -> usize {
        self.max_rows_written
    }

    /// Grows the grid so row `y` exists, without writing to it. Used by
    /// callers that need to probe rows ahead of a write (e.g. a free-strip
    /// search) before committing to a position.
    pub fn grow_to(&mut self, y: usize) {
        self.ensure_rows(y);
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Grows the grid (geometrically) so that row `y` exists.
    fn ensure_rows(&mut self, y: usize) {
        if y < self.rows {
            return;
        }
        let mut new_rows = self.rows.max(1);
        while new_rows <= y {
            new_rows *= 2;
        }
        let mut new_cells = vec![Cell::default(); self.cols * new_rows];
        new_cells[..self.cells.len()].clone_from_slice(&self.cells);
        self.cells = new_cells;
        self.rows = new_rows;
    }

    /// Writes one cell, growing the grid if needed. Writes only if
    /// `style` wins the z-index collision against the existing cell.
    pub fn draw_pixel(&mut self, x: usize, y: usize, grapheme: &str, style: Style) {
        if x >= self.cols {
            return;
        }
        self.ensure_rows(y);
        let idx = self.idx(x, y);
        if style.wins_over(self.cells[idx].style) {
            self.cells[idx] = Cell { grapheme: grapheme.to_string(), style };
        }
        self.max_rows_written = self.max_rows_written.max(y + 1);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(&self.cells[self.idx(x, y)])
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|c| !c.is_empty())
    }

    /// Draws an axis-aligned polyline between `(x1,y1)` and `(x2,y2)` with
    /// exactly one bend. `top_bias` selects which of the two possible
    /// corners is used when the points aren't aligned.
    pub fn draw_line(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, style: Style, top_bias: bool) {
        if y1 == y2 {
            self.draw_hline(x1.min(x2), x1.max(x2), y1, style);
            return;
        }
        if x1 == x2 {
            self.draw_vline(x1, y1.min(y2), y1.max(y2), style);
            return;
        }
        let (corner_y, corner_x) = if top_bias { (y1, x2) } else { (y2, x1) };
        self.draw_vline(x1, y1.min(corner_y), y1.max(corner_y), style);
        self.draw_hline(x1.min(corner_x), x1.max(corner_x), corner_y, style);
        self.draw_vline(x2, corner_y.min(y2), corner_y.max(y2), style);
        self.draw_hline(corner_x.min(x2), corner_x.max(x2), y2, style);
    }

    fn draw_hline(&mut self, x_start: usize, x_end: usize, y: usize, style: Style) {
        for x in x_start..=x_end {
            self.draw_pixel(x, y, "─", style);
        }
    }

    fn draw_vline(&mut self, x: usize, y_start: usize, y_end: usize, style: Style) {
        for y in y_start..=y_end {
            self.draw_pixel(x, y, "│", style);
        }
    }

    /// Draws a polyline through `points` with orthogonal segments only,
    /// inferring a corner glyph at each interior vertex from the turn
    /// direction.
    pub fn draw_path(&mut self, points: &[(usize, usize)], style: Style) {
        if points.len() < 2 {
            return;
        }
        for w in points.windows(2) {
            let (x1, y1) = w[0];
            let (x2, y2) = w[1];
            if x1 == x2 {
                self.draw_vline(x1, y1.min(y2), y1.max(y2), style);
            } else if y1 == y2 {
                self.draw_hline(x1.min(x2), x1.max(x2), y1, style);
            }
        }
        for w in points.windows(3) {
            let (px, py) = w[0];
            let (cx, cy) = w[1];
            let (nx, ny) = w[2];
            let glyph = corner_glyph(px, py, cx, cy, nx, ny);
            self.draw_pixel(cx, cy, glyph, style);
        }
    }

    /// Draws a rectangle border using the given glyph set.
    pub fn draw_box(&mut self, x: usize, y: usize, w: usize, h: usize, style: Style, chars: BoxChars) {
        if w == 0 || h == 0 {
            return;
        }
        for i in 0..w {
            self.draw_pixel(x + i, y, &chars.horizontal.to_string(), style);
            self.draw_pixel(x + i, y + h - 1, &chars.horizontal.to_string(), style);
        }
        for j in 0..h {
            self.draw_pixel(x, y + j, &chars.vertical.to_string(), style);
            self.draw_pixel(x + w - 1, y + j, &chars.vertical.to_string(), style);
        }
        self.draw_pixel(x, y, &chars.top_left.to_string(), style);
        self.draw_pixel(x + w - 1, y, &chars.top_right.to_string(), style);
        self.draw_pixel(x, y + h - 1, &chars.bottom_left.to_string(), style);
        self.draw_pixel(x + w - 1, y + h - 1, &chars.bottom_right.to_string(), style);
    }

    /// Writes a run of text starting at `(x, y)`, wrapping at the row edge
    /// and continuing at the same `x`. Returns the row/column immediately
    /// after the last character written (spec.md §4.2 "Each line starts at
    /// ..." wrap rule).
    pub fn try_write(&mut self, text: &str, x: usize, y: usize, style: Style) -> (usize, usize) {
        self.try_write_wrapped(text, x, x, y, style, 0)
    }

    /// Like [`Canvas::try_write`], but writing starts at `x` while a wrapped
    /// continuation row restarts at `wrap_x` (spec.md §4.2: a wrapped
    /// source row continues "at the same left indent as the start of the
    /// wrapped source line", which may differ from where this particular
    /// item started). `right_margin` narrows the wrap column below the grid
    /// edge for bounding-box-limited writes.
    pub fn try_write_wrapped(&mut self, text: &str, x: usize, wrap_x: usize, y: usize, style: Style, right_margin: usize) -> (usize, usize) {
        let wrap_col = self.cols.saturating_sub(right_margin).max(x + 1);
        let mut col = x;
        let mut row = y;
        for ch in text.chars() {
            if col >= wrap_col {
                row += 1;
                col = wrap_x;
            }
            self.draw_pixel(col, row, &ch.to_string(), style);
            col += 1;
        }
        (row, col)
    }

    /// Like [`Canvas::try_write`], wrapping `right_margin` cells before the
    /// grid edge and continuing at `x` on the wrapped row.
    pub fn try_write_margin(&mut self, text: &str, x: usize, y: usize, style: Style, right_margin: usize) -> (usize, usize) {
        self.try_write_wrapped(text, x, x, y, style, right_margin)
    }

    /// Writes word-wrapped, optionally aligned and padded text. Returns the
    /// bounding box used and the count of characters that did not fit
    /// within `style.max_lines` (if set).
    pub fn draw_text(&mut self, text: &AnnotatedString, x: usize, y: usize, style: &TextStyle) -> (BoundingBox, usize) {
        let content_width = style.max_width.saturating_sub(2 * style.padding).max(1);
        let lines = text.word_wrap(content_width, !style.prevent_wordbreak);
        let mut overflow_count = 0usize;
        let limit = style.max_lines.unwrap_or(lines.len());

        let mut max_w = 0usize;
        for (i, line) in lines.iter().enumerate() {
            if i >= limit {
                overflow_count += line.len();
                continue;
            }
            let line_width: usize =
                line.iter().map(|c| UnicodeWidthStr::width(c.grapheme.as_str())).sum();
            max_w = max_w.max(line_width);
            let offset = match style.align {
                Align::Left => 0,
                Align::Center => content_width.saturating_sub(line_width) / 2,
                Align::Right => content_width.saturating_sub(line_width),
            };
            let row = y + i;
            let mut col = x + style.padding + offset;
            for cell in line {
                self.draw_pixel(col, row, &cell.grapheme, cell.style);
                col += UnicodeWidthStr::width(cell.grapheme.as_str()).max(1);
            }
        }
        let h = limit.min(lines.len()).max(1);
        (BoundingBox { x, y, w: max_w + 2 * style.padding, h }, overflow_count)
    }

    /// Composes [`Canvas::draw_text`] with [`Canvas::draw_box`], sizing the
    /// box to `(text width + 2, text height + 2)`.
    pub fn draw_boxed_text(
        &mut self,
        text: &AnnotatedString,
        x: usize,
        y: usize,
        style: &TextStyle,
        border_style: Style,
        chars: BoxChars,
    ) -> BoundingBox {
        let (bbox, _overflow) = self.draw_text(text, x + 1, y + 1, style);
        let w = bbox.w + 2;
        let h = bbox.h + 2;
        self.draw_box(x, y, w, h, border_style, chars);
        BoundingBox { x, y, w, h }
    }

    /// Lifts every row `> row` down by one, inserting a blank row at
    /// `row + 1`. Contents at rows `<= row` are unchanged; contents
    /// previously at row `r > row` land at `r + 1`. The caller is
    /// responsible for remapping any cached coordinate outside the grid.
    pub fn insert_row(&mut self, row: usize) {
        self.ensure_rows(row + 1);
        self.rows += 1;
        let mut new_cells = vec![Cell::default(); self.cols * self.rows];
        for y in 0..=row {
            let src_start = y * self.cols;
            let dst_start = y * self.cols;
            new_cells[dst_start..dst_start + self.cols]
                .clone_from_slice(&self.cells[src_start..src_start + self.cols]);
        }
        for y in (row + 1)..(self.rows - 1) {
            let src_start = y * self.cols;
            let dst_start = (y + 1) * self.cols;
            new_cells[dst_start..dst_start + self.cols]
                .clone_from_slice(&self.cells[src_start..src_start + self.cols]);
        }
        self.cells = new_cells;
        if self.max_rows_written > row {
            self.max_rows_written += 1;
        }
    }

    /// Renders the canvas up to [`Canvas::max_rows_written`] into a string
    /// with ANSI colour transitions emitted only on change. Short rows are
    /// padded with spaces.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut last_style: Option<Style> = None;
        for y in 0..self.max_rows_written {
            for x in 0..self.cols {
                let cell = &self.cells[self.idx(x, y)];
                if last_style != Some(cell.style) {
                    let _ = write!(out, "{}", cell.style.to_anstyle().render());
                    last_style = Some(cell.style);
                }
                out.push_str(cell.display());
            }
            if last_style.is_some() {
                let _ = write!(out, "{}", anstyle::Reset.render());
                last_style = None;
            }
            out.push('\n');
        }
        out
    }
}

fn corner_glyph(px: usize, py: usize, cx: usize, cy: usize, nx: usize, ny: usize) -> &'static str {
    let from_below = py > cy;
    let from_above = py < cy;
    let from_left = px < cx;
    let from_right = px > cx;
    let to_below = ny > cy;
    let to_above = ny < cy;
    let to_left = nx < cx;
    let to_right = nx > cx;

    if (from_below || to_below) && (from_right || to_right) {
        "╭"
    } else if (from_below || to_below) && (from_left || to_left) {
        "╮"
    } else if (from_above || to_above) && (from_right || to_right) {
        "╰"
    } else {
        "╯"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_clamps_to_envelope() {
        assert_eq!(Canvas::new(10).width(), MIN_WIDTH);
        assert_eq!(Canvas::new(1000).width(), MAX_WIDTH);
        assert_eq!(Canvas::new(80).width(), 80);
    }

    #[test]
    fn higher_z_write_wins() {
        let mut c = Canvas::new(60);
        c.draw_pixel(0, 0, "a", Style::new(1));
        c.draw_pixel(0, 0, "b", Style::new(5));
        assert_eq!(c.get(0, 0).unwrap().grapheme, "b");
        c.draw_pixel(0, 0, "c", Style::new(1));
        assert_eq!(c.get(0, 0).unwrap().grapheme, "b");
    }

    #[test]
    fn insert_row_preserves_before_and_after() {
        let mut c = Canvas::new(60);
        c.draw_pixel(0, 0, "a", Style::new(1));
        c.draw_pixel(0, 1, "b", Style::new(1));
        c.draw_pixel(0, 2, "c", Style::new(1));
        c.insert_row(0);
        assert_eq!(c.get(0, 0).unwrap().grapheme, "a");
        assert_eq!(c.get(0, 1).unwrap().grapheme, "");
        assert_eq!(c.get(0, 2).unwrap().grapheme, "b");
        assert_eq!(c.get(0, 3).unwrap().grapheme, "c");
    }

    #[test]
    fn grows_on_write_past_height() {
        let mut c = Canvas::new(60);
        c.draw_pixel(0, 50, "x", Style::new(1));
        assert!(c.rows() > 50);
        assert_eq!(c.max_rows_written(), 51);
    }

    use proptest::prelude::*;

    /// spec.md §8 "Canvas monotonicity": `insert_row(r)` preserves cell
    /// contents at rows `<= r` and at rows `> r+1` (after the shift).
    proptest! {
        #[test]
        fn insert_row_is_monotone(
            height in 2usize..20,
            insert_at in 0usize..18,
            fills in proptest::collection::vec(0usize..18, 1..10),
        ) {
            let insert_at = insert_at.min(height - 1);
            let mut c = Canvas::new(60);
            c.grow_to(height);
            for (i, row) in fills.iter().enumerate() {
                let row = (*row).min(height - 1);
                c.draw_pixel(0, row, &(i % 10).to_string(), Style::new(1));
            }
            let before: Vec<String> = (0..=insert_at).map(|y| c.get(0, y).map(|c| c.grapheme.clone()).unwrap_or_default()).collect();
            let after: Vec<String> = (insert_at + 1..height).map(|y| c.get(0, y).map(|c| c.grapheme.clone()).unwrap_or_default()).collect();

            c.insert_row(insert_at);

            for (y, expected) in before.iter().enumerate() {
                prop_assert_eq!(&c.get(0, y).map(|c| c.grapheme.clone()).unwrap_or_default(), expected);
            }
            for (i, expected) in after.iter().enumerate() {
                let y = insert_at + 2 + i;
                prop_assert_eq!(&c.get(0, y).map(|c| c.grapheme.clone()).unwrap_or_default(), expected);
            }
        }
    }
}
