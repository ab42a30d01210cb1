//! Source excerpt rendering: gutter, line elision, and wrapped writes of
//! per-line render items onto the canvas (spec.md §4.2).

use unicode_width::UnicodeWidthStr;

use crate::canvas::Canvas;
use crate::line_decomp::RenderItem;
use crate::style::Style;

/// Minimum run of marker-free lines that collapses to one `...` row.
const ELISION_THRESHOLD: usize = 5;

/// Where one marked render item ultimately landed on the canvas, recorded
/// so the marker/balloon passes can find it again.
#[derive(Clone, Copy, Debug)]
pub struct DisplaySpan {
    pub cursor: (usize, usize),
    pub context_line_idx: usize,
    pub item_idx: usize,
    /// Display-column width of the item's text on the row it starts on
    /// (i.e. before any wrap-induced row break splits it). Used to draw a
    /// marker underline across the item's full width rather than a single
    /// anchor cell (spec.md §4.4).
    pub width: usize,
}

/// One source line's decomposition plus its 1-based line number.
pub struct ExcerptLine<'a> {
    pub line_number: usize,
    pub items: &'a [RenderItem],
}

/// `max(2, digits(max_line_number)) + 1` (spec.md §4.2).
pub fn gutter_width_for(max_line_number: usize) -> usize {
    let digits = if max_line_number == 0 { 1 } else { (max_line_number as f64).log10().floor() as usize + 1 };
    digits.max(2) + 1
}

/// Writes a source-line gutter prefix (`<num> │ ` or `<spaces> ┆ `).
fn draw_gutter(canvas: &mut Canvas, row: usize, width: usize, line_number: Option<usize>) {
    let gutter_style = Style::gutter();
    let text = match line_number {
        Some(n) => format!("{n:>width$} │ ", n = n, width = width),
        None => format!("{:>width$} ┆ ", "", width = width),
    };
    canvas.try_write(&text, 0, row, gutter_style);
}

fn escape_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Renders every excerpt line starting at `start_row`, eliding runs of
/// `ELISION_THRESHOLD`-or-more marker-free lines to a single `...` row.
/// Returns the row immediately after the excerpt and the recorded
/// [`DisplaySpan`]s for every marked item.
pub fn render_excerpt(
    canvas: &mut Canvas,
    lines: &[ExcerptLine<'_>],
    max_line_number: usize,
    start_row: usize,
    right_margin: usize,
) -> (usize, Vec<DisplaySpan>) {
    let gw = gutter_width_for(max_line_number);
    let left = gw + 2;
    let mut row = start_row;
    let mut spans = Vec::new();

    let marked = |l: &ExcerptLine<'_>| l.items.iter().any(|i| !i.message_ids.is_empty());

    let mut i = 0;
    while i < lines.len() {
        if !marked(&lines[i]) {
            let mut j = i;
            while j < lines.len() && !marked(&lines[j]) {
                j += 1;
            }
            if j - i >= ELISION_THRESHOLD {
                draw_gutter(canvas, row, gw, None);
                canvas.try_write("...", left, row, Style::gutter());
                row += 1;
                i = j;
                continue;
            }
        }

        let line = &lines[i];
        draw_gutter(canvas, row, gw, Some(line.line_number));
        let mut col = left;
        let mut cur_row = row;
        for (item_idx, item) in line.items.iter().enumerate() {
            let text = escape_control(&item.text);
            let text_width = UnicodeWidthStr::width(text.as_str()).max(1);
            let wrap_col = canvas.width().saturating_sub(right_margin).max(col + 1);
            let width_on_row = wrap_col.saturating_sub(col).min(text_width);
            let (final_row, final_col) = canvas.try_write_wrapped(&text, col, left, cur_row, item.style, right_margin);
            if !item.message_ids.is_empty() {
                spans.push(DisplaySpan {
                    cursor: (col, cur_row),
                    context_line_idx: i,
                    item_idx,
                    width: width_on_row.max(1),
                });
            }
            if final_row != cur_row {
                cur_row = final_row;
            }
            col = final_col;
        }
        row = cur_row + 1;
        i += 1;
    }
    (row, spans)
}

