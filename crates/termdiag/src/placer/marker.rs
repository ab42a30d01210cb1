//! Marker drawing and arrow-direction selection (spec.md §4.4).

use crate::canvas::Canvas;
use crate::level::Level;
use crate::line_decomp::ItemKind;
use crate::style::Style;

/// The glyph drawn directly beneath a marked source cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerGlyph {
    /// `^`, the primary marker.
    Primary,
    /// `~`, a secondary severity marker.
    Severity,
    /// `+`, a suggested insertion.
    Insert,
    /// `-`, a suggested deletion.
    Delete,
}

impl MarkerGlyph {
    pub fn for_annotation(is_primary: bool, kind: Option<ItemKind>) -> Self {
        match (is_primary, kind) {
            (true, _) => Self::Primary,
            (false, Some(ItemKind::Insert)) => Self::Insert,
            (false, Some(ItemKind::Delete)) => Self::Delete,
            (false, None) => Self::Severity,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Primary => "^",
            Self::Severity => "~",
            Self::Insert => "+",
            Self::Delete => "-",
        }
    }

    /// Like [`Self::glyph`], but a `Delete` marker's underline uses the
    /// caller-configured deletion glyph (spec.md §9's open question,
    /// `RenderConfig::deletion_glyph`, default `x`) instead of the fixed
    /// `-`. Other kinds are unaffected.
    pub fn glyph_with(self, deletion_glyph: char) -> String {
        match self {
            Self::Delete => deletion_glyph.to_string(),
            other => other.glyph().to_string(),
        }
    }
}

/// Which way a marker's connector should leave the marker cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
    Down,
}

impl ArrowDirection {
    pub fn tip(self) -> &'static str {
        match self {
            Self::Left => "<-",
            Self::Right => "->",
            Self::Down => "v",
        }
    }
}

/// One drawn marker: the cell it occupies, the balloon it points to (if
/// any), its glyph, and whether it is the diagnostic's primary marker.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub cell: (usize, usize),
    pub balloon_attach: Option<(usize, usize)>,
    pub glyph: MarkerGlyph,
    pub is_primary: bool,
    pub arrow: ArrowDirection,
}

/// Chooses an arrow direction given the marker cell, the balloon's attach
/// cell, whether the two cells directly above the marker are clear, and
/// whether more than one marker shares this display item (in which case
/// only `Down` is legal, since left/right slots are shared).
pub fn choose_arrow(
    canvas: &Canvas,
    marker: (usize, usize),
    balloon_attach: Option<(usize, usize)>,
    shared_item: bool,
) -> ArrowDirection {
    let Some(balloon) = balloon_attach else {
        return ArrowDirection::Down;
    };
    if shared_item {
        return ArrowDirection::Down;
    }
    let (mx, my) = marker;
    let (bx, by) = balloon;

    if by == my && bx < mx {
        let clear = (1..=2).all(|dy| my.checked_sub(dy).is_some_and(|y| !canvas.is_occupied(mx, y)));
        if clear {
            return ArrowDirection::Left;
        }
    }
    if by == my && bx > mx {
        let clear = (1..=2).all(|dy| my.checked_sub(dy).is_some_and(|y| !canvas.is_occupied(mx, y)));
        if clear {
            return ArrowDirection::Right;
        }
    }
    ArrowDirection::Down
}

/// Draws a marker glyph at `cell` with `style`, repeated across `width`
/// columns so a multi-cell span gets a full underline run rather than a
/// single point (spec.md §4.4's literal scenarios, e.g. S1's `xxxx` under a
/// four-column deleted span), plus the arrow tip if the chosen direction is
/// `Down` (left/right tips are drawn by the router at the route's marker
/// end). `marker.cell` remains the anchor cell the router/balloon placement
/// key off of; the extra columns are purely the underline's visual run.
pub fn draw_marker(canvas: &mut Canvas, marker: &Marker, style: Style, width: usize, deletion_glyph: char) {
    let width = width.max(1);
    let glyph = marker.glyph.glyph_with(deletion_glyph);
    for dx in 0..width {
        canvas.draw_pixel(marker.cell.0 + dx, marker.cell.1, &glyph, style);
    }
    if marker.arrow == ArrowDirection::Down {
        canvas.draw_pixel(marker.cell.0, marker.cell.1 + 1, marker.arrow.tip(), style);
    }
}

/// Style used for a marker of the given level.
pub fn marker_style(level: Level) -> Style {
    Style::for_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_selection_matches_spec() {
        assert_eq!(MarkerGlyph::for_annotation(true, None).glyph(), "^");
        assert_eq!(MarkerGlyph::for_annotation(false, Some(ItemKind::Insert)).glyph(), "+");
        assert_eq!(MarkerGlyph::for_annotation(false, Some(ItemKind::Delete)).glyph(), "-");
        assert_eq!(MarkerGlyph::for_annotation(false, None).glyph(), "~");
    }

    #[test]
    fn delete_glyph_is_configurable_other_glyphs_are_not() {
        assert_eq!(MarkerGlyph::Delete.glyph_with('x'), "x");
        assert_eq!(MarkerGlyph::Delete.glyph_with('≈'), "≈");
        assert_eq!(MarkerGlyph::Severity.glyph_with('x'), "~");
        assert_eq!(MarkerGlyph::Primary.glyph_with('x'), "^");
    }

    #[test]
    fn draw_marker_underlines_the_full_width() {
        let mut canvas = Canvas::new(60);
        let marker = Marker {
            cell: (3, 2),
            balloon_attach: None,
            glyph: MarkerGlyph::Delete,
            is_primary: false,
            arrow: ArrowDirection::Left,
        };
        draw_marker(&mut canvas, &marker, Style::for_level(Level::Error), 4, 'x');
        for dx in 0..4 {
            assert!(canvas.is_occupied(3 + dx, 2));
        }
        assert!(!canvas.is_occupied(7, 2));
    }

    #[test]
    fn shared_item_forces_down_arrow() {
        let canvas = Canvas::new(60);
        let dir = choose_arrow(&canvas, (10, 5), Some((2, 5)), true);
        assert_eq!(dir, ArrowDirection::Down);
    }

    #[test]
    fn no_balloon_forces_down_arrow() {
        let canvas = Canvas::new(60);
        let dir = choose_arrow(&canvas, (10, 5), None, false);
        assert_eq!(dir, ArrowDirection::Down);
    }
}
