//! Balloon placement: bottom-up, right-to-left search for a free strip of
//! canvas wide/tall enough to hold a word-wrapped callout box (spec.md §4.3).

use rustc_hash::FxHashMap;

use crate::annotated_string::AnnotatedString;
use crate::canvas::glyphs::GlyphSet;
use crate::canvas::{Align, BoundingBox, Canvas, Overflow, TextStyle};
use crate::level::Level;
use crate::style::Style;

/// A placed balloon: its bounding box and the canvas cell its connector
/// should attach to (the top-center of the box).
#[derive(Clone, Copy, Debug)]
pub struct Balloon {
    pub bbox: BoundingBox,
    pub attach: (usize, usize),
}

/// Caches balloon placements keyed by the backing message text's identity
/// (spec.md §4.3 "deduplicated by the backing text identity"), so repeated
/// pointers to the same message body share one balloon.
#[derive(Default)]
pub struct BalloonCache {
    by_text: FxHashMap<String, Balloon>,
}

impl BalloonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str) -> Option<Balloon> {
        self.by_text.get(text).copied()
    }
}

/// Returns `true` if every cell in the rectangle is either empty or belongs
/// to a placement with strictly lower z than `z`.
fn strip_is_free(canvas: &Canvas, x: usize, y: usize, w: usize, h: usize, z: u16) -> bool {
    for row in y..y + h {
        for col in x..x + w {
            if let Some(cell) = canvas.get(col, row) {
                if !cell.is_empty() && cell.style.z >= z {
                    return false;
                }
            }
        }
    }
    true
}

/// Places (or retrieves from cache) a balloon for `text` near `(marker_x,
/// marker_y)`, growing the canvas downward as needed.
pub fn place_balloon(
    canvas: &mut Canvas,
    cache: &mut BalloonCache,
    text: &AnnotatedString,
    plain_text: &str,
    level: Level,
    marker_x: usize,
    marker_y: usize,
    gutter_width: usize,
    glyphs: GlyphSet,
) -> Balloon {
    if let Some(b) = cache.get(plain_text) {
        return b;
    }

    let screen_w = canvas.width();
    let min_left_pad = gutter_width + 4;

    // Step 1: target column.
    let space_right = screen_w.saturating_sub(marker_x);
    let target_x = if space_right >= 16 {
        marker_x
    } else {
        (screen_w / 2).saturating_sub(10).max(min_left_pad)
    };

    let strip_width = (text.display_width() + 4).min(screen_w.saturating_sub(min_left_pad)).max(8);
    let wrapped_lines = text.word_wrap(strip_width.saturating_sub(4), false).len().max(1);

    let target_x = if wrapped_lines > 2 {
        (screen_w / 2).saturating_sub(target_x / 2).max(min_left_pad).min(target_x)
    } else {
        target_x
    };

    // Step 2: search rows downward, shifting left on a dirty strip.
    let z = Style::for_level(level).z;
    let mut x = target_x.max(min_left_pad).min(screen_w.saturating_sub(strip_width).max(min_left_pad));
    let mut y = marker_y + 2;
    let box_h = wrapped_lines + 2;

    loop {
        canvas.grow_to(y + box_h);
        if strip_is_free(canvas, x, y, strip_width.min(screen_w - x), box_h, z) {
            break;
        }
        if x > min_left_pad + 2 {
            x -= 2;
        } else {
            y += 1;
        }
        if y > 10_000 {
            break; // defensive bound; unreachable in practice given canvas growth.
        }
    }

    let style = TextStyle {
        max_width: strip_width,
        word_wrap: true,
        prevent_wordbreak: true,
        end_padding: 4,
        align: Align::Left,
        overflow: Overflow::Ellipsis,
        padding: 1,
        max_lines: None,
    };
    let border_style = Style::for_level(level).with_z(z);
    let bbox = canvas.draw_boxed_text(text, x, y, &style, border_style, glyphs.chars());
    let balloon = Balloon { bbox, attach: (bbox.x + bbox.w / 2, bbox.y) };
    cache.by_text.insert(plain_text.to_string(), balloon);
    balloon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_shares_one_balloon() {
        let mut canvas = Canvas::new(80);
        let mut cache = BalloonCache::new();
        let mut text = AnnotatedString::new();
        text.push_str("same message", Style::PLAIN);

        let a = place_balloon(&mut canvas, &mut cache, &text, "same message", Level::Error, 10, 3, 5, GlyphSet::Rounded);
        let b = place_balloon(&mut canvas, &mut cache, &text, "same message", Level::Error, 40, 9, 5, GlyphSet::Rounded);
        assert_eq!(a.bbox, b.bbox);
    }

    #[test]
    fn distinct_balloons_do_not_overlap_at_equal_or_higher_z() {
        let mut canvas = Canvas::new(80);
        let mut cache = BalloonCache::new();
        let mut t1 = AnnotatedString::new();
        t1.push_str("first message body", Style::PLAIN);
        let mut t2 = AnnotatedString::new();
        t2.push_str("second message body", Style::PLAIN);

        let a = place_balloon(&mut canvas, &mut cache, &t1, "first message body", Level::Error, 5, 2, 5, GlyphSet::Rounded);
        let b = place_balloon(&mut canvas, &mut cache, &t2, "second message body", Level::Warning, 5, 2, 5, GlyphSet::Rounded);
        let overlap_x = a.bbox.x.max(b.bbox.x) < (a.bbox.x + a.bbox.w).min(b.bbox.x + b.bbox.w);
        let overlap_y = a.bbox.y.max(b.bbox.y) < (a.bbox.y + a.bbox.h).min(b.bbox.y + b.bbox.h);
        assert!(!(overlap_x && overlap_y));
    }

    use proptest::prelude::*;

    /// spec.md §8 "Balloon non-overlap": two balloons backed by different
    /// text never share interior cells of equal-or-greater z, for
    /// randomized marker positions and message bodies.
    proptest! {
        #[test]
        fn distinct_balloons_never_overlap(
            body_a in "[a-zA-Z ]{3,30}",
            body_b in "[a-zA-Z ]{3,30}",
            mx1 in 0usize..70, my1 in 0usize..5,
            mx2 in 0usize..70, my2 in 0usize..5,
        ) {
            prop_assume!(body_a != body_b);
            let mut canvas = Canvas::new(80);
            let mut cache = BalloonCache::new();
            let mut t1 = AnnotatedString::new();
            t1.push_str(&body_a, Style::PLAIN);
            let mut t2 = AnnotatedString::new();
            t2.push_str(&body_b, Style::PLAIN);

            let a = place_balloon(&mut canvas, &mut cache, &t1, &body_a, Level::Error, mx1, my1, 5, GlyphSet::Rounded);
            let b = place_balloon(&mut canvas, &mut cache, &t2, &body_b, Level::Warning, mx2, my2, 5, GlyphSet::Rounded);
            let overlap_x = a.bbox.x.max(b.bbox.x) < (a.bbox.x + a.bbox.w).min(b.bbox.x + b.bbox.w);
            let overlap_y = a.bbox.y.max(b.bbox.y) < (a.bbox.y + a.bbox.h).min(b.bbox.y + b.bbox.h);
            prop_assert!(!(overlap_x && overlap_y));
        }
    }
}
