//! Line decomposition: flattening overlapping annotation spans on one
//! source line into a z-ordered sequence of styled render items, splicing
//! in suggested insertions.
//!
//! Grounded on spec.md §4.1's literal algorithm, cross-checked against
//! `examples/original_source/include/diagnostics/printer.hpp`'s
//! `DiagnosticRenderLineInfo::parse` (mask array + deferred-insert splicing
//! shape) and reimplemented idiomatically rather than translated.

use smallvec::SmallVec;

use crate::level::Level;
use crate::source::Token;
use crate::span::Span;
use crate::style::{level_color, level_priority, Style};

/// One annotation span projected onto a single line, in location-relative
/// coordinates `[0, line_len)`.
#[derive(Clone, Debug)]
pub struct LineAnnotation {
    pub id: usize,
    pub level: Level,
    pub span: Span,
    /// `Some(text)` if this annotation is a suggested insertion at
    /// `span.start()`.
    pub insert_text: Option<String>,
}

/// Whether a render item represents plain source text or a spliced
/// insertion/deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Insert,
    Delete,
}

/// One styled run of characters produced by line decomposition.
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub text: String,
    pub start_col: usize,
    pub message_ids: SmallVec<[usize; 4]>,
    pub style: Style,
    pub kind: Option<ItemKind>,
}

#[derive(Clone, Copy, Debug, Default)]
struct MaskCell {
    used: bool,
    z: u16,
    group: u32,
}

/// Decomposes one source line into render items.
///
/// `line` is the visible source text of the line (no trailing newline).
/// `annotations` are spans already clipped/projected onto this line.
/// `tokens`, if the source is pre-tokenized, supplies the per-column style
/// for otherwise-unmarked runs. `primary_span` is the diagnostic's primary
/// marker span in the same location-relative coordinates, used to promote
/// zero-length spans that coincide with its start.
pub fn decompose_line(
    line: &str,
    annotations: &[LineAnnotation],
    tokens: Option<&[Token]>,
    primary_span: Option<Span>,
) -> Vec<RenderItem> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut mask = vec![MaskCell::default(); len];
    let mut cell_ids: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); len];
    let mut group_id = 0u32;
    let mut deferred_inserts: Vec<&LineAnnotation> = Vec::new();

    // Step 1: build the mask, deferring inserts.
    for ann in annotations {
        if ann.insert_text.is_some() {
            deferred_inserts.push(ann);
            continue;
        }
        let mut span = ann.span;
        if span.is_empty() {
            if let Some(primary) = primary_span {
                if span.start() == primary.start() {
                    span = primary;
                }
            }
        }
        if span.start() >= len as i64 {
            continue; // wholly past the line
        }
        let span = span.clip(0, len as i64);
        if span.is_empty() {
            continue;
        }
        let start = span.start().max(0) as usize;
        let end = span.end().max(0) as usize;
        let z = level_priority(ann.level);
        for col in start..end.min(len) {
            let changed_membership = !cell_ids[col].contains(&ann.id);
            let changed_z = z > mask[col].z;
            if changed_membership || changed_z {
                group_id += 1;
            }
            mask[col].used = true;
            mask[col].z = mask[col].z.max(z);
            mask[col].group = group_id;
            if changed_membership {
                cell_ids[col].push(ann.id);
            }
        }
    }

    // Step 2: walk the mask, emitting a render item at every boundary.
    let mut items = Vec::new();
    let mut i = 0usize;
    while i < len {
        let used = mask[i].used;
        let group = mask[i].group;
        let mut j = i + 1;
        while j < len && mask[j].used == used && (!used || mask[j].group == group) {
            j += 1;
        }
        let text: String = chars[i..j].iter().collect();
        let ids = cell_ids[i].clone();
        let style = if used {
            let winning_level = ids
                .iter()
                .filter_map(|id| annotations.iter().find(|a| a.id == *id))
                .max_by_key(|a| level_priority(a.level))
                .map(|a| a.level)
                .unwrap_or(Level::Note);
            let mut style = Style::new(mask[i].z).with_fg(level_color(winning_level)).bold();
            let kind = if winning_level == Level::Delete {
                style = style.dim().strike();
                Some(ItemKind::Delete)
            } else {
                None
            };
            items.push(RenderItem { text, start_col: i, message_ids: ids, style, kind });
            i = j;
            continue;
        } else if let Some(tokens) = tokens {
            let tok_style = tokens
                .iter()
                .find(|t| t.column_number.saturating_sub(1) <= i && i < t.column_number.saturating_sub(1) + t.text.chars().count())
                .map(|t| t.style)
                .unwrap_or(Style::PLAIN);
            tok_style
        } else {
            Style::PLAIN
        };
        items.push(RenderItem { text, start_col: i, message_ids: ids, style, kind: None });
        i = j;
    }
    if items.is_empty() {
        items.push(RenderItem {
            text: String::new(),
            start_col: 0,
            message_ids: SmallVec::new(),
            style: Style::PLAIN,
            kind: None,
        });
    }

    // Step 3: splice in deferred inserts.
    for ann in deferred_inserts {
        let Some(text) = &ann.insert_text else { continue };
        let target_col = ann.span.start().max(0) as usize;
        splice_insert(&mut items, target_col, text, ann);
    }

    items
}

/// Splits the render item whose source-text column range straddles
/// `target_col` and inserts a new item there, carrying the insert's color
/// and z-index.
fn splice_insert(items: &mut Vec<RenderItem>, target_col: usize, text: &str, ann: &LineAnnotation) {
    // Walk items, tracking source-column position; already-inserted items
    // have zero source width and are skipped for positioning purposes.
    let mut source_col = 0usize;
    let mut insert_at = items.len();
    let mut split_offset = None;
    for (idx, item) in items.iter().enumerate() {
        if item.kind == Some(ItemKind::Insert) {
            continue;
        }
        let width = item.text.chars().count();
        if source_col <= target_col && target_col < source_col + width {
            insert_at = idx + 1;
            split_offset = Some(target_col - source_col);
            break;
        }
        source_col += width;
        if source_col == target_col {
            insert_at = idx + 1;
            break;
        }
    }

    let z = level_priority(ann.level);
    let color = match ann.level {
        Level::Insert => level_color(Level::Insert),
        Level::Delete => level_color(Level::Delete),
        other => level_color(other),
    };
    let new_item = RenderItem {
        text: text.to_string(),
        start_col: target_col,
        message_ids: SmallVec::from_slice(&[ann.id]),
        style: Style::new(z).with_fg(color).bold(),
        kind: Some(ItemKind::Insert),
    };

    if let Some(offset) = split_offset {
        if insert_at == 0 {
            items.insert(0, new_item);
            return;
        }
        let split_idx = insert_at - 1;
        let original = items.remove(split_idx);
        let chars: Vec<char> = original.text.chars().collect();
        let (left, right) = chars.split_at(offset.min(chars.len()));
        let mut to_insert = Vec::new();
        if !left.is_empty() {
            to_insert.push(RenderItem {
                text: left.iter().collect(),
                start_col: original.start_col,
                message_ids: original.message_ids.clone(),
                style: original.style,
                kind: original.kind,
            });
        }
        to_insert.push(new_item);
        if !right.is_empty() {
            to_insert.push(RenderItem {
                text: right.iter().collect(),
                start_col: original.start_col + offset,
                message_ids: original.message_ids,
                style: original.style,
                kind: original.kind,
            });
        }
        for (k, it) in to_insert.into_iter().enumerate() {
            items.insert(split_idx + k, it);
        }
    } else {
        items.insert(insert_at.min(items.len()), new_item);
    }
}

/// Concatenates the `text` fields of all produced render items, in order —
/// the spec.md §8 "line decomposition" invariant.
pub fn reassemble(items: &[RenderItem]) -> String {
    items.iter().map(|i| i.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(id: usize, level: Level, start: i64, end: i64) -> LineAnnotation {
        LineAnnotation { id, level, span: Span::location_relative(start as u32, end as u32), insert_text: None }
    }

    #[test]
    fn reassembly_matches_original_without_inserts() {
        let line = "void test( int a, int c );";
        let items = decompose_line(line, &[ann(0, Level::Error, 0, 3)], None, None);
        assert_eq!(reassemble(&items), line);
    }

    #[test]
    fn insert_is_spliced_at_column() {
        let line = "void test( int a, int c );";
        let mut anns = vec![ann(0, Level::Error, 0, 3)];
        anns.push(LineAnnotation {
            id: 1,
            level: Level::Insert,
            span: Span::location_relative(2, 2),
            insert_text: Some(")".to_string()),
        });
        let items = decompose_line(line, &anns, None, None);
        let rebuilt = reassemble(&items);
        assert_eq!(rebuilt, "vo)id test( int a, int c );");
    }

    #[test]
    fn span_past_line_is_discarded() {
        let line = "short";
        let items = decompose_line(line, &[ann(0, Level::Warning, 100, 200)], None, None);
        assert!(items.iter().all(|i| i.message_ids.is_empty()));
        assert_eq!(reassemble(&items), line);
    }

    #[test]
    fn zero_length_span_promoted_to_primary() {
        let line = "abcdef";
        let primary = Span::location_relative(1, 4);
        let anns = vec![LineAnnotation {
            id: 0,
            level: Level::Error,
            span: Span::location_relative(1, 1),
            insert_text: None,
        }];
        let items = decompose_line(line, &anns, None, Some(primary));
        let marked_len: usize =
            items.iter().filter(|i| !i.message_ids.is_empty()).map(|i| i.text.chars().count()).sum();
        assert_eq!(marked_len, 3);
    }

    use proptest::prelude::*;

    /// spec.md §8 "Line decomposition": with no insertions, concatenating
    /// every produced item's text reproduces the line verbatim, for any
    /// number of overlapping, possibly out-of-range severity spans.
    proptest! {
        #[test]
        fn reassembly_is_identity_without_inserts(
            line in "[a-zA-Z0-9 ,;()]{0,40}",
            spans in proptest::collection::vec((0i64..60, 0i64..60, any::<bool>()), 0..8),
        ) {
            let anns: Vec<LineAnnotation> = spans
                .iter()
                .enumerate()
                .map(|(id, &(a, b, is_err))| {
                    let (start, end) = if a <= b { (a, b) } else { (b, a) };
                    let level = if is_err { Level::Error } else { Level::Warning };
                    ann(id, level, start, end)
                })
                .collect();
            let items = decompose_line(&line, &anns, None, None);
            prop_assert_eq!(reassemble(&items), line);
        }
    }
}
