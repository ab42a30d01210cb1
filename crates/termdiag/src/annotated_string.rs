//! A styled, grapheme-indexed text buffer used for balloon bodies.
//!
//! Grounded on `examples/original_source/include/diagnostics/builders/
//! annotated_string.hpp` (push / `with_style` builder / word-boundary
//! metadata), reimplemented with `unicode-segmentation` grapheme clusters
//! rather than hand-rolled UTF-8 stepping.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::style::Style;

/// One rendered cell: a grapheme cluster, its style, and an optional
/// "under-marker" character drawn one row below (used to underline
/// insertions in balloon text).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub grapheme: String,
    pub style: Style,
    pub under_marker: Option<char>,
}

/// An ordered sequence of styled cells plus precomputed word-boundary
/// indices, used to lay out and word-wrap balloon bodies.
#[derive(Clone, Debug, Default)]
pub struct AnnotatedString {
    cells: Vec<Cell>,
    /// Cell indices that start a new word (for `word_wrap`).
    word_boundaries: Vec<usize>,
}

impl AnnotatedString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Appends plain text with the given style, recomputing word boundaries
    /// incrementally.
    pub fn push_str(&mut self, text: &str, style: Style) {
        for g in text.graphemes(true) {
            let starts_word = g.chars().next().is_some_and(|c| !c.is_whitespace())
                && self.cells.last().is_none_or(|c| c.grapheme.chars().next().is_some_and(char::is_whitespace));
            if starts_word {
                self.word_boundaries.push(self.cells.len());
            }
            self.cells.push(Cell { grapheme: g.to_string(), style, under_marker: None });
        }
    }

    /// Appends one cell decorated with an under-marker character.
    pub fn push_with_under_marker(&mut self, grapheme: &str, style: Style, marker: char) {
        self.cells.push(Cell { grapheme: grapheme.to_string(), style, under_marker: Some(marker) });
    }

    /// Returns a transient builder that appends with a fixed style.
    pub fn with_style(&mut self, style: Style) -> StyledAppender<'_> {
        StyledAppender { target: self, style }
    }

    /// The visible display width (sum of per-grapheme widths), used for
    /// wrapping decisions.
    pub fn display_width(&self) -> usize {
        self.cells.iter().map(|c| UnicodeWidthStr::width(c.grapheme.as_str())).sum()
    }

    /// Word indices: `word_boundaries[i]` is the cell index where word `i`
    /// starts.
    pub fn word_boundaries(&self) -> &[usize] {
        &self.word_boundaries
    }

    /// Plain-text rendering (no ANSI), used for orphan dedup-by-identity
    /// comparisons and tests.
    pub fn to_plain_string(&self) -> String {
        self.cells.iter().map(|c| c.grapheme.as_str()).collect()
    }

    /// Greedy word-wrap into lines no wider than `width` display columns.
    /// A single word wider than `width` is placed alone on its own line
    /// (never broken), unless `allow_wordbreak` is set.
    pub fn word_wrap(&self, width: usize, allow_wordbreak: bool) -> Vec<Vec<Cell>> {
        if width == 0 || self.cells.is_empty() {
            return vec![self.cells.clone()];
        }
        let mut lines = Vec::new();
        let mut current = Vec::new();
        let mut current_width = 0usize;
        let boundaries = self.word_boundaries.iter().copied().collect::<std::collections::HashSet<_>>();

        let mut i = 0;
        while i < self.cells.len() {
            // find the end of the current word (run until next boundary or whitespace)
            let mut j = i + 1;
            while j < self.cells.len() && !boundaries.contains(&j) {
                j += 1;
            }
            let word = &self.cells[i..j];
            let word_width: usize = word.iter().map(|c| UnicodeWidthStr::width(c.grapheme.as_str())).sum();

            if current_width > 0 && current_width + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width > width && allow_wordbreak {
                for cell in word {
                    let w = UnicodeWidthStr::width(cell.grapheme.as_str());
                    if current_width + w > width && current_width > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(cell.clone());
                    current_width += w;
                }
            } else {
                current.extend(word.iter().cloned());
                current_width += word_width;
            }
            i = j;
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Transient builder returned by [`AnnotatedString::with_style`].
pub struct StyledAppender<'a> {
    target: &'a mut AnnotatedString,
    style: Style,
}

impl StyledAppender<'_> {
    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.target.push_str(text, self.style);
        self
    }
}
