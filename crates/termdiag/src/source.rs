//! Source model: either a raw source slice or a list of pre-tokenized lines.
//!
//! Grounded on spec.md §3's `DiagnosticLocation` and on
//! `examples/original_source/include/diagnostics/basic.hpp`'s raw/tokens
//! split.

use crate::span::Span;
use crate::style::Style;

/// A single styled token within a [`SourceLocationTokens`] line.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub text: String,
    pub column_number: usize,
    pub marker_span: Option<Span>,
    pub style: Style,
}

/// One pre-tokenized source line.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenLine {
    pub tokens: Vec<Token>,
    pub line_number: usize,
    pub line_start_offset: u32,
}

/// Pre-styled token payload used for insertions that replace or add styled
/// tokens, and for the tokenized variant of a [`DiagnosticLocation`].
#[derive(Clone, Debug, PartialEq)]
pub struct SourceLocationTokens {
    pub lines: Vec<TokenLine>,
    pub marker: Span,
}

impl SourceLocationTokens {
    /// Wraps a single run of inserted text as a one-token, one-line payload
    /// with a dummy marker; used by [`crate::message::Annotation::insert`]
    /// for plain (unstyled) suggested insertions.
    pub fn single(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lines: vec![TokenLine {
                tokens: vec![Token { text, column_number: 1, marker_span: None, style: Style::PLAIN }],
                line_number: 0,
                line_start_offset: 0,
            }],
            marker: Span::dummy(),
        }
    }
}

/// A resolved diagnostic location: where in which file, and either the raw
/// source slice or a list of pre-styled tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticLocation {
    /// A raw, unstyled source slice.
    Basic {
        filename: String,
        /// The full slice of source text containing the marked region.
        source: String,
        /// 1-based line number.
        line_number: usize,
        /// 1-based column number.
        column_number: usize,
        /// Absolute byte offset of the slice's first character.
        source_location: u32,
        /// Length of the marker within the slice.
        length: u32,
    },
    /// Pre-tokenized, pre-styled lines (e.g. from a syntax-highlighting
    /// front end).
    Tokens { filename: String, tokens: SourceLocationTokens },
}

impl DiagnosticLocation {
    pub fn filename(&self) -> &str {
        match self {
            Self::Basic { filename, .. } => filename,
            Self::Tokens { filename, .. } => filename,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Self::Basic { line_number, .. } => *line_number,
            Self::Tokens { tokens, .. } => tokens.lines.first().map_or(0, |l| l.line_number),
        }
    }

    pub fn column_number(&self) -> usize {
        match self {
            Self::Basic { column_number, .. } => *column_number,
            Self::Tokens { .. } => 1,
        }
    }

    /// Returns `true` if the filename is empty (suppresses the `--> file:line:col`
    /// header, spec.md §7).
    pub fn has_filename(&self) -> bool {
        !self.filename().is_empty()
    }

    /// `true` if the line number is below 1 (treated as missing, spec.md §7).
    pub fn has_valid_line(&self) -> bool {
        self.line_number() >= 1
    }

    /// An empty location used for diagnostics with no anchor (compares equal
    /// to any other empty location, per spec.md §3 ordering rule).
    pub fn empty() -> Self {
        Self::Basic {
            filename: String::new(),
            source: String::new(),
            line_number: 0,
            column_number: 0,
            source_location: 0,
            length: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filename().is_empty() && self.line_number() == 0
    }

    /// Lexicographic ordering key: `(filename, line, column)`. Empty
    /// locations compare equal to each other.
    pub fn sort_key(&self) -> (&str, usize, usize) {
        if self.is_empty() {
            ("", 0, 0)
        } else {
            (self.filename(), self.line_number(), self.column_number())
        }
    }
}

impl PartialOrd for DiagnosticLocation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

impl Eq for DiagnosticLocation {}

impl Ord for DiagnosticLocation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
