//! Box-drawing glyph sets (spec.md §6), so callers can pick an ASCII-only
//! fallback for terminals without Unicode box-drawing support.

/// The nine glyphs needed to draw a box: four corners, the two edges, and
/// three T-connectors (left/right/top), as named in spec.md §6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxChars {
    pub vertical: char,
    pub horizontal: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub t_left: char,
    pub t_right: char,
    pub t_top: char,
}

impl BoxChars {
    pub const ASCII: Self = Self {
        vertical: '|',
        horizontal: '-',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        t_left: '+',
        t_right: '+',
        t_top: '+',
    };

    pub const ROUNDED: Self = Self {
        vertical: '│',
        horizontal: '─',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        t_left: '├',
        t_right: '┤',
        t_top: '┬',
    };

    pub const DOUBLED: Self = Self {
        vertical: '║',
        horizontal: '═',
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        t_left: '╠',
        t_right: '╣',
        t_top: '╦',
    };

    pub const DOTTED: Self = Self {
        vertical: '┆',
        horizontal: '┄',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        t_left: '├',
        t_right: '┤',
        t_top: '┬',
    };

    pub const DOTTED_BOLD: Self = Self {
        vertical: '┇',
        horizontal: '┅',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        t_left: '┝',
        t_right: '┥',
        t_top: '┭',
    };

    pub const ROUNDED_BOLD: Self = Self {
        vertical: '┃',
        horizontal: '━',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        t_left: '┝',
        t_right: '┥',
        t_top: '┯',
    };
}

/// Named glyph sets, selectable from [`crate::term::RenderConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphSet {
    Ascii,
    #[default]
    Rounded,
    Doubled,
    Dotted,
    DottedBold,
    RoundedBold,
}

impl GlyphSet {
    pub fn chars(self) -> BoxChars {
        match self {
            Self::Ascii => BoxChars::ASCII,
            Self::Rounded => BoxChars::ROUNDED,
            Self::Doubled => BoxChars::DOUBLED,
            Self::Dotted => BoxChars::DOTTED,
            Self::DottedBold => BoxChars::DOTTED_BOLD,
            Self::RoundedBold => BoxChars::ROUNDED_BOLD,
        }
    }
}
