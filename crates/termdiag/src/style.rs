//! Cell styling and the z-index collision policy.
//!
//! Modified from `solar-interface`'s `Style`/`Level::ansi_color` (see
//! `diagnostics/mod.rs`), generalized with an explicit z-index and an
//! optional path-router group id.

use anstyle::{AnsiColor, Color};

use crate::level::Level;

/// Z-index at or above which a cell is considered immutable: no later write,
/// regardless of its own z-index, may replace it.
pub const IMMUTABLE_Z: u16 = 100;

/// Priority order used to resolve collisions between overlapping
/// annotations on the same source line (spec §4.1).
pub fn level_priority(level: Level) -> u16 {
    match level {
        Level::Note | Level::OnceNote => 1,
        Level::Remark => 2,
        Level::Warning => 3,
        Level::Error | Level::Fatal | Level::Bug | Level::FailureNote => 4,
        Level::Delete => 5,
        Level::Insert => 6,
        Level::Help | Level::OnceHelp | Level::Allow => 1,
    }
}

/// A cell or run style: color, attributes, z-index, and an optional router
/// group id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub strike: bool,
    pub italic: bool,
    pub z: u16,
    pub group: Option<u32>,
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl Style {
    /// The default, unstyled cell: z-index [`IMMUTABLE_Z`] so that source
    /// text is never silently replaced by an unrelated write.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        bold: false,
        dim: false,
        strike: false,
        italic: false,
        z: IMMUTABLE_Z,
        group: None,
    };

    pub const fn new(z: u16) -> Self {
        Self { z, ..Self::PLAIN }
    }

    #[must_use]
    pub const fn with_fg(mut self, c: Color) -> Self {
        self.fg = Some(c);
        self
    }

    #[must_use]
    pub const fn with_bg(mut self, c: Color) -> Self {
        self.bg = Some(c);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn strike(mut self) -> Self {
        self.strike = true;
        self
    }

    #[must_use]
    pub const fn with_group(mut self, g: u32) -> Self {
        self.group = Some(g);
        self
    }

    #[must_use]
    pub const fn with_z(mut self, z: u16) -> Self {
        self.z = z;
        self
    }

    /// Returns `true` if this style's z-index makes the cell immutable.
    pub const fn is_immutable(self) -> bool {
        self.z >= IMMUTABLE_Z
    }

    /// The collision rule: does `new` win over the existing cell style
    /// `existing`? Higher z wins; on equal z the later write wins *unless*
    /// the existing cell is immutable.
    pub fn wins_over(self, existing: Self) -> bool {
        if existing.is_immutable() && self.z <= existing.z {
            return false;
        }
        self.z >= existing.z
    }

    /// Converts to an [`anstyle::Style`] for terminal rendering.
    pub fn to_anstyle(self) -> anstyle::Style {
        let mut s = anstyle::Style::new();
        if let Some(fg) = self.fg {
            s = s.fg_color(Some(fg));
        }
        if let Some(bg) = self.bg {
            s = s.bg_color(Some(bg));
        }
        if self.bold {
            s = s.bold();
        }
        if self.dim {
            s = s.dimmed();
        }
        if self.strike {
            s = s.strikethrough();
        }
        if self.italic {
            s = s.italic();
        }
        s
    }

    /// Style for the given diagnostic level (used for markers/balloons).
    pub fn for_level(level: Level) -> Self {
        Self::new(level_priority(level))
            .with_fg(level_color(level))
            .bold()
    }

    /// The gutter's fixed blue.
    pub fn gutter() -> Self {
        Self::new(IMMUTABLE_Z).with_fg(Color::Ansi(AnsiColor::BrightBlue))
    }
}

/// The ANSI color associated with a diagnostic level (spec §9 z-index
/// policy doubles as the color policy here, matching the teacher's
/// `Level::ansi_color`).
pub fn level_color(level: Level) -> Color {
    use AnsiColor::*;
    Color::Ansi(match level {
        Level::Bug | Level::Fatal | Level::Error => BrightRed,
        Level::Warning => BrightYellow,
        Level::Note | Level::OnceNote => BrightGreen,
        Level::Help | Level::OnceHelp => BrightCyan,
        Level::Remark => BrightCyan,
        Level::Insert => Green,
        Level::Delete => Red,
        Level::FailureNote | Level::Allow => White,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_z_wins() {
        let low = Style::new(1);
        let high = Style::new(5);
        assert!(high.wins_over(low));
        assert!(!low.wins_over(high));
    }

    #[test]
    fn equal_z_later_wins_unless_immutable() {
        let a = Style::new(3);
        let b = Style::new(3);
        assert!(b.wins_over(a));

        let immutable = Style::new(IMMUTABLE_Z);
        let later = Style::new(IMMUTABLE_Z);
        assert!(!later.wins_over(immutable));
    }

    #[test]
    fn priority_order_matches_spec() {
        assert!(level_priority(Level::Note) < level_priority(Level::Warning));
        assert!(level_priority(Level::Warning) < level_priority(Level::Error));
        assert!(level_priority(Level::Error) < level_priority(Level::Delete));
        assert!(level_priority(Level::Delete) < level_priority(Level::Insert));
    }
}
