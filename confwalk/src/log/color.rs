//! Colour mode flags for log output.

use std::ops::BitOr;

/// Set of colour mode flags.
///
/// Parsed from a list such as `levels|fields`. `off`, `on`, and `auto`
/// replace the flags gathered so far, while `levels` and `fields` add to
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorMode(u8);

impl ColorMode {
    /// No flag set; behaves like [`ColorMode::AUTO`].
    pub const UNSET: Self = Self(0);
    /// Never colour output.
    pub const OFF: Self = Self(1);
    /// Always colour output.
    pub const ON: Self = Self(2);
    /// Colour output written to a terminal.
    pub const AUTO: Self = Self(4);
    /// Colour level names.
    pub const LEVELS: Self = Self(8);
    /// Colour field names.
    pub const FIELDS: Self = Self(16);

    /// Parse a colour mode list separated by any of `|,:;`.
    ///
    /// An unknown entry resets the mode to [`ColorMode::AUTO`].
    ///
    /// # Examples
    ///
    /// ```
    /// use confwalk::log::ColorMode;
    /// assert_eq!(ColorMode::parse("on|levels"), ColorMode::ON | ColorMode::LEVELS);
    /// assert_eq!(ColorMode::parse("levels,off"), ColorMode::OFF);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.split(['|', ',', ':', ';'])
            .fold(Self::UNSET, |mode, entry| {
                match entry.trim().to_ascii_lowercase().as_str() {
                    "off" => Self::OFF,
                    "on" => Self::ON,
                    "auto" => Self::AUTO,
                    "levels" => mode | Self::LEVELS,
                    "fields" => mode | Self::FIELDS,
                    _ => Self::AUTO,
                }
            })
    }

    /// Whether every flag of `flag` is set.
    #[must_use]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Whether output should carry ANSI colours, given whether it goes to a
    /// terminal.
    #[must_use]
    pub const fn ansi(self, terminal: bool) -> bool {
        if self.contains(Self::OFF) {
            false
        } else if self.contains(Self::ON) {
            true
        } else if self.contains(Self::AUTO) || self.0 == 0 {
            terminal
        } else {
            true
        }
    }
}

impl BitOr for ColorMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
