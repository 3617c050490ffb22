//! Color palettes for the text renderers.
//!
//! Renderers take a [`ColorPalette`] by value; only the command handlers look
//! at the environment, through [`ColorPalette::detect`].

use std::ffi::OsString;

/// ANSI escape codes used by the text renderers.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    /// Headings and node ids.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Coordinates and other secondary details.
    pub const GRAY: &str = "\x1b[90m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    /// Totals of a found route.
    pub green: &'static str,
    /// The unreachable notice.
    pub yellow: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            yellow: colors::YELLOW,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            yellow: "",
        }
    }

    /// Palette for the current process, honouring `NO_COLOR` and `TERM=dumb`.
    #[must_use]
    pub fn detect() -> Self {
        Self::for_env(std::env::var_os("NO_COLOR"), std::env::var_os("TERM"))
    }

    /// Palette for the given `NO_COLOR` and `TERM` values.
    ///
    /// Any `NO_COLOR` value disables color (<https://no-color.org/>), as does a
    /// `dumb` terminal.
    #[must_use]
    pub fn for_env(no_color: Option<OsString>, term: Option<OsString>) -> Self {
        let dumb = term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        if no_color.is_some() || dumb {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    /// Wrap `text` in `color` and a trailing reset.
    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, self.reset)
        }
    }
}

/// Render a node or edge count with `,` between groups of three digits.
///
/// ```
/// # use roadroute_cli::terminal::group_thousands;
/// assert_eq!(group_thousands(17), "17");
/// assert_eq!(group_thousands(48_213), "48,213");
/// ```
#[must_use]
pub fn group_thousands(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.char_indices() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(value: &str) -> Option<OsString> {
        Some(OsString::from(value))
    }

    #[test]
    fn counts_are_grouped_by_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(120_000), "120,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn plain_palette_paints_nothing() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert_eq!(p.paint(p.green, "1756.10 m"), "1756.10 m");
    }

    #[test]
    fn colored_palette_wraps_text() {
        let p = ColorPalette::colored();
        assert_eq!(p.paint(p.yellow, "x"), "\x1b[33mx\x1b[0m");
    }

    #[test]
    fn no_color_disables_color_whatever_its_value() {
        let plain = ColorPalette::plain();
        assert_eq!(ColorPalette::for_env(env("1"), None), plain);
        assert_eq!(ColorPalette::for_env(env(""), env("xterm")), plain);
    }

    #[test]
    fn dumb_terminal_disables_color() {
        assert_eq!(ColorPalette::for_env(None, env("dumb")), ColorPalette::plain());
        assert_eq!(ColorPalette::for_env(None, env("DUMB")), ColorPalette::plain());
    }

    #[test]
    fn ordinary_terminal_gets_color() {
        let colored = ColorPalette::colored();
        assert_eq!(ColorPalette::for_env(None, env("xterm-256color")), colored);
        assert_eq!(ColorPalette::for_env(None, None), colored);
    }
}
