//! Display and formatting utilities
//!
//! Bar charts, terminal colours and headers.

/// Glyph for the filled part of a bar
pub const FILLED: char = '\u{2588}';
/// Glyph for the empty remainder of a bar
pub const EMPTY: char = '\u{2591}';

/// ANSI color codes (only used when terminal supports it)
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Get colors for terminal output
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self {
                red: "\x1b[0;31m",
                green: "\x1b[0;32m",
                yellow: "\x1b[0;33m",
                cyan: "\x1b[0;36m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                green: "",
                yellow: "",
                cyan: "",
                bold: "",
                dim: "",
                reset: "",
            }
        }
    }

    /// Check if stdout is a TTY (terminal)
    pub fn is_tty() -> bool {
        atty_check()
    }

    /// Get colors based on TTY detection
    pub fn auto() -> Self {
        Self::new(Self::is_tty())
    }
}

/// Check if stdout is a TTY
fn atty_check() -> bool {
    #[cfg(unix)]
    unsafe {
        libc::isatty(libc::STDOUT_FILENO) != 0
    }

    #[cfg(not(unix))]
    true
}

/// Render a percentage (0-100) as a bar of exactly `width` glyphs.
///
/// Out-of-range percentages are clamped; NaN renders as empty.
pub fn render_bar(percentage: f64, width: usize) -> String {
    let percentage = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    let filled = ((percentage / 100.0 * width as f64).round() as usize).min(width);
    let empty = width - filled;

    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(empty));
    bar
}

/// Wrap a bar in colour for terminal output
pub fn colored_bar(bar: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.green, bar, colors.reset)
}

/// Format a section header
pub fn section_header(title: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.cyan, title, colors.reset)
}

/// Format a bold title
pub fn title(text: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.bold, text, colors.reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(bar: &str) -> usize {
        bar.chars().filter(|c| *c == FILLED).count()
    }

    #[test]
    fn test_bar_width_is_exact() {
        for width in [1usize, 5, 10, 21, 40] {
            for pct in [0.0, 0.4, 12.5, 33.33, 50.0, 66.67, 99.9, 100.0] {
                assert_eq!(render_bar(pct, width).chars().count(), width);
            }
        }
    }

    #[test]
    fn test_bar_extremes() {
        assert!(render_bar(0.0, 21).chars().all(|c| c == EMPTY));
        assert!(render_bar(100.0, 21).chars().all(|c| c == FILLED));
    }

    #[test]
    fn test_bar_half_rounds_up() {
        let bar = render_bar(50.0, 21);
        assert_eq!(filled(&bar), 11);
        assert!(bar.ends_with(&EMPTY.to_string().repeat(10)));
    }

    #[test]
    fn test_bar_clamps() {
        assert_eq!(render_bar(150.0, 10), render_bar(100.0, 10));
        assert_eq!(render_bar(-20.0, 10), render_bar(0.0, 10));
        assert_eq!(render_bar(f64::NAN, 10), render_bar(0.0, 10));
    }

    #[test]
    fn test_bar_is_deterministic() {
        assert_eq!(render_bar(42.86, 21), render_bar(42.86, 21));
        assert_eq!(filled(&render_bar(42.86, 21)), 9);
    }

    #[test]
    fn test_plain_colors_are_empty() {
        let colors = Colors::new(false);
        assert_eq!(colored_bar("xx", &colors), "xx");
        assert_eq!(title("T", &colors), "T");
    }
}
