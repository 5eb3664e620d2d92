//! ANSI escape sequence helpers.
//!
//! Small pure functions and constants producing the escape bytes the engine
//! emits: cursor control, erase operations, synchronized output, scroll
//! regions, OSC 8 hyperlinks, and SGR styling.

use std::fmt::Write;

use crate::color::{Color, NamedColor};
use crate::style::{Attributes, Style};

/// Show the cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Hide the cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Save the cursor position.
pub const SAVE_CURSOR: &str = "\x1b[s";
/// Restore the saved cursor position.
pub const RESTORE_CURSOR: &str = "\x1b[u";
/// Erase the whole current line.
pub const CLEAR_LINE: &str = "\x1b[2K";
/// Erase from the cursor to the end of the line.
pub const CLEAR_TO_LINE_END: &str = "\x1b[K";
/// Erase from the cursor to the start of the line.
pub const CLEAR_TO_LINE_START: &str = "\x1b[1K";
/// Erase the whole screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Erase from the cursor to the end of the screen.
pub const CLEAR_TO_SCREEN_END: &str = "\x1b[0J";
/// Begin synchronized output (CSI ?2026h).
pub const SYNC_BEGIN: &str = "\x1b[?2026h";
/// End synchronized output (CSI ?2026l).
pub const SYNC_END: &str = "\x1b[?2026l";
/// Reset all SGR attributes.
pub const SGR_RESET: &str = "\x1b[0m";
/// Reset the scroll region to the full screen.
pub const RESET_SCROLL_REGION: &str = "\x1b[r";
/// Close an OSC 8 hyperlink.
pub const HYPERLINK_CLOSE: &str = "\x1b]8;;\x1b\\";

/// Move the cursor to (x, y) in 0-based cell coordinates (CSI H is 1-based).
pub fn cursor_to(x: u16, y: u16) -> String {
    format!("\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor up by `n` rows. Empty for `n == 0`.
pub fn cursor_up(n: u16) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}A")
    }
}

/// Move the cursor down by `n` rows. Empty for `n == 0`.
pub fn cursor_down(n: u16) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}B")
    }
}

/// Move the cursor right by `n` columns. Empty for `n == 0`.
pub fn cursor_right(n: u16) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}C")
    }
}

/// Move the cursor left by `n` columns. Empty for `n == 0`.
pub fn cursor_left(n: u16) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}D")
    }
}

/// Move the cursor to a 0-based column on the current row.
pub fn cursor_column(x: u16) -> String {
    format!("\x1b[{}G", u32::from(x) + 1)
}

/// Set the scroll region to the 0-based inclusive row range `top..=bottom`.
pub fn set_scroll_region(top: u16, bottom: u16) -> String {
    format!("\x1b[{};{}r", u32::from(top) + 1, u32::from(bottom) + 1)
}

/// Scroll the region up by `n` lines.
pub fn scroll_up(n: u16) -> String {
    format!("\x1b[{n}S")
}

/// Scroll the region down by `n` lines.
pub fn scroll_down(n: u16) -> String {
    format!("\x1b[{n}T")
}

/// Open an OSC 8 hyperlink to `url`.
pub fn hyperlink_open(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\")
}

/// Build a single combined SGR sequence for all active attributes of a style.
///
/// Instead of emitting separate `\x1b[1m\x1b[3m\x1b[31m` sequences for
/// bold, italic, and red foreground, this produces a single `\x1b[1;3;31m`.
/// Returns an empty string if the style has no active attributes. The
/// hyperlink field is not part of SGR and is ignored here.
pub fn sgr(style: &Style) -> String {
    let mut codes: Vec<String> = Vec::new();

    if style.attrs.contains(Attributes::BOLD) {
        codes.push("1".to_string());
    }
    if style.attrs.contains(Attributes::DIM) {
        codes.push("2".to_string());
    }
    if style.attrs.contains(Attributes::ITALIC) {
        codes.push("3".to_string());
    }
    if style.attrs.contains(Attributes::UNDERLINE) {
        codes.push("4".to_string());
    }
    if style.attrs.contains(Attributes::BLINK) {
        codes.push("5".to_string());
    }
    if style.attrs.contains(Attributes::REVERSE) {
        codes.push("7".to_string());
    }
    if style.attrs.contains(Attributes::STRIKETHROUGH) {
        codes.push("9".to_string());
    }

    if let Some(ref fg) = style.fg {
        codes.extend(fg_color_codes(fg));
    }
    if let Some(ref bg) = style.bg {
        codes.extend(bg_color_codes(bg));
    }

    if codes.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(4 + codes.len() * 4);
    out.push_str("\x1b[");
    let _ = write!(out, "{}", codes.join(";"));
    out.push('m');
    out
}

/// Return the SGR parameter codes for a foreground color (without the ESC[ prefix or m suffix).
fn fg_color_codes(color: &Color) -> Vec<String> {
    match color {
        Color::Rgb { r, g, b } => vec![
            "38".to_string(),
            "2".to_string(),
            r.to_string(),
            g.to_string(),
            b.to_string(),
        ],
        Color::Indexed(i) => vec!["38".to_string(), "5".to_string(), i.to_string()],
        Color::Named(n) => vec![named_fg_code(n).to_string()],
        Color::Reset => vec!["39".to_string()],
    }
}

/// Return the SGR parameter codes for a background color (without the ESC[ prefix or m suffix).
fn bg_color_codes(color: &Color) -> Vec<String> {
    match color {
        Color::Rgb { r, g, b } => vec![
            "48".to_string(),
            "2".to_string(),
            r.to_string(),
            g.to_string(),
            b.to_string(),
        ],
        Color::Indexed(i) => vec!["48".to_string(), "5".to_string(), i.to_string()],
        Color::Named(n) => vec![named_bg_code(n).to_string()],
        Color::Reset => vec!["49".to_string()],
    }
}

/// Get the SGR code for a named foreground color.
fn named_fg_code(color: &NamedColor) -> u8 {
    match color {
        NamedColor::Black => 30,
        NamedColor::Red => 31,
        NamedColor::Green => 32,
        NamedColor::Yellow => 33,
        NamedColor::Blue => 34,
        NamedColor::Magenta => 35,
        NamedColor::Cyan => 36,
        NamedColor::White => 37,
        NamedColor::BrightBlack => 90,
        NamedColor::BrightRed => 91,
        NamedColor::BrightGreen => 92,
        NamedColor::BrightYellow => 93,
        NamedColor::BrightBlue => 94,
        NamedColor::BrightMagenta => 95,
        NamedColor::BrightCyan => 96,
        NamedColor::BrightWhite => 97,
    }
}

/// Get the SGR code for a named background color.
fn named_bg_code(color: &NamedColor) -> u8 {
    match color {
        NamedColor::Black => 40,
        NamedColor::Red => 41,
        NamedColor::Green => 42,
        NamedColor::Yellow => 43,
        NamedColor::Blue => 44,
        NamedColor::Magenta => 45,
        NamedColor::Cyan => 46,
        NamedColor::White => 47,
        NamedColor::BrightBlack => 100,
        NamedColor::BrightRed => 101,
        NamedColor::BrightGreen => 102,
        NamedColor::BrightYellow => 103,
        NamedColor::BrightBlue => 104,
        NamedColor::BrightMagenta => 105,
        NamedColor::BrightCyan => 106,
        NamedColor::BrightWhite => 107,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_to_is_one_based() {
        assert_eq!(cursor_to(0, 0), "\x1b[1;1H");
        assert_eq!(cursor_to(5, 3), "\x1b[4;6H");
    }

    #[test]
    fn cursor_moves() {
        assert_eq!(cursor_up(2), "\x1b[2A");
        assert_eq!(cursor_down(1), "\x1b[1B");
        assert_eq!(cursor_right(3), "\x1b[3C");
        assert_eq!(cursor_left(4), "\x1b[4D");
        assert_eq!(cursor_up(0), "");
    }

    #[test]
    fn cursor_column_is_one_based() {
        assert_eq!(cursor_column(0), "\x1b[1G");
    }

    #[test]
    fn scroll_region() {
        assert_eq!(set_scroll_region(0, 9), "\x1b[1;10r");
        assert_eq!(scroll_up(2), "\x1b[2S");
        assert_eq!(scroll_down(1), "\x1b[1T");
    }

    #[test]
    fn hyperlink_framing() {
        assert_eq!(
            hyperlink_open("https://example.com"),
            "\x1b]8;;https://example.com\x1b\\"
        );
        assert_eq!(HYPERLINK_CLOSE, "\x1b]8;;\x1b\\");
    }

    #[test]
    fn sgr_combined_bold_italic_red() {
        let style = Style::new()
            .bold(true)
            .italic(true)
            .fg(Color::Named(NamedColor::Red));
        assert_eq!(sgr(&style), "\x1b[1;3;31m");
    }

    #[test]
    fn sgr_default_style_is_empty() {
        assert!(sgr(&Style::default()).is_empty());
    }

    #[test]
    fn sgr_truecolor_rgb() {
        let style = Style::new().fg(Color::Rgb {
            r: 100,
            g: 200,
            b: 50,
        });
        assert_eq!(sgr(&style), "\x1b[38;2;100;200;50m");
    }

    #[test]
    fn sgr_indexed() {
        let style = Style::new().fg(Color::Indexed(42));
        assert_eq!(sgr(&style), "\x1b[38;5;42m");
    }

    #[test]
    fn sgr_fg_and_bg_single_sequence() {
        let style = Style::new()
            .fg(Color::Named(NamedColor::Red))
            .bg(Color::Named(NamedColor::Blue));
        let seq = sgr(&style);
        assert_eq!(seq.matches("\x1b[").count(), 1);
        assert!(seq.contains("31"));
        assert!(seq.contains("44"));
    }

    #[test]
    fn sgr_blink() {
        assert_eq!(sgr(&Style::new().blink(true)), "\x1b[5m");
    }

    #[test]
    fn sgr_link_is_not_sgr() {
        assert!(sgr(&Style::new().link("https://example.com")).is_empty());
    }
}
