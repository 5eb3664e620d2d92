//! Text preprocessing — tab expansion, control filtering, width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Expand tabs to spaces according to tab stop positions.
///
/// Each tab character is replaced with enough spaces to reach the next
/// tab stop position. Tab stops are at every `tab_width` columns.
///
/// If `tab_width` is 0, tabs are simply removed.
pub fn expand_tabs(text: &str, tab_width: u8) -> String {
    if tab_width == 0 {
        return text.replace('\t', "");
    }

    let tw = usize::from(tab_width);
    let mut result = String::with_capacity(text.len());
    let mut column: usize = 0;

    for ch in text.chars() {
        if ch == '\t' {
            let spaces_needed = tw - (column % tw);
            for _ in 0..spaces_needed {
                result.push(' ');
            }
            column += spaces_needed;
        } else if ch == '\n' {
            result.push(ch);
            column = 0;
        } else {
            result.push(ch);
            column += 1;
        }
    }

    result
}

/// Remove control characters, preserving tab and newline.
///
/// Strips C0 control characters (except tab and newline), DEL, and C1
/// control characters.
pub fn filter_control_chars(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        if ch == '\t' || ch == '\n' {
            result.push(ch);
            continue;
        }
        if ch.is_ascii_control() {
            continue;
        }
        let code = ch as u32;
        if (0x80..=0x9F).contains(&code) {
            continue;
        }
        result.push(ch);
    }

    result
}

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text) as u16
}

/// Truncate a string to at most `max` display columns, never splitting a
/// wide grapheme: a width-2 cluster that would straddle the limit is dropped.
pub fn truncate_to_width(text: &str, max: u16) -> &str {
    let mut used: u16 = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(grapheme) as u16;
        if used + w > max {
            return &text[..offset];
        }
        used += w;
        end = offset + grapheme.len();
    }
    &text[..end]
}

/// Truncate a string to at most `max` display columns, appending an ellipsis
/// when truncation occurs. Strings up to `max` columns are returned intact.
pub fn ellipsize(text: &str, max: u16) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = truncate_to_width(text, max - 1).to_string();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tabs_single_tab_at_position_zero() {
        let result = expand_tabs("\t", 8);
        assert_eq!(result, "        ");
    }

    #[test]
    fn expand_tabs_after_three_chars() {
        // "abc" (3 chars) then tab → 5 spaces to reach column 8
        let result = expand_tabs("abc\t", 8);
        assert_eq!(result, "abc     ");
    }

    #[test]
    fn expand_tabs_resets_at_newline() {
        let result = expand_tabs("ab\n\tc", 4);
        assert_eq!(result, "ab\n    c");
    }

    #[test]
    fn expand_tabs_zero_width_strips() {
        assert_eq!(expand_tabs("a\tb", 0), "ab");
    }

    #[test]
    fn filter_strips_c0_keeps_tab_newline() {
        assert_eq!(filter_control_chars("a\x07b\tc\nd"), "ab\tc\nd");
    }

    #[test]
    fn filter_strips_c1() {
        assert_eq!(filter_control_chars("a\u{9b}b"), "ab");
    }

    #[test]
    fn width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn width_cjk() {
        assert_eq!(display_width("\u{4f60}\u{597d}"), 4); // 你好
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn truncate_does_not_split_wide() {
        // 你 (2) + 好 (2): limit 3 keeps only the first.
        assert_eq!(truncate_to_width("\u{4f60}\u{597d}", 3), "\u{4f60}");
    }

    #[test]
    fn truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn ellipsize_short_string_intact() {
        assert_eq!(ellipsize("hi", 5), "hi");
    }

    #[test]
    fn ellipsize_truncates_with_marker() {
        assert_eq!(ellipsize("hello world", 6), "hello…");
    }

    #[test]
    fn ellipsize_zero_is_empty() {
        assert_eq!(ellipsize("hello", 0), "");
    }
}
