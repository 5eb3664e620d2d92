//! Color types for terminal rendering.

use crate::error::{CoreError, Result};

/// A terminal color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// Reset to terminal default.
    Reset,
    /// Named ANSI color (16-color palette).
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// True color RGB.
    Rgb {
        /// Red component.
        r: u8,
        /// Green component.
        g: u8,
        /// Blue component.
        b: u8,
    },
}

/// The 16 standard ANSI colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NamedColor {
    /// Black (0).
    Black,
    /// Red (1).
    Red,
    /// Green (2).
    Green,
    /// Yellow (3).
    Yellow,
    /// Blue (4).
    Blue,
    /// Magenta (5).
    Magenta,
    /// Cyan (6).
    Cyan,
    /// White (7).
    White,
    /// Bright black / dark gray (8).
    BrightBlack,
    /// Bright red (9).
    BrightRed,
    /// Bright green (10).
    BrightGreen,
    /// Bright yellow (11).
    BrightYellow,
    /// Bright blue (12).
    BrightBlue,
    /// Bright magenta (13).
    BrightMagenta,
    /// Bright cyan (14).
    BrightCyan,
    /// Bright white (15).
    BrightWhite,
}

impl Color {
    /// Parse a hex color string like `"#rrggbb"` or `"#rgb"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                Ok(Self::Rgb { r, g, b })
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                let g = u8::from_str_radix(&hex[1..2], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                let b = u8::from_str_radix(&hex[2..3], 16)
                    .map_err(|e| CoreError::Render(format!("invalid hex color: {e}")))?;
                Ok(Self::Rgb {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => Err(CoreError::Render(format!(
                "invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            ))),
        }
    }
}

/// Convert RGB to the nearest 256-color palette index.
///
/// The 256-color palette is:
/// - 0-7: standard colors
/// - 8-15: bright colors
/// - 16-231: 6x6x6 color cube
/// - 232-255: grayscale ramp
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    // Check if it's close to a grayscale value
    if r == g && g == b {
        if r < 8 {
            return 16; // black
        }
        if r > 248 {
            return 231; // white
        }
        return (((u16::from(r) - 8) * 24 / 240) as u8) + 232;
    }

    // Map to 6x6x6 color cube (indices 16-231)
    let ri = color_cube_index(r);
    let gi = color_cube_index(g);
    let bi = color_cube_index(b);
    16 + 36 * ri + 6 * gi + bi
}

/// Map an 8-bit color channel to a 6-level color cube index.
fn color_cube_index(val: u8) -> u8 {
    if val < 48 {
        0
    } else if val < 115 {
        1
    } else {
        ((u16::from(val) - 35) / 40) as u8
    }
}

/// Convert RGB to the nearest named 16-color ANSI color.
pub fn rgb_to_named(r: u8, g: u8, b: u8) -> NamedColor {
    // Simple approach: find nearest ANSI color by Euclidean distance
    let candidates: [(NamedColor, (u8, u8, u8)); 16] = [
        (NamedColor::Black, (0, 0, 0)),
        (NamedColor::Red, (128, 0, 0)),
        (NamedColor::Green, (0, 128, 0)),
        (NamedColor::Yellow, (128, 128, 0)),
        (NamedColor::Blue, (0, 0, 128)),
        (NamedColor::Magenta, (128, 0, 128)),
        (NamedColor::Cyan, (0, 128, 128)),
        (NamedColor::White, (192, 192, 192)),
        (NamedColor::BrightBlack, (128, 128, 128)),
        (NamedColor::BrightRed, (255, 0, 0)),
        (NamedColor::BrightGreen, (0, 255, 0)),
        (NamedColor::BrightYellow, (255, 255, 0)),
        (NamedColor::BrightBlue, (0, 0, 255)),
        (NamedColor::BrightMagenta, (255, 0, 255)),
        (NamedColor::BrightCyan, (0, 255, 255)),
        (NamedColor::BrightWhite, (255, 255, 255)),
    ];

    let mut best = NamedColor::White;
    let mut best_dist = u32::MAX;
    for (name, (cr, cg, cb)) in &candidates {
        let dr = i32::from(r) - i32::from(*cr);
        let dg = i32::from(g) - i32::from(*cg);
        let db = i32::from(b) - i32::from(*cb);
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best = *name;
        }
    }
    best
}

/// Convert a 256-color index to the nearest named 16-color.
pub fn index_to_named(idx: u8) -> NamedColor {
    match idx {
        0 => NamedColor::Black,
        1 => NamedColor::Red,
        2 => NamedColor::Green,
        3 => NamedColor::Yellow,
        4 => NamedColor::Blue,
        5 => NamedColor::Magenta,
        6 => NamedColor::Cyan,
        7 => NamedColor::White,
        8 => NamedColor::BrightBlack,
        9 => NamedColor::BrightRed,
        10 => NamedColor::BrightGreen,
        11 => NamedColor::BrightYellow,
        12 => NamedColor::BrightBlue,
        13 => NamedColor::BrightMagenta,
        14 => NamedColor::BrightCyan,
        15 => NamedColor::BrightWhite,
        16..=231 => {
            // Color cube: convert index back to approximate RGB
            let idx = idx - 16;
            let b_idx = idx % 6;
            let g_idx = (idx / 6) % 6;
            let r_idx = idx / 36;
            let r = if r_idx == 0 { 0 } else { 55 + 40 * r_idx };
            let g = if g_idx == 0 { 0 } else { 55 + 40 * g_idx };
            let b = if b_idx == 0 { 0 } else { 55 + 40 * b_idx };
            rgb_to_named(r, g, b)
        }
        _ => {
            // Grayscale ramp: 232-255 → 8, 18, 28, ..., 238
            let gray = 8 + 10 * (idx - 232);
            rgb_to_named(gray, gray, gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_6_digit() {
        let c = Color::from_hex("#1e1e2e").ok();
        assert_eq!(
            c,
            Some(Color::Rgb {
                r: 30,
                g: 30,
                b: 46
            })
        );
    }

    #[test]
    fn hex_3_digit() {
        let c = Color::from_hex("#f0a").ok();
        assert_eq!(
            c,
            Some(Color::Rgb {
                r: 255,
                g: 0,
                b: 170
            })
        );
    }

    #[test]
    fn hex_no_hash() {
        let c = Color::from_hex("ff0000").ok();
        assert_eq!(c, Some(Color::Rgb { r: 255, g: 0, b: 0 }));
    }

    #[test]
    fn hex_invalid() {
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#1234").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn rgb_to_256_pure_red() {
        let idx = rgb_to_256(255, 0, 0);
        // Pure red in color cube: r=5, g=0, b=0 → 16 + 36*5 + 6*0 + 0 = 196
        assert_eq!(idx, 196);
    }

    #[test]
    fn rgb_to_256_grayscale() {
        let idx = rgb_to_256(128, 128, 128);
        // Grayscale: (128-8)*24/240 = 12 → 232 + 12 = 244
        assert_eq!(idx, 244);
    }

    #[test]
    fn rgb_to_256_black() {
        let idx = rgb_to_256(0, 0, 0);
        assert_eq!(idx, 16); // near-black in grayscale
    }

    #[test]
    fn rgb_to_named_pure_red() {
        assert_eq!(rgb_to_named(255, 0, 0), NamedColor::BrightRed);
    }

    #[test]
    fn rgb_to_named_pure_black() {
        assert_eq!(rgb_to_named(0, 0, 0), NamedColor::Black);
    }

    #[test]
    fn rgb_to_named_pure_white() {
        assert_eq!(rgb_to_named(255, 255, 255), NamedColor::BrightWhite);
    }

    #[test]
    fn index_to_named_low_indices() {
        assert_eq!(index_to_named(1), NamedColor::Red);
        assert_eq!(index_to_named(15), NamedColor::BrightWhite);
    }
}
