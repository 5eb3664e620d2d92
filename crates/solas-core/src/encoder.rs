//! Frame encoder — cell changes to minimal terminal bytes.
//!
//! Maintains a cursor-position and style cache across a batch of changes so
//! adjacent writes emit no redundant control sequences. Colors are downgraded
//! to the terminal's reported support level.

use crate::ansi;
use crate::buffer::CellChange;
use crate::cell::Cell;
use crate::color::{Color, index_to_named, rgb_to_256, rgb_to_named};
use crate::style::Style;
use crate::terminal::ColorSupport;

/// Encodes cell changes into ANSI escape sequences.
#[derive(Clone, Copy, Debug)]
pub struct Encoder {
    color_support: ColorSupport,
}

impl Encoder {
    /// Create a new encoder for the given color support level.
    pub fn new(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    /// Encode a set of cell changes into a string of escape sequences.
    ///
    /// Continuation cells are skipped (their primary advances the cursor by
    /// two columns). Cursor moves are emitted only when the cursor is not
    /// already in position; styles only on transitions, with a single reset
    /// at the end.
    pub fn encode(&self, changes: &[CellChange]) -> String {
        if changes.is_empty() {
            return String::new();
        }

        let mut output = String::with_capacity(changes.len() * 16);
        let mut cursor: Option<(u16, u16)> = None;
        let mut pen = Pen::new(self.color_support);

        for change in changes {
            if change.cell.is_continuation() {
                continue;
            }

            let in_place = cursor == Some((change.x, change.y));
            if !in_place {
                output.push_str(&ansi::cursor_to(change.x, change.y));
            }

            pen.transition(&mut output, &change.cell.style);
            output.push_str(&change.cell.grapheme);

            cursor = Some((change.x + u16::from(change.cell.width), change.y));
        }

        pen.finish(&mut output);
        output
    }

    /// Encode one row of cells as a standalone line, with per-line style
    /// transitions and a trailing reset.
    ///
    /// Trailing blank cells are trimmed; the caller is expected to have
    /// cleared the line first. Continuation cells are skipped.
    pub fn encode_line(&self, cells: &[Cell]) -> String {
        let end = cells
            .iter()
            .rposition(|c| !c.is_blank() && !c.is_continuation())
            .map_or(0, |i| i + 1);

        let mut output = String::new();
        let mut pen = Pen::new(self.color_support);
        for cell in &cells[..end] {
            if cell.is_continuation() {
                continue;
            }
            pen.transition(&mut output, &cell.style);
            output.push_str(&cell.grapheme);
        }
        pen.finish(&mut output);
        output
    }
}

/// Tracks the active SGR style and open hyperlink while encoding.
struct Pen {
    color_support: ColorSupport,
    style: Style,
    active: bool,
    link: Option<String>,
}

impl Pen {
    fn new(color_support: ColorSupport) -> Self {
        Self {
            color_support,
            style: Style::default(),
            active: false,
            link: None,
        }
    }

    /// Emit the control bytes moving the pen from its current style to `next`.
    fn transition(&mut self, output: &mut String, next: &Style) {
        if self.link != next.link {
            if self.link.is_some() {
                output.push_str(ansi::HYPERLINK_CLOSE);
            }
            if let Some(ref url) = next.link {
                output.push_str(&ansi::hyperlink_open(url));
            }
            self.link = next.link.clone();
        }

        if self.active && self.style == *next {
            return;
        }
        if self.active && !self.style.is_empty() {
            output.push_str(ansi::SGR_RESET);
        }
        output.push_str(&ansi::sgr(&downgrade_style(next, self.color_support)));
        self.style = next.clone();
        self.active = true;
    }

    /// Close the open hyperlink and reset the style if one is active.
    fn finish(&mut self, output: &mut String) {
        if self.link.take().is_some() {
            output.push_str(ansi::HYPERLINK_CLOSE);
        }
        if self.active && !self.style.is_empty() {
            output.push_str(ansi::SGR_RESET);
        }
        self.active = false;
        self.style = Style::default();
    }
}

/// Downgrade a style's colors to the given support level.
fn downgrade_style(style: &Style, support: ColorSupport) -> Style {
    let mut out = style.clone();
    out.fg = style.fg.map(|c| downgrade_color(c, support));
    out.bg = style.bg.map(|c| downgrade_color(c, support));
    out
}

/// Downgrade a color to the given support level.
fn downgrade_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::TrueColor => color,
        ColorSupport::Extended256 => match color {
            Color::Rgb { r, g, b } => Color::Indexed(rgb_to_256(r, g, b)),
            other => other,
        },
        ColorSupport::Basic16 => match color {
            Color::Rgb { r, g, b } => Color::Named(rgb_to_named(r, g, b)),
            Color::Indexed(i) => Color::Named(index_to_named(i)),
            other => other,
        },
        ColorSupport::NoColor => Color::Reset,
    }
}
