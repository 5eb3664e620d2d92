//! Text view — one or more styled lines.

use solas_core::geometry::Size;
use solas_core::style::Style;
use solas_core::text::{display_width, truncate_to_width};

use crate::context::RenderContext;
use crate::view::View;

use super::{HAlign, clamp_max, h_offset};

/// A leaf view rendering styled text. Newlines split the content into lines;
/// lines that do not fit are truncated at cell boundaries (wide characters
/// are never split).
#[derive(Clone, Debug, Default)]
pub struct Text {
    lines: Vec<String>,
    style: Style,
    align: HAlign,
}

impl Text {
    /// Create a text view from content; `\n` separates lines.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
            style: Style::default(),
            align: HAlign::Left,
        }
    }

    /// Set the style applied to every cell.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the horizontal alignment within the rendered bounds.
    #[must_use]
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }
}

impl View for Text {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let width = self
            .lines
            .iter()
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0);
        let height = self.lines.len() as u16;
        Size::new(clamp_max(width, max_w), clamp_max(height, max_h))
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        let h = ctx.height();
        for (y, line) in self.lines.iter().enumerate() {
            if y as u16 >= h {
                break;
            }
            let visible = truncate_to_width(line, w);
            let x = h_offset(w, display_width(visible), self.align);
            ctx.frame().print(x, y as u16, visible, &self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solas_core::buffer::CellBuffer;
    use solas_core::cell::Cell;
    use solas_core::color::{Color, NamedColor};
    use solas_core::frame::Frame;

    use crate::interact::Hotspots;

    fn render_into(view: &dyn View, w: u16, h: u16) -> CellBuffer {
        let mut buffer = CellBuffer::new(Size::new(w, h));
        let mut hotspots = Hotspots::new();
        let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
        view.render(&mut ctx);
        buffer
    }

    fn row_text(buf: &CellBuffer, y: u16) -> String {
        let mut out = String::new();
        if let Some(row) = buf.row(y) {
            for cell in row {
                out.push_str(&cell.grapheme);
            }
        }
        out
    }

    #[test]
    fn measure_single_line() {
        assert_eq!(Text::new("hello").measure(0, 0), Size::new(5, 1));
    }

    #[test]
    fn measure_multi_line() {
        assert_eq!(Text::new("a\nlonger\nmid").measure(0, 0), Size::new(6, 3));
    }

    #[test]
    fn measure_bounded() {
        assert_eq!(Text::new("hello").measure(3, 0), Size::new(3, 1));
        assert_eq!(Text::new("a\nb\nc").measure(0, 2), Size::new(1, 2));
    }

    #[test]
    fn measure_cjk_width() {
        assert_eq!(Text::new("\u{4f60}\u{597d}").measure(0, 0), Size::new(4, 1));
    }

    #[test]
    fn render_left_aligned() {
        let buf = render_into(&Text::new("hi"), 6, 1);
        assert_eq!(row_text(&buf, 0), "hi    ");
    }

    #[test]
    fn render_center_aligned() {
        let buf = render_into(&Text::new("hi").align(HAlign::Center), 6, 1);
        assert_eq!(row_text(&buf, 0), "  hi  ");
    }

    #[test]
    fn render_right_aligned() {
        let buf = render_into(&Text::new("hi").align(HAlign::Right), 6, 1);
        assert_eq!(row_text(&buf, 0), "    hi");
    }

    #[test]
    fn render_truncates_long_line() {
        let buf = render_into(&Text::new("overflowing"), 4, 1);
        assert_eq!(row_text(&buf, 0), "over");
    }

    #[test]
    fn render_clips_extra_lines() {
        let buf = render_into(&Text::new("a\nb\nc"), 3, 2);
        assert_eq!(row_text(&buf, 0), "a  ");
        assert_eq!(row_text(&buf, 1), "b  ");
    }

    #[test]
    fn render_applies_style() {
        let style = Style::new().fg(Color::Named(NamedColor::Red));
        let buf = render_into(&Text::new("x").style(style.clone()), 3, 1);
        assert_eq!(buf.get(0, 0).map(|c| &c.style), Some(&style));
    }

    #[test]
    fn render_wide_respects_atomicity() {
        // Width 3 can hold 你 but only half of 好.
        let buf = render_into(&Text::new("\u{4f60}\u{597d}"), 3, 1);
        assert!(buf.get(0, 0).is_some_and(Cell::is_wide));
        assert!(buf.get(2, 0).is_some_and(Cell::is_blank));
    }
}
