//! Bordered — a 1-cell frame around a child, with an optional title.

use solas_core::geometry::{Rect, Size};
use solas_core::style::Style;
use solas_core::text::{display_width, ellipsize};

use crate::context::RenderContext;
use crate::view::View;

/// Border character set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// Rounded corners: ╭╮╰╯─│
    #[default]
    Rounded,
    /// Single line border: ┌┐└┘─│
    Single,
    /// Double line border: ╔╗╚╝═║
    Double,
    /// Heavy/thick border: ┏┓┗┛━┃
    Heavy,
}

impl BorderStyle {
    /// The characters (tl, tr, bl, br, horizontal, vertical).
    pub fn chars(self) -> (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str) {
        match self {
            BorderStyle::Rounded => ("╭", "╮", "╰", "╯", "─", "│"),
            BorderStyle::Single => ("┌", "┐", "└", "┘", "─", "│"),
            BorderStyle::Double => ("╔", "╗", "╚", "╝", "═", "║"),
            BorderStyle::Heavy => ("┏", "┓", "┗", "┛", "━", "┃"),
        }
    }
}

/// Draws a 1-cell border around its child. The content is additionally
/// inset by `padding` columns on each side inside the border (default 1),
/// so a bordered `X` renders as `│ X ... │`. An optional title is inlaid
/// into the top edge, ellipsized when wider than the inner width minus 2.
pub struct Bordered {
    child: Box<dyn View>,
    border: BorderStyle,
    border_style: Style,
    title: Option<String>,
    title_style: Style,
    padding: u16,
}

impl Bordered {
    /// Border a child with the default rounded style and a one-column
    /// content gap.
    pub fn new(child: impl View + 'static) -> Self {
        Self {
            child: child.boxed(),
            border: BorderStyle::Rounded,
            border_style: Style::default(),
            title: None,
            title_style: Style::default(),
            padding: 1,
        }
    }

    /// Set the border character set.
    #[must_use]
    pub fn style(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set the border color/style.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the title displayed in the top edge.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Set the horizontal content gap inside the border (columns per side).
    #[must_use]
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Columns consumed left and right of the content: border plus padding.
    fn h_inset(&self) -> u16 {
        2u16.saturating_add(self.padding.saturating_mul(2))
    }
}

impl View for Bordered {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let inner_w = if max_w > 0 {
            max_w.saturating_sub(self.h_inset())
        } else {
            0
        };
        let inner_h = if max_h > 0 { max_h.saturating_sub(2) } else { 0 };
        let s = self.child.measure(inner_w, inner_h);
        let mut size = Size::new(
            s.width.saturating_add(self.h_inset()),
            s.height.saturating_add(2),
        );
        if max_w > 0 {
            size.width = size.width.min(max_w);
        }
        if max_h > 0 {
            size.height = size.height.min(max_h);
        }
        size
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        let h = ctx.height();
        if w < 2 || h < 2 {
            return;
        }

        let (tl, tr, bl, br, hline, vline) = self.border.chars();
        let right = w - 1;
        let bottom = h - 1;
        let frame = ctx.frame();

        frame.set(0, 0, tl, &self.border_style);
        frame.set(right, 0, tr, &self.border_style);
        frame.set(0, bottom, bl, &self.border_style);
        frame.set(right, bottom, br, &self.border_style);
        for x in 1..right {
            frame.set(x, 0, hline, &self.border_style);
            frame.set(x, bottom, hline, &self.border_style);
        }
        for y in 1..bottom {
            frame.set(0, y, vline, &self.border_style);
            frame.set(right, y, vline, &self.border_style);
        }

        // Title inlaid as `─ Title ` starting at column 1 of the top edge.
        if let Some(ref title) = self.title
            && w >= 6
        {
            let shown = ellipsize(title, w - 4);
            let tw = display_width(&shown);
            frame.print(1, 0, hline, &self.border_style);
            frame.print(2, 0, " ", &self.border_style);
            frame.print(3, 0, &shown, &self.title_style);
            if 3 + tw < right {
                frame.print(3 + tw, 0, " ", &self.border_style);
            }
        }

        let content = Rect::new(
            self.padding.saturating_add(1),
            1,
            w.saturating_sub(self.h_inset()),
            h - 2,
        );
        if content.is_empty() {
            return;
        }
        let mut sub = ctx.sub_context(content);
        self.child.render(&mut sub);
    }
}
