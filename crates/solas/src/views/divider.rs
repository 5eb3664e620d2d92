//! Divider — a single horizontal rule, optionally titled.

use solas_core::geometry::Size;
use solas_core::style::Style;
use solas_core::text::{display_width, ellipsize};

use crate::context::RenderContext;
use crate::view::View;

/// A one-row horizontal rule spanning the container's width, with an
/// optional title inset near the left edge.
#[derive(Clone, Debug, Default)]
pub struct Divider {
    title: Option<String>,
    style: Style,
    title_style: Style,
}

impl Divider {
    /// Create an untitled divider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inset title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the rule style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the title style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }
}

impl View for Divider {
    fn measure(&self, max_w: u16, _max_h: u16) -> Size {
        let width = if max_w > 0 {
            max_w
        } else {
            // Unconstrained: wide enough for the title and its framing.
            self.title
                .as_deref()
                .map_or(1, |t| display_width(t).saturating_add(4))
        };
        Size::new(width, 1)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        if w == 0 || ctx.height() == 0 {
            return;
        }
        let frame = ctx.frame();
        for x in 0..w {
            frame.set(x, 0, "─", &self.style);
        }
        if let Some(ref title) = self.title
            && w >= 6
        {
            let shown = ellipsize(title, w - 4);
            let tw = display_width(&shown);
            frame.print(2, 0, " ", &self.style);
            frame.print(3, 0, &shown, &self.title_style);
            frame.print(3 + tw, 0, " ", &self.style);
        }
    }
}
