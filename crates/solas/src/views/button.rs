//! Button — a styled label with a click region.

use std::sync::Arc;

use solas_core::geometry::{Rect, Size};
use solas_core::style::Style;
use solas_core::text::{display_width, truncate_to_width};

use crate::context::RenderContext;
use crate::event::Event;
use crate::interact::ClickThunk;
use crate::view::View;

use super::clamp_max;

/// A clickable label. Rendering registers the button's absolute bounds with
/// its click thunk; the runtime invokes the thunk when a mouse press lands
/// inside and enqueues the returned event.
pub struct Button {
    label: String,
    style: Style,
    on_click: ClickThunk,
}

impl Button {
    /// Create a button with a label and a click thunk.
    pub fn new(
        label: impl Into<String>,
        on_click: impl Fn() -> Option<Event> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            style: Style::default().reverse(true),
            on_click: Arc::new(on_click),
        }
    }

    /// Set the label style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl View for Button {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        Size::new(
            clamp_max(display_width(&self.label).saturating_add(2), max_w),
            clamp_max(1, max_h),
        )
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        if w == 0 || ctx.height() == 0 {
            return;
        }
        let label = truncate_to_width(&self.label, w.saturating_sub(2));
        let padded = format!(" {label} ");
        ctx.frame().print(0, 0, &padded, &self.style);
        ctx.register_click(Rect::new(0, 0, w, 1), Arc::clone(&self.on_click));
    }
}
