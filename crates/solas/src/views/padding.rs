//! Padding wrapper.

use solas_core::geometry::{Rect, Size};

use crate::context::RenderContext;
use crate::view::View;

use super::clamp_max;

/// Insets a child by the given number of cells on each side.
pub struct Padding {
    child: Box<dyn View>,
    left: u16,
    top: u16,
    right: u16,
    bottom: u16,
}

impl Padding {
    /// Create a padding wrapper with per-side insets.
    pub fn new(left: u16, top: u16, right: u16, bottom: u16, child: impl View + 'static) -> Self {
        Self {
            child: child.boxed(),
            left,
            top,
            right,
            bottom,
        }
    }

    /// Uniform padding on all sides.
    pub fn uniform(pad: u16, child: impl View + 'static) -> Self {
        Self::new(pad, pad, pad, pad, child)
    }

    fn h_total(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    fn v_total(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl View for Padding {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let inner_w = if max_w > 0 {
            max_w.saturating_sub(self.h_total())
        } else {
            0
        };
        let inner_h = if max_h > 0 {
            max_h.saturating_sub(self.v_total())
        } else {
            0
        };
        let s = self.child.measure(inner_w, inner_h);
        Size::new(
            clamp_max(s.width.saturating_add(self.h_total()), max_w),
            clamp_max(s.height.saturating_add(self.v_total()), max_h),
        )
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let inner = Rect::new(
            self.left,
            self.top,
            ctx.width().saturating_sub(self.h_total()),
            ctx.height().saturating_sub(self.v_total()),
        );
        if inner.is_empty() {
            return;
        }
        let mut sub = ctx.sub_context(inner);
        self.child.render(&mut sub);
    }
}
