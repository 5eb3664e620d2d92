//! ZStack — layered composition over the same bounds.

use solas_core::geometry::{Rect, Size};

use crate::context::RenderContext;
use crate::view::View;

use super::{Alignment2D, h_offset, v_offset};

/// Draws children in listed order over the same bounds; later children paint
/// over earlier ones. Each child is measured against the stack's own bounds
/// and positioned within the layer by the alignment. No flex distribution.
#[derive(Default)]
pub struct ZStack {
    children: Vec<Box<dyn View>>,
    align: Alignment2D,
}

impl ZStack {
    /// Create a zstack over the given layers.
    pub fn new(children: Vec<Box<dyn View>>) -> Self {
        Self {
            children,
            align: Alignment2D::default(),
        }
    }

    /// Append a layer on top.
    #[must_use]
    pub fn layer(mut self, child: impl View + 'static) -> Self {
        self.children.push(child.boxed());
        self
    }

    /// Set the alignment of smaller layers within the bounds.
    #[must_use]
    pub fn align(mut self, align: Alignment2D) -> Self {
        self.align = align;
        self
    }
}

impl View for ZStack {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let mut size = Size::new(0, 0);
        for child in &self.children {
            let s = child.measure(max_w, max_h);
            size.width = size.width.max(s.width);
            size.height = size.height.max(s.height);
        }
        size
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        let h = ctx.height();
        if w == 0 || h == 0 {
            return;
        }
        for child in &self.children {
            let s = child.measure(w, h);
            let rect = Rect::new(
                h_offset(w, s.width, self.align.h),
                v_offset(h, s.height, self.align.v),
                s.width,
                s.height,
            );
            let mut sub = ctx.sub_context(rect);
            child.render(&mut sub);
        }
    }
}
