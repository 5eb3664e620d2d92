//! Animated — frame-counter-driven styling.
//!
//! Animations are pure functions of the frame counter: the adaptor renders
//! its child, then re-maps the style of every rendered cell through the
//! animation function. No per-cell state is kept across frames.

use std::sync::Arc;

use solas_core::geometry::Size;
use solas_core::style::Style;

use crate::context::RenderContext;
use crate::view::View;

/// Pure animation function: `(frame_counter, cell_index, cell_total)` to a
/// style overlay merged over the cell's current style.
pub type Animation = Arc<dyn Fn(u64, usize, usize) -> Style + Send + Sync>;

/// Wraps a child and restyles its rendered cells per frame.
pub struct Animated {
    child: Box<dyn View>,
    animation: Animation,
}

impl Animated {
    /// Wrap a child with an animation function.
    pub fn new(
        child: impl View + 'static,
        animation: impl Fn(u64, usize, usize) -> Style + Send + Sync + 'static,
    ) -> Self {
        Self {
            child: child.boxed(),
            animation: Arc::new(animation),
        }
    }
}

impl View for Animated {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        self.child.measure(max_w, max_h)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let frame_count = ctx.frame_count();
        self.child.render(ctx);
        let animation = self.animation.as_ref();
        ctx.frame()
            .restyle(|idx, total, style| style.merge(&animation(frame_count, idx, total)));
    }

    fn flex(&self) -> u16 {
        self.child.flex()
    }

    fn flex_min(&self) -> Size {
        self.child.flex_min()
    }
}
