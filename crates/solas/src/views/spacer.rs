//! Spacer and the Flexible wrapper.

use solas_core::geometry::Size;

use crate::context::RenderContext;
use crate::view::View;

use super::clamp_max;

/// A flexible blank region. Declares a flex factor of 1 by default so stacks
/// and groups stretch it over surplus space; inside a non-flexing container
/// it collapses to its minimum size. Renders nothing.
#[derive(Clone, Copy, Debug)]
pub struct Spacer {
    factor: u16,
    min_w: u16,
    min_h: u16,
}

impl Spacer {
    /// Create a spacer with flex factor 1 and no minimum size.
    pub fn new() -> Self {
        Self {
            factor: 1,
            min_w: 0,
            min_h: 0,
        }
    }

    /// Set the flex factor (0 disables flexing).
    #[must_use]
    pub fn flex(mut self, factor: u16) -> Self {
        self.factor = factor;
        self
    }

    /// Set the minimum width.
    #[must_use]
    pub fn min_width(mut self, min_w: u16) -> Self {
        self.min_w = min_w;
        self
    }

    /// Set the minimum height.
    #[must_use]
    pub fn min_height(mut self, min_h: u16) -> Self {
        self.min_h = min_h;
        self
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Spacer {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        Size::new(clamp_max(self.min_w, max_w), clamp_max(self.min_h, max_h))
    }

    fn render(&self, _ctx: &mut RenderContext<'_>) {}

    fn flex(&self) -> u16 {
        self.factor
    }

    fn flex_min(&self) -> Size {
        Size::new(self.min_w, self.min_h)
    }
}

/// Lends a flex factor (and optional minimum) to any child view.
pub struct Flexible {
    child: Box<dyn View>,
    factor: u16,
    min: Size,
}

impl Flexible {
    /// Wrap a child with the given flex factor.
    pub fn new(factor: u16, child: impl View + 'static) -> Self {
        Self {
            child: child.boxed(),
            factor,
            min: Size::new(0, 0),
        }
    }

    /// Set the minimum size honored during flex distribution.
    #[must_use]
    pub fn min(mut self, min: Size) -> Self {
        self.min = min;
        self
    }
}

impl View for Flexible {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        self.child.measure(max_w, max_h)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        self.child.render(ctx);
    }

    fn flex(&self) -> u16 {
        self.factor
    }

    fn flex_min(&self) -> Size {
        self.min
    }
}
