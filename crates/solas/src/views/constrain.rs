//! Size-constraint wrapper.

use solas_core::geometry::Size;

use crate::context::RenderContext;
use crate::view::View;

use super::clamp_max;

/// Overrides or bounds a child's measured size without altering the child's
/// own measurement logic. Maximum constraints are applied after minimums.
pub struct Constrained {
    child: Box<dyn View>,
    width: Option<u16>,
    height: Option<u16>,
    min_width: Option<u16>,
    max_width: Option<u16>,
    min_height: Option<u16>,
    max_height: Option<u16>,
}

impl Constrained {
    /// Wrap a child with no constraints.
    pub fn new(child: impl View + 'static) -> Self {
        Self {
            child: child.boxed(),
            width: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
        }
    }

    /// Fix the width.
    #[must_use]
    pub fn width(mut self, w: u16) -> Self {
        self.width = Some(w);
        self
    }

    /// Fix the height.
    #[must_use]
    pub fn height(mut self, h: u16) -> Self {
        self.height = Some(h);
        self
    }

    /// Set a minimum width.
    #[must_use]
    pub fn min_width(mut self, w: u16) -> Self {
        self.min_width = Some(w);
        self
    }

    /// Set a maximum width.
    #[must_use]
    pub fn max_width(mut self, w: u16) -> Self {
        self.max_width = Some(w);
        self
    }

    /// Set a minimum height.
    #[must_use]
    pub fn min_height(mut self, h: u16) -> Self {
        self.min_height = Some(h);
        self
    }

    /// Set a maximum height.
    #[must_use]
    pub fn max_height(mut self, h: u16) -> Self {
        self.max_height = Some(h);
        self
    }
}

impl View for Constrained {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let child_max_w = self
            .width
            .or(self.max_width)
            .map_or(max_w, |w| clamp_max(w, max_w));
        let child_max_h = self
            .height
            .or(self.max_height)
            .map_or(max_h, |h| clamp_max(h, max_h));
        let s = self.child.measure(child_max_w, child_max_h);

        let mut width = self.width.unwrap_or(s.width);
        if let Some(min) = self.min_width {
            width = width.max(min);
        }
        if let Some(max) = self.max_width {
            width = width.min(max);
        }

        let mut height = self.height.unwrap_or(s.height);
        if let Some(min) = self.min_height {
            height = height.max(min);
        }
        if let Some(max) = self.max_height {
            height = height.min(max);
        }

        Size::new(clamp_max(width, max_w), clamp_max(height, max_h))
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        self.child.render(ctx);
    }

    fn flex(&self) -> u16 {
        self.child.flex()
    }

    fn flex_min(&self) -> Size {
        self.child.flex_min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{height, max_width, min_width, size, text, width};

    #[test]
    fn fixed_width_overrides_child() {
        assert_eq!(width(10, text("ab")).measure(0, 0), Size::new(10, 1));
        assert_eq!(width(1, text("abc")).measure(0, 0), Size::new(1, 1));
    }

    #[test]
    fn fixed_height_overrides_child() {
        assert_eq!(height(4, text("ab")).measure(0, 0), Size::new(2, 4));
    }

    #[test]
    fn fixed_size() {
        assert_eq!(size(7, 3, text("ab")).measure(0, 0), Size::new(7, 3));
    }

    #[test]
    fn min_raises_small_child() {
        assert_eq!(min_width(5, text("ab")).measure(0, 0), Size::new(5, 1));
        assert_eq!(min_width(1, text("abc")).measure(0, 0), Size::new(3, 1));
    }

    #[test]
    fn max_caps_large_child() {
        assert_eq!(max_width(2, text("abcdef")).measure(0, 0), Size::new(2, 1));
    }

    #[test]
    fn max_applies_after_min() {
        let v = Constrained::new(text("ab")).min_width(8).max_width(5);
        assert_eq!(v.measure(0, 0), Size::new(5, 1));
    }

    #[test]
    fn result_stays_bounded_by_maxima() {
        assert_eq!(width(20, text("ab")).measure(10, 0), Size::new(10, 1));
        assert_eq!(min_width(20, text("ab")).measure(10, 0), Size::new(10, 1));
    }

    #[test]
    fn flex_passes_through() {
        use crate::views::Spacer;
        let v = Constrained::new(Spacer::new().min_height(2));
        assert_eq!(v.flex(), 1);
        assert_eq!(v.flex_min(), Size::new(0, 2));
    }
}
