//! Render context — the per-render handle passed down the view tree.
//!
//! Carries the drawing frame, the monotonic frame counter, the focus
//! manager, and the interactive registries. `sub_context` clips a child
//! region while preserving everything else, so containers delegate to
//! children with purely local coordinates.

use solas_core::frame::Frame;
use solas_core::geometry::{Rect, Size};

use crate::focus::FocusManager;
use crate::interact::{ClickThunk, Hotspots, InputRegion};

/// Per-render handle carrying the frame and runtime registries.
pub struct RenderContext<'a> {
    frame: Frame<'a>,
    frame_count: u64,
    focus: Option<&'a FocusManager>,
    hotspots: &'a mut Hotspots,
}

impl<'a> RenderContext<'a> {
    /// Create a root context for one render pass.
    pub fn new(
        frame: Frame<'a>,
        frame_count: u64,
        focus: Option<&'a FocusManager>,
        hotspots: &'a mut Hotspots,
    ) -> Self {
        Self {
            frame,
            frame_count,
            focus,
            hotspots,
        }
    }

    /// The drawing frame for this context's bounds.
    pub fn frame(&mut self) -> &mut Frame<'a> {
        &mut self.frame
    }

    /// The context width in columns.
    pub fn width(&self) -> u16 {
        self.frame.width()
    }

    /// The context height in rows.
    pub fn height(&self) -> u16 {
        self.frame.height()
    }

    /// The context size.
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// The monotonic frame counter (drives animations).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The context's clip rectangle in absolute screen coordinates.
    pub fn absolute_bounds(&self) -> Rect {
        self.frame.absolute_bounds()
    }

    /// Whether the given focus id currently has focus.
    pub fn is_focused(&self, id: &str) -> bool {
        self.focus.is_some_and(|f| f.is_focused(id))
    }

    /// The currently focused id, if any.
    pub fn focused(&self) -> Option<&str> {
        self.focus.and_then(FocusManager::focused)
    }

    /// Register a click region. `local` is in this context's coordinates;
    /// the stored region is absolute and clipped to the context bounds.
    pub fn register_click(&mut self, local: Rect, on_click: ClickThunk) {
        let bounds = self.clip_to_absolute(local);
        self.hotspots.register_click(bounds, on_click);
    }

    /// Register an input region. The region's bounds are interpreted in this
    /// context's coordinates and stored absolute.
    pub fn register_input(&mut self, mut region: InputRegion) {
        region.bounds = self.clip_to_absolute(region.bounds);
        self.hotspots.register_input(region);
    }

    /// Create a clipped child context over a local rectangle. The frame
    /// counter, focus manager, and registries are shared with the parent.
    pub fn sub_context(&mut self, rect: Rect) -> RenderContext<'_> {
        RenderContext {
            frame: self.frame.sub_frame(rect),
            frame_count: self.frame_count,
            focus: self.focus,
            hotspots: &mut *self.hotspots,
        }
    }

    fn clip_to_absolute(&self, local: Rect) -> Rect {
        let bounds = self.frame.absolute_bounds();
        local.translate(bounds.position()).intersection(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solas_core::buffer::CellBuffer;
    use solas_core::geometry::Position;
    use solas_core::style::Style;
    use std::sync::Arc;

    use crate::event::Event;

    #[test]
    fn sub_context_clips_and_translates() {
        let mut buffer = CellBuffer::new(Size::new(20, 10));
        let mut hotspots = Hotspots::new();
        let mut ctx = RenderContext::new(Frame::new(&mut buffer), 1, None, &mut hotspots);

        let mut sub = ctx.sub_context(Rect::new(5, 2, 10, 4));
        assert_eq!(sub.absolute_bounds(), Rect::new(5, 2, 10, 4));
        assert_eq!(sub.frame_count(), 1);

        // Nested sub-context: bounds intersect the parent.
        let nested = sub.sub_context(Rect::new(8, 0, 10, 10));
        assert_eq!(nested.absolute_bounds(), Rect::new(13, 2, 2, 4));
    }

    #[test]
    fn sub_context_law() {
        // sub.absolute_bounds() == r translated by the parent's origin,
        // clipped to the parent's bounds.
        let mut buffer = CellBuffer::new(Size::new(30, 20));
        let mut hotspots = Hotspots::new();
        let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
        let mut parent = ctx.sub_context(Rect::new(4, 3, 12, 8));

        let r = Rect::new(6, 2, 20, 20);
        let expected = r
            .translate(Position::new(4, 3))
            .intersection(Rect::new(4, 3, 12, 8));
        let sub = parent.sub_context(r);
        assert_eq!(sub.absolute_bounds(), expected);
    }

    #[test]
    fn register_click_translates_to_absolute() {
        let mut buffer = CellBuffer::new(Size::new(20, 10));
        let mut hotspots = Hotspots::new();
        {
            let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
            let mut sub = ctx.sub_context(Rect::new(5, 5, 10, 3));
            sub.register_click(Rect::new(0, 0, 4, 1), Arc::new(|| Some(Event::app("hi"))));
        }
        assert!(hotspots.click_at(Position::new(6, 5)).is_some());
        assert!(hotspots.click_at(Position::new(1, 1)).is_none());
    }

    #[test]
    fn register_input_translates_to_absolute() {
        let mut buffer = CellBuffer::new(Size::new(20, 10));
        let mut hotspots = Hotspots::new();
        {
            let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
            let mut sub = ctx.sub_context(Rect::new(2, 3, 10, 1));
            let mut region = InputRegion::new("name", "");
            region.bounds = Rect::new(0, 0, 10, 1);
            sub.register_input(region);
        }
        assert_eq!(
            hotspots.input("name").map(|r| r.bounds),
            Some(Rect::new(2, 3, 10, 1))
        );
    }

    #[test]
    fn focus_queries() {
        let mut buffer = CellBuffer::new(Size::new(5, 5));
        let mut hotspots = Hotspots::new();
        let mut focus = FocusManager::new();
        focus.register("field");
        let ctx = RenderContext::new(Frame::new(&mut buffer), 0, Some(&focus), &mut hotspots);
        assert!(ctx.is_focused("field"));
        assert_eq!(ctx.focused(), Some("field"));
    }

    #[test]
    fn drawing_through_context() {
        let mut buffer = CellBuffer::new(Size::new(10, 2));
        let mut hotspots = Hotspots::new();
        {
            let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
            let mut sub = ctx.sub_context(Rect::new(2, 1, 5, 1));
            sub.frame().print(0, 0, "ok", &Style::default());
        }
        assert_eq!(buffer.get(2, 1).map(|c| c.grapheme.as_str()), Some("o"));
        assert_eq!(buffer.get(3, 1).map(|c| c.grapheme.as_str()), Some("k"));
    }
}
