//! Stack — the vertical layout container.

use solas_core::geometry::{Rect, Size};

use crate::context::RenderContext;
use crate::view::View;

use super::{HAlign, clamp_max, h_offset};

/// Lays children out top-to-bottom with an optional gap between them.
///
/// Children reporting a non-zero [`View::flex`] factor share the height left
/// over after fixed children are measured: each receives the floor of its
/// proportional share (clamped up to its flex minimum), and the last flex
/// child absorbs the rounding remainder so the surplus is spent exactly.
#[derive(Default)]
pub struct Stack {
    children: Vec<Box<dyn View>>,
    gap: u16,
    align: HAlign,
    width: Option<u16>,
    min_width: Option<u16>,
    max_width: Option<u16>,
}

impl Stack {
    /// Create a stack over the given children.
    pub fn new(children: Vec<Box<dyn View>>) -> Self {
        Self {
            children,
            gap: 0,
            align: HAlign::Left,
            width: None,
            min_width: None,
            max_width: None,
        }
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl View + 'static) -> Self {
        self.children.push(child.boxed());
        self
    }

    /// Set the gap between adjacent children.
    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Set the horizontal alignment of children.
    #[must_use]
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Fix the stack's width.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Constrain the stack's minimum width.
    #[must_use]
    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Constrain the stack's maximum width.
    #[must_use]
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    fn gaps_total(&self) -> u16 {
        match self.children.len() {
            0 | 1 => 0,
            n => self.gap.saturating_mul(n as u16 - 1),
        }
    }
}

impl View for Stack {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        if self.children.is_empty() {
            return Size::new(0, 0);
        }

        let inner_max_w = match self.width {
            Some(w) => clamp_max(w, max_w),
            None => match self.max_width {
                Some(m) => clamp_max(m, max_w),
                None => max_w,
            },
        };

        let mut width: u16 = 0;
        let mut height: u16 = 0;
        for child in &self.children {
            let s = child.measure(inner_max_w, 0);
            width = width.max(s.width);
            height = height.saturating_add(s.height);
        }
        height = height.saturating_add(self.gaps_total());

        let mut width = self.width.unwrap_or(width);
        if let Some(min) = self.min_width {
            width = width.max(min);
        }
        if let Some(max) = self.max_width {
            width = width.min(max);
        }
        Size::new(clamp_max(width, max_w), clamp_max(height, max_h))
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        let h = ctx.height();
        if self.children.is_empty() || w == 0 || h == 0 {
            return;
        }

        let slots = self.layout(w, h);

        let mut y: u16 = 0;
        for (child, size) in self.children.iter().zip(&slots) {
            if y >= h {
                break;
            }
            let rect = match self.align {
                HAlign::Left => Rect::new(0, y, w, size.height),
                _ => {
                    let cw = size.width.min(w);
                    Rect::new(h_offset(w, cw, self.align), y, cw, size.height)
                }
            };
            let mut sub = ctx.sub_context(rect);
            child.render(&mut sub);
            y = y.saturating_add(size.height).saturating_add(self.gap);
        }
    }
}

impl Stack {
    /// Compute per-child sizes for the given bounds (fixed measurement plus
    /// flex distribution).
    fn layout(&self, w: u16, h: u16) -> Vec<Size> {
        let mut sizes: Vec<Size> = Vec::with_capacity(self.children.len());
        let mut fixed_h: u16 = 0;
        let mut flex_sum: u32 = 0;

        for child in &self.children {
            if child.flex() == 0 {
                let s = child.measure(w, 0);
                fixed_h = fixed_h.saturating_add(s.height);
                sizes.push(s);
            } else {
                flex_sum += u32::from(child.flex());
                sizes.push(Size::new(0, 0));
            }
        }

        if flex_sum == 0 {
            return sizes;
        }

        let remaining = h.saturating_sub(fixed_h.saturating_add(self.gaps_total()));
        let last_flex = self
            .children
            .iter()
            .rposition(|child| child.flex() > 0)
            .unwrap_or(0);

        let mut used: u16 = 0;
        for (i, child) in self.children.iter().enumerate() {
            let flex = child.flex();
            if flex == 0 {
                continue;
            }
            let min_h = child.flex_min().height;
            let alloc = if i == last_flex {
                remaining.saturating_sub(used).max(min_h)
            } else {
                let base = ((u32::from(remaining) * u32::from(flex)) / flex_sum) as u16;
                base.max(min_h)
            };
            used = used.saturating_add(alloc);
            // Re-measure at the allocated height so the child can size its
            // contents (and report a width for alignment).
            let width = child.measure(w, alloc).width;
            sizes[i] = Size::new(width, alloc);
        }

        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solas_core::buffer::CellBuffer;
    use solas_core::frame::Frame;

    use crate::interact::Hotspots;
    use crate::views::{Spacer, Text, spacer, stack, text};

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
        out.trim_end().to_string()
    }

    #[test]
    fn empty_stack_measures_zero() {
        assert_eq!(Stack::new(vec![]).measure(80, 24), Size::new(0, 0));
    }

    #[test]
    fn measure_sums_heights_and_maxes_widths() {
        let s = stack(vec![text("ab").boxed(), text("wider").boxed()]);
        assert_eq!(s.measure(0, 0), Size::new(5, 2));
    }

    #[test]
    fn measure_includes_gaps() {
        let s = stack(vec![
            text("a").boxed(),
            text("b").boxed(),
            text("c").boxed(),
        ])
        .gap(1);
        assert_eq!(s.measure(0, 0), Size::new(1, 5));
    }

    #[test]
    fn measure_honors_fixed_width() {
        let s = stack(vec![text("abc").boxed()]).width(10);
        assert_eq!(s.measure(0, 0), Size::new(10, 1));
    }

    #[test]
    fn measure_honors_min_max_width() {
        let s = stack(vec![text("abc").boxed()]).min_width(8);
        assert_eq!(s.measure(0, 0), Size::new(8, 1));
        let s = stack(vec![text("abcdef").boxed()]).max_width(4);
        assert_eq!(s.measure(0, 0), Size::new(4, 1));
    }

    #[test]
    fn render_places_children_top_to_bottom() {
        let s = stack(vec![text("one").boxed(), text("two").boxed()]);
        let buf = render_into(&s, 10, 5);
        assert_eq!(row_text(&buf, 0), "one");
        assert_eq!(row_text(&buf, 1), "two");
        assert_eq!(row_text(&buf, 2), "");
    }

    #[test]
    fn render_honors_gap() {
        let s = stack(vec![text("a").boxed(), text("b").boxed()]).gap(2);
        let buf = render_into(&s, 5, 5);
        assert_eq!(row_text(&buf, 0), "a");
        assert_eq!(row_text(&buf, 1), "");
        assert_eq!(row_text(&buf, 2), "");
        assert_eq!(row_text(&buf, 3), "b");
    }

    #[test]
    fn render_clips_overflowing_children() {
        let s = stack(vec![
            text("1").boxed(),
            text("2").boxed(),
            text("3").boxed(),
        ]);
        let buf = render_into(&s, 3, 2);
        assert_eq!(row_text(&buf, 0), "1");
        assert_eq!(row_text(&buf, 1), "2");
    }

    #[test]
    fn render_right_alignment() {
        let s = stack(vec![text("ab").boxed()]).align(HAlign::Right);
        let buf = render_into(&s, 6, 1);
        assert_eq!(row_text(&buf, 0), "    ab");
    }

    #[test]
    fn render_center_alignment() {
        let s = stack(vec![text("ab").boxed()]).align(HAlign::Center);
        let buf = render_into(&s, 6, 1);
        assert_eq!(row_text(&buf, 0), "  ab");
    }

    #[test]
    fn flex_distribution_even_split() {
        // A, spacer, B, spacer, C in 9 rows: spacers get (9-3)/2 = 3 each.
        let s = stack(vec![
            text("A").boxed(),
            spacer().boxed(),
            text("B").boxed(),
            spacer().boxed(),
            text("C").boxed(),
        ]);
        let buf = render_into(&s, 10, 9);
        assert_eq!(row_text(&buf, 0), "A");
        assert_eq!(row_text(&buf, 4), "B");
        assert_eq!(row_text(&buf, 8), "C");
        for y in [1, 2, 3, 5, 6, 7] {
            assert_eq!(row_text(&buf, y), "");
        }
    }

    #[test]
    fn flex_remainder_goes_to_last() {
        // 7 surplus rows split over two factor-1 spacers: 3 and 4.
        let s = stack(vec![
            spacer().boxed(),
            text("M").boxed(),
            spacer().boxed(),
        ]);
        let buf = render_into(&s, 3, 8);
        assert_eq!(row_text(&buf, 3), "M");
    }

    #[test]
    fn flex_factors_weight_distribution() {
        // Surplus 9 over factors 1 and 2: 3 and 6.
        let s = stack(vec![
            Spacer::new().boxed(),
            text("X").boxed(),
            Spacer::new().flex(2).boxed(),
        ]);
        let buf = render_into(&s, 3, 10);
        assert_eq!(row_text(&buf, 3), "X");
    }

    #[test]
    fn flex_respects_min_height() {
        let s = stack(vec![
            text("T").boxed(),
            Spacer::new().min_height(2).boxed(),
            text("B").boxed(),
        ]);
        // Height 4: surplus is 2, spacer floor respected.
        let buf = render_into(&s, 3, 4);
        assert_eq!(row_text(&buf, 0), "T");
        assert_eq!(row_text(&buf, 3), "B");
    }

    #[test]
    fn no_flex_when_no_surplus() {
        let s = stack(vec![
            text("a").boxed(),
            spacer().boxed(),
            text("b").boxed(),
        ]);
        let buf = render_into(&s, 3, 2);
        assert_eq!(row_text(&buf, 0), "a");
        assert_eq!(row_text(&buf, 1), "b");
    }

    #[test]
    fn measure_is_idempotent() {
        let s = stack(vec![text("abc").boxed(), Text::new("de").boxed()]).gap(1);
        assert_eq!(s.measure(20, 10), s.measure(20, 10));
    }
}
