//! Group — the horizontal layout container.

use solas_core::geometry::{Rect, Size};

use crate::context::RenderContext;
use crate::view::View;

use super::{VAlign, clamp_max, v_offset};

/// Lays children out left-to-right with an optional gap between them.
///
/// The horizontal mirror of [`Stack`](super::Stack): children are measured
/// with an unconstrained width to gather preferred widths, flex children
/// share the surplus width, and the last flex child absorbs the rounding
/// remainder.
#[derive(Default)]
pub struct Group {
    children: Vec<Box<dyn View>>,
    gap: u16,
    align: VAlign,
    height: Option<u16>,
    min_height: Option<u16>,
    max_height: Option<u16>,
}

impl Group {
    /// Create a group over the given children.
    pub fn new(children: Vec<Box<dyn View>>) -> Self {
        Self {
            children,
            gap: 0,
            align: VAlign::Top,
            height: None,
            min_height: None,
            max_height: None,
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

    /// Set the vertical alignment of children.
    #[must_use]
    pub fn align(mut self, align: VAlign) -> Self {
        self.align = align;
        self
    }

    /// Fix the group's height.
    #[must_use]
    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    /// Constrain the group's minimum height.
    #[must_use]
    pub fn min_height(mut self, height: u16) -> Self {
        self.min_height = Some(height);
        self
    }

    /// Constrain the group's maximum height.
    #[must_use]
    pub fn max_height(mut self, height: u16) -> Self {
        self.max_height = Some(height);
        self
    }

    fn gaps_total(&self) -> u16 {
        match self.children.len() {
            0 | 1 => 0,
            n => self.gap.saturating_mul(n as u16 - 1),
        }
    }
}

impl View for Group {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        if self.children.is_empty() {
            return Size::new(0, 0);
        }

        let inner_max_h = match self.height {
            Some(h) => clamp_max(h, max_h),
            None => match self.max_height {
                Some(m) => clamp_max(m, max_h),
                None => max_h,
            },
        };

        let mut width: u16 = 0;
        let mut height: u16 = 0;
        for child in &self.children {
            let s = child.measure(0, inner_max_h);
            width = width.saturating_add(s.width);
            height = height.max(s.height);
        }
        width = width.saturating_add(self.gaps_total());

        let mut height = self.height.unwrap_or(height);
        if let Some(min) = self.min_height {
            height = height.max(min);
        }
        if let Some(max) = self.max_height {
            height = height.min(max);
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

        let mut x: u16 = 0;
        for (child, size) in self.children.iter().zip(&slots) {
            if x >= w {
                break;
            }
            let rect = match self.align {
                VAlign::Top => Rect::new(x, 0, size.width, h),
                _ => {
                    let ch = size.height.min(h);
                    Rect::new(x, v_offset(h, ch, self.align), size.width, ch)
                }
            };
            let mut sub = ctx.sub_context(rect);
            child.render(&mut sub);
            x = x.saturating_add(size.width).saturating_add(self.gap);
        }
    }
}

impl Group {
    /// Compute per-child sizes for the given bounds (preferred widths plus
    /// flex distribution on the x axis).
    fn layout(&self, w: u16, h: u16) -> Vec<Size> {
        let mut sizes: Vec<Size> = Vec::with_capacity(self.children.len());
        let mut fixed_w: u16 = 0;
        let mut flex_sum: u32 = 0;

        for child in &self.children {
            if child.flex() == 0 {
                let s = child.measure(0, h);
                fixed_w = fixed_w.saturating_add(s.width);
                sizes.push(s);
            } else {
                flex_sum += u32::from(child.flex());
                sizes.push(Size::new(0, 0));
            }
        }

        if flex_sum == 0 {
            return sizes;
        }

        let remaining = w.saturating_sub(fixed_w.saturating_add(self.gaps_total()));
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
            let min_w = child.flex_min().width;
            let alloc = if i == last_flex {
                remaining.saturating_sub(used).max(min_w)
            } else {
                let base = ((u32::from(remaining) * u32::from(flex)) / flex_sum) as u16;
                base.max(min_w)
            };
            used = used.saturating_add(alloc);
            let height = child.measure(alloc, h).height;
            sizes[i] = Size::new(alloc, height);
        }

        sizes
    }
}
