//! The view protocol.
//!
//! A view is a plain value describing one node of the current screen. Trees
//! are rebuilt by the application on every frame; views hold no render state
//! across frames. Every drawable satisfies a two-phase contract: `measure`
//! reports the intrinsic size within the given maxima, `render` writes cells
//! through the render context.

use solas_core::geometry::Size;

use crate::context::RenderContext;

/// A drawable node in the view tree.
pub trait View {
    /// Return the intrinsic size the view wants, bounded by the given maxima.
    /// A zero maximum means "no constraint".
    ///
    /// Must be pure, deterministic, and idempotent for fixed inputs, and must
    /// not draw.
    fn measure(&self, max_w: u16, max_h: u16) -> Size;

    /// Write cells into the context's frame within the current bounds.
    /// Out-of-bounds writes are silently clipped; rendering never fails.
    fn render(&self, ctx: &mut RenderContext<'_>);

    /// Weight governing how surplus main-axis space is distributed by stack
    /// and group containers. Zero means fixed (no surplus).
    fn flex(&self) -> u16 {
        0
    }

    /// Size floor honored when this view is flexed.
    fn flex_min(&self) -> Size {
        Size::new(0, 0)
    }

    /// Box this view for use in a container's child list.
    fn boxed(self) -> Box<dyn View>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl View for Box<dyn View> {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        (**self).measure(max_w, max_h)
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        (**self).render(ctx);
    }

    fn flex(&self) -> u16 {
        (**self).flex()
    }

    fn flex_min(&self) -> Size {
        (**self).flex_min()
    }
}

/// Build a child list by mapping each item of an iterator to a view.
///
/// The mapper receives the item index and the item, statically typed.
pub fn foreach<T, I, F, V>(items: I, mut mapper: F) -> Vec<Box<dyn View>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(usize, T) -> V,
    V: View + 'static,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| mapper(index, item).boxed())
        .collect()
}
