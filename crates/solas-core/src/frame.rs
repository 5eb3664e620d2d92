//! Frame — a clipped, frame-local drawing handle into a cell buffer.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::buffer::CellBuffer;
use crate::cell::Cell;
use crate::geometry::{Rect, Size};
use crate::style::Style;

/// A drawing handle covering a rectangular region of a [`CellBuffer`].
///
/// All coordinates are frame-local: (0, 0) is the top-left of the frame's
/// bounds. Writes outside the bounds are silently clipped. A frame is valid
/// for one render pass; sub-frames borrow their parent and inherit clipping.
#[derive(Debug)]
pub struct Frame<'a> {
    buffer: &'a mut CellBuffer,
    bounds: Rect,
}

impl<'a> Frame<'a> {
    /// Create a frame covering the whole buffer.
    pub fn new(buffer: &'a mut CellBuffer) -> Self {
        let bounds = buffer.bounds();
        Self { buffer, bounds }
    }

    /// Create a frame covering `bounds ∩ buffer`.
    pub fn with_bounds(buffer: &'a mut CellBuffer, bounds: Rect) -> Self {
        let bounds = bounds.intersection(buffer.bounds());
        Self { buffer, bounds }
    }

    /// The frame's width in columns.
    pub fn width(&self) -> u16 {
        self.bounds.width
    }

    /// The frame's height in rows.
    pub fn height(&self) -> u16 {
        self.bounds.height
    }

    /// The frame's size.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// The frame's clip rectangle in buffer coordinates.
    pub fn absolute_bounds(&self) -> Rect {
        self.bounds
    }

    /// Read the cell at frame-local (x, y).
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.buffer.get(self.bounds.x + x, self.bounds.y + y)
    }

    /// Set a single cell at frame-local (x, y). Out-of-bounds writes are
    /// no-ops; a wide grapheme at the last visible column degrades to a blank.
    pub fn set(&mut self, x: u16, y: u16, grapheme: &str, style: &Style) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let cell = Cell::new(grapheme, style.clone());
        if cell.is_wide() && x + u16::from(cell.width) > self.width() {
            self.buffer
                .set(self.bounds.x + x, self.bounds.y + y, Cell::blank());
            return;
        }
        self.buffer.set(self.bounds.x + x, self.bounds.y + y, cell);
    }

    /// Write a string starting at frame-local (x, y), clipped to the frame.
    /// Returns the number of columns consumed.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: &Style) -> u16 {
        if y >= self.height() || x >= self.width() {
            return 0;
        }
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if col >= self.width() {
                break;
            }
            if col + w > self.width() {
                self.set(col, y, " ", &Style::default());
                col += 1;
                break;
            }
            self.buffer.set(
                self.bounds.x + col,
                self.bounds.y + y,
                Cell::new(grapheme, style.clone()),
            );
            col += w;
        }
        col - x
    }

    /// Write a hyperlinked string: the text is printed with the style's
    /// OSC 8 link set to `url`.
    pub fn hyperlink(&mut self, x: u16, y: u16, text: &str, url: &str, style: &Style) -> u16 {
        let linked = style.clone().link(url);
        self.print(x, y, text, &linked)
    }

    /// Fill a frame-local rectangle with a repeated grapheme.
    pub fn fill(&mut self, rect: Rect, grapheme: &str, style: &Style) {
        let local = rect.intersection(Rect::from_size(self.bounds.size()));
        self.buffer
            .fill(local.translate(self.bounds.position()), grapheme, style);
    }

    /// Fill the entire frame with a repeated grapheme.
    pub fn fill_all(&mut self, grapheme: &str, style: &Style) {
        self.buffer.fill(self.bounds, grapheme, style);
    }

    /// Re-map the style of every cell in the frame.
    ///
    /// The closure receives the row-major cell index within the frame, the
    /// total number of cells, and the current style. Continuation cells keep
    /// their primary's style in sync.
    pub fn restyle<F>(&mut self, f: F)
    where
        F: Fn(usize, usize, &Style) -> Style,
    {
        let total = usize::from(self.width()) * usize::from(self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                let ax = self.bounds.x + x;
                let ay = self.bounds.y + y;
                let Some(cell) = self.buffer.get(ax, ay) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                let idx = usize::from(y) * usize::from(self.width()) + usize::from(x);
                let styled = Cell {
                    grapheme: cell.grapheme.clone(),
                    style: f(idx, total, &cell.style),
                    width: cell.width,
                };
                self.buffer.set(ax, ay, styled);
            }
        }
    }

    /// Create a sub-frame over a frame-local rectangle. The sub-frame's
    /// bounds are `rect ∩ self.bounds`; its local origin is `rect`'s top-left.
    pub fn sub_frame(&mut self, rect: Rect) -> Frame<'_> {
        let absolute = rect
            .translate(self.bounds.position())
            .intersection(self.bounds);
        Frame::with_bounds(self.buffer, absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, NamedColor};

    fn grapheme_at(buf: &CellBuffer, x: u16, y: u16) -> Option<&str> {
        buf.get(x, y).map(|c| c.grapheme.as_str())
    }

    #[test]
    fn full_frame_covers_buffer() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let frame = Frame::new(&mut buf);
        assert_eq!(frame.size(), Size::new(10, 5));
        assert_eq!(frame.absolute_bounds(), Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn local_coordinates_translate() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(3, 2, 5, 2));
        frame.set(0, 0, "A", &Style::default());
        assert_eq!(grapheme_at(&buf, 3, 2), Some("A"));
    }

    #[test]
    fn writes_clip_to_bounds() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(3, 2, 2, 1));
        frame.set(2, 0, "X", &Style::default());
        frame.set(0, 1, "Y", &Style::default());
        for y in 0..5 {
            for x in 0..10 {
                assert!(buf.get(x, y).is_some_and(Cell::is_blank));
            }
        }
    }

    #[test]
    fn print_clips_to_frame_not_buffer() {
        let mut buf = CellBuffer::new(Size::new(20, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(0, 0, 5, 1));
        let consumed = frame.print(0, 0, "overflow", &Style::default());
        assert_eq!(consumed, 5);
        assert_eq!(grapheme_at(&buf, 4, 0), Some("f"));
        assert!(buf.get(5, 0).is_some_and(Cell::is_blank));
    }

    #[test]
    fn wide_char_at_clip_edge_degrades() {
        let mut buf = CellBuffer::new(Size::new(20, 1));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(0, 0, 4, 1));
        frame.print(3, 0, "\u{4e16}", &Style::default());
        // Must not leak into column 4 of the buffer.
        assert!(buf.get(3, 0).is_some_and(Cell::is_blank));
        assert!(buf.get(4, 0).is_some_and(Cell::is_blank));
    }

    #[test]
    fn set_wide_at_last_column_degrades() {
        let mut buf = CellBuffer::new(Size::new(20, 1));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(0, 0, 4, 1));
        frame.set(3, 0, "\u{4e16}", &Style::default());
        assert!(buf.get(3, 0).is_some_and(Cell::is_blank));
    }

    #[test]
    fn fill_local_rect() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(2, 1, 6, 3));
        frame.fill(Rect::new(1, 1, 2, 2), "*", &Style::default());
        assert_eq!(grapheme_at(&buf, 3, 2), Some("*"));
        assert_eq!(grapheme_at(&buf, 4, 3), Some("*"));
        assert!(buf.get(2, 1).is_some_and(Cell::is_blank));
    }

    #[test]
    fn sub_frame_intersects_parent() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(2, 1, 6, 3));
        let sub = frame.sub_frame(Rect::new(4, 1, 10, 10));
        // Parent spans (2,1)-(8,4); requested sub starts at (6,2).
        assert_eq!(sub.absolute_bounds(), Rect::new(6, 2, 2, 2));
    }

    #[test]
    fn sub_frame_outside_parent_is_empty() {
        let mut buf = CellBuffer::new(Size::new(10, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(2, 1, 4, 2));
        let mut sub = frame.sub_frame(Rect::new(10, 10, 3, 3));
        assert_eq!(sub.size(), Size::new(0, 0));
        sub.set(0, 0, "X", &Style::default());
        sub.fill_all("#", &Style::default());
    }

    #[test]
    fn zero_sized_frame_draws_nothing() {
        let mut buf = CellBuffer::new(Size::new(5, 5));
        let mut frame = Frame::with_bounds(&mut buf, Rect::new(1, 1, 0, 0));
        frame.print(0, 0, "x", &Style::default());
        frame.fill_all("#", &Style::default());
        for y in 0..5 {
            for x in 0..5 {
                assert!(buf.get(x, y).is_some_and(Cell::is_blank));
            }
        }
    }

    #[test]
    fn hyperlink_sets_link_style() {
        let mut buf = CellBuffer::new(Size::new(10, 1));
        let mut frame = Frame::new(&mut buf);
        frame.hyperlink(0, 0, "docs", "https://example.com", &Style::default());
        let cell = buf.get(0, 0);
        assert_eq!(
            cell.and_then(|c| c.style.link.as_deref()),
            Some("https://example.com")
        );
    }

    #[test]
    fn restyle_maps_styles() {
        let mut buf = CellBuffer::new(Size::new(4, 1));
        let mut frame = Frame::new(&mut buf);
        frame.print(0, 0, "ab", &Style::default());
        frame.restyle(|_, _, style| style.clone().fg(Color::Named(NamedColor::Red)));
        assert_eq!(
            buf.get(0, 0).and_then(|c| c.style.fg),
            Some(Color::Named(NamedColor::Red))
        );
    }
}
