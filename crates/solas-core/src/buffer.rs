//! Cell buffer — a 2D grid of terminal cells with dirty-region tracking.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::geometry::{Rect, Size};
use crate::style::Style;

/// Minimal axis-aligned rectangle covering all cells changed since the last
/// [`CellBuffer::clear_dirty`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRegion {
    rect: Option<Rect>,
}

impl DirtyRegion {
    /// Create an empty dirty region.
    pub const fn new() -> Self {
        Self { rect: None }
    }

    /// Expand the region to cover the given cell.
    pub fn mark(&mut self, x: u16, y: u16) {
        let cell = Rect::new(x, y, 1, 1);
        self.rect = Some(match self.rect {
            None => cell,
            Some(r) => {
                let left = r.x.min(x);
                let top = r.y.min(y);
                let right = r.right().max(x.saturating_add(1));
                let bottom = r.bottom().max(y.saturating_add(1));
                Rect::new(left, top, right - left, bottom - top)
            }
        });
    }

    /// Expand the region to cover the given rectangle.
    pub fn mark_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.mark(rect.x, rect.y);
        self.mark(rect.right() - 1, rect.bottom() - 1);
    }

    /// The covered rectangle, or `None` if nothing was marked.
    pub const fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Returns true if no cell has been marked.
    pub const fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.rect = None;
    }
}

/// A 2D grid of terminal cells representing one frame of terminal content.
///
/// Every mutating primitive records the cells it actually changes in the
/// buffer's [`DirtyRegion`]; writes that store an identical cell value and
/// writes outside the grid are no-ops.
#[derive(Clone, Debug)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    dirty: DirtyRegion,
}

impl CellBuffer {
    /// Create a new cell buffer filled with blank cells. The dirty region
    /// starts empty.
    pub fn new(size: Size) -> Self {
        let len = usize::from(size.width) * usize::from(size.height);
        Self {
            cells: vec![Cell::blank(); len],
            width: size.width,
            height: size.height,
            dirty: DirtyRegion::new(),
        }
    }

    /// Get the buffer dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the buffer width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The buffer extent as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// The current dirty region.
    pub fn dirty(&self) -> &DirtyRegion {
        &self.dirty
    }

    /// Clear the dirty region (after a commit).
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Reset all cells to blank. Only cells that were not already blank are
    /// marked dirty.
    pub fn reset(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.store(x, y, Cell::blank());
            }
        }
    }

    /// Resize the buffer. Contents are lost (filled with blanks) and the
    /// whole new extent is marked dirty.
    pub fn resize(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        let len = usize::from(size.width) * usize::from(size.height);
        self.cells.clear();
        self.cells.resize(len, Cell::blank());
        self.dirty.clear();
        self.dirty.mark_rect(self.bounds());
    }

    /// Get a reference to the cell at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// Get a row of cells as a slice.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            let end = start + usize::from(self.width);
            Some(&self.cells[start..end])
        } else {
            None
        }
    }

    /// Set a cell at (x, y). If the cell is wide (width > 1), the next
    /// cell is automatically set to a continuation cell. No-op if out of bounds.
    ///
    /// Wide character edge cases:
    /// - Writing over a continuation cell blanks the preceding wide
    ///   character's primary cell so no half-rendered glyph survives.
    /// - Writing over a wide character's primary cell blanks the old
    ///   continuation cell at x+1.
    /// - A wide character whose continuation cell would fall beyond the last
    ///   column degrades to a single blank.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }

        let is_wide = cell.is_wide();

        // Wide character at the last column: the continuation would be out of
        // bounds, so degrade to a blank.
        if is_wide && x + 1 >= self.width {
            self.clear_around(x, y);
            self.store(x, y, Cell::blank());
            return;
        }

        self.clear_around(x, y);

        let style = cell.style.clone();
        self.store(x, y, cell);

        if is_wide {
            let next_x = x + 1;
            // If the continuation target is itself a wide character's primary
            // cell, that wide character loses its own continuation too.
            if self.get(next_x, y).is_some_and(Cell::is_wide) {
                let after = next_x + 1;
                if after < self.width {
                    self.store(after, y, Cell::blank());
                }
            }
            self.store(next_x, y, Cell::continuation(style));
        }
    }

    /// Write a string starting at (x, y), clipped to the row. Returns the
    /// number of columns consumed.
    ///
    /// Iterates grapheme clusters; zero-width clusters are skipped. A wide
    /// cluster that does not fully fit before the right edge degrades to a
    /// blank in its primary column and ends the write.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: &Style) -> u16 {
        if y >= self.height || x >= self.width {
            return 0;
        }
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if col >= self.width {
                break;
            }
            if col + w > self.width {
                // Only half of a wide cluster fits.
                self.set(col, y, Cell::blank());
                col += 1;
                break;
            }
            self.set(col, y, Cell::new(grapheme, style.clone()));
            col += w;
        }
        col - x
    }

    /// Fill a rectangle with a repeated grapheme. The rectangle is clipped to
    /// the buffer.
    pub fn fill(&mut self, rect: Rect, grapheme: &str, style: &Style) {
        let rect = rect.intersection(self.bounds());
        let w = UnicodeWidthStr::width(grapheme).max(1) as u16;
        for y in rect.rows() {
            let mut x = rect.x;
            while x < rect.right() {
                self.set(x, y, Cell::new(grapheme, style.clone()));
                x += w;
            }
        }
    }

    /// Compute the cell changes between this buffer and `shown`, reading only
    /// the dirty region.
    ///
    /// Outside the dirty region this buffer and `shown` are assumed equal
    /// (which holds when `shown` is the grid state after the previous commit).
    /// A size mismatch forces a full comparison.
    pub fn changes_since(&self, shown: &CellBuffer) -> Vec<CellChange> {
        let scan = if self.size() == shown.size() {
            match self.dirty.rect() {
                Some(r) => r,
                None => return Vec::new(),
            }
        } else {
            self.bounds()
        };
        let scan = scan.intersection(self.bounds());

        let mut changes = Vec::new();
        for y in scan.rows() {
            for x in scan.columns() {
                let current = &self.cells[self.index(x, y)];
                if shown.get(x, y) != Some(current) {
                    changes.push(CellChange {
                        x,
                        y,
                        cell: current.clone(),
                    });
                }
            }
        }
        changes
    }

    /// Store a cell value, marking the dirty region only when the stored
    /// value actually changes.
    fn store(&mut self, x: u16, y: u16, cell: Cell) {
        let idx = self.index(x, y);
        if let Some(existing) = self.cells.get_mut(idx)
            && *existing != cell
        {
            *existing = cell;
            self.dirty.mark(x, y);
        }
    }

    /// Blank the cells whose wide-character pairing is broken by a write at
    /// (x, y): the primary left of a continuation, or the stale continuation
    /// right of a wide primary.
    fn clear_around(&mut self, x: u16, y: u16) {
        if self.get(x, y).is_some_and(Cell::is_continuation) && x > 0 {
            self.store(x - 1, y, Cell::blank());
        }
        if self.get(x, y).is_some_and(Cell::is_wide) && x + 1 < self.width {
            self.store(x + 1, y, Cell::blank());
        }
    }

    /// Convert (x, y) to a linear index.
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }
}

/// A single cell change: position + new cell value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Column position.
    pub x: u16,
    /// Row position.
    pub y: u16,
    /// New cell value.
    pub cell: Cell,
}
