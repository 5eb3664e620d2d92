//! Screen — the double-buffered frame pipeline.
//!
//! Owns the working cell buffer and a copy of what the terminal currently
//! shows. Each frame: `begin_frame()` hands out a drawing frame over the
//! reset working buffer; `commit()` walks the working buffer's dirty region,
//! encodes only cells that differ from the on-screen copy, and writes the
//! result to the terminal.

use crate::ansi;
use crate::buffer::CellBuffer;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::frame::Frame;
use crate::geometry::Size;
use crate::terminal::Terminal;

/// Manages the double-buffered rendering pipeline.
pub struct Screen {
    buffer: CellBuffer,
    shown: CellBuffer,
    encoder: Encoder,
    size: Size,
    sync_output: bool,
    full_redraw: bool,
}

impl Screen {
    /// Create a new screen sized and configured for the given terminal.
    pub fn new(terminal: &dyn Terminal) -> Result<Self> {
        let size = terminal.size()?;
        let caps = terminal.capabilities();
        Ok(Self::with_size(
            size,
            Encoder::new(caps.color),
            caps.synchronized_output,
        ))
    }

    /// Create a screen with explicit size and encoder (for testing).
    pub fn with_size(size: Size, encoder: Encoder, sync_output: bool) -> Self {
        Self {
            buffer: CellBuffer::new(size),
            shown: CellBuffer::new(size),
            encoder,
            size,
            sync_output,
            full_redraw: true,
        }
    }

    /// Get the current buffer dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Get a reference to the working buffer.
    pub fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// Begin a new frame: reset the working buffer and return a full-size
    /// drawing frame over it. The frame is valid until `commit`.
    pub fn begin_frame(&mut self) -> Frame<'_> {
        self.buffer.reset();
        Frame::new(&mut self.buffer)
    }

    /// Commit the working buffer: diff against the on-screen copy within the
    /// dirty region, write minimal escape sequences, and flush.
    ///
    /// Outside the dirty region the working buffer and the on-screen copy are
    /// equal by construction, so nothing else needs scanning.
    pub fn commit(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        let mut output = String::new();
        if self.full_redraw {
            output.push_str(ansi::CLEAR_SCREEN);
        }

        let changes = self.buffer.changes_since(&self.shown);
        for change in &changes {
            self.shown.set(change.x, change.y, change.cell.clone());
        }
        output.push_str(&self.encoder.encode(&changes));
        self.buffer.clear_dirty();
        self.shown.clear_dirty();
        self.full_redraw = false;

        if output.is_empty() {
            return Ok(());
        }
        if self.sync_output {
            terminal.write_raw(ansi::SYNC_BEGIN.as_bytes())?;
        }
        terminal.write_raw(output.as_bytes())?;
        if self.sync_output {
            terminal.write_raw(ansi::SYNC_END.as_bytes())?;
        }
        terminal.flush()?;
        Ok(())
    }

    /// Handle a terminal resize: both buffers are re-allocated and the next
    /// commit performs a full redraw.
    pub fn resize(&mut self, new_size: Size) {
        if new_size == self.size {
            return;
        }
        self.size = new_size;
        self.buffer.resize(new_size);
        self.shown.resize(new_size);
        self.shown.clear_dirty();
        self.full_redraw = true;
    }
}
