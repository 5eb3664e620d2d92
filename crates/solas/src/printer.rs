//! Inline printers — rendering views into the normal terminal flow.
//!
//! `print` emits a view once, below whatever is already in the scrollback.
//! [`LivePrinter`] re-renders a region in place: it diffs the encoded lines
//! of consecutive updates and only redraws lines that changed, wrapping each
//! update in synchronized-output markers so partial updates never flash.

use std::io::{self, Write};

use solas_core::ansi;
use solas_core::buffer::CellBuffer;
use solas_core::encoder::Encoder;
use solas_core::frame::Frame;
use solas_core::geometry::Size;
use solas_core::terminal::ColorSupport;

use crate::context::RenderContext;
use crate::interact::Hotspots;
use crate::view::View;

/// Configuration for inline printing.
#[derive(Clone, Debug)]
pub struct PrintConfig {
    /// Width the view is measured and rendered at.
    pub width: u16,
    /// Fixed height; measured from the view when absent.
    pub height: Option<u16>,
    /// Emit `\r\n` line endings (required when the terminal is in raw mode,
    /// where `\n` alone does not carriage-return).
    pub raw_mode: bool,
    /// Color support for the emitted escape sequences.
    pub color_support: ColorSupport,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: None,
            raw_mode: false,
            color_support: ColorSupport::TrueColor,
        }
    }
}

impl PrintConfig {
    /// Set the render width.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Fix the render height.
    #[must_use]
    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    /// Use CRLF line endings for raw-mode terminals.
    #[must_use]
    pub fn raw_mode(mut self, raw: bool) -> Self {
        self.raw_mode = raw;
        self
    }

    fn line_ending(&self) -> &'static str {
        if self.raw_mode { "\r\n" } else { "\n" }
    }
}

/// Render a view into a detached buffer and return one encoded string per
/// line (styles transition within the line and reset at its end; trailing
/// blanks are trimmed).
pub fn render_lines(view: &dyn View, cfg: &PrintConfig) -> Vec<String> {
    let measured = view.measure(cfg.width, cfg.height.unwrap_or(0));
    let width = if cfg.width > 0 { cfg.width } else { measured.width };
    let height = cfg.height.unwrap_or(measured.height);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut buffer = CellBuffer::new(Size::new(width, height));
    let mut hotspots = Hotspots::new();
    {
        let mut ctx = RenderContext::new(Frame::new(&mut buffer), 0, None, &mut hotspots);
        view.render(&mut ctx);
    }

    let encoder = Encoder::new(cfg.color_support);
    (0..height)
        .map(|y| buffer.row(y).map_or_else(String::new, |r| encoder.encode_line(r)))
        .collect()
}

/// Measure and render a view once, writing ANSI-encoded lines to the sink.
pub fn print<W: Write>(view: &dyn View, cfg: &PrintConfig, out: &mut W) -> io::Result<()> {
    let ending = cfg.line_ending();
    for line in render_lines(view, cfg) {
        out.write_all(line.as_bytes())?;
        out.write_all(ending.as_bytes())?;
    }
    out.flush()
}

/// In-place live renderer with line-level diffing.
pub struct LivePrinter<W: Write> {
    out: W,
    cfg: PrintConfig,
    synchronized: bool,
    hide_cursor: bool,
    last_lines: Vec<String>,
    last_height: u16,
    last_width: u16,
    started: bool,
}

impl<W: Write> LivePrinter<W> {
    /// Create a live printer writing to `out`.
    pub fn new(out: W, cfg: PrintConfig) -> Self {
        let last_width = cfg.width;
        Self {
            out,
            cfg,
            synchronized: true,
            hide_cursor: false,
            last_lines: Vec::new(),
            last_height: 0,
            last_width,
            started: false,
        }
    }

    /// Opt out of synchronized-output framing (for nested invocations where
    /// an outer printer already owns the markers).
    #[must_use]
    pub fn synchronized(mut self, on: bool) -> Self {
        self.synchronized = on;
        self
    }

    /// Hide the cursor while live updates run; restored by [`Self::stop`].
    #[must_use]
    pub fn hide_cursor(mut self, on: bool) -> Self {
        self.hide_cursor = on;
        self
    }

    /// Change the render width. Line diffing is disabled for the next
    /// update.
    pub fn set_width(&mut self, width: u16) {
        self.cfg.width = width;
    }

    /// Re-render the view in place, redrawing only changed lines.
    pub fn update(&mut self, view: &dyn View) -> io::Result<()> {
        let lines = render_lines(view, &self.cfg);
        let height = lines.len() as u16;

        // Any width or height change disables line diffing for this update.
        let diffable =
            self.started && height == self.last_height && self.cfg.width == self.last_width;

        let ending = self.cfg.line_ending();
        let mut out = String::new();
        if self.synchronized {
            out.push_str(ansi::SYNC_BEGIN);
        }
        if self.hide_cursor && !self.started {
            out.push_str(ansi::HIDE_CURSOR);
        }
        if self.started {
            out.push_str(&ansi::cursor_up(self.last_height.saturating_sub(1)));
            out.push('\r');
        }

        for (i, line) in lines.iter().enumerate() {
            let unchanged = diffable && self.last_lines.get(i) == Some(line);
            if unchanged {
                // Skip the redraw but still advance.
                if i + 1 < lines.len() {
                    out.push_str(ending);
                }
                continue;
            }
            out.push('\r');
            out.push_str(ansi::CLEAR_LINE);
            out.push_str(line);
            if i + 1 < lines.len() {
                out.push_str(ending);
            }
        }

        if height < self.last_height {
            out.push_str(ansi::CLEAR_TO_SCREEN_END);
        }
        if self.synchronized {
            out.push_str(ansi::SYNC_END);
        }

        self.out.write_all(out.as_bytes())?;
        self.out.flush()?;

        self.last_lines = lines;
        self.last_height = height;
        self.last_width = self.cfg.width;
        self.started = true;
        Ok(())
    }

    /// Erase the live region and reset diff state.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.started {
            let mut out = String::new();
            out.push_str(&ansi::cursor_up(self.last_height.saturating_sub(1)));
            out.push('\r');
            out.push_str(ansi::CLEAR_TO_SCREEN_END);
            self.out.write_all(out.as_bytes())?;
            self.out.flush()?;
        }
        self.last_lines.clear();
        self.last_height = 0;
        self.started = false;
        Ok(())
    }

    /// Finish live updates: restore the cursor and move past the content.
    pub fn stop(&mut self) -> io::Result<()> {
        let mut out = String::new();
        if self.hide_cursor {
            out.push_str(ansi::SHOW_CURSOR);
        }
        if self.started {
            out.push_str(self.cfg.line_ending());
        }
        self.out.write_all(out.as_bytes())?;
        self.out.flush()
    }

    /// Access the sink (for tests).
    pub fn sink(&self) -> &W {
        &self.out
    }
}
