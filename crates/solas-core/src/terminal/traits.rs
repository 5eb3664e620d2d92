//! Terminal trait and capability types.

use crate::error::Result;
use crate::geometry::Size;

/// Level of color support available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSupport {
    /// No color.
    NoColor,
    /// 16 ANSI colors.
    Basic16,
    /// 256 color palette.
    Extended256,
    /// 24-bit true color.
    TrueColor,
}

/// Mouse tracking mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseCapture {
    /// No mouse events.
    #[default]
    Off,
    /// Button press/release events only.
    Button,
    /// All motion events.
    AnyMotion,
}

/// Capabilities detected for the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Color support level.
    pub color: ColorSupport,
    /// Whether the terminal supports Unicode.
    pub unicode: bool,
    /// Whether CSI 2026 synchronized output is supported.
    pub synchronized_output: bool,
    /// Whether mouse events are available.
    pub mouse: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color: ColorSupport::TrueColor,
            unicode: true,
            synchronized_output: false,
            mouse: true,
        }
    }
}

/// Abstraction over terminal backends.
///
/// The runtime exclusively owns the terminal while running: it flips modes
/// on startup, writes encoded frames through `write_raw`, and restores every
/// mode it changed on shutdown.
pub trait Terminal: Send {
    /// Get the current terminal size.
    fn size(&self) -> Result<Size>;

    /// Get the terminal's capabilities.
    fn capabilities(&self) -> &TerminalCapabilities;

    /// Whether the backend is attached to a real tty.
    fn is_tty(&self) -> bool;

    /// Enter raw mode (disable line buffering, echo, etc.).
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exit raw mode (restore normal terminal state).
    fn exit_raw_mode(&mut self) -> Result<()>;

    /// Switch to the alternate screen.
    fn enter_alternate_screen(&mut self) -> Result<()>;

    /// Return from the alternate screen.
    fn leave_alternate_screen(&mut self) -> Result<()>;

    /// Set the mouse tracking mode.
    fn set_mouse_capture(&mut self, mode: MouseCapture) -> Result<()>;

    /// Enable or disable bracketed paste.
    fn set_bracketed_paste(&mut self, enabled: bool) -> Result<()>;

    /// Make the cursor visible.
    fn show_cursor(&mut self) -> Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&mut self) -> Result<()>;

    /// Write raw bytes to the terminal.
    fn write_raw(&mut self, data: &[u8]) -> Result<()>;

    /// Flush buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;
}
