//! In-memory terminal backend for testing.

use crate::error::Result;
use crate::geometry::Size;

use super::traits::{MouseCapture, Terminal, TerminalCapabilities};

/// In-memory terminal backend for testing.
///
/// All output is captured in a buffer that can be inspected, and every mode
/// toggle is recorded as an inspectable flag.
pub struct TestBackend {
    size: Size,
    capabilities: TerminalCapabilities,
    buffer: Vec<u8>,
    raw_mode: bool,
    alternate_screen: bool,
    mouse: MouseCapture,
    bracketed_paste: bool,
    cursor_hidden: bool,
}

impl TestBackend {
    /// Create a new test backend with the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            capabilities: TerminalCapabilities::default(),
            buffer: Vec::new(),
            raw_mode: false,
            alternate_screen: false,
            mouse: MouseCapture::Off,
            bracketed_paste: false,
            cursor_hidden: false,
        }
    }

    /// Override the reported capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: TerminalCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Get the bytes written to this backend.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the written bytes as a lossy string.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Clear the output buffer.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Check if raw mode is active.
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Check if the alternate screen is active.
    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    /// The current mouse tracking mode.
    pub fn mouse_capture(&self) -> MouseCapture {
        self.mouse
    }

    /// Check if bracketed paste is enabled.
    pub fn is_bracketed_paste(&self) -> bool {
        self.bracketed_paste
    }

    /// Check if the cursor is hidden.
    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Set the terminal size (simulates a resize).
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
    }
}

impl Terminal for TestBackend {
    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn capabilities(&self) -> &TerminalCapabilities {
        &self.capabilities
    }

    fn is_tty(&self) -> bool {
        true
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = true;
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.alternate_screen = false;
        Ok(())
    }

    fn set_mouse_capture(&mut self, mode: MouseCapture) -> Result<()> {
        self.mouse = mode;
        Ok(())
    }

    fn set_bracketed_paste(&mut self, enabled: bool) -> Result<()> {
        self.bracketed_paste = enabled;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.cursor_hidden = false;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.cursor_hidden = true;
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_size() {
        let tb = TestBackend::new(80, 24);
        assert_eq!(tb.size().ok(), Some(Size::new(80, 24)));
    }

    #[test]
    fn test_backend_write() {
        let mut tb = TestBackend::new(80, 24);
        tb.write_raw(b"hello").ok();
        assert_eq!(tb.buffer(), b"hello");
    }

    #[test]
    fn test_backend_clear() {
        let mut tb = TestBackend::new(80, 24);
        tb.write_raw(b"data").ok();
        tb.clear_buffer();
        assert!(tb.buffer().is_empty());
    }

    #[test]
    fn test_backend_raw_mode() {
        let mut tb = TestBackend::new(80, 24);
        assert!(!tb.is_raw_mode());
        tb.enter_raw_mode().ok();
        assert!(tb.is_raw_mode());
        tb.exit_raw_mode().ok();
        assert!(!tb.is_raw_mode());
    }

    #[test]
    fn test_backend_alternate_screen() {
        let mut tb = TestBackend::new(80, 24);
        tb.enter_alternate_screen().ok();
        assert!(tb.is_alternate_screen());
        tb.leave_alternate_screen().ok();
        assert!(!tb.is_alternate_screen());
    }

    #[test]
    fn test_backend_mouse_modes() {
        let mut tb = TestBackend::new(80, 24);
        assert_eq!(tb.mouse_capture(), MouseCapture::Off);
        tb.set_mouse_capture(MouseCapture::AnyMotion).ok();
        assert_eq!(tb.mouse_capture(), MouseCapture::AnyMotion);
    }

    #[test]
    fn test_backend_paste_and_cursor() {
        let mut tb = TestBackend::new(80, 24);
        tb.set_bracketed_paste(true).ok();
        assert!(tb.is_bracketed_paste());
        tb.hide_cursor().ok();
        assert!(tb.is_cursor_hidden());
        tb.show_cursor().ok();
        assert!(!tb.is_cursor_hidden());
    }

    #[test]
    fn test_backend_resize() {
        let mut tb = TestBackend::new(80, 24);
        tb.set_size(120, 40);
        assert_eq!(tb.size().ok(), Some(Size::new(120, 40)));
    }
}
