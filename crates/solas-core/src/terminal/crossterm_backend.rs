//! Crossterm-based terminal backend.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};

use crate::error::Result;
use crate::geometry::Size;

use super::traits::{ColorSupport, MouseCapture, Terminal, TerminalCapabilities};

/// Terminal backend using crossterm for real terminal I/O on stdout.
pub struct CrosstermBackend {
    capabilities: TerminalCapabilities,
    raw_mode: bool,
    alternate_screen: bool,
    mouse: MouseCapture,
    bracketed_paste: bool,
    cursor_hidden: bool,
}

impl CrosstermBackend {
    /// Create a new crossterm backend, detecting capabilities.
    pub fn new() -> Self {
        Self {
            capabilities: detect_capabilities(),
            raw_mode: false,
            alternate_screen: false,
            mouse: MouseCapture::Off,
            bracketed_paste: false,
            cursor_hidden: false,
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermBackend {
    fn size(&self) -> Result<Size> {
        let (w, h) = terminal::size()?;
        Ok(Size::new(w, h))
    }

    fn capabilities(&self) -> &TerminalCapabilities {
        &self.capabilities
    }

    fn is_tty(&self) -> bool {
        io::stdout().is_tty()
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode {
            terminal::enable_raw_mode()?;
            self.raw_mode = true;
        }
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        if !self.alternate_screen {
            execute!(io::stdout(), EnterAlternateScreen)?;
            self.alternate_screen = true;
        }
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        if self.alternate_screen {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen = false;
        }
        Ok(())
    }

    fn set_mouse_capture(&mut self, mode: MouseCapture) -> Result<()> {
        if mode == self.mouse {
            return Ok(());
        }
        // Crossterm enables full tracking; Button and AnyMotion differ only
        // in which decoded events the input source forwards.
        match mode {
            MouseCapture::Off => execute!(io::stdout(), DisableMouseCapture)?,
            MouseCapture::Button | MouseCapture::AnyMotion => {
                execute!(io::stdout(), EnableMouseCapture)?;
            }
        }
        self.mouse = mode;
        Ok(())
    }

    fn set_bracketed_paste(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.bracketed_paste {
            return Ok(());
        }
        if enabled {
            execute!(io::stdout(), EnableBracketedPaste)?;
        } else {
            execute!(io::stdout(), DisableBracketedPaste)?;
        }
        self.bracketed_paste = enabled;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        self.cursor_hidden = false;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Hide)?;
        self.cursor_hidden = true;
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        io::stdout().write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        // Restore every mode we changed, even on panic paths. Failures here
        // are logged, never propagated.
        if self.cursor_hidden && execute!(io::stdout(), cursor::Show).is_err() {
            tracing::warn!("failed to restore cursor visibility");
        }
        if self.mouse != MouseCapture::Off && execute!(io::stdout(), DisableMouseCapture).is_err() {
            tracing::warn!("failed to disable mouse capture");
        }
        if self.bracketed_paste && execute!(io::stdout(), DisableBracketedPaste).is_err() {
            tracing::warn!("failed to disable bracketed paste");
        }
        if self.alternate_screen && execute!(io::stdout(), LeaveAlternateScreen).is_err() {
            tracing::warn!("failed to leave alternate screen");
        }
        if self.raw_mode && terminal::disable_raw_mode().is_err() {
            tracing::warn!("failed to disable raw mode");
        }
    }
}

/// Detect terminal capabilities from the environment.
fn detect_capabilities() -> TerminalCapabilities {
    TerminalCapabilities {
        color: detect_color_support(),
        unicode: true,
        synchronized_output: false,
        mouse: true,
    }
}

/// Detect color support from environment variables.
fn detect_color_support() -> ColorSupport {
    if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
        return ColorSupport::NoColor;
    }
    if let Ok(ct) = std::env::var("COLORTERM")
        && (ct == "truecolor" || ct == "24bit")
    {
        return ColorSupport::TrueColor;
    }
    if let Ok(term) = std::env::var("TERM")
        && term.contains("256color")
    {
        return ColorSupport::Extended256;
    }
    ColorSupport::Basic16
}
