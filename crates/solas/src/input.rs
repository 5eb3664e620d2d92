//! Input sources — decoded terminal input feeding the event queue.
//!
//! The runtime drains an [`InputSource`] on a background task; every decoded
//! event enters the single FIFO queue. `read_event` is a polling read so the
//! task can observe cancellation between events.

use std::collections::VecDeque;
use std::time::Duration;

use solas_core::event::{InputEvent, KeyEvent};
use solas_core::geometry::Size;
use solas_core::text::{expand_tabs, filter_control_chars};

use crate::error::{Result, SolasError};

/// Abstract source of decoded input events.
pub trait InputSource: Send {
    /// Wait up to `timeout` for the next event. `Ok(None)` means nothing
    /// arrived in time; [`SolasError::Closed`] means end of input.
    fn read_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;

    /// Configure the tab width applied to pasted text.
    fn set_paste_tab_width(&mut self, _width: u8) {}
}

/// Real input source decoding crossterm events from the terminal.
pub struct CrosstermInput {
    paste_tab_width: u8,
}

impl CrosstermInput {
    /// Create an input source with the default paste tab width.
    pub fn new() -> Self {
        Self { paste_tab_width: 4 }
    }
}

impl Default for CrosstermInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for CrosstermInput {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        let ready = crossterm::event::poll(timeout).map_err(|_| SolasError::Closed)?;
        if !ready {
            return Ok(None);
        }
        let event = crossterm::event::read().map_err(|_| SolasError::Closed)?;
        Ok(match event {
            crossterm::event::Event::Key(key)
                if key.kind != crossterm::event::KeyEventKind::Release =>
            {
                Some(InputEvent::Key(key.into()))
            }
            crossterm::event::Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse.into())),
            crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize(Size::new(w, h))),
            crossterm::event::Event::Paste(text) => {
                let text = expand_tabs(&filter_control_chars(&text), self.paste_tab_width);
                Some(InputEvent::Key(KeyEvent::pasted(text)))
            }
            _ => None,
        })
    }

    fn set_paste_tab_width(&mut self, width: u8) {
        self.paste_tab_width = width;
    }
}

/// Scripted input source for tests: replays a fixed sequence of events, then
/// reports end of input (which the runtime turns into a quit).
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    hold_open: bool,
    paste_tab_width: u8,
}

impl ScriptedInput {
    /// Create a source replaying the given events, closing afterwards.
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            hold_open: false,
            paste_tab_width: 4,
        }
    }

    /// Keep the source open (idle) after the script is exhausted.
    #[must_use]
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// The configured paste tab width (for assertions).
    pub fn paste_tab_width(&self) -> u8 {
        self.paste_tab_width
    }
}

impl InputSource for ScriptedInput {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None if self.hold_open => {
                std::thread::sleep(timeout);
                Ok(None)
            }
            None => Err(SolasError::Closed),
        }
    }

    fn set_paste_tab_width(&mut self, width: u8) {
        self.paste_tab_width = width;
    }
}
