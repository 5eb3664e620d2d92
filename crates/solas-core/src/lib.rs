//! solas-core: rendering substrate for the solas terminal UI engine.
//!
//! This crate provides the cell grid, clipped drawing frames, ANSI encoding,
//! the double-buffered screen pipeline, and the terminal backend abstraction
//! that the `solas` framework crate builds on.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod encoder;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod screen;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{CellBuffer, CellChange, DirtyRegion};
pub use cell::Cell;
pub use color::{Color, NamedColor};
pub use encoder::Encoder;
pub use error::{CoreError, Result};
pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
pub use frame::Frame;
pub use geometry::{Position, Rect, Size};
pub use screen::Screen;
pub use style::{Attributes, Style};
pub use terminal::{
    ColorSupport, CrosstermBackend, MouseCapture, Terminal, TerminalCapabilities, TestBackend,
};
pub use text::{
    display_width, ellipsize, expand_tabs, filter_control_chars, truncate_to_width,
};
