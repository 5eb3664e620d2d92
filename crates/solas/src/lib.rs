//! solas: a declarative terminal UI engine.
//!
//! Applications describe the current screen as a tree of [`View`] values,
//! rebuilt after every event; the [`Runtime`] measures and renders the tree
//! into a cell grid, diffs it against the previous frame, and writes minimal
//! terminal updates. Full-screen applications get an event loop, a command
//! worker pool, focus management and click/input registries; inline output
//! goes through [`printer::print`] and [`printer::LivePrinter`], which
//! coexist with the user's scrollback.
//!
//! The rendering substrate (cell buffers, frames, ANSI encoding, terminal
//! backends) lives in [`solas_core`] and is re-exported here.

pub mod command;
pub mod context;
pub mod error;
pub mod event;
pub mod focus;
pub mod input;
pub mod interact;
pub mod printer;
pub mod runtime;
pub mod view;
pub mod views;

pub use solas_core as core;
pub use solas_core::{
    Cell, CellBuffer, Color, Frame, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind,
    NamedColor, Position, Rect, Size, Style,
};
pub use solas_core::terminal::{
    ColorSupport, CrosstermBackend, MouseCapture, Terminal, TestBackend,
};

pub use command::{CancelFlag, Command};
pub use context::RenderContext;
pub use error::{Result, SolasError};
pub use event::{Event, EventKind, TickEvent};
pub use focus::FocusManager;
pub use input::{CrosstermInput, InputSource, ScriptedInput};
pub use interact::{Hotspots, InputRegion};
pub use printer::{LivePrinter, PrintConfig, print};
pub use runtime::{App, Runtime, RuntimeConfig, RuntimeHandle, RuntimeState};
pub use view::{View, foreach};
pub use views::{
    Alignment2D, BorderStyle, Bordered, Button, Constrained, Divider, Flexible, Group, HAlign,
    Input, Padding, Spacer, Stack, Text, VAlign, ZStack, bordered, divider, flexible, group,
    height, max_height, max_width, min_height, min_width, padding, size, spacer, stack, text,
    width, zstack,
};
