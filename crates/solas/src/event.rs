//! Runtime event model.
//!
//! Events are the single currency of the runtime: input, ticks, resizes,
//! command results, and application-defined payloads all travel through one
//! FIFO queue as [`Event`] values. Every event carries its arrival timestamp.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use solas_core::event::{InputEvent, KeyEvent, MouseEvent};
use solas_core::geometry::Size;

/// A timestamped runtime event.
#[derive(Clone, Debug)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// When the event was created.
    pub at: Instant,
}

/// The event payload.
#[derive(Clone)]
#[non_exhaustive]
pub enum EventKind {
    /// A key was pressed (possibly carrying pasted text).
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A scheduler tick.
    Tick(TickEvent),
    /// The terminal was resized.
    Resize(Size),
    /// Stop the runtime.
    Quit,
    /// A command or render pass failed.
    Error(ErrorEvent),
    /// A group of events delivered atomically, in order.
    Batch(Vec<Event>),
    /// An application-defined payload.
    App(Arc<dyn Any + Send + Sync>),
}

/// A periodic tick carrying a monotonically increasing frame number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    /// Monotonically increasing frame number for this tick stream.
    pub frame: u64,
}

/// A failure delivered to the application instead of being fatal.
#[derive(Clone, Debug)]
pub struct ErrorEvent {
    /// Human-readable cause.
    pub cause: String,
    /// The underlying error value, when one exists.
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            at: Instant::now(),
        }
    }

    /// Create a key event.
    pub fn key(key: KeyEvent) -> Self {
        Self::new(EventKind::Key(key))
    }

    /// Create a mouse event.
    pub fn mouse(mouse: MouseEvent) -> Self {
        Self::new(EventKind::Mouse(mouse))
    }

    /// Create a tick event.
    pub fn tick(frame: u64) -> Self {
        Self::new(EventKind::Tick(TickEvent { frame }))
    }

    /// Create a resize event.
    pub fn resize(size: Size) -> Self {
        Self::new(EventKind::Resize(size))
    }

    /// Create a quit event.
    pub fn quit() -> Self {
        Self::new(EventKind::Quit)
    }

    /// Create an error event.
    pub fn error(
        cause: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::new(EventKind::Error(ErrorEvent {
            cause: cause.into(),
            source: source.map(Arc::from),
        }))
    }

    /// Create a batch event.
    pub fn batch(events: Vec<Event>) -> Self {
        Self::new(EventKind::Batch(events))
    }

    /// Create an application-defined event.
    pub fn app<T: Any + Send + Sync>(payload: T) -> Self {
        Self::new(EventKind::App(Arc::new(payload)))
    }

    /// Returns true for a quit event.
    pub fn is_quit(&self) -> bool {
        matches!(self.kind, EventKind::Quit)
    }

    /// Downcast an application-defined payload.
    pub fn downcast_app<T: Any + Send + Sync>(&self) -> Option<&T> {
        match &self.kind {
            EventKind::App(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<InputEvent> for Event {
    fn from(input: InputEvent) -> Self {
        match input {
            InputEvent::Key(key) => Event::key(key),
            InputEvent::Mouse(mouse) => Event::mouse(mouse),
            InputEvent::Resize(size) => Event::resize(size),
            _ => unreachable!("InputEvent is non_exhaustive but only these variants exist"),
        }
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Key(k) => f.debug_tuple("Key").field(k).finish(),
            EventKind::Mouse(m) => f.debug_tuple("Mouse").field(m).finish(),
            EventKind::Tick(t) => f.debug_tuple("Tick").field(t).finish(),
            EventKind::Resize(s) => f.debug_tuple("Resize").field(s).finish(),
            EventKind::Quit => write!(f, "Quit"),
            EventKind::Error(e) => f.debug_tuple("Error").field(e).finish(),
            EventKind::Batch(events) => f.debug_tuple("Batch").field(&events.len()).finish(),
            EventKind::App(_) => write!(f, "App(..)"),
        }
    }
}
