//! Input event types for terminal input handling.

use std::fmt;

use crate::geometry::Size;

/// A decoded input event produced by an input source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputEvent {
    /// A key was pressed (possibly carrying pasted text).
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(Size),
}

/// A keyboard event.
///
/// Bracketed paste arrives as a key event whose `paste` field carries the
/// pasted text (tab-expanded per the input source's configuration).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Active modifiers.
    pub modifiers: Modifiers,
    /// Pasted text, when this event was produced by a bracketed paste.
    pub paste: Option<String>,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            paste: None,
        }
    }

    /// Create a plain key event with no modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Create a paste-bearing key event.
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            code: KeyCode::Paste,
            modifiers: Modifiers::NONE,
            paste: Some(text.into()),
        }
    }

    /// Check if Ctrl is held.
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt is held.
    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// A key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Escape.
    Escape,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Function key (F1-F12).
    F(u8),
    /// Carrier for bracketed paste (see [`KeyEvent::paste`]).
    Paste,
}

/// Keyboard modifier flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift modifier.
    pub const SHIFT: Self = Self(1);
    /// Ctrl modifier.
    pub const CTRL: Self = Self(2);
    /// Alt/Option modifier.
    pub const ALT: Self = Self(4);
    /// Super/Command modifier.
    pub const SUPER: Self = Self(8);

    /// Check if this modifier set contains the given modifier.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    /// Combine two modifier sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MouseEventKind {
    /// A button was pressed.
    Press,
    /// A button was released.
    Release,
    /// The mouse was moved (while a button is held).
    Drag,
    /// The mouse was moved (no button held).
    Move,
    /// Scroll up.
    ScrollUp,
    /// Scroll down.
    ScrollDown,
}

impl MouseEventKind {
    /// Whether this event is pure motion (reported only under any-motion
    /// tracking).
    pub fn is_motion(self) -> bool {
        matches!(self, Self::Move | Self::Drag)
    }
}

/// A mouse event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// The kind of mouse event.
    pub kind: MouseEventKind,
    /// Column position (0-based).
    pub x: u16,
    /// Row position (0-based).
    pub y: u16,
    /// Active modifiers.
    pub modifiers: Modifiers,
}

// Crossterm conversions

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        Self {
            code: ct.code.into(),
            modifiers: ct.modifiers.into(),
            paste: None,
        }
    }
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(ct: crossterm::event::KeyCode) -> Self {
        match ct {
            crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
            crossterm::event::KeyCode::Enter => KeyCode::Enter,
            crossterm::event::KeyCode::Tab => KeyCode::Tab,
            crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
            crossterm::event::KeyCode::Delete => KeyCode::Delete,
            crossterm::event::KeyCode::Esc => KeyCode::Escape,
            crossterm::event::KeyCode::Up => KeyCode::Up,
            crossterm::event::KeyCode::Down => KeyCode::Down,
            crossterm::event::KeyCode::Left => KeyCode::Left,
            crossterm::event::KeyCode::Right => KeyCode::Right,
            crossterm::event::KeyCode::Home => KeyCode::Home,
            crossterm::event::KeyCode::End => KeyCode::End,
            crossterm::event::KeyCode::PageUp => KeyCode::PageUp,
            crossterm::event::KeyCode::PageDown => KeyCode::PageDown,
            crossterm::event::KeyCode::Insert => KeyCode::Insert,
            crossterm::event::KeyCode::F(n) => KeyCode::F(n),
            _ => KeyCode::Escape, // fallback
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(ct: crossterm::event::KeyModifiers) -> Self {
        let mut m = Modifiers::NONE;
        if ct.contains(crossterm::event::KeyModifiers::SHIFT) {
            m = m | Modifiers::SHIFT;
        }
        if ct.contains(crossterm::event::KeyModifiers::CONTROL) {
            m = m | Modifiers::CTRL;
        }
        if ct.contains(crossterm::event::KeyModifiers::ALT) {
            m = m | Modifiers::ALT;
        }
        if ct.contains(crossterm::event::KeyModifiers::SUPER) {
            m = m | Modifiers::SUPER;
        }
        m
    }
}

impl From<crossterm::event::MouseEvent> for MouseEvent {
    fn from(ct: crossterm::event::MouseEvent) -> Self {
        Self {
            kind: ct.kind.into(),
            x: ct.column,
            y: ct.row,
            modifiers: ct.modifiers.into(),
        }
    }
}

impl From<crossterm::event::MouseEventKind> for MouseEventKind {
    fn from(ct: crossterm::event::MouseEventKind) -> Self {
        match ct {
            crossterm::event::MouseEventKind::Down(_) => MouseEventKind::Press,
            crossterm::event::MouseEventKind::Up(_) => MouseEventKind::Release,
            crossterm::event::MouseEventKind::Drag(_) => MouseEventKind::Drag,
            crossterm::event::MouseEventKind::Moved => MouseEventKind::Move,
            crossterm::event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            crossterm::event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            _ => MouseEventKind::Move, // fallback for ScrollLeft/ScrollRight
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Paste => write!(f, "Paste"),
        }
    }
}
