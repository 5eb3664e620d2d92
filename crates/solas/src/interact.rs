//! Interactive registries — per-frame click and input-region tables.
//!
//! Both tables are cleared at the start of every render pass and repopulated
//! by interactive views, so a region from a prior frame can never fire.
//! Between renders the runtime consults them to dispatch mouse clicks and to
//! route key events to the focused input.

use unicode_segmentation::UnicodeSegmentation;

use solas_core::event::{KeyCode, KeyEvent};
use solas_core::geometry::{Position, Rect};
use std::sync::Arc;

use crate::event::Event;

/// Thunk invoked when a click region is hit.
pub type ClickThunk = Arc<dyn Fn() -> Option<Event> + Send + Sync>;

/// Thunk invoked with an input region's new value.
pub type InputThunk = Arc<dyn Fn(&str) -> Option<Event> + Send + Sync>;

/// An absolute screen rectangle mapped to a click thunk.
pub struct ClickRegion {
    /// Absolute screen bounds.
    pub bounds: Rect,
    on_click: ClickThunk,
}

/// A registered input field.
pub struct InputRegion {
    /// Stable id, also the focus id.
    pub id: String,
    /// Absolute screen bounds.
    pub bounds: Rect,
    /// Current value (owned by the application, passed in per frame).
    pub value: String,
    /// Text shown when the value is empty.
    pub placeholder: String,
    /// Mask character for secret input.
    pub mask: Option<char>,
    /// Whether Enter inserts a newline instead of submitting.
    pub multiline: bool,
    /// Maximum rendered height for multiline input.
    pub max_height: u16,
    /// Invoked with the edited value.
    pub on_change: Option<InputThunk>,
    /// Invoked with the value on submit.
    pub on_submit: Option<InputThunk>,
}

impl InputRegion {
    /// Create an input region with the given id and current value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounds: Rect::default(),
            value: value.into(),
            placeholder: String::new(),
            mask: None,
            multiline: false,
            max_height: 1,
            on_change: None,
            on_submit: None,
        }
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the mask character.
    #[must_use]
    pub fn mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Allow multiple lines, capped at `max_height` rendered rows.
    #[must_use]
    pub fn multiline(mut self, max_height: u16) -> Self {
        self.multiline = true;
        self.max_height = max_height.max(1);
        self
    }

    /// Set the change thunk.
    #[must_use]
    pub fn on_change(mut self, thunk: impl Fn(&str) -> Option<Event> + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(thunk));
        self
    }

    /// Set the submit thunk.
    #[must_use]
    pub fn on_submit(mut self, thunk: impl Fn(&str) -> Option<Event> + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Arc::new(thunk));
        self
    }

    /// Apply a key event to this region's value.
    ///
    /// Editing is append-oriented: characters append, backspace removes the
    /// last grapheme, Enter submits (or appends a newline when multiline),
    /// and paste-bearing keys append the pasted text. Returns whether the
    /// key was consumed and the thunk's event, if any.
    pub fn apply_key(&self, key: &KeyEvent) -> KeyDispatch {
        if let Some(ref pasted) = key.paste {
            let mut value = self.value.clone();
            value.push_str(pasted);
            return KeyDispatch::consumed(self.changed(&value));
        }

        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                let mut value = self.value.clone();
                value.push(c);
                KeyDispatch::consumed(self.changed(&value))
            }
            KeyCode::Backspace => {
                let mut value = self.value.clone();
                if let Some((offset, _)) = value.grapheme_indices(true).next_back() {
                    value.truncate(offset);
                }
                KeyDispatch::consumed(self.changed(&value))
            }
            KeyCode::Enter if self.multiline => {
                let mut value = self.value.clone();
                value.push('\n');
                KeyDispatch::consumed(self.changed(&value))
            }
            KeyCode::Enter => KeyDispatch::consumed(
                self.on_submit.as_ref().and_then(|t| t(&self.value)),
            ),
            _ => KeyDispatch::ignored(),
        }
    }

    fn changed(&self, value: &str) -> Option<Event> {
        self.on_change.as_ref().and_then(|t| t(value))
    }
}

/// Outcome of routing a key to an input region.
#[derive(Debug, Default)]
pub struct KeyDispatch {
    /// Whether the region consumed the key.
    pub consumed: bool,
    /// Event produced by the region's thunk, to be enqueued.
    pub event: Option<Event>,
}

impl KeyDispatch {
    fn consumed(event: Option<Event>) -> Self {
        Self {
            consumed: true,
            event,
        }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

/// The per-frame interactive registries.
#[derive(Default)]
pub struct Hotspots {
    clicks: Vec<ClickRegion>,
    inputs: Vec<InputRegion>,
}

impl Hotspots {
    /// Create empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both tables (start of a render pass).
    pub fn clear(&mut self) {
        self.clicks.clear();
        self.inputs.clear();
    }

    /// Returns true when both tables are empty.
    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty() && self.inputs.is_empty()
    }

    /// Register a click region with absolute screen bounds.
    pub fn register_click(&mut self, bounds: Rect, on_click: ClickThunk) {
        if bounds.is_empty() {
            return;
        }
        self.clicks.push(ClickRegion { bounds, on_click });
    }

    /// Register an input region (bounds already absolute).
    pub fn register_input(&mut self, region: InputRegion) {
        self.inputs.push(region);
    }

    /// Number of registered click regions.
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Number of registered input regions.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Dispatch a click at an absolute position. The topmost region wins
    /// (reverse insertion order). Returns the thunk's event, if any.
    pub fn click_at(&self, pos: Position) -> Option<Event> {
        self.clicks
            .iter()
            .rev()
            .find(|region| region.bounds.contains(pos))
            .and_then(|region| (region.on_click)())
    }

    /// Whether any click region covers the position.
    pub fn click_target_at(&self, pos: Position) -> bool {
        self.clicks.iter().any(|region| region.bounds.contains(pos))
    }

    /// The topmost input region covering the position.
    pub fn input_at(&self, pos: Position) -> Option<&InputRegion> {
        self.inputs
            .iter()
            .rev()
            .find(|region| region.bounds.contains(pos))
    }

    /// Look up an input region by id.
    pub fn input(&self, id: &str) -> Option<&InputRegion> {
        self.inputs.iter().find(|region| region.id == id)
    }

    /// Ids of registered inputs, in registration order.
    pub fn input_ids(&self) -> Vec<String> {
        self.inputs.iter().map(|region| region.id.clone()).collect()
    }
}
