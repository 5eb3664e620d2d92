//! Input — a single- or multi-line text field backed by the input registry.
//!
//! The view owns no editing state: the application passes the current value
//! in every frame, and the runtime routes keys to the registered region,
//! invoking the change/submit thunks whose events carry the edited value
//! back to the application.

use solas_core::geometry::{Rect, Size};
use solas_core::style::Style;
use solas_core::text::truncate_to_width;

use std::sync::Arc;

use crate::context::RenderContext;
use crate::event::Event;
use crate::interact::{InputRegion, InputThunk};
use crate::view::View;

use super::clamp_max;

/// A focusable text field.
pub struct Input {
    id: String,
    value: String,
    placeholder: String,
    mask: Option<char>,
    multiline: bool,
    max_height: u16,
    style: Style,
    placeholder_style: Style,
    focused_style: Style,
    on_change: Option<InputThunk>,
    on_submit: Option<InputThunk>,
}

impl Input {
    /// Create an input with a stable id and the current value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            placeholder: String::new(),
            mask: None,
            multiline: false,
            max_height: 1,
            style: Style::default(),
            placeholder_style: Style::default().dim(true),
            focused_style: Style::default().reverse(true),
            on_change: None,
            on_submit: None,
        }
    }

    /// Set the placeholder shown when the value is empty.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Mask every character (e.g. `'*'` for secrets).
    #[must_use]
    pub fn mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Allow multiple lines, rendered up to `max_height` rows.
    #[must_use]
    pub fn multiline(mut self, max_height: u16) -> Self {
        self.multiline = true;
        self.max_height = max_height.max(1);
        self
    }

    /// Set the value style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the thunk invoked with the edited value.
    #[must_use]
    pub fn on_change(
        mut self,
        thunk: impl Fn(&str) -> Option<Event> + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(thunk));
        self
    }

    /// Set the thunk invoked with the value on submit.
    #[must_use]
    pub fn on_submit(
        mut self,
        thunk: impl Fn(&str) -> Option<Event> + Send + Sync + 'static,
    ) -> Self {
        self.on_submit = Some(Arc::new(thunk));
        self
    }

    fn display_lines(&self) -> Vec<String> {
        let shown: String = match self.mask {
            Some(mask) => self.value.chars().map(|c| if c == '\n' { c } else { mask }).collect(),
            None => self.value.clone(),
        };
        if self.multiline {
            shown.split('\n').map(str::to_string).collect()
        } else {
            vec![shown.replace('\n', " ")]
        }
    }
}

impl View for Input {
    fn measure(&self, max_w: u16, max_h: u16) -> Size {
        let rows = if self.multiline {
            (self.value.split('\n').count() as u16).clamp(1, self.max_height)
        } else {
            1
        };
        // Fills the available width; falls back to content width when
        // unconstrained.
        let width = if max_w > 0 {
            max_w
        } else {
            self.display_lines()
                .iter()
                .map(|l| solas_core::text::display_width(l))
                .max()
                .unwrap_or(0)
                .max(solas_core::text::display_width(&self.placeholder))
                .max(1)
        };
        Size::new(width, clamp_max(rows, max_h))
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let w = ctx.width();
        let h = ctx.height();
        if w == 0 || h == 0 {
            return;
        }

        let focused = ctx.is_focused(&self.id);
        let base = if focused {
            self.style.merge(&self.focused_style)
        } else {
            self.style.clone()
        };

        if self.value.is_empty() && !self.placeholder.is_empty() {
            let style = base.merge(&self.placeholder_style);
            ctx.frame()
                .print(0, 0, truncate_to_width(&self.placeholder, w), &style);
        } else {
            for (y, line) in self.display_lines().iter().enumerate() {
                if y as u16 >= h {
                    break;
                }
                ctx.frame()
                    .print(0, y as u16, truncate_to_width(line, w), &base);
            }
        }

        let mut region = InputRegion::new(self.id.clone(), self.value.clone())
            .placeholder(self.placeholder.clone());
        if let Some(mask) = self.mask {
            region = region.mask(mask);
        }
        if self.multiline {
            region = region.multiline(self.max_height);
        }
        region.bounds = Rect::new(0, 0, w, h);
        region.on_change = self.on_change.clone();
        region.on_submit = self.on_submit.clone();
        ctx.register_input(region);
    }
}
