//! Text style type for terminal rendering.

use crate::color::Color;

/// Text attribute flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes(u8);

impl Attributes {
    /// No attributes.
    pub const NONE: Self = Self(0);
    /// Bold text.
    pub const BOLD: Self = Self(1);
    /// Dim/faint text.
    pub const DIM: Self = Self(2);
    /// Italic text.
    pub const ITALIC: Self = Self(4);
    /// Underlined text.
    pub const UNDERLINE: Self = Self(8);
    /// Blinking text.
    pub const BLINK: Self = Self(16);
    /// Reverse video.
    pub const REVERSE: Self = Self(32);
    /// Strikethrough text.
    pub const STRIKETHROUGH: Self = Self(64);

    /// Check if this attribute set contains the given attribute.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    /// Combine two attribute sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove the given attributes from this set.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if no attribute is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set or clear the given attribute.
    pub const fn set(self, attr: Self, on: bool) -> Self {
        if on {
            self.union(attr)
        } else {
            self.difference(attr)
        }
    }
}

impl std::ops::BitOr for Attributes {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Style attributes for a piece of text.
///
/// The default style compares equal to "no style" and encodes to no bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Attribute flags.
    pub attrs: Attributes,
    /// OSC 8 hyperlink URL.
    pub link: Option<String>,
}

impl Style {
    /// Create an empty style with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set bold.
    #[must_use]
    pub fn bold(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::BOLD, val);
        self
    }

    /// Set dim.
    #[must_use]
    pub fn dim(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::DIM, val);
        self
    }

    /// Set italic.
    #[must_use]
    pub fn italic(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::ITALIC, val);
        self
    }

    /// Set underline.
    #[must_use]
    pub fn underline(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::UNDERLINE, val);
        self
    }

    /// Set blink.
    #[must_use]
    pub fn blink(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::BLINK, val);
        self
    }

    /// Set reverse video.
    #[must_use]
    pub fn reverse(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::REVERSE, val);
        self
    }

    /// Set strikethrough.
    #[must_use]
    pub fn strikethrough(mut self, val: bool) -> Self {
        self.attrs = self.attrs.set(Attributes::STRIKETHROUGH, val);
        self
    }

    /// Set hyperlink URL.
    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Merge another style on top of this one. The `other` style's
    /// set values take priority.
    #[must_use]
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: self.attrs.union(other.attrs),
            link: other.link.clone().or_else(|| self.link.clone()),
        }
    }

    /// Returns true if no attributes are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
