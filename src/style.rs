//! Display attributes for rendered rows.
//!
//! - [`StyleTag`]: the fixed kind of a row (text, link, heading, ...)
//! - [`TextAttributes`]: bitflags for bold, italic, inverse, ...
//! - [`Style`]: attributes plus an optional foreground color
//! - [`Theme`]: an immutable mapping from every [`StyleTag`] to a [`Style`]
//!
//! # Examples
//!
//! ```
//! use gmir::style::{Color, Style, StyleTag, Theme};
//!
//! let theme = Theme::default().with(StyleTag::Quote, Style::fg(Color::Green));
//! assert_eq!(theme.style_for(StyleTag::Quote).fg, Some(Color::Green));
//! ```

use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes (bold, italic, underline, etc.).
    ///
    /// Attributes are represented as bitflags and can be combined using
    /// bitwise OR. Not all terminals support all attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Swapped foreground/background.
        const INVERSE       = 0x20;
    }
}

/// The eight basic ANSI colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// SGR parameter selecting this color as foreground.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        30 + self as u8
    }
}

/// Row style: attributes plus an optional foreground color.
///
/// `None` means "use terminal default" rather than a specific color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color (None = terminal default).
    pub fg: Option<Color>,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        attributes: TextAttributes::empty(),
    };

    /// Create a style with only foreground color.
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a bold style.
    #[must_use]
    pub const fn bold() -> Self {
        Self {
            fg: None,
            attributes: TextAttributes::BOLD,
        }
    }

    /// Create an italic style.
    #[must_use]
    pub const fn italic() -> Self {
        Self {
            fg: None,
            attributes: TextAttributes::ITALIC,
        }
    }

    /// Create an inverse (swapped fg/bg) style.
    #[must_use]
    pub const fn inverse() -> Self {
        Self {
            fg: None,
            attributes: TextAttributes::INVERSE,
        }
    }

    /// Return a new style with the specified attributes added.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            ..self
        }
    }

    /// Return a new style with the inverse attribute toggled.
    ///
    /// Search highlights invert whatever the row style is, so highlighted
    /// text stays visible inside the inverse status bar too.
    #[must_use]
    pub const fn toggled_inverse(self) -> Self {
        Self {
            attributes: self.attributes.symmetric_difference(TextAttributes::INVERSE),
            ..self
        }
    }

    /// Check if this style has any non-default properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.attributes.is_empty()
    }
}

/// The kind of a rendered row; one tag per gemtext line kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Text,
    Link,
    Preformatted,
    Heading1,
    Heading2,
    Heading3,
    List,
    Quote,
}

impl StyleTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Text,
        Self::Link,
        Self::Preformatted,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::List,
        Self::Quote,
    ];
}

/// Immutable style configuration handed to the rendering layer.
///
/// Changing a style produces a new theme; there is no shared mutable
/// style table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    styles: [Style; 8],
    /// Style of the status bar.
    pub bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = [Style::NONE; 8];
        styles[StyleTag::Link as usize] = Style::fg(Color::Blue);
        styles[StyleTag::Heading1 as usize] = Style::bold();
        styles[StyleTag::Heading2 as usize] = Style::bold();
        styles[StyleTag::Heading3 as usize] = Style::bold();
        styles[StyleTag::Quote as usize] = Style::italic();
        Self {
            styles,
            bar: Style::inverse(),
        }
    }
}

impl Theme {
    /// A theme without any attributes, for output that is not a terminal.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            styles: [Style::NONE; 8],
            bar: Style::NONE,
        }
    }

    /// Style for rows tagged `tag`.
    #[must_use]
    pub const fn style_for(&self, tag: StyleTag) -> Style {
        self.styles[tag as usize]
    }

    /// Return a copy of this theme with `tag` styled as `style`.
    #[must_use]
    pub const fn with(mut self, tag: StyleTag, style: Style) -> Self {
        self.styles[tag as usize] = style;
        self
    }

    /// Return a copy of this theme with a different status bar style.
    #[must_use]
    pub const fn with_bar(mut self, style: Style) -> Self {
        self.bar = style;
        self
    }
}
