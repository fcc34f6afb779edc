//! Typed gemtext lines.

use crate::style::StyleTag;
use std::borrow::Cow;

/// Heading depth, `#` to `###`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    /// The marker written before the heading text, including its space.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::One => "# ",
            Self::Two => "## ",
            Self::Three => "### ",
        }
    }
}

/// A single classified line of a gemtext document.
///
/// Lines are immutable once parsed. Every variant except
/// [`Line::Preformatted`] is reflowed to the display width; preformatted
/// lines are shown verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Plain text, surrounding whitespace trimmed.
    Text(String),
    /// `=> url label`.
    Link { url: String, label: String },
    /// A line inside a ```` ``` ```` block.
    Preformatted(String),
    /// `#`, `##` or `###` heading.
    Heading { level: HeadingLevel, text: String },
    /// `* item`.
    List(String),
    /// `> quote`.
    Quote(String),
}

impl Line {
    /// The text as it is shown on screen, including the kind's marker.
    ///
    /// Links are displayed as `=> label (url)`.
    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) | Self::Preformatted(text) => Cow::Borrowed(text),
            Self::Link { url, label } => Cow::Owned(format!("=> {label} ({url})")),
            Self::Heading { level, text } => Cow::Owned(format!("{}{text}", level.marker())),
            Self::List(text) => Cow::Owned(format!("* {text}")),
            Self::Quote(text) => Cow::Owned(format!("> {text}")),
        }
    }

    /// Like [`display_text`](Self::display_text), but links show only
    /// their label unless `show_url` is set.
    #[must_use]
    pub fn display_text_with(&self, show_url: bool) -> Cow<'_, str> {
        match self {
            Self::Link { label, .. } if !show_url => Cow::Owned(format!("=> {label}")),
            _ => self.display_text(),
        }
    }

    /// Whether the line is reflowed to the display width.
    #[must_use]
    pub const fn is_wrappable(&self) -> bool {
        !matches!(self, Self::Preformatted(_))
    }

    /// Columns reserved at the start of continuation rows.
    ///
    /// This is also the width of the marker that is never wrapped. All
    /// marker characters are single-column ASCII.
    #[must_use]
    pub const fn indent_width(&self) -> usize {
        match self {
            Self::Text(_) | Self::Preformatted(_) => 0,
            Self::Link { .. } => 3,
            Self::Heading { level, .. } => match level {
                HeadingLevel::One => 2,
                HeadingLevel::Two => 3,
                HeadingLevel::Three => 4,
            },
            Self::List(_) | Self::Quote(_) => 2,
        }
    }

    /// The display attribute tag for this kind of line.
    #[must_use]
    pub const fn style_tag(&self) -> StyleTag {
        match self {
            Self::Text(_) => StyleTag::Text,
            Self::Link { .. } => StyleTag::Link,
            Self::Preformatted(_) => StyleTag::Preformatted,
            Self::Heading { level, .. } => match level {
                HeadingLevel::One => StyleTag::Heading1,
                HeadingLevel::Two => StyleTag::Heading2,
                HeadingLevel::Three => StyleTag::Heading3,
            },
            Self::List(_) => StyleTag::List,
            Self::Quote(_) => StyleTag::Quote,
        }
    }

    /// The link target, if this is a link line.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Link { url, .. } => Some(url),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    #[must_use]
    pub const fn is_heading(&self) -> bool {
        matches!(self, Self::Heading { .. })
    }
}
