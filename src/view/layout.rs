//! Horizontal screen layout.
//!
//! ```text
//! ┌───────┬──────────┬──────────┬───────────────┐
//! │ left  │ selector │ rendered │ right space   │
//! │ space │ numbers  │ gemtext  │               │
//! ├───────┴──────────┴──────────┴───────────────┤
//! │ bar                                         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The text column aims for a comfortable reading width. Preformatted
//! rows may run into the right space. The selector column is always wide
//! enough for the largest selector in the view.

use crate::selector;

/// Column split of one screen row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    /// Blank columns before the selector column.
    pub left_space: usize,
    /// Width of the selector column, including a separating space.
    pub selector_width: usize,
    /// Width of the text column the document is wrapped to.
    pub text_width: usize,
    screen_width: usize,
}

impl Layout {
    /// Smallest text column that is still drawn.
    pub const MIN_TEXT_WIDTH: usize = 8;

    /// Split `screen_width` for a view with `selectable_count` numbered lines.
    #[must_use]
    pub fn new(screen_width: usize, selectable_count: usize, max_text_width: usize) -> Self {
        let selector_width = selector::column_width(selectable_count);
        let (left_space, text_width) = if screen_width >= max_text_width + selector_width {
            let space = screen_width - (max_text_width + selector_width);
            let left = if space > selector_width + 2 {
                (space / 2).saturating_sub(selector_width)
            } else {
                0
            };
            (left, max_text_width)
        } else {
            (0, screen_width.saturating_sub(selector_width))
        };
        Self {
            left_space,
            selector_width,
            text_width,
            screen_width,
        }
    }

    /// Whether a screen of `height` rows is large enough to draw anything.
    ///
    /// One row is reserved for the status bar.
    #[must_use]
    pub const fn fits(&self, height: usize) -> bool {
        self.screen_width >= self.selector_width + Self::MIN_TEXT_WIDTH && height >= 2
    }

    #[must_use]
    pub const fn screen_width(&self) -> usize {
        self.screen_width
    }

    /// Column at which the text column starts.
    #[must_use]
    pub const fn text_start(&self) -> usize {
        self.left_space + self.selector_width
    }
}
