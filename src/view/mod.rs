//! Scroll, search and selector state of one document view.
//!
//! A [`ViewState`] owns its [`Document`] and everything needed to decide
//! what is on screen: the first displayed line, how many of its wrapped
//! rows are scrolled past, the horizontal shift, the typed selector and
//! the search state. The reader keeps two independent views, one over the
//! full document and one over its headings (the table of contents).

mod layout;
mod render;
mod scroll;
mod search;

pub use layout::Layout;
pub use render::{Row, StatusBar};
pub use search::Direction;

use crate::document::Document;
use crate::event::{LogLevel, emit_log};
use crate::selector;
use crate::wrap::{WrapCache, WrapResult};
use regex::Regex;
use std::borrow::Cow;
use std::cell::RefCell;

/// Input mode of a view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Regular,
    /// Typing a search term.
    Search,
    /// Typing a search term for reverse search.
    ReverseSearch,
}

impl Mode {
    /// Prompt shown in front of the search term.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Regular => "",
            Self::Search => "/",
            Self::ReverseSearch => "?",
        }
    }

    #[must_use]
    pub const fn is_searching(self) -> bool {
        matches!(self, Self::Search | Self::ReverseSearch)
    }
}

/// Which lines a selector counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectorSpace {
    /// Link lines; the main view.
    #[default]
    Links,
    /// Heading lines; the table of contents.
    Headings,
}

/// What a complete, in-range selector points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// URL of the selected link.
    Link(String),
    /// 0-based index into the heading space.
    Heading(usize),
}

/// Position and input state of one view over a document.
#[derive(Debug)]
pub struct ViewState {
    document: Document,
    /// Index of the first displayed line.
    line: usize,
    /// Number of wrapped rows to skip within the first displayed line.
    line_offset: usize,
    /// Columns preformatted rows are shifted to the left.
    col_offset: usize,
    /// Width of the text column the document is wrapped to.
    width: usize,
    selector: String,
    selector_space: SelectorSpace,
    /// Whether link rows show their URL after the label.
    show_urls: bool,
    pattern: Option<Regex>,
    wraps: RefCell<WrapCache>,

    pub mode: Mode,
    /// The search term while it is being typed.
    pub search_term: String,
    /// Byte index of the cursor within `search_term`.
    pub cursor: usize,
    /// Transient message for the status bar, e.g. "Pattern not found.".
    pub info: Option<String>,
}

impl ViewState {
    /// Create a view at the top of `document`, wrapped to `width` columns.
    #[must_use]
    pub fn new(document: Document, width: usize) -> Self {
        Self {
            document,
            line: 0,
            line_offset: 0,
            col_offset: 0,
            width,
            selector: String::new(),
            selector_space: SelectorSpace::Links,
            show_urls: true,
            pattern: None,
            wraps: RefCell::new(WrapCache::new()),
            mode: Mode::Regular,
            search_term: String::new(),
            cursor: 0,
            info: None,
        }
    }

    /// Use `space` for selector numbering and resolution.
    #[must_use]
    pub fn with_selector_space(mut self, space: SelectorSpace) -> Self {
        self.selector_space = space;
        self
    }

    /// Show or hide link URLs from the start.
    #[must_use]
    pub fn with_show_urls(mut self, show: bool) -> Self {
        self.show_urls = show;
        self
    }

    #[must_use]
    pub const fn show_urls(&self) -> bool {
        self.show_urls
    }

    /// Show or hide link URLs, keeping the line offset legal for the
    /// changed wrapping.
    pub fn set_show_urls(&mut self, show: bool) {
        self.show_urls = show;
        self.fix_line_offset(self.width);
    }

    /// Display text of line `index` under the current URL setting.
    pub(crate) fn display_text(&self, index: usize) -> Cow<'_, str> {
        self.document.lines()[index].display_text_with(self.show_urls)
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Index of the first displayed line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Wrapped rows of the first displayed line that are scrolled past.
    #[must_use]
    pub const fn line_offset(&self) -> usize {
        self.line_offset
    }

    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn selector_space(&self) -> SelectorSpace {
        self.selector_space
    }

    /// The active, compiled search pattern.
    #[must_use]
    pub const fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Wrap result of line `index` at `width`, served from the cache.
    ///
    /// Preformatted lines always occupy a single row.
    pub(crate) fn wrap_at(&self, index: usize, width: usize) -> WrapResult {
        let line = &self.document.lines()[index];
        if !line.is_wrappable() {
            return WrapResult::single_row();
        }
        self.wraps
            .borrow_mut()
            .get(index, line, width, self.show_urls)
    }

    /// Largest legal line offset of line `index` at the current width.
    pub(crate) fn max_line_offset(&self, index: usize) -> usize {
        self.wrap_at(index, self.width).max_line_offset()
    }

    /// Line indices that selectors count in this view.
    #[must_use]
    pub fn selectable_indices(&self) -> Vec<usize> {
        match self.selector_space {
            SelectorSpace::Links => self.document.link_indices(),
            SelectorSpace::Headings => self.document.heading_indices(),
        }
    }

    /// Number of lines that selectors count in this view.
    #[must_use]
    pub fn selectable_count(&self) -> usize {
        self.selectable_indices().len()
    }

    /// The selector typed so far.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Add a single digit to the end of the selector.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in `0..=9`.
    pub fn append_digit(&mut self, digit: u8) {
        assert!(digit <= 9, "'{digit}' is not a digit");
        self.selector.push(char::from(b'0' + digit));
    }

    pub fn clear_selector(&mut self) {
        self.selector.clear();
    }

    #[must_use]
    pub fn is_selector_complete(&self) -> bool {
        selector::is_complete(&self.selector)
    }

    /// Resolve a complete selector against this view's selector space.
    ///
    /// Incomplete selectors resolve to `None` and are kept. Complete
    /// selectors are consumed: the buffer is cleared whether or not the
    /// number is in range.
    pub fn resolve_selector(&mut self) -> Option<ResolvedTarget> {
        if !self.is_selector_complete() {
            return None;
        }
        let typed = std::mem::take(&mut self.selector);
        let indices = self.selectable_indices();
        let target = selector::to_index(&typed).filter(|&i| i < indices.len());
        let Some(index) = target else {
            emit_log(
                LogLevel::Debug,
                &format!("selector {typed} is out of range ({} items)", indices.len()),
            );
            return None;
        };
        let resolved = match self.selector_space {
            SelectorSpace::Links => {
                let url = self.document.lines()[indices[index]].url().unwrap_or_default();
                ResolvedTarget::Link(url.to_owned())
            }
            SelectorSpace::Headings => ResolvedTarget::Heading(index),
        };
        emit_log(LogLevel::Info, &format!("selector {typed} resolved to {resolved:?}"));
        Some(resolved)
    }
}
