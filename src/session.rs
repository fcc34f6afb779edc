//! Interactive reader session.
//!
//! A [`Reader`] owns the view over the full document and, if the document
//! has headings, a table-of-contents view over them. It maps decoded input
//! events to view operations and tells the host what to do next through
//! [`Action`]. Painting is the host's business: it asks for
//! [`visible_rows`](Reader::visible_rows) and the
//! [`status_bar`](Reader::status_bar), or lets [`Reader::render`] write
//! both through an [`AnsiWriter`].

use crate::ansi::AnsiWriter;
use crate::document::Document;
use crate::event::{FOLLOW_LINK, LogLevel, emit_event, emit_log};
use crate::input::{Event, KeyCode, KeyEvent};
use crate::line_edit::{EditStatus, LineEditor};
use crate::style::Theme;
use crate::view::{
    Direction, Layout, Mode, ResolvedTarget, Row, SelectorSpace, StatusBar, ViewState,
};
use std::io::{self, Write};

/// Reader configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Widest text column; wider screens get centered text.
    pub max_text_width: usize,
    /// Columns shifted per Left/Right key press.
    pub col_step: usize,
    /// Show link URLs after their labels.
    pub show_urls: bool,
    pub theme: Theme,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_text_width: 72,
            col_step: 4,
            show_urls: true,
            theme: Theme::default(),
        }
    }
}

/// What the host should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Redraw and wait for the next event.
    Continue,
    /// Leave the reader.
    Quit,
    /// The user selected a link; the URL is passed on unresolved.
    FollowLink(String),
}

/// State of one reading session.
#[derive(Debug)]
pub struct Reader {
    main: ViewState,
    toc: Option<ViewState>,
    showing_toc: bool,
    editor: LineEditor,
    options: ReaderOptions,
    screen_width: usize,
    screen_height: usize,
}

impl Reader {
    /// Start reading `document` on a screen of the given size.
    #[must_use]
    pub fn new(
        document: Document,
        screen_width: usize,
        screen_height: usize,
        options: ReaderOptions,
    ) -> Self {
        let toc = document.heading_projection().map(|headings| {
            let count = headings.len();
            let layout = Layout::new(screen_width, count, options.max_text_width);
            ViewState::new(headings, layout.text_width)
                .with_selector_space(SelectorSpace::Headings)
        });
        let main_layout = Layout::new(
            screen_width,
            document.link_indices().len(),
            options.max_text_width,
        );
        let main = ViewState::new(document, main_layout.text_width)
            .with_show_urls(options.show_urls);
        Self {
            main,
            toc,
            showing_toc: false,
            editor: LineEditor::new(),
            options,
            screen_width,
            screen_height,
        }
    }

    /// The view over the full document.
    #[must_use]
    pub const fn main_view(&self) -> &ViewState {
        &self.main
    }

    /// The table-of-contents view; `None` if the document has no headings.
    #[must_use]
    pub const fn toc_view(&self) -> Option<&ViewState> {
        self.toc.as_ref()
    }

    #[must_use]
    pub const fn is_showing_toc(&self) -> bool {
        self.showing_toc
    }

    /// The view that is currently on screen.
    #[must_use]
    pub fn active(&self) -> &ViewState {
        match &self.toc {
            Some(toc) if self.showing_toc => toc,
            _ => &self.main,
        }
    }

    fn active_mut(&mut self) -> &mut ViewState {
        match &mut self.toc {
            Some(toc) if self.showing_toc => toc,
            _ => &mut self.main,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// The search history shared by both views.
    #[must_use]
    pub fn search_history(&self) -> &[String] {
        self.editor.history()
    }

    /// Column layout of the active view.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(
            self.screen_width,
            self.active().selectable_count(),
            self.options.max_text_width,
        )
    }

    /// Rows of the active view that fit above the status bar.
    ///
    /// Empty when the screen is too small to draw anything.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<Row> {
        let layout = self.layout();
        if !layout.fits(self.screen_height) {
            return Vec::new();
        }
        self.active()
            .visible_rows(layout.text_width, self.screen_height - 1)
    }

    #[must_use]
    pub fn status_bar(&self) -> StatusBar {
        self.active().status_bar(self.screen_width)
    }

    /// Apply one input event.
    pub fn handle_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Resize(size) => {
                self.resize(usize::from(size.width), usize::from(size.height));
                Action::Continue
            }
            Event::Key(key) if self.active().mode.is_searching() => {
                self.handle_search_key(key);
                Action::Continue
            }
            Event::Key(key) => self.handle_key(key),
        }
    }

    /// Adopt a new screen size, keeping both views at legal positions.
    pub fn resize(&mut self, screen_width: usize, screen_height: usize) {
        emit_log(
            LogLevel::Debug,
            &format!("resize to {screen_width}x{screen_height}"),
        );
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        let max_text_width = self.options.max_text_width;
        for view in std::iter::once(&mut self.main).chain(self.toc.as_mut()) {
            let layout = Layout::new(screen_width, view.selectable_count(), max_text_width);
            view.fix_line_offset(layout.text_width);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Action {
        self.active_mut().info = None;
        if key.is_ctrl_c() {
            return Action::Quit;
        }
        let half_page = isize::try_from(self.screen_height / 2).unwrap_or(isize::MAX);
        let col_step = isize::try_from(self.options.col_step).unwrap_or(isize::MAX);

        match key.code {
            KeyCode::Up => self.active_mut().scroll(1),
            KeyCode::Down => self.active_mut().scroll(-1),
            KeyCode::PageUp => self.active_mut().scroll(half_page),
            KeyCode::PageDown => self.active_mut().scroll(-half_page),
            KeyCode::Left => self.active_mut().shift_columns(-col_step),
            KeyCode::Right => self.active_mut().shift_columns(col_step),
            KeyCode::Esc => {
                if self.showing_toc && self.active().selector().is_empty() {
                    self.set_showing_toc(false);
                } else {
                    self.active_mut().clear_selector();
                }
            }
            _ => match (key.plain_char(), key.code.digit()) {
                (Some(_), Some(digit)) => return self.handle_digit(digit),
                (Some(c), None) => return self.handle_char(c),
                (None, _) => {}
            },
        }
        Action::Continue
    }

    fn handle_digit(&mut self, digit: u8) -> Action {
        self.active_mut().append_digit(digit);
        self.resolve_selector()
    }

    fn handle_char(&mut self, c: char) -> Action {
        let view = self.active_mut();
        match c {
            'q' => return Action::Quit,
            'g' => view.scroll_to_top(),
            'G' => view.scroll_to_bottom(),
            'h' => view.scroll_to_next_heading(),
            'H' => view.scroll_to_prev_heading(),
            'n' => {
                if !view.scroll_to_next_match(Direction::Forward, true) {
                    view.info = Some("No further match found.".into());
                }
            }
            'p' => {
                if !view.scroll_to_next_match(Direction::Backward, true) {
                    view.info = Some("No previous match found.".into());
                }
            }
            '/' | '?' => {
                view.clear_selector();
                view.mode = if c == '/' { Mode::Search } else { Mode::ReverseSearch };
                view.search_term.clear();
                view.cursor = 0;
            }
            't' => {
                if self.toc.is_some() {
                    let show = !self.showing_toc;
                    self.set_showing_toc(show);
                } else {
                    self.main.info = Some("No headings.".into());
                }
            }
            _ => {}
        }
        Action::Continue
    }

    fn resolve_selector(&mut self) -> Action {
        match self.active_mut().resolve_selector() {
            Some(ResolvedTarget::Link(url)) => {
                emit_event(FOLLOW_LINK, &url);
                Action::FollowLink(url)
            }
            Some(ResolvedTarget::Heading(n)) => {
                self.main.scroll_to_nth_heading(n);
                self.set_showing_toc(false);
                Action::Continue
            }
            None => Action::Continue,
        }
    }

    fn set_showing_toc(&mut self, show: bool) {
        if self.showing_toc == show {
            return;
        }
        self.active_mut().clear_selector();
        self.showing_toc = show;
        emit_log(
            LogLevel::Info,
            if show { "showing table of contents" } else { "showing document" },
        );
    }

    fn handle_search_key(&mut self, key: &KeyEvent) {
        let status = self.editor.process_key(key);
        let (input, cursor) = (self.editor.input().to_owned(), self.editor.cursor());
        let view = self.active_mut();
        match status {
            EditStatus::Reading => {
                view.search_term = input;
                view.cursor = cursor;
            }
            EditStatus::Done(term) => {
                let direction = if view.mode == Mode::ReverseSearch {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                view.mode = Mode::Regular;
                view.search_term.clear();
                view.cursor = 0;
                if view.set_pattern(&term).is_err() {
                    view.info = Some("Invalid pattern".into());
                } else if !view.scroll_to_next_match(direction, false) {
                    view.info = Some("Pattern not found.".into());
                }
            }
            EditStatus::Aborted => {
                view.mode = Mode::Regular;
                view.search_term.clear();
                view.cursor = 0;
                view.clear_pattern();
            }
        }
    }

    /// Paint the active view and the status bar.
    ///
    /// Rows below the end of the document are left blank so that exactly
    /// one screen is written. Nothing but the bar is written when the
    /// screen is too small.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn render<W: Write>(&self, out: &mut AnsiWriter<W>) -> io::Result<()> {
        let layout = self.layout();
        let rows = self.visible_rows();
        for row in &rows {
            out.write_row(row, &layout, &self.options.theme);
        }
        let body_height = self.screen_height.saturating_sub(1);
        out.write_blank_lines(body_height.saturating_sub(rows.len()));
        out.write_status_bar(&self.status_bar(), self.options.theme.bar);
        out.flush()
    }
}
