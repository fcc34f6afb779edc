//! An immutable, parsed gemtext document.

use crate::error::{Error, Result};
use crate::gemtext::{self, Line};
use crate::unicode::display_width;
use std::io::Read;

/// An ordered, non-empty sequence of lines.
///
/// Link and heading index spaces are derived by linear scan; indices are
/// stable because the line sequence never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Read and parse a gemtext stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails and [`Error::EmptyDocument`]
    /// if the stream contains no line.
    pub fn parse<R: Read>(input: R) -> Result<Self> {
        Self::from_lines(gemtext::parse(input)?)
    }

    /// Build a document from already classified lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDocument`] if `lines` is empty.
    pub fn from_lines(lines: Vec<Line>) -> Result<Self> {
        if lines.is_empty() {
            return Err(Error::EmptyDocument);
        }
        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines; never 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Index of the last line.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Line indices of every link, in document order.
    #[must_use]
    pub fn link_indices(&self) -> Vec<usize> {
        self.indices_where(Line::is_link)
    }

    /// URLs of every link, in document order.
    #[must_use]
    pub fn link_urls(&self) -> Vec<&str> {
        self.lines.iter().filter_map(Line::url).collect()
    }

    /// Line indices of every heading (any level), in document order.
    #[must_use]
    pub fn heading_indices(&self) -> Vec<usize> {
        self.indices_where(Line::is_heading)
    }

    /// A document holding only the heading lines, for a table of contents.
    ///
    /// Returns `None` when there are no headings.
    #[must_use]
    pub fn heading_projection(&self) -> Option<Self> {
        let headings: Vec<Line> = self
            .lines
            .iter()
            .filter(|line| line.is_heading())
            .cloned()
            .collect();
        Self::from_lines(headings).ok()
    }

    /// Text of the first heading, used as the document title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Display width of the widest preformatted line, 0 if there is none.
    #[must_use]
    pub fn max_preformatted_width(&self) -> usize {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Preformatted(text) => Some(display_width(text)),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn indices_where(&self, predicate: impl Fn(&Line) -> bool) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|&(_, line)| predicate(line))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Read a gemtext stream into a [`Document`].
///
/// # Errors
///
/// See [`Document::parse`].
pub fn load_document<R: Read>(input: R) -> Result<Document> {
    Document::parse(input)
}
