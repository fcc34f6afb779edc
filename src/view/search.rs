//! Regex search that respects wrap geometry.

use super::ViewState;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::wrap::WrapResult;
use regex::Regex;
use std::ops::Range;

/// Direction of a search scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl ViewState {
    /// Compile `pattern` and make it the active search pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) if
    /// the pattern does not compile. The previous pattern and the scroll
    /// position are left untouched in that case.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<()> {
        match Regex::new(pattern) {
            Ok(re) => {
                self.pattern = Some(re);
                Ok(())
            }
            Err(e) => {
                emit_log(LogLevel::Warn, &format!("invalid search pattern {pattern:?}: {e}"));
                Err(e.into())
            }
        }
    }

    /// Drop the active search pattern and its highlights.
    pub fn clear_pattern(&mut self) {
        self.pattern = None;
    }

    /// Byte ranges of all matches of the active pattern in line `index`.
    #[must_use]
    pub fn matches_in(&self, index: usize) -> Vec<Range<usize>> {
        let Some(re) = &self.pattern else {
            return Vec::new();
        };
        let text = self.display_text(index);
        re.find_iter(&text).map(|m| m.range()).collect()
    }

    /// Scroll to the next wrapped row holding a match.
    ///
    /// Forward scans go down from the current position, backward scans go
    /// up. With `skip_current` the current row itself is not a candidate.
    /// Returns false and leaves the position untouched when there is no
    /// (further) match or no active pattern.
    pub fn scroll_to_next_match(&mut self, direction: Direction, skip_current: bool) -> bool {
        if self.pattern.is_none() {
            return false;
        }
        let found = match direction {
            Direction::Forward => self.find_forward(skip_current),
            Direction::Backward => self.find_backward(skip_current),
        };
        match found {
            Some((line, offset)) => {
                self.line = line;
                self.line_offset = offset;
                true
            }
            None => false,
        }
    }

    fn find_forward(&self, skip_current: bool) -> Option<(usize, usize)> {
        (self.line..self.document.len()).find_map(|index| {
            let rows = self.rows_with_matches(index)?;
            rows.into_iter()
                .find(|&row| {
                    index > self.line
                        || (skip_current && row > self.line_offset)
                        || (!skip_current && row >= self.line_offset)
                })
                .map(|row| (index, row))
        })
    }

    fn find_backward(&self, skip_current: bool) -> Option<(usize, usize)> {
        (0..=self.line).rev().find_map(|index| {
            let rows = self.rows_with_matches(index)?;
            rows.into_iter()
                .rev()
                .find(|&row| {
                    index < self.line
                        || (skip_current && row < self.line_offset)
                        || (!skip_current && row <= self.line_offset)
                })
                .map(|row| (index, row))
        })
    }

    /// Wrapped rows of line `index` that contain the start of a match, in
    /// ascending order; `None` if the line has no match at all.
    ///
    /// A preformatted line is a single row.
    fn rows_with_matches(&self, index: usize) -> Option<Vec<usize>> {
        let matches = self.matches_in(index);
        if matches.is_empty() {
            return None;
        }
        let wrap = self.wrap_at(index, self.width);
        Some(rows_with_matches(&wrap, &matches))
    }
}

/// Map every match start to its wrapped row, dropping repeats.
pub(crate) fn rows_with_matches(wrap: &WrapResult, matches: &[Range<usize>]) -> Vec<usize> {
    let mut rows: Vec<usize> = matches.iter().map(|m| wrap.row_of(m.start)).collect();
    rows.dedup();
    rows
}
