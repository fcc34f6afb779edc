//! Width-aware reflow of gemtext lines.
//!
//! The wrap engine decides where a line's display text breaks so that
//! every row fits a target column width. Breakpoints are byte offsets into
//! the full display text, including the kind's marker (`=> `, `## `, ...),
//! which is never wrapped itself. Continuation rows are rendered with the
//! line's indent width in front of them, so the budget for every row after
//! the marker is `width - indent`.
//!
//! Breaks prefer the last space that fits; a word longer than the budget is
//! hard-broken at a scalar boundary; a single scalar wider than the budget
//! gets a row of its own. Text without spaces (CJK) therefore breaks purely
//! on width.

use crate::gemtext::Line;
use crate::unicode::{display_width, display_width_char, is_zero_width};
use std::collections::HashMap;
use std::ops::Range;

/// Wrap breakpoints of one line at one width.
///
/// Row `k` spans from breakpoint `k - 1` (or 0) to breakpoint `k` (or the
/// end of the trimmed text). An empty result means the line is shown on a
/// single row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrapResult {
    breakpoints: Vec<usize>,
}

impl WrapResult {
    /// A result without breakpoints.
    #[must_use]
    pub const fn single_row() -> Self {
        Self {
            breakpoints: Vec::new(),
        }
    }

    /// Strictly increasing byte offsets at which rows start (after the first).
    #[must_use]
    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    /// Number of rows the line occupies.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.breakpoints.len() + 1
    }

    /// Largest legal wrapped-row offset into the line.
    #[must_use]
    pub fn max_line_offset(&self) -> usize {
        self.breakpoints.len()
    }

    /// The row that contains byte `index`.
    ///
    /// This is the smallest `k` with `index < breakpoints[k]`, or the last
    /// row when no breakpoint lies after `index`.
    #[must_use]
    pub fn row_of(&self, index: usize) -> usize {
        self.breakpoints.partition_point(|&bp| bp <= index)
    }

    /// Byte ranges of every row within `text`.
    ///
    /// Trailing spaces of `text` are not part of any row.
    pub fn row_ranges(&self, text: &str) -> impl Iterator<Item = Range<usize>> {
        let end = text.trim_end_matches(' ').len();
        let starts = std::iter::once(0).chain(self.breakpoints.iter().copied());
        let ends = self.breakpoints.iter().copied().chain(std::iter::once(end));
        starts.zip(ends).map(|(start, end)| start..end.max(start))
    }
}

impl From<Vec<usize>> for WrapResult {
    fn from(breakpoints: Vec<usize>) -> Self {
        debug_assert!(breakpoints.windows(2).all(|w| w[0] < w[1]));
        Self { breakpoints }
    }
}

/// Compute the wrap breakpoints of `line` for `width` columns.
///
/// # Panics
///
/// Panics if `line` is preformatted; those lines are never reflowed.
#[must_use]
pub fn wrap(line: &Line, width: usize) -> WrapResult {
    wrap_with(line, width, true)
}

/// [`wrap`] for the display text with link URLs shown only if `show_url`.
///
/// # Panics
///
/// Panics if `line` is preformatted.
#[must_use]
pub fn wrap_with(line: &Line, width: usize, show_url: bool) -> WrapResult {
    assert!(
        line.is_wrappable(),
        "tried to wrap a preformatted line: {line:?}"
    );
    let text = line.display_text_with(show_url);
    WrapResult::from(wrap_indexes(&text, width, line.indent_width()))
}

/// Number of wrapped rows past the first; 0 for lines that are not wrappable.
#[must_use]
pub fn max_line_offset(line: &Line, width: usize) -> usize {
    if line.is_wrappable() {
        wrap(line, width).max_line_offset()
    } else {
        0
    }
}

/// Byte offsets before which `text` is wrapped.
///
/// `indent` is the width of the leading marker, which is never wrapped and
/// consists of single-column characters. When `width` leaves no room after
/// the indent nothing is wrapped at all.
#[must_use]
pub fn wrap_indexes(text: &str, width: usize, indent: usize) -> Vec<usize> {
    if width == 0 || width <= indent {
        return Vec::new();
    }
    let trimmed = text.trim_end_matches(' ');
    let mut remaining = display_width(trimmed);
    if remaining <= width {
        return Vec::new();
    }

    let budget = width - indent;
    let mut breaks = Vec::new();
    let mut i = indent;
    remaining = remaining.saturating_sub(indent);
    while remaining > budget {
        let tail = &trimmed[i..];
        if is_single_scalar(tail) {
            // The last row is one scalar wider than the budget.
            break;
        }
        let start = i;
        i += index_of_next_wrap_char(tail, budget) + 1;
        if i >= trimmed.len() {
            break;
        }
        remaining -= display_width(&trimmed[start..i]);
        breaks.push(i);
    }
    breaks
}

fn is_single_scalar(text: &str) -> bool {
    text.chars().nth(1).is_none()
}

/// Index of the last byte of the next row of `text`, which must not fit
/// within `width`.
///
/// Zero-width characters and spaces directly after the chosen position
/// are pulled onto the row, so the following row starts with a visible
/// character.
fn index_of_next_wrap_char(text: &str, width: usize) -> usize {
    // A space right at the boundary may hang off the end of the row.
    let start = last_space_within_width(text, width + 1)
        .unwrap_or_else(|| last_index_within_width(text, width));
    let mut index = start;
    for (offset, c) in text[start + 1..].char_indices() {
        if c != ' ' && !is_zero_width(c) {
            break;
        }
        index = start + offset + c.len_utf8();
    }
    index
}

fn last_space_within_width(text: &str, width: usize) -> Option<usize> {
    let mut last_space = None;
    let mut seen = 0;
    for (i, c) in text.char_indices() {
        seen += display_width_char(c);
        if seen > width {
            break;
        }
        if c == ' ' {
            last_space = Some(i);
        }
    }
    last_space
}

/// Index of the last byte within `text` that fits within `width`.
///
/// If not even the first scalar fits, the index of its last byte is
/// returned so that it overflows on a row of its own.
fn last_index_within_width(text: &str, width: usize) -> usize {
    let mut seen = 0;
    for (i, c) in text.char_indices() {
        seen += display_width_char(c);
        if seen > width {
            return if i == 0 { c.len_utf8() - 1 } else { i - 1 };
        }
    }
    text.len().saturating_sub(1)
}

/// Memoized wrap results for a single width and URL setting.
///
/// Results depend only on the line, the width and whether link URLs are
/// shown, so entries are keyed by line index and dropped wholesale
/// whenever a different width or URL setting is asked for.
#[derive(Debug, Default)]
pub struct WrapCache {
    width: usize,
    show_urls: bool,
    entries: HashMap<usize, WrapResult>,
}

impl WrapCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap result for the line at `index`, computing it on a miss.
    pub fn get(&mut self, index: usize, line: &Line, width: usize, show_urls: bool) -> WrapResult {
        if width != self.width || show_urls != self.show_urls {
            self.invalidate();
            self.width = width;
            self.show_urls = show_urls;
        }
        self.entries
            .entry(index)
            .or_insert_with(|| wrap_with(line, width, show_urls))
            .clone()
    }

    /// Drop every memoized entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
