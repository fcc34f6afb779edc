//! Grapheme cluster boundaries for cursor movement.

use unicode_segmentation::UnicodeSegmentation;

/// Byte offset of the grapheme boundary before `index`.
///
/// Returns 0 when `index` is already at the start.
#[must_use]
pub fn prev_grapheme_boundary(s: &str, index: usize) -> usize {
    s.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i < index)
        .last()
        .unwrap_or(0)
}

/// Byte offset of the grapheme boundary after `index`.
///
/// Returns `s.len()` when `index` is in the last cluster or at the end.
#[must_use]
pub fn next_grapheme_boundary(s: &str, index: usize) -> usize {
    s.grapheme_indices(true)
        .map(|(i, g)| i + g.len())
        .find(|&end| end > index)
        .unwrap_or(s.len())
}
