//! Self-delimiting numeric selectors.
//!
//! Links and headings are picked by typing their 1-based number without a
//! terminating key. The number of leading zeros announces how many more
//! digits follow: a selector with `L` leading zeros is complete once it is
//! `2L + 1` characters long. `5` selects item 5, `034` selects item 34,
//! `00123` selects item 123.
//!
//! A buffer that grows past its complete length can never become complete.
//! That case is unreachable by typing one digit at a time, because complete
//! buffers are resolved and cleared, so it is left as it is.

/// Whether `selector` is long enough to be resolved.
#[must_use]
pub fn is_complete(selector: &str) -> bool {
    let leading_zeros = selector.bytes().take_while(|&b| b == b'0').count();
    selector.len() == leading_zeros * 2 + 1
}

/// The canonical selector for the 0-based `index`.
///
/// The result is always complete and its length is the column width the
/// selector column needs for that index.
#[must_use]
pub fn from_index(index: usize) -> String {
    let number = (index + 1).to_string();
    format!("{}{number}", "0".repeat(number.len() - 1))
}

/// Decode a complete selector into a 0-based index.
///
/// Returns `None` when the number does not fit into `usize`; no document
/// has that many selectable lines, so callers treat it as out of range.
///
/// # Panics
///
/// Panics if `selector` is not a complete run of ASCII digits. Complete
/// selectors always contain a non-zero digit, so they never decode to 0.
#[must_use]
pub fn to_index(selector: &str) -> Option<usize> {
    assert!(
        is_complete(selector) && selector.bytes().all(|b| b.is_ascii_digit()),
        "invalid selector {selector:?}"
    );
    let number: usize = selector.parse().ok()?;
    assert!(number >= 1, "invalid selector {selector:?}");
    Some(number - 1)
}

/// Number of columns needed to show selectors for `count` items.
///
/// This is the width of the largest selector plus a separating space, or
/// 0 when there is nothing to select.
#[must_use]
pub fn column_width(count: usize) -> usize {
    if count == 0 {
        0
    } else {
        from_index(count - 1).len() + 1
    }
}
