//! Display width calculation for terminal rendering.
//!
//! Widths follow the East Asian Width rules with ambiguous characters
//! counted as a single column (wcwidth behaviour).

use unicode_width::UnicodeWidthChar;

/// Get the display width of a string in terminal columns.
///
/// This is the sum of the per-scalar widths, which is what the wrap
/// engine accounts with; it does not merge grapheme clusters.
#[must_use]
pub fn display_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    s.chars().map(display_width_char).sum()
}

/// Get the display width of a character in terminal columns.
///
/// This includes a fast path for ASCII printable characters (0x20-0x7E)
/// which are always width 1 and are the most common case.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    // Control characters have width 0
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Check if a character is a zero-width character.
#[must_use]
pub fn is_zero_width(c: char) -> bool {
    display_width_char(c) == 0
}

/// Byte offset of the first character that starts at or after column
/// `columns`.
///
/// A wide character straddling the boundary is skipped entirely, so the
/// returned slice never begins with half a glyph.
#[must_use]
pub fn byte_offset_at_column(s: &str, columns: usize) -> usize {
    let mut seen = 0;
    for (i, c) in s.char_indices() {
        if seen >= columns {
            return i;
        }
        seen += display_width_char(c);
    }
    s.len()
}

/// Longest prefix of `s` that fits within `columns`.
///
/// Zero-width characters directly after the cut stay with the prefix.
#[must_use]
pub fn truncate_to_width(s: &str, columns: usize) -> &str {
    let mut seen = 0;
    for (i, c) in s.char_indices() {
        seen += display_width_char(c);
        if seen > columns {
            return &s[..i];
        }
    }
    s
}
