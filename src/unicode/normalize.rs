//! Unicode normalization helpers.

use unicode_normalization::UnicodeNormalization;

/// Normalize `text` to NFC (canonical composition).
///
/// Already-composed input is returned without re-running the composer.
#[must_use]
pub fn normalize_nfc(text: &str) -> String {
    if is_normalized_nfc(text) {
        return text.to_owned();
    }
    text.nfc().collect()
}

/// Check whether `text` is already NFC normalized.
#[must_use]
pub fn is_normalized_nfc(text: &str) -> bool {
    unicode_normalization::is_nfc(text)
}
