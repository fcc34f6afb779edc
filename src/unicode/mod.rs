//! Unicode utilities for display width, normalization and grapheme handling.

mod grapheme;
mod normalize;
mod width;

pub use grapheme::{next_grapheme_boundary, prev_grapheme_boundary};
pub use normalize::{is_normalized_nfc, normalize_nfc};
pub use width::{
    byte_offset_at_column, display_width, display_width_char, is_zero_width,
    truncate_to_width,
};
