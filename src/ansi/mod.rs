//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::style::{Style, TextAttributes};
use std::io::{self, Write};

/// SGR parameters that switch on the attributes in `attrs`.
#[must_use]
pub fn attribute_codes(attrs: TextAttributes) -> Vec<u8> {
    const CODES: [(TextAttributes, u8); 5] = [
        (TextAttributes::BOLD, 1),
        (TextAttributes::DIM, 2),
        (TextAttributes::ITALIC, 3),
        (TextAttributes::UNDERLINE, 4),
        (TextAttributes::INVERSE, 7),
    ];
    CODES
        .iter()
        .filter(|(flag, _)| attrs.contains(*flag))
        .map(|&(_, code)| code)
        .collect()
}

/// Write a single SGR sequence with `codes`; nothing if there are none.
pub fn write_sgr(w: &mut impl Write, codes: &[u8]) -> io::Result<()> {
    let Some((first, rest)) = codes.split_first() else {
        return Ok(());
    };
    write!(w, "\x1b[{first}")?;
    for code in rest {
        write!(w, ";{code}")?;
    }
    w.write_all(b"m")
}

/// The SGR sequence that switches from the default style to `style`.
#[must_use]
pub fn style_sequence(style: Style) -> String {
    let mut codes = attribute_codes(style.attributes);
    codes.extend(style.fg.map(|c| c.fg_code()));
    if codes.is_empty() {
        return String::new();
    }
    let params: Vec<String> = codes.iter().map(u8::to_string).collect();
    format!("\x1b[{}m", params.join(";"))
}
