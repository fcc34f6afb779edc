//! Gemtext line model and parser.

mod line;
mod parser;

pub use line::{HeadingLevel, Line};
pub use parser::{PREFORMAT_TOGGLE, parse, parse_str};
