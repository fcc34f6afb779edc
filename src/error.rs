//! Error types for gmir.

use std::fmt;
use std::io;

/// Result type alias for gmir operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gmir operations.
///
/// Only conditions a user or host can recover from are represented here.
/// Broken internal invariants (wrapping a preformatted line, decoding an
/// incomplete selector) are assertions.
#[derive(Debug)]
pub enum Error {
    /// Reading the gemtext stream failed, or it was not valid UTF-8.
    Io(io::Error),
    /// The stream contained no displayable line.
    EmptyDocument,
    /// A search pattern could not be compiled.
    InvalidPattern(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::EmptyDocument => write!(f, "given gemtext is empty"),
            Self::InvalidPattern(e) => write!(f, "invalid search pattern: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidPattern(e) => Some(e),
            Self::EmptyDocument => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}
