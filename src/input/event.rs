//! Input events delivered to a reader.

use crate::input::keyboard::KeyEvent;

/// An input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// The screen changed size.
    Resize(ResizeEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// New screen size in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u16,
    pub height: u16,
}

impl ResizeEvent {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}
