//! Input events.
//!
//! The reader consumes already decoded events. Decoding terminal byte
//! streams into these types is left to the embedding front end.

mod event;
mod keyboard;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
