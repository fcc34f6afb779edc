//! Keys as the reader sees them.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
    }
}

/// The keys the reader and the line editor respond to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Delete,
    Enter,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// A character key, space included.
    Char(char),
}

impl KeyCode {
    /// The character if this is a character key.
    #[must_use]
    pub const fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The digit value of `0` to `9`.
    #[must_use]
    pub const fn digit(&self) -> Option<u8> {
        match self {
            Self::Char(c @ '0'..='9') => Some(*c as u8 - b'0'),
            _ => None,
        }
    }
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// A character key press without modifiers.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// A key press with Ctrl held.
    #[must_use]
    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Ctrl+C, the interrupt key.
    #[must_use]
    pub fn is_ctrl_c(&self) -> bool {
        self.ctrl() && matches!(self.code, KeyCode::Char('c' | 'C'))
    }

    /// A plain character press, without Ctrl or Alt.
    ///
    /// Shift is allowed since it only changes which character is typed.
    #[must_use]
    pub fn plain_char(&self) -> Option<char> {
        if self.modifiers.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
            None
        } else {
            self.code.char()
        }
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
