//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// SGR parameters that switch a single property back off.
pub mod off {
    /// Bold and dim.
    pub const INTENSITY: u8 = 22;
    pub const ITALIC: u8 = 23;
    pub const UNDERLINE: u8 = 24;
    pub const INVERSE: u8 = 27;
    /// Default foreground color.
    pub const FOREGROUND: u8 = 39;
}
