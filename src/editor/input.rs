//! Key identifiers for the virtual keyboard.
//!
//! The keyboard sends discrete key identifier strings and has no release
//! events; modifier keys arrive as their own presses and latch inside the
//! editor.

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Control,
    Shift,
    CapsLock,
}

impl Key {
    /// Decode a key identifier. Unrecognized single characters become
    /// [`Key::Char`]; unrecognized named keys decode to `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let key = match id {
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Control" => Self::Control,
            "Shift" => Self::Shift,
            "CapsLock" => Self::CapsLock,
            _ => {
                let mut chars = id.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Char(c)
            }
        };
        Some(key)
    }
}

/// Shift mapping for the punctuation rows of the keyboard. Stateless
/// configuration, not mutable state.
const SHIFTED_CHARS: [(char, char); 21] = [
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// The shifted form of `c`, or `c` itself when unmapped.
pub fn shifted_char(c: char) -> char {
    SHIFTED_CHARS
        .iter()
        .find(|(plain, _)| *plain == c)
        .map_or(c, |(_, shifted)| *shifted)
}
