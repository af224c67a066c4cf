//! Button input and routing
//!
//! Keys arrive already debounced from the button decoder. Routing picks
//! the key handler for the current mode; the executor owns the handlers.

use super::machine::Mode;

/// Front panel keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Right,
    Up,
    Down,
    Left,
    Select,
    /// No key pressed
    None,
}

// Raw key ids produced by the button ladder decoder
const KEY_RIGHT: i8 = 1;
const KEY_UP: i8 = 2;
const KEY_DOWN: i8 = 3;
const KEY_LEFT: i8 = 4;
const KEY_SELECT: i8 = 5;
const KEY_NONE: i8 = -1;

impl Key {
    /// Parse a raw key id; unknown ids yield `None`
    pub fn from_id(id: i8) -> Option<Self> {
        match id {
            KEY_RIGHT => Some(Key::Right),
            KEY_UP => Some(Key::Up),
            KEY_DOWN => Some(Key::Down),
            KEY_LEFT => Some(Key::Left),
            KEY_SELECT => Some(Key::Select),
            KEY_NONE => Some(Key::None),
            _ => None,
        }
    }

    /// Convert to the raw key id
    pub fn id(self) -> i8 {
        match self {
            Key::Right => KEY_RIGHT,
            Key::Up => KEY_UP,
            Key::Down => KEY_DOWN,
            Key::Left => KEY_LEFT,
            Key::Select => KEY_SELECT,
            Key::None => KEY_NONE,
        }
    }

    /// Returns the adjustment direction as a signed delta (-1, 0, or +1)
    pub fn adjust_delta(self) -> i8 {
        match self {
            Key::Up => 1,
            Key::Down => -1,
            _ => 0,
        }
    }
}

/// A debounced key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: Key,
    /// Auto-repeat while the key is held down
    pub held: bool,
}

impl KeyEvent {
    /// A single press
    pub const fn pressed(key: Key) -> Self {
        Self { key, held: false }
    }

    /// An auto-repeat of a held key
    pub const fn held(key: Key) -> Self {
        Self { key, held: true }
    }
}

/// Key handler selected for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handler {
    Menu,
    Time,
    Temp,
    Exec,
    Done,
}

/// Route a key to the handler for the current mode
///
/// `Key::None` and any key during a transient step move route nowhere.
pub fn route(mode: Mode, key: Key) -> Option<Handler> {
    if key == Key::None {
        return None;
    }

    match mode {
        Mode::Menu => Some(Handler::Menu),
        Mode::TimeEdit => Some(Handler::Time),
        Mode::TempEdit => Some(Handler::Temp),
        Mode::Exec => Some(Handler::Exec),
        Mode::Done => Some(Handler::Done),
        Mode::StepNext | Mode::StepPrev => None,
    }
}
