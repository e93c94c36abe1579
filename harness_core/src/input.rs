//! Arrow-key direction state.
//!
//! Key events are folded into a four-flag [`InputState`] owned by the run
//! loop. Each flag holds whatever the last event for its key said; keys
//! outside the direction table are ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Keys the harness understands. Everything else arrives as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    P,
    Unknown,
}

impl KeyCode {
    /// Parses web-style key names (`"ArrowUp"`, `"Escape"`, `"KeyP"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => KeyCode::ArrowUp,
            "ArrowDown" | "Down" => KeyCode::ArrowDown,
            "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
            "ArrowRight" | "Right" => KeyCode::ArrowRight,
            "Escape" | "Esc" => KeyCode::Escape,
            "KeyP" | "p" | "P" => KeyCode::P,
            _ => KeyCode::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp => Some(Direction::Up),
            KeyCode::ArrowDown => Some(Direction::Down),
            KeyCode::ArrowLeft => Some(Direction::Left),
            KeyCode::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn on_key_down(&mut self, code: KeyCode) {
        self.set(code, true);
    }

    #[inline]
    pub fn on_key_up(&mut self, code: KeyCode) {
        self.set(code, false);
    }

    #[inline]
    pub fn apply(&mut self, code: KeyCode, state: KeyState) {
        match state {
            KeyState::Pressed => self.on_key_down(code),
            KeyState::Released => self.on_key_up(code),
        }
    }

    #[inline]
    pub fn is_down(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn set(&mut self, code: KeyCode, value: bool) {
        let Some(dir) = Direction::from_key(code) else { return };
        let flag = match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *flag = value;
    }
}
