//! Abstract input keys
//!
//! The input source only reports discrete key-down/key-up events. The game
//! owns the authoritative pressed-key map built from those events.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Fire,
    Pause,
    Enter,
    /// Any other key, by raw code
    Other(u32),
}

impl Key {
    /// Map a DOM `keyCode` to a logical key
    pub fn from_key_code(code: u32) -> Self {
        match code {
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            32 => Key::Fire,
            80 => Key::Pause,
            13 => Key::Enter,
            other => Key::Other(other),
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    held: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(37), Key::Left);
        assert_eq!(Key::from_key_code(39), Key::Right);
        assert_eq!(Key::from_key_code(38), Key::Up);
        assert_eq!(Key::from_key_code(32), Key::Fire);
        assert_eq!(Key::from_key_code(80), Key::Pause);
        assert_eq!(Key::from_key_code(13), Key::Enter);
        assert_eq!(Key::from_key_code(65), Key::Other(65));
    }

    #[test]
    fn test_press_release() {
        let mut keys = PressedKeys::new();
        keys.press(Key::Left);
        keys.press(Key::Left);
        assert!(keys.is_pressed(Key::Left));
        keys.release(Key::Left);
        assert!(!keys.is_pressed(Key::Left));
        // Releasing a key that was never pressed is harmless
        keys.release(Key::Right);
        assert!(!keys.is_pressed(Key::Right));
    }
}
