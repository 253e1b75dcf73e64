//! Keyboard key tracking.

use serde::{Deserialize, Serialize};

use super::button::ButtonState;

/// The keys the visualizer tracks — the keys present on the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    W,
    A,
    S,
    D,
    Space,
}

impl Key {
    pub const COUNT: usize = 15;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
        Key::Num0,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Space,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame keyboard snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardInput {
    keys: [ButtonState; Key::COUNT],
}

impl KeyboardInput {
    #[inline]
    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    #[inline]
    pub fn key_mut(&mut self, key: Key) -> &mut ButtonState {
        &mut self.keys[key.index()]
    }

    /// All key states in `Key::ALL` order.
    #[inline]
    pub fn as_array(&self) -> &[ButtonState; Key::COUNT] {
        &self.keys
    }

    /// Carry every key's hold level forward, clearing edges.
    pub fn carry_from(&mut self, prev: &KeyboardInput) {
        for (dst, src) in self.keys.iter_mut().zip(prev.keys.iter()) {
            *dst = ButtonState::carry(*src);
        }
    }

    pub fn reset(&mut self) {
        for key in &mut self.keys {
            key.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_index_once() {
        let mut seen = [false; Key::COUNT];
        for key in Key::ALL {
            assert!(!seen[key.index()], "{:?} appears twice", key);
            seen[key.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_carry_from_per_key() {
        let mut prev = KeyboardInput::default();
        prev.key_mut(Key::W).held = true;
        prev.key_mut(Key::W).pressed = true;

        let mut cur = KeyboardInput::default();
        cur.carry_from(&prev);
        assert_eq!(cur.key(Key::W).as_array(), [false, true, false]);
        assert_eq!(cur.key(Key::A), ButtonState::default());
    }
}
