//! Mouse button and motion tracking.

use serde::{Deserialize, Serialize};

use super::button::ButtonState;
use super::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const COUNT: usize = 3;

    pub const ALL: [MouseButton; MouseButton::COUNT] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame mouse snapshot.
///
/// `position` is a level and carries forward between events; `wheel` is a
/// per-frame delta, zeroed at carry time and accumulated from events.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseInput {
    buttons: [ButtonState; MouseButton::COUNT],
    pub position: Vec2<i32>,
    pub wheel: Vec2<i32>,
}

impl MouseInput {
    #[inline]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }

    #[inline]
    pub fn button_mut(&mut self, button: MouseButton) -> &mut ButtonState {
        &mut self.buttons[button.index()]
    }

    #[inline]
    pub fn as_array(&self) -> &[ButtonState; MouseButton::COUNT] {
        &self.buttons
    }

    pub fn carry_from(&mut self, prev: &MouseInput) {
        for (dst, src) in self.buttons.iter_mut().zip(prev.buttons.iter()) {
            *dst = ButtonState::carry(*src);
        }
        self.position = prev.position;
        self.wheel = Vec2::default();
    }

    pub fn reset(&mut self) {
        for button in &mut self.buttons {
            button.reset();
        }
        self.position = Vec2::default();
        self.wheel = Vec2::default();
    }
}
