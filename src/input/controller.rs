//! Game controller buttons, sticks, and triggers.

use serde::{Deserialize, Serialize};

use super::button::ButtonState;
use super::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Start,
    Back,
    A,
    B,
    X,
    Y,
    ShoulderLeft,
    ShoulderRight,
    StickLeft,
    StickRight,
}

impl PadButton {
    pub const COUNT: usize = 14;

    pub const ALL: [PadButton; PadButton::COUNT] = [
        PadButton::DpadUp,
        PadButton::DpadDown,
        PadButton::DpadLeft,
        PadButton::DpadRight,
        PadButton::Start,
        PadButton::Back,
        PadButton::A,
        PadButton::B,
        PadButton::X,
        PadButton::Y,
        PadButton::ShoulderLeft,
        PadButton::ShoulderRight,
        PadButton::StickLeft,
        PadButton::StickRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Analog stick sample: raw vector plus derived magnitude and unit
/// direction.
///
/// The unit direction of a zero-magnitude vector is defined as zero —
/// never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisVector {
    pub vec: Vec2<f32>,
    pub magnitude: f32,
    pub direction: Vec2<f32>,
}

impl AxisVector {
    /// Store a fresh raw sample and recompute the derived fields.
    pub fn set(&mut self, x: f32, y: f32) {
        self.vec = Vec2 { x, y };
        self.magnitude = (x * x + y * y).sqrt();
        self.direction = if self.magnitude > 0.0 {
            Vec2 {
                x: x / self.magnitude,
                y: y / self.magnitude,
            }
        } else {
            Vec2::default()
        };
    }
}

/// Per-frame snapshot of the single tracked controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerInput {
    buttons: [ButtonState; PadButton::COUNT],
    pub stick_left: AxisVector,
    pub stick_right: AxisVector,
    pub trigger_left: f32,
    pub trigger_right: f32,
}

impl ControllerInput {
    #[inline]
    pub fn button(&self, button: PadButton) -> ButtonState {
        self.buttons[button.index()]
    }

    #[inline]
    pub fn button_mut(&mut self, button: PadButton) -> &mut ButtonState {
        &mut self.buttons[button.index()]
    }

    #[inline]
    pub fn as_array(&self) -> &[ButtonState; PadButton::COUNT] {
        &self.buttons
    }

    /// Carry levels forward: hold levels keep, edges clear, analog values
    /// persist until a fresh poll overwrites them.
    pub fn carry_from(&mut self, prev: &ControllerInput) {
        for (dst, src) in self.buttons.iter_mut().zip(prev.buttons.iter()) {
            *dst = ButtonState::carry(*src);
        }
        self.stick_left = prev.stick_left;
        self.stick_right = prev.stick_right;
        self.trigger_left = prev.trigger_left;
        self.trigger_right = prev.trigger_right;
    }
}
