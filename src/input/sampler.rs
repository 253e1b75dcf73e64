//! Folds raw SDL samples into the current input snapshot.
//!
//! Every button is settled exactly once per frame: first the whole snapshot
//! carries forward from the previous frame (holds keep, edges clear), then
//! fresh samples re-record against the *previous* frame's state. Keyboard
//! and mouse arrive as events; the controller is polled level-by-level.

use sdl2::controller::{Axis, Button, GameController};
use sdl2::keyboard::Keycode;

use crate::display::InputEvent;

use super::{ButtonState, Input, Key, MouseButton, PadButton, Vec2};

/// Build the current frame's snapshot from last frame plus fresh samples.
pub fn sample_frame(
    prev: &Input,
    cur: &mut Input,
    events: &[InputEvent],
    pad: Option<&GameController>,
    dt: f32,
) {
    cur.keyboard.carry_from(&prev.keyboard);
    cur.mouse.carry_from(&prev.mouse);
    cur.controller.carry_from(&prev.controller);
    cur.dt_frame = dt;

    for event in events {
        apply_event(prev, cur, event);
    }

    if let Some(pad) = pad {
        poll_controller(prev, cur, pad);
    }
}

fn apply_event(prev: &Input, cur: &mut Input, event: &InputEvent) {
    match *event {
        InputEvent::KeyDown(code) => {
            if let Some(key) = map_keycode(code) {
                *cur.keyboard.key_mut(key) = ButtonState::record(prev.keyboard.key(key), true);
            }
        },
        InputEvent::KeyUp(code) => {
            if let Some(key) = map_keycode(code) {
                *cur.keyboard.key_mut(key) = ButtonState::record(prev.keyboard.key(key), false);
            }
        },
        InputEvent::MouseMove { x, y } => {
            cur.mouse.position = Vec2 { x, y };
        },
        InputEvent::MouseDown { x, y, button } => {
            cur.mouse.position = Vec2 { x, y };
            *cur.mouse.button_mut(button) = ButtonState::record(prev.mouse.button(button), true);
        },
        InputEvent::MouseUp { x, y, button } => {
            cur.mouse.position = Vec2 { x, y };
            *cur.mouse.button_mut(button) = ButtonState::record(prev.mouse.button(button), false);
        },
        InputEvent::MouseWheel { x, y } => {
            // Wheel motion is a per-frame delta; multiple events accumulate
            cur.mouse.wheel.x += x;
            cur.mouse.wheel.y += y;
        },
        InputEvent::Quit => {},
    }
}

/// Controller state is polled, not event-driven: every button and axis gets
/// a fresh level each frame.
fn poll_controller(prev: &Input, cur: &mut Input, pad: &GameController) {
    for button in PadButton::ALL {
        let is_down = pad.button(map_pad_button(button));
        *cur.controller.button_mut(button) =
            ButtonState::record(prev.controller.button(button), is_down);
    }

    cur.controller.stick_left.set(
        normalize_axis(pad.axis(Axis::LeftX)),
        normalize_axis(pad.axis(Axis::LeftY)),
    );
    cur.controller.stick_right.set(
        normalize_axis(pad.axis(Axis::RightX)),
        normalize_axis(pad.axis(Axis::RightY)),
    );
    cur.controller.trigger_left = normalize_axis(pad.axis(Axis::TriggerLeft));
    cur.controller.trigger_right = normalize_axis(pad.axis(Axis::TriggerRight));
}

/// SDL axes are i16; map to [-1, 1] (triggers only ever report [0, 1]).
#[inline]
fn normalize_axis(raw: i16) -> f32 {
    (raw as f32 / 32767.0).clamp(-1.0, 1.0)
}

fn map_keycode(code: Keycode) -> Option<Key> {
    match code {
        Keycode::Num1 => Some(Key::Num1),
        Keycode::Num2 => Some(Key::Num2),
        Keycode::Num3 => Some(Key::Num3),
        Keycode::Num4 => Some(Key::Num4),
        Keycode::Num5 => Some(Key::Num5),
        Keycode::Num6 => Some(Key::Num6),
        Keycode::Num7 => Some(Key::Num7),
        Keycode::Num8 => Some(Key::Num8),
        Keycode::Num9 => Some(Key::Num9),
        Keycode::Num0 => Some(Key::Num0),
        Keycode::W => Some(Key::W),
        Keycode::A => Some(Key::A),
        Keycode::S => Some(Key::S),
        Keycode::D => Some(Key::D),
        Keycode::Space => Some(Key::Space),
        _ => None,
    }
}

fn map_pad_button(button: PadButton) -> Button {
    match button {
        PadButton::DpadUp => Button::DPadUp,
        PadButton::DpadDown => Button::DPadDown,
        PadButton::DpadLeft => Button::DPadLeft,
        PadButton::DpadRight => Button::DPadRight,
        PadButton::Start => Button::Start,
        PadButton::Back => Button::Back,
        PadButton::A => Button::A,
        PadButton::B => Button::B,
        PadButton::X => Button::X,
        PadButton::Y => Button::Y,
        PadButton::ShoulderLeft => Button::LeftShoulder,
        PadButton::ShoulderRight => Button::RightShoulder,
        PadButton::StickLeft => Button::LeftStick,
        PadButton::StickRight => Button::RightStick,
    }
}
