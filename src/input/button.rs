//! Edge-triggered per-button state.

/// Three-phase button record for one frame.
///
/// `pressed` and `released` are transitions derived from the previous
/// frame's `held`; at most one of them is true in any frame, and
/// `pressed` implies `held` while `released` implies `!held`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

impl ButtonState {
    /// Fold a freshly sampled raw down/up level against last frame's state.
    #[inline]
    pub fn record(old: ButtonState, is_down: bool) -> ButtonState {
        ButtonState {
            pressed: !old.held && is_down,
            held: is_down,
            released: old.held && !is_down,
        }
    }

    /// The no-event path: hold level carries forward, edges clear.
    #[inline]
    pub fn carry(old: ButtonState) -> ButtonState {
        ButtonState {
            pressed: false,
            held: old.held,
            released: false,
        }
    }

    /// The three phases as `[pressed, held, released]`.
    #[inline]
    pub fn as_array(&self) -> [bool; 3] {
        [self.pressed, self.held, self.released]
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = ButtonState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run a raw sample sequence through record(), checking the invariants
    /// hold at every step.
    fn run_sequence(samples: &[bool]) -> Vec<ButtonState> {
        let mut states = Vec::new();
        let mut prev = ButtonState::default();
        for &is_down in samples {
            let next = ButtonState::record(prev, is_down);
            assert!(
                !(next.pressed && next.released),
                "pressed and released in the same frame"
            );
            if next.pressed {
                assert!(next.held, "pressed implies held");
            }
            if next.released {
                assert!(!next.held, "released implies not held");
            }
            states.push(next);
            prev = next;
        }
        states
    }

    #[test]
    fn test_press_hold_release_cycle() {
        let states = run_sequence(&[false, true, true, true, false, false]);
        assert_eq!(states[0], ButtonState::default());
        assert!(states[1].pressed && states[1].held);
        assert!(!states[2].pressed && states[2].held);
        assert!(states[3].held);
        assert!(states[4].released && !states[4].held);
        assert_eq!(states[5], ButtonState::default());
    }

    #[test]
    fn test_single_frame_tap() {
        let states = run_sequence(&[true, false, true, false]);
        assert!(states[0].pressed);
        assert!(states[1].released);
        assert!(states[2].pressed);
        assert!(states[3].released);
    }

    #[test]
    fn test_exclusivity_over_all_two_frame_histories() {
        for old_held in [false, true] {
            for is_down in [false, true] {
                let next = ButtonState::record(
                    ButtonState {
                        pressed: false,
                        held: old_held,
                        released: false,
                    },
                    is_down,
                );
                assert!(!(next.pressed && next.released));
                assert_eq!(next.held, is_down);
            }
        }
    }

    #[test]
    fn test_carry_keeps_level_clears_edges() {
        let held = ButtonState {
            pressed: true,
            held: true,
            released: false,
        };
        let carried = ButtonState::carry(held);
        assert_eq!(carried.as_array(), [false, true, false]);

        let idle = ButtonState::carry(ButtonState::default());
        assert_eq!(idle, ButtonState::default());
    }
}
