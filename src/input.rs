//! Keyboard state and bindings
//!
//! [`InputState`] remembers which physical keys are currently held.
//! [`KeyBindings`] says what those keys mean: exiting, moving the camera, or
//! nudging an object along one axis.

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::gfx::{camera::MoveDirection, scene::transform::Axis};

/// Two keys driving one axis of one object in opposite directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NudgeBinding {
    pub increase: KeyCode,
    pub decrease: KeyCode,
    pub object: usize,
    pub axis: Axis,
}

impl NudgeBinding {
    pub const fn new(increase: KeyCode, decrease: KeyCode, object: usize, axis: Axis) -> Self {
        Self {
            increase,
            decrease,
            object,
            axis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub exit: KeyCode,
    pub movement: Vec<(KeyCode, MoveDirection)>,
    pub nudges: Vec<NudgeBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            exit: KeyCode::Escape,
            movement: vec![
                (KeyCode::KeyW, MoveDirection::Forward),
                (KeyCode::KeyS, MoveDirection::Backward),
                (KeyCode::KeyA, MoveDirection::StrafeLeft),
                (KeyCode::KeyD, MoveDirection::StrafeRight),
            ],
            nudges: vec![
                NudgeBinding::new(KeyCode::Digit1, KeyCode::Digit2, 1, Axis::Z),
                NudgeBinding::new(KeyCode::Digit3, KeyCode::Digit4, 2, Axis::X),
                NudgeBinding::new(KeyCode::Digit5, KeyCode::Digit6, 3, Axis::X),
            ],
        }
    }
}

impl KeyBindings {
    /// Highest object index any nudge binding targets
    pub fn max_object_index(&self) -> Option<usize> {
        self.nudges.iter().map(|binding| binding.object).max()
    }
}

/// Set of physical keys currently held down
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition. Repeats of an already held key are ignored.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Feeds a winit window event. Returns true if it was a key event.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.set_key(*key, *state == ElementState::Pressed);
                true
            }
            // Keys released while unfocused never report a release.
            WindowEvent::Focused(false) => {
                self.keys_down.clear();
                false
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys_down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.set_key(KeyCode::KeyW, true);
        input.set_key(KeyCode::KeyW, true);
        assert!(input.is_held(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, false);
        assert!(!input.is_held(KeyCode::KeyW));
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = InputState::new();
        input.set_key(KeyCode::Digit1, true);
        input.set_key(KeyCode::KeyA, true);
        input.handle_window_event(&WindowEvent::Focused(false));
        assert!(!input.is_held(KeyCode::Digit1));
        assert!(!input.is_held(KeyCode::KeyA));
    }

    #[test]
    fn test_default_bindings_cover_reference_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.exit, KeyCode::Escape);
        assert_eq!(bindings.movement.len(), 4);
        assert_eq!(
            bindings.nudges[0],
            NudgeBinding::new(KeyCode::Digit1, KeyCode::Digit2, 1, Axis::Z)
        );
        assert_eq!(bindings.nudges[2].object, 3);
        assert_eq!(bindings.max_object_index(), Some(3));
    }
}
