//! # Key State (`key_state.rs`)
//!
//! Tracks which physical keys are held, fed from `winit` keyboard events.

use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Set of keyboard keys currently held down.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    pressed_keys: HashSet<KeyCode>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_pressed(&mut self, key: KeyCode) {
        self.pressed_keys.insert(key);
    }

    pub fn key_released(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed_keys.len()
    }

    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Feeds a `winit` keyboard event into the set. Keys without a physical code are ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            let PhysicalKey::Code(code) = event.physical_key else {
                return;
            };
            match event.state {
                ElementState::Pressed => self.key_pressed(code),
                ElementState::Released => self.key_released(code),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_held_keys() {
        let mut keys = KeyState::new();

        keys.key_pressed(KeyCode::KeyW);
        keys.key_pressed(KeyCode::ShiftLeft);
        keys.key_released(KeyCode::KeyW);

        assert!(!keys.is_pressed(KeyCode::KeyW));
        assert!(keys.is_pressed(KeyCode::ShiftLeft));
        assert_eq!(keys.pressed_count(), 1);

        keys.clear();
        assert!(!keys.is_pressed(KeyCode::ShiftLeft));
    }

    #[test]
    fn releasing_unknown_key_is_harmless() {
        let mut keys = KeyState::new();
        keys.key_released(KeyCode::Escape);
        assert_eq!(keys.pressed_count(), 0);
    }
}
