//! Keyboard and mouse state snapshot.
//!
//! The window layer feeds events into an [`InputState`]; the per-frame input
//! processing reads it. Nothing here is global: the state is an ordinary value
//! that is passed to whoever needs it.

use glam::Vec2;
use std::collections::HashSet;

/// Modifier keys reported alongside key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// Input state for the current frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Modifiers from the most recent key event.
    modifiers: Modifiers,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Mouse movement collected since the frame began.
    accumulated_delta: Vec2,
}

impl InputState {
    /// Empty state: nothing held, no mouse movement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event. Key repeats count as held, not as new presses.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                if self.keys_held.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
        }
        log::trace!("key {key:?} {state:?}");
    }

    /// Replace the modifier state reported by the window layer.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Process relative mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Record the absolute cursor position, in window pixels.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Shift, either from the modifier state or a held shift key.
    pub fn is_shift(&self) -> bool {
        self.modifiers.shift
            || self.is_key_held(KeyCode::ShiftLeft)
            || self.is_key_held(KeyCode::ShiftRight)
    }

    /// Ctrl, either from the modifier state or a held control key.
    pub fn is_ctrl(&self) -> bool {
        self.modifiers.ctrl
            || self.is_key_held(KeyCode::ControlLeft)
            || self.is_key_held(KeyCode::ControlRight)
    }

    /// Latest cursor position in window pixels (origin top-left).
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement delta for this frame, in window pixels (y grows downwards).
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_then_held() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));

        input.begin_frame();
        // OS key repeat.
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));

        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(input.is_key_released(KeyCode::KeyW));
        assert!(!input.is_key_held(KeyCode::KeyW));
    }

    #[test]
    fn modifiers_come_from_state_or_keys() {
        let mut input = InputState::new();
        assert!(!input.is_shift());
        input.set_modifiers(Modifiers { shift: true, ctrl: false });
        assert!(input.is_shift());
        assert!(!input.is_ctrl());

        input.set_modifiers(Modifiers::default());
        input.process_keyboard(KeyCode::ControlRight, ElementState::Pressed);
        assert!(input.is_ctrl());
    }

    #[test]
    fn mouse_delta_is_latched_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -1.0));
        input.process_mouse_motion((2.0, 4.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 3.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.process_cursor_position((10.0, 20.0));
        assert_eq!(input.mouse_position(), Vec2::new(10.0, 20.0));
    }
}
