//! Scripted key presses for the headless run.

use input::{ElementState, InputState, KeyCode};

/// A key held from `start` (inclusive) to `end` (exclusive), in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHold {
    pub key: KeyCode,
    pub start: u64,
    pub end: u64,
}

/// Feeds press/release events into an [`InputState`] as the frame count advances.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    holds: Vec<KeyHold>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, key: KeyCode, start: u64, end: u64) -> Self {
        self.holds.push(KeyHold { key, start, end });
        self
    }

    /// Walk forward, look around, flip a few toggles and jump between presets.
    pub fn demo() -> Self {
        Self::new()
            .hold(KeyCode::KeyL, 5, 8)
            .hold(KeyCode::KeyG, 5, 8)
            .hold(KeyCode::KeyP, 5, 8)
            .hold(KeyCode::KeyW, 10, 40)
            .hold(KeyCode::ArrowRight, 45, 70)
            .hold(KeyCode::Space, 75, 90)
            .hold(KeyCode::KeyB, 95, 97)
            .hold(KeyCode::KeyO, 100, 102)
            .hold(KeyCode::Digit3, 150, 152)
            .hold(KeyCode::Comma, 160, 180)
            .hold(KeyCode::Digit4, 200, 202)
            .hold(KeyCode::KeyO, 210, 212)
            .hold(KeyCode::Digit1, 250, 252)
    }

    /// Emit the events that happen at `frame`.
    pub fn apply(&self, frame: u64, input: &mut InputState) {
        for hold in &self.holds {
            if frame == hold.start {
                input.process_keyboard(hold.key, ElementState::Pressed);
            } else if frame == hold.end {
                input.process_keyboard(hold.key, ElementState::Released);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_press_and_release_on_their_frames() {
        let script = InputScript::new().hold(KeyCode::KeyW, 2, 4);
        let mut input = InputState::new();

        for frame in 0..6 {
            input.begin_frame();
            script.apply(frame, &mut input);
            match frame {
                2 => assert!(input.is_key_pressed(KeyCode::KeyW)),
                3 => assert!(input.is_key_held(KeyCode::KeyW) && !input.is_key_pressed(KeyCode::KeyW)),
                4 => assert!(input.is_key_released(KeyCode::KeyW)),
                _ => assert!(!input.is_key_held(KeyCode::KeyW)),
            }
        }
    }

    #[test]
    fn demo_releases_every_key() {
        assert!(InputScript::new().is_empty());
        let script = InputScript::demo();
        assert!(!script.is_empty());
        let mut input = InputState::new();
        for frame in 0..300 {
            script.apply(frame, &mut input);
        }
        for key in [KeyCode::KeyW, KeyCode::ArrowRight, KeyCode::Space, KeyCode::Digit1] {
            assert!(!input.is_key_held(key));
        }
    }
}
