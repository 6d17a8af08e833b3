//! Keyboard bindings: camera movement, look, presets and feature toggles.

use glam::Vec3;
use input::{InputState, KeyCode};
use renderer::{Camera, Direction, Rotate};

use crate::context::FrameContext;

/// Fixed viewpoints on the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Default reset position.
    Home,
    /// In front of the origin, looking down -Z.
    Front,
    /// Above the (+X, +Z) corner, looking at the origin.
    Corner,
    /// Above the (-X, -Z) corner, looking at the origin.
    OppositeCorner,
}

impl CameraPreset {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 => Some(Self::Home),
            KeyCode::Digit2 => Some(Self::Front),
            KeyCode::Digit3 => Some(Self::Corner),
            KeyCode::Digit4 => Some(Self::OppositeCorner),
            _ => None,
        }
    }

    pub fn apply(self, camera: &mut Camera) {
        camera.reset();
        match self {
            Self::Home => {}
            Self::Front => {
                camera.translator.move_to(Vec3::new(0.0, 0.0, 3.0));
            }
            Self::Corner => aim(camera, Vec3::new(3.0, 3.0, 3.0), 45.0),
            Self::OppositeCorner => aim(camera, Vec3::new(-3.0, 3.0, -3.0), 225.0),
        }
        log::debug!("Camera preset {:?}: {} {}", self, camera.translator, camera.rotator);
    }
}

/// From the reset orientation, yaw by `yaw_deg` and pitch down onto the origin.
fn aim(camera: &mut Camera, position: Vec3, yaw_deg: f32) {
    let horizontal = Vec3::new(position.x, 0.0, position.z).length();
    let pitch_down = position.y.atan2(horizontal).to_degrees();
    camera.translator.move_to(position);
    // Camera convention: positive local pitch looks down.
    camera.rotator.rotate_y(yaw_deg).rotate_x(pitch_down);
}

/// Apply one input tick to the camera and the toggles.
///
/// Movement on each axis pair and the look command are exclusive per tick:
/// the first matching key wins.
pub fn process_input(ctx: &mut FrameContext, input: &InputState, camera: &mut Camera) {
    let dt = ctx.delta_time();

    if input.is_key_held(KeyCode::KeyW) {
        camera.process_input(Direction::Forward, dt);
    } else if input.is_key_held(KeyCode::KeyS) {
        camera.process_input(Direction::Backward, dt);
    }

    if input.is_key_held(KeyCode::KeyD) {
        camera.process_input(Direction::Right, dt);
    } else if input.is_key_held(KeyCode::KeyA) {
        camera.process_input(Direction::Left, dt);
    }

    if input.is_key_held(KeyCode::Space) {
        if input.is_shift() {
            camera.process_input(Direction::Down, dt);
        } else {
            camera.process_input(Direction::Up, dt);
        }
    }

    let look = [
        (KeyCode::ArrowLeft, Rotate::YawLeft),
        (KeyCode::ArrowRight, Rotate::YawRight),
        (KeyCode::ArrowUp, Rotate::PitchUp),
        (KeyCode::ArrowDown, Rotate::PitchDown),
        (KeyCode::Period, Rotate::RollClockwise),
        (KeyCode::Comma, Rotate::RollCounterClockwise),
    ];
    if let Some(&(_, rotate)) = look.iter().find(|(key, _)| input.is_key_held(*key)) {
        camera.process_rotate(rotate, dt);
    }

    if ctx.mouse_look {
        let delta = input.mouse_delta();
        // Window y grows downwards.
        camera.process_mouse(delta.x, -delta.y);
    }

    let toggles = &mut ctx.toggles;
    if input.is_key_pressed(KeyCode::KeyT) {
        toggles.debug = !toggles.debug;
    }
    if input.is_key_pressed(KeyCode::KeyL) {
        toggles.move_light = !toggles.move_light;
    }
    if input.is_key_pressed(KeyCode::KeyP) {
        toggles.pendulum_spot_lights = !toggles.pendulum_spot_lights;
    }
    if input.is_key_pressed(KeyCode::KeyO) {
        toggles.draw_border = !toggles.draw_border;
    }
    if input.is_key_held(KeyCode::KeyB) {
        toggles.light_directional = true;
    }
    if input.is_key_held(KeyCode::KeyN) {
        toggles.light_directional = false;
    }
    if input.is_key_held(KeyCode::KeyG) {
        toggles.light_spotlight = true;
    }
    if input.is_key_held(KeyCode::KeyH) {
        toggles.light_spotlight = false;
    }

    for key in [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4] {
        if input.is_key_held(key) {
            if let Some(preset) = CameraPreset::from_key(key) {
                preset.apply(camera);
            }
        }
    }
}
