//! Free-flying camera built on a Translator + Rotator pair.

use bytemuck::{Pod, Zeroable};
use engine_core::{Rotator, Translator};
use glam::{Mat4, Vec3};

use crate::shader::ShaderSink;

/// Movement commands, relative to the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Look commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotate {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollClockwise,
    RollCounterClockwise,
}

/// Perspective camera with configurable FOV, clipping planes and speeds.
#[derive(Debug, Clone)]
pub struct Camera {
    pub translator: Translator,
    pub rotator: Rotator,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees per second for keyboard look.
    pub rotation_speed: f32,
    /// Degrees per unit of mouse offset.
    pub rotation_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(2.5, 30.0, 1.0)
    }
}

impl Camera {
    /// Position after [`Camera::reset`]: a few units back from the origin.
    pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
    /// Yaw applied after [`Camera::reset`] so the camera faces the origin
    /// (the default basis looks down +Z).
    pub const HOME_YAW_DEGREES: f32 = 180.0;

    /// Create a camera in its home position.
    pub fn new(movement_speed: f32, rotation_speed: f32, rotation_sensitivity: f32) -> Self {
        let mut camera = Self {
            translator: Translator::default(),
            rotator: Rotator::default(),
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            movement_speed,
            rotation_speed,
            rotation_sensitivity,
        };
        camera.reset();
        camera
    }

    /// Back to the home position and orientation.
    pub fn reset(&mut self) {
        self.translator.reset().move_to(Self::HOME_POSITION);
        self.rotator.reset().rotate_y(Self::HOME_YAW_DEGREES);
        log::debug!("Camera reset to {} {}", self.translator, self.rotator);
    }

    /// Move along the view-relative axes; up/down use the world up axis.
    pub fn process_input(&mut self, direction: Direction, delta_secs: f32) {
        let velocity = self.movement_speed * delta_secs;
        let front = self.rotator.front();
        // The basis' x axis points to the viewer's left (x = y cross z).
        let right = -self.rotator.right();
        let up = Rotator::WORLD_BASIS.y();

        let delta = match direction {
            Direction::Forward => front,
            Direction::Backward => -front,
            Direction::Right => right,
            Direction::Left => -right,
            Direction::Up => up,
            Direction::Down => -up,
        } * velocity;
        self.translator.translate(delta);
    }

    /// Keyboard look.
    ///
    /// Rotations are composed in world space, so the camera applies the
    /// opposite angle of what an object would for the same command: yaw
    /// right, pitch up and roll clockwise rotate by a negative angle.
    pub fn process_rotate(&mut self, rotate: Rotate, delta_secs: f32) {
        let angle = self.rotation_speed * delta_secs;
        match rotate {
            Rotate::YawRight => self.rotator.rotate_y(-angle),
            Rotate::YawLeft => self.rotator.rotate_y(angle),
            Rotate::PitchUp => self.rotator.rotate_x(-angle),
            Rotate::PitchDown => self.rotator.rotate_x(angle),
            Rotate::RollClockwise => self.rotator.rotate_z(-angle),
            Rotate::RollCounterClockwise => self.rotator.rotate_z(angle),
        };
    }

    /// Mouse look. `x_offset` grows to the right, `y_offset` grows upwards.
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        let yaw = x_offset * self.rotation_sensitivity;
        let pitch = y_offset * self.rotation_sensitivity;
        self.rotator.rotate_y(-yaw).rotate_x(-pitch);
    }

    /// Turn to face `point` from the current position.
    pub fn look_at(&mut self, point: Vec3) {
        self.rotator.look_at(self.translator.pos, point);
    }

    /// OpenGL-style perspective projection.
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect_ratio, self.near, self.far)
    }

    /// Look-at view matrix from the eye along the current front, with the current up.
    pub fn view(&self) -> Mat4 {
        let eye = self.translator.pos;
        Mat4::look_at_rh(eye, eye + self.rotator.front(), self.rotator.up())
    }

    /// `projection * view`, for transforming world points straight to clip space.
    pub fn view_projection(&self, aspect_ratio: f32) -> Mat4 {
        self.projection(aspect_ratio) * self.view()
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.translator.pos
    }

    /// View direction.
    pub fn front(&self) -> Vec3 {
        self.rotator.front()
    }

    /// Camera up axis; tilts with pitch and roll.
    pub fn up(&self) -> Vec3 {
        self.rotator.up()
    }

    /// Push projection, view, inverse view and eye position to a shader.
    pub fn upload(&self, aspect_ratio: f32, sink: &mut impl ShaderSink) {
        let view = self.view();
        sink.set_mat4("projection", self.projection(aspect_ratio));
        sink.set_mat4("view", view);
        sink.set_mat4("inv_view", view.inverse());
        sink.set_vec3("viewPos", self.translator.pos);
    }

    /// Packed camera block for uniform-buffer upload.
    pub fn uniform(&self, aspect_ratio: f32) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update(self, aspect_ratio);
        uniform
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub inv_view: [[f32; 4]; 4],
    pub view_pos: [f32; 4], // w unused, padding
}

impl CameraUniform {
    /// Identity matrices with the eye at the origin.
    pub fn new() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            inv_view: Mat4::IDENTITY.to_cols_array_2d(),
            view_pos: [0.0; 4],
        }
    }

    /// Refresh every field from `camera`.
    pub fn update(&mut self, camera: &Camera, aspect_ratio: f32) {
        let view = camera.view();
        self.projection = camera.projection(aspect_ratio).to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.inv_view = view.inverse().to_cols_array_2d();
        let pos = camera.position();
        self.view_pos = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
