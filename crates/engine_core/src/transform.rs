//! Translator, Rotator and Scaler: the placement components owned by every
//! positionable entity (camera, objects, lights).
//!
//! An entity's model matrix is `translate * rotate * scale`, see [`model_matrix`].

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::basis::Basis;
use crate::error::TransformError;

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translator {
    pub pos: Vec3,
}

impl Translator {
    pub fn new(pos: Vec3) -> Self {
        Self { pos }
    }

    /// Set the absolute position, rejecting non-finite input.
    pub fn try_move_to(&mut self, pos: Vec3) -> Result<&mut Self, TransformError> {
        if !pos.is_finite() {
            return Err(TransformError::NonFinite { what: "position" });
        }
        self.pos = pos;
        Ok(self)
    }

    /// Add `delta` to the position, rejecting non-finite input.
    pub fn try_translate(&mut self, delta: Vec3) -> Result<&mut Self, TransformError> {
        if !delta.is_finite() {
            return Err(TransformError::NonFinite { what: "translation" });
        }
        self.pos += delta;
        Ok(self)
    }

    /// Set the absolute position. Non-finite positions are logged and ignored.
    pub fn move_to(&mut self, pos: Vec3) -> &mut Self {
        if let Err(e) = self.try_move_to(pos) {
            log::warn!("Ignoring move_to {pos}: {e}");
        }
        self
    }

    /// Move by `delta`. Non-finite deltas are logged and ignored.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        if let Err(e) = self.try_translate(delta) {
            log::warn!("Ignoring translate by {delta}: {e}");
        }
        self
    }

    /// Back to the origin.
    pub fn reset(&mut self) -> &mut Self {
        self.pos = Vec3::ZERO;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pos)
    }
}

impl fmt::Display for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.pos.x, self.pos.y, self.pos.z)
    }
}

/// Orientation as a unit quaternion, with the rotated basis cached alongside.
///
/// The quaternion is the only source of truth. The basis is recomputed after
/// every change, and pitch/yaw/roll are decomposed from it on demand.
///
/// Besides the orientation, the rotator remembers the pitch/yaw/roll values
/// that were last *commanded* through [`Rotator::relative_rotate_x`] and
/// friends. Those are bookkeeping for callers that think in absolute angles
/// ([`Rotator::set_yaw`] rotates by the difference); they never feed back into
/// the orientation directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotator {
    orientation: Quat,
    basis: Basis,
    /// Commanded (pitch, yaw, roll) in degrees.
    commanded: Vec3,
}

impl Default for Rotator {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            basis: Basis::WORLD,
            commanded: Vec3::ZERO,
        }
    }
}

impl Rotator {
    /// World axes, used as the un-rotated frame.
    pub const WORLD_BASIS: Basis = Basis::WORLD;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate by `angle_deg` degrees about `axis`, composed in world space:
    /// `orientation' = rotation(axis, angle) * orientation`.
    pub fn try_rotate(&mut self, axis: Vec3, angle_deg: f32) -> Result<&mut Self, TransformError> {
        self.apply_rotation(axis, angle_deg)?;
        Ok(self)
    }

    /// Like [`Rotator::try_rotate`], but degenerate input is logged and the
    /// orientation is left untouched.
    pub fn rotate(&mut self, axis: Vec3, angle_deg: f32) -> &mut Self {
        self.apply_logged(axis, angle_deg);
        self
    }

    /// Pitch about the current right axis.
    pub fn rotate_x(&mut self, angle_deg: f32) -> &mut Self {
        self.rotate(self.basis.x(), angle_deg)
    }

    /// Yaw about the current up axis.
    pub fn rotate_y(&mut self, angle_deg: f32) -> &mut Self {
        self.rotate(self.basis.y(), angle_deg)
    }

    /// Roll about the current forward axis.
    pub fn rotate_z(&mut self, angle_deg: f32) -> &mut Self {
        self.rotate(self.basis.z(), angle_deg)
    }

    /// Pitch by `angle_deg` relative to the last commanded pitch.
    pub fn relative_rotate_x(&mut self, angle_deg: f32) -> &mut Self {
        if self.apply_logged(self.basis.x(), angle_deg) {
            self.commanded.x += angle_deg;
        }
        self
    }

    /// Yaw by `angle_deg` relative to the last commanded yaw.
    pub fn relative_rotate_y(&mut self, angle_deg: f32) -> &mut Self {
        if self.apply_logged(self.basis.y(), angle_deg) {
            self.commanded.y += angle_deg;
        }
        self
    }

    /// Roll by `angle_deg` relative to the last commanded roll.
    pub fn relative_rotate_z(&mut self, angle_deg: f32) -> &mut Self {
        if self.apply_logged(self.basis.z(), angle_deg) {
            self.commanded.z += angle_deg;
        }
        self
    }

    /// Command an absolute pitch: rotates by the difference to the last commanded pitch.
    pub fn set_pitch(&mut self, pitch_deg: f32) -> &mut Self {
        self.relative_rotate_x(pitch_deg - self.commanded.x)
    }

    /// Command an absolute yaw: rotates by the difference to the last commanded yaw.
    pub fn set_yaw(&mut self, yaw_deg: f32) -> &mut Self {
        self.relative_rotate_y(yaw_deg - self.commanded.y)
    }

    /// Command an absolute roll: rotates by the difference to the last commanded roll.
    pub fn set_roll(&mut self, roll_deg: f32) -> &mut Self {
        self.relative_rotate_z(roll_deg - self.commanded.z)
    }

    /// Last commanded (pitch, yaw, roll) in degrees.
    pub fn commanded(&self) -> Vec3 {
        self.commanded
    }

    /// Turn the front axis onto `direction` along the shortest arc.
    pub fn try_look_towards(&mut self, direction: Vec3) -> Result<&mut Self, TransformError> {
        if !direction.is_finite() {
            return Err(TransformError::NonFinite { what: "look direction" });
        }
        let direction = direction
            .try_normalize()
            .ok_or(TransformError::DegenerateDirection)?;
        let arc = Quat::from_rotation_arc(self.front(), direction);
        self.orientation = (arc * self.orientation).normalize();
        self.update_vectors();
        Ok(self)
    }

    /// Turn the front axis onto `direction`; a zero direction is logged and ignored.
    pub fn look_towards(&mut self, direction: Vec3) -> &mut Self {
        if let Err(e) = self.try_look_towards(direction) {
            log::warn!("Ignoring look_towards {direction}: {e}");
        }
        self
    }

    /// Turn an entity standing at `eye` so that it faces `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) -> &mut Self {
        self.look_towards(target - eye)
    }

    /// Identity orientation, world basis, commanded angles cleared.
    pub fn reset(&mut self) -> &mut Self {
        self.orientation = Quat::IDENTITY;
        self.commanded = Vec3::ZERO;
        self.update_vectors();
        self
    }

    /// Copy another rotator's orientation, e.g. to point a light where the camera looks.
    pub fn align_to(&mut self, other: &Rotator) -> &mut Self {
        self.orientation = other.orientation;
        self.commanded = other.commanded;
        self.update_vectors();
        self
    }

    /// Replace the orientation. The quaternion is normalized; zero or
    /// non-finite quaternions are rejected.
    pub fn try_set_orientation(&mut self, orientation: Quat) -> Result<&mut Self, TransformError> {
        if !orientation.is_finite() {
            return Err(TransformError::NonFinite { what: "orientation" });
        }
        if orientation.length_squared() <= f32::EPSILON {
            return Err(TransformError::DegenerateAxis);
        }
        self.orientation = orientation.normalize();
        self.update_vectors();
        Ok(self)
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn right(&self) -> Vec3 {
        self.basis.x()
    }

    pub fn up(&self) -> Vec3 {
        self.basis.y()
    }

    pub fn front(&self) -> Vec3 {
        self.basis.z()
    }

    /// Pitch in degrees, decomposed from the orientation. Display only.
    pub fn pitch(&self) -> f32 {
        self.euler_degrees().0
    }

    /// Yaw in degrees, decomposed from the orientation. Display only.
    pub fn yaw(&self) -> f32 {
        self.euler_degrees().1
    }

    /// Roll in degrees, decomposed from the orientation. Display only.
    pub fn roll(&self) -> f32 {
        self.euler_degrees().2
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    /// (pitch, yaw, roll) with R = Rz(roll) * Ry(yaw) * Rx(pitch).
    fn euler_degrees(&self) -> (f32, f32, f32) {
        let (roll, yaw, pitch) = self.orientation.to_euler(EulerRot::ZYX);
        (pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
    }

    fn apply_rotation(&mut self, axis: Vec3, angle_deg: f32) -> Result<(), TransformError> {
        if !angle_deg.is_finite() {
            return Err(TransformError::NonFinite { what: "rotation angle" });
        }
        if !axis.is_finite() {
            return Err(TransformError::NonFinite { what: "rotation axis" });
        }
        let axis = axis.try_normalize().ok_or(TransformError::DegenerateAxis)?;
        let rotation = Quat::from_axis_angle(axis, angle_deg.to_radians());
        self.orientation = (rotation * self.orientation).normalize();
        self.update_vectors();
        Ok(())
    }

    /// Returns whether the rotation was applied.
    fn apply_logged(&mut self, axis: Vec3, angle_deg: f32) -> bool {
        match self.apply_rotation(axis, angle_deg) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Ignoring rotation of {angle_deg} deg about {axis}: {e}");
                false
            }
        }
    }

    /// Re-derive the basis from the orientation. Must follow every orientation change.
    fn update_vectors(&mut self) {
        let q = self.orientation;
        self.basis.set(q * Vec3::X, q * Vec3::Y, q * Vec3::Z);
    }
}

impl fmt::Display for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, u, fr) = (self.right(), self.up(), self.front());
        write!(
            f,
            "{{(r={:.2},{:.2},{:.2}),(u={:.2},{:.2},{:.2}),(f={:.2},{:.2},{:.2}),(p={:.2},y={:.2},r={:.2})}}",
            r.x,
            r.y,
            r.z,
            u.x,
            u.y,
            u.z,
            fr.x,
            fr.y,
            fr.z,
            self.pitch(),
            self.yaw(),
            self.roll()
        )
    }
}

/// Per-axis scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    pub scalar: Vec3,
}

impl Default for Scaler {
    fn default() -> Self {
        Self { scalar: Vec3::ONE }
    }
}

impl Scaler {
    /// Uniform scale.
    pub fn scale(&mut self, percent: f32) -> &mut Self {
        self.scalar = Vec3::splat(percent);
        self
    }

    /// Per-axis scale.
    pub fn scale_axes(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.scalar = Vec3::new(x, y, z);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scalar)
    }
}

/// Compose `translate * rotate * scale`.
pub fn model_matrix(translator: &Translator, rotator: &Rotator, scaler: &Scaler) -> Mat4 {
    Mat4::from_scale_rotation_translation(scaler.scalar, rotator.orientation(), translator.pos)
}

/// Model matrix and its inverse packed for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
    pub inv_model: [[f32; 4]; 4],
}

impl From<Mat4> for TransformRaw {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            inv_model: model.inverse().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn translator_translate_accumulates_like_move_to() {
        let start = Vec3::new(1.0, -2.0, 0.5);
        let (d1, d2) = (Vec3::new(0.25, 3.0, -1.0), Vec3::new(-4.0, 0.0, 2.0));

        let mut a = Translator::new(start);
        a.translate(d1).translate(d2);

        let mut b = Translator::new(start);
        b.move_to(start + d1 + d2);

        assert_vec(a.pos, b.pos);
    }

    #[test]
    fn translator_rejects_non_finite() {
        let mut t = Translator::new(Vec3::ONE);
        assert!(t.try_move_to(Vec3::new(f32::NAN, 0.0, 0.0)).is_err());
        t.translate(Vec3::splat(f32::INFINITY));
        assert_eq!(t.pos, Vec3::ONE);
        t.reset();
        assert_eq!(t.pos, Vec3::ZERO);
    }

    #[test]
    fn translator_matrix_moves_origin() {
        let t = Translator::new(Vec3::new(1.0, 2.0, 3.0));
        assert_vec(t.matrix().transform_point3(Vec3::ZERO), t.pos);
    }

    #[test]
    fn rotator_default_is_world_basis() {
        let r = Rotator::new();
        assert_eq!(r.right(), Vec3::X);
        assert_eq!(r.up(), Vec3::Y);
        assert_eq!(r.front(), Vec3::Z);
        assert_eq!(r.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn rotator_stays_orthonormal_and_normalized() {
        let mut r = Rotator::new();
        let angles = [13.0, -47.5, 90.0, 179.0, -0.3, 271.0, 33.3];
        for i in 0..2000 {
            let angle = angles[i % angles.len()];
            match i % 4 {
                0 => r.rotate_x(angle),
                1 => r.rotate_y(angle),
                2 => r.rotate_z(angle),
                _ => r.rotate(Vec3::new(1.0, 0.3, 0.5), angle),
            };
            assert!(r.basis().orthonormal_error() < EPS, "iteration {i}");
            assert!((r.orientation().length() - 1.0).abs() < 1e-6, "iteration {i}");
        }
    }

    #[test]
    fn rotator_local_yaw_twice_is_half_turn() {
        let mut r = Rotator::new();
        r.rotate_y(90.0);
        assert_vec(r.front(), Vec3::X);
        r.rotate_y(90.0);
        assert_vec(r.front(), -Vec3::Z);
        assert_vec(r.right(), -Vec3::X);
        assert_vec(r.up(), Vec3::Y);
    }

    #[test]
    fn rotator_pitch_uses_current_right_axis() {
        let mut r = Rotator::new();
        r.rotate_y(90.0);
        // Right is now -Z; pitching must rotate about it, not about world X.
        assert_vec(r.right(), -Vec3::Z);
        r.rotate_x(90.0);
        assert_vec(r.right(), -Vec3::Z);
        assert_vec(r.front(), -Vec3::Y);
    }

    #[test]
    fn rotator_rotate_composes_in_world_space() {
        let mut r = Rotator::new();
        r.rotate(Vec3::X, 90.0);
        r.rotate(Vec3::Y, 90.0);
        let expected = Quat::from_rotation_y(90f32.to_radians()) * Quat::from_rotation_x(90f32.to_radians());
        assert!(r.orientation().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn rotator_rotate_normalizes_axis() {
        let mut a = Rotator::new();
        let mut b = Rotator::new();
        a.rotate(Vec3::new(0.0, 10.0, 0.0), 30.0);
        b.rotate(Vec3::Y, 30.0);
        assert!(a.orientation().abs_diff_eq(b.orientation(), EPS));
    }

    #[test]
    fn rotator_degenerate_input_is_a_no_op() {
        let mut r = Rotator::new();
        r.rotate_y(30.0);
        let before = r;

        assert_eq!(
            r.try_rotate(Vec3::ZERO, 45.0).err(),
            Some(TransformError::DegenerateAxis)
        );
        assert!(r.try_rotate(Vec3::X, f32::NAN).is_err());
        r.rotate(Vec3::ZERO, 45.0);
        r.rotate(Vec3::new(f32::NAN, 1.0, 0.0), 45.0);
        r.relative_rotate_x(f32::INFINITY);

        assert_eq!(r, before);
        assert!(r.orientation().is_finite());
    }

    #[test]
    fn rotator_reset_is_reproducible() {
        let mut a = Rotator::new();
        a.rotate_x(37.0).rotate_z(-12.0).relative_rotate_y(5.0);
        a.reset();
        let mut b = Rotator::new();
        b.rotate(Vec3::new(2.0, 1.0, -3.0), 123.0);
        b.reset();
        assert_eq!(a, b);
        assert_eq!(a, Rotator::default());
        assert_eq!(a.basis(), Rotator::WORLD_BASIS);
    }

    #[test]
    fn rotator_euler_views_follow_orientation() {
        let mut r = Rotator::new();
        r.rotate_y(30.0);
        assert!((r.yaw() - 30.0).abs() < 1e-3);
        assert!(r.pitch().abs() < 1e-3);
        assert!(r.roll().abs() < 1e-3);

        let mut p = Rotator::new();
        p.rotate_x(-20.0);
        assert!((p.pitch() + 20.0).abs() < 1e-3);

        let mut q = Rotator::new();
        q.rotate_z(15.0);
        assert!((q.roll() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn rotator_relative_and_absolute_commands() {
        let mut r = Rotator::new();
        r.relative_rotate_y(10.0).relative_rotate_y(20.0);
        assert!((r.commanded().y - 30.0).abs() < EPS);
        assert!((r.yaw() - 30.0).abs() < 1e-3);

        // Absolute set rotates by the remaining difference only.
        r.set_yaw(45.0);
        assert!((r.commanded().y - 45.0).abs() < EPS);
        assert!((r.yaw() - 45.0).abs() < 1e-3);

        r.set_yaw(45.0);
        assert!((r.yaw() - 45.0).abs() < 1e-3);

        r.set_pitch(-10.0).set_roll(5.0);
        assert_eq!(r.commanded(), Vec3::new(-10.0, 45.0, 5.0));
    }

    #[test]
    fn rotator_look_towards_aims_front() {
        let mut r = Rotator::new();
        r.rotate_x(12.0);
        let target = Vec3::new(3.0, -1.0, 2.0);
        r.look_at(Vec3::new(1.0, 1.0, 1.0), target);
        assert_vec(r.front(), (target - Vec3::new(1.0, 1.0, 1.0)).normalize());
        assert!(r.basis().orthonormal_error() < EPS);

        // Opposite direction takes the half-turn path without NaNs.
        r.look_towards(-r.front());
        assert!(r.orientation().is_finite());
        assert_vec(r.front(), -(target - Vec3::new(1.0, 1.0, 1.0)).normalize());

        let before = r;
        assert_eq!(
            r.try_look_towards(Vec3::ZERO).err(),
            Some(TransformError::DegenerateDirection)
        );
        assert_eq!(r, before);
    }

    #[test]
    fn rotator_align_to_copies_orientation() {
        let mut source = Rotator::new();
        source.rotate_y(180.0).rotate_x(-30.0);
        let mut follower = Rotator::new();
        follower.align_to(&source);
        assert_eq!(follower.front(), source.front());
        assert_eq!(follower.orientation(), source.orientation());
    }

    #[test]
    fn rotator_set_orientation_normalizes() {
        let mut r = Rotator::new();
        r.try_set_orientation(Quat::from_xyzw(0.0, 2.0, 0.0, 2.0)).unwrap();
        assert!((r.orientation().length() - 1.0).abs() < 1e-6);
        assert_vec(r.front(), Vec3::X);
        assert!(r.try_set_orientation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn scaler_uniform_and_per_axis() {
        let mut s = Scaler::default();
        assert_eq!(s.scalar, Vec3::ONE);
        s.scale(0.1);
        assert_eq!(s.scalar, Vec3::splat(0.1));
        s.scale_axes(1.0, 2.0, 3.0);
        assert_vec(s.matrix().transform_point3(Vec3::ONE), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn model_matrix_is_translate_rotate_scale() {
        let t = Translator::new(Vec3::new(1.0, 2.0, 3.0));
        let mut r = Rotator::new();
        r.rotate(Vec3::new(1.0, 0.3, 0.5), 40.0);
        let mut s = Scaler::default();
        s.scale_axes(0.5, 2.0, 1.5);

        let composed = t.matrix() * r.matrix() * s.matrix();
        assert!(model_matrix(&t, &r, &s).abs_diff_eq(composed, 1e-5));

        let raw = TransformRaw::from(composed);
        let inv = Mat4::from_cols_array_2d(&raw.inv_model);
        assert!((composed * inv).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn display_formats() {
        let t = Translator::new(Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(t.to_string(), "(0,0,3)");
        let r = Rotator::new();
        assert!(r.to_string().starts_with("{(r=1.00,0.00,0.00),(u=0.00,1.00,0.00),(f=0.00,0.00,1.00)"));
    }
}
