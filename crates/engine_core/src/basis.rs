//! Orthonormal frames.

use glam::Vec3;

/// Three unit vectors describing a local coordinate system in world space.
///
/// `x` is right, `y` is up and `z` is forward. The default basis is the world
/// axes. Rotator keeps its basis in sync with its orientation; callers that use
/// the single-axis setters are responsible for keeping the frame orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self::WORLD
    }
}

impl Basis {
    /// World axes.
    pub const WORLD: Self = Self {
        x: Vec3::X,
        y: Vec3::Y,
        z: Vec3::Z,
    };

    pub fn new(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> Vec3 {
        self.x
    }

    pub fn y(&self) -> Vec3 {
        self.y
    }

    pub fn z(&self) -> Vec3 {
        self.z
    }

    /// Replace all three axes at once.
    pub fn set(&mut self, x: Vec3, y: Vec3, z: Vec3) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn set_x(&mut self, x: Vec3) -> &mut Self {
        self.x = x;
        self
    }

    pub fn set_y(&mut self, y: Vec3) -> &mut Self {
        self.y = y;
        self
    }

    pub fn set_z(&mut self, z: Vec3) -> &mut Self {
        self.z = z;
        self
    }

    /// Restore the world axes.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::WORLD;
        self
    }

    /// Largest deviation from orthonormality: unit lengths and pairwise dot products.
    pub fn orthonormal_error(&self) -> f32 {
        let lengths = [self.x, self.y, self.z]
            .iter()
            .map(|v| (v.length() - 1.0).abs())
            .fold(0.0_f32, f32::max);
        let dots = [self.x.dot(self.y), self.y.dot(self.z), self.z.dot(self.x)]
            .iter()
            .map(|d| d.abs())
            .fold(0.0_f32, f32::max);
        lengths.max(dots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_default_is_world_axes() {
        let b = Basis::default();
        assert_eq!(b.x(), Vec3::X);
        assert_eq!(b.y(), Vec3::Y);
        assert_eq!(b.z(), Vec3::Z);
        assert_eq!(b.orthonormal_error(), 0.0);
    }

    #[test]
    fn basis_setters_chain_and_reset_restores() {
        let mut b = Basis::default();
        b.set_x(Vec3::Z).set_z(-Vec3::X);
        assert_eq!(b.x(), Vec3::Z);
        assert_eq!(b.y(), Vec3::Y);
        assert_eq!(b.z(), -Vec3::X);

        b.set(Vec3::Y, Vec3::Z, Vec3::X).reset();
        assert_eq!(b, Basis::WORLD);
    }

    #[test]
    fn basis_orthonormal_error_detects_skew() {
        let b = Basis::new(Vec3::X, Vec3::new(1.0, 1.0, 0.0).normalize(), Vec3::Z);
        assert!(b.orthonormal_error() > 0.5);
    }
}
