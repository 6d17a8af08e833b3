//! Drawable objects placed in the world.

use engine_core::{model_matrix, Rotator, Scaler, TransformRaw, Translator};
use glam::Mat4;

use crate::shader::{ModelId, ShaderSink};

/// A model instance with its own placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub model: ModelId,
    pub translator: Translator,
    pub rotator: Rotator,
    pub scaler: Scaler,
}

impl Object {
    /// Unplaced instance of `model`: origin, identity rotation, unit scale.
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            translator: Translator::default(),
            rotator: Rotator::default(),
            scaler: Scaler::default(),
        }
    }

    /// `translate * rotate * scale`.
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(&self.translator, &self.rotator, &self.scaler)
    }

    /// Packed model and inverse-model block.
    pub fn raw(&self) -> TransformRaw {
        TransformRaw::from(self.model_matrix())
    }

    /// Upload `model` / `inv_model` and draw.
    pub fn draw(&self, sink: &mut impl ShaderSink) {
        let model = self.model_matrix();
        sink.set_mat4("model", model);
        sink.set_mat4("inv_model", model.inverse());
        sink.draw_model(self.model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::UniformRecorder;
    use glam::Vec3;

    #[test]
    fn object_draw_uploads_model_and_inverse() {
        let mut object = Object::new(ModelId(7));
        object.translator.move_to(Vec3::new(1.0, 0.0, 0.0));
        object.rotator.rotate(Vec3::new(1.0, 0.3, 0.5), 20.0);
        object.scaler.scale(0.1);

        let mut sink = UniformRecorder::new();
        object.draw(&mut sink);

        let model = sink.mat4("model").unwrap();
        let inv = sink.mat4("inv_model").unwrap();
        assert!(model.abs_diff_eq(object.model_matrix(), 1e-6));
        assert!((model * inv).abs_diff_eq(Mat4::IDENTITY, 1e-4));
        assert_eq!(sink.draws(), &[ModelId(7)]);
    }

    #[test]
    fn object_matrix_places_origin_at_position() {
        let mut object = Object::new(ModelId::default());
        object.translator.move_to(Vec3::new(-1.0, 2.0, 0.5));
        object.rotator.rotate_y(45.0);
        let origin = object.model_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(object.translator.pos, 1e-6));

        let raw = object.raw();
        assert_eq!(raw.model, object.model_matrix().to_cols_array_2d());
    }
}
