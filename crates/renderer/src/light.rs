//! Point, spot and directional lights.
//!
//! A light is an [`Object`] (so it has a marker model and a placement) plus
//! color and falloff parameters. Its position comes from the translator and
//! its direction from the rotator's front axis.

use glam::Vec3;

use crate::object::Object;
use crate::shader::{ModelId, ShaderSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightKind {
    #[default]
    Point,
    Spot,
    Directional,
}

impl LightKind {
    /// Name of the uniform holding the number of lights of this kind.
    pub fn count_uniform(self) -> &'static str {
        match self {
            LightKind::Point => "numPointLights",
            LightKind::Spot => "numSpotLights",
            LightKind::Directional => "numDirLights",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub object: Object,
    pub kind: LightKind,

    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,

    // Attenuation, unused by directional lights.
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,

    /// Cosine of the inner cone angle (spot only).
    pub inner_cutoff: f32,
    /// Cosine of the outer cone angle (spot only).
    pub outer_cutoff: f32,
}

impl Light {
    /// Light of `kind` with default Phong colors, attenuation and cone.
    pub fn new(model: ModelId, kind: LightKind) -> Self {
        Self {
            object: Object::new(model),
            kind,
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            inner_cutoff: 12.5_f32.to_radians().cos(),
            outer_cutoff: 17.5_f32.to_radians().cos(),
        }
    }

    pub fn point(model: ModelId) -> Self {
        Self::new(model, LightKind::Point)
    }

    pub fn spot(model: ModelId) -> Self {
        Self::new(model, LightKind::Spot)
    }

    pub fn directional(model: ModelId) -> Self {
        Self::new(model, LightKind::Directional)
    }

    /// World position of the light's marker.
    pub fn position(&self) -> Vec3 {
        self.object.translator.pos
    }

    /// Direction the light shines in (the rotator's front).
    pub fn direction(&self) -> Vec3 {
        self.object.rotator.front()
    }

    /// Write this light's uniforms as element `index` of its kind's array.
    pub fn upload(&self, sink: &mut impl ShaderSink, index: usize) {
        match self.kind {
            LightKind::Point => {
                let prefix = format!("pointLights[{index}]");
                sink.set_vec3(&format!("{prefix}.position"), self.position());
                self.upload_colors(sink, &prefix);
                self.upload_attenuation(sink, &prefix);
            }
            LightKind::Spot => {
                let prefix = format!("spotLights[{index}]");
                let point = format!("{prefix}.point");
                sink.set_vec3(&format!("{point}.position"), self.position());
                self.upload_colors(sink, &point);
                self.upload_attenuation(sink, &point);
                sink.set_vec3(&format!("{prefix}.direction"), self.direction());
                sink.set_float(&format!("{prefix}.innerCutoff"), self.inner_cutoff);
                sink.set_float(&format!("{prefix}.outerCutoff"), self.outer_cutoff);
            }
            LightKind::Directional => {
                let prefix = format!("directionalLights[{index}]");
                sink.set_vec3(&format!("{prefix}.direction"), self.direction());
                self.upload_colors(sink, &prefix);
            }
        }
    }

    fn upload_colors(&self, sink: &mut impl ShaderSink, prefix: &str) {
        sink.set_vec3(&format!("{prefix}.light.ambient"), self.ambient);
        sink.set_vec3(&format!("{prefix}.light.diffuse"), self.diffuse);
        sink.set_vec3(&format!("{prefix}.light.specular"), self.specular);
    }

    fn upload_attenuation(&self, sink: &mut impl ShaderSink, prefix: &str) {
        sink.set_float(&format!("{prefix}.attenuation.constant"), self.constant);
        sink.set_float(&format!("{prefix}.attenuation.linear"), self.linear);
        sink.set_float(&format!("{prefix}.attenuation.quadratic"), self.quadratic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::UniformRecorder;

    #[test]
    fn point_light_uploads_position_and_attenuation() {
        let mut light = Light::point(ModelId(1));
        light.object.translator.move_to(Vec3::new(1.0, 1.0, 1.0));

        let mut sink = UniformRecorder::new();
        light.upload(&mut sink, 2);

        assert_eq!(sink.vec3("pointLights[2].position"), Some(Vec3::ONE));
        assert_eq!(sink.vec3("pointLights[2].light.diffuse"), Some(Vec3::splat(0.5)));
        assert_eq!(sink.float("pointLights[2].attenuation.linear"), Some(0.09));
        assert_eq!(sink.uniform_count(), 7);
    }

    #[test]
    fn spot_light_nests_point_block() {
        let mut light = Light::spot(ModelId(1));
        light.object.rotator.rotate_x(90.0);

        let mut sink = UniformRecorder::new();
        light.upload(&mut sink, 0);

        assert!(sink.vec3("spotLights[0].point.position").is_some());
        assert!(sink.float("spotLights[0].point.attenuation.quadratic").is_some());
        let direction = sink.vec3("spotLights[0].direction").unwrap();
        assert!(direction.abs_diff_eq(-Vec3::Y, 1e-5));
        let inner = sink.float("spotLights[0].innerCutoff").unwrap();
        let outer = sink.float("spotLights[0].outerCutoff").unwrap();
        assert!(inner > outer);
        assert_eq!(sink.uniform_count(), 10);
    }

    #[test]
    fn directional_light_has_no_position() {
        let mut light = Light::directional(ModelId(1));
        light.object.rotator.rotate_y(90.0);
        let direction = light.direction();
        light.object.translator.move_to(-direction);

        let mut sink = UniformRecorder::new();
        light.upload(&mut sink, 0);

        let direction = sink.vec3("directionalLights[0].direction").unwrap();
        assert!(direction.abs_diff_eq(Vec3::X, 1e-5));
        assert!(sink.vec3("directionalLights[0].position").is_none());
        assert_eq!(sink.uniform_count(), 4);
        assert_eq!(LightKind::Directional.count_uniform(), "numDirLights");
    }
}
