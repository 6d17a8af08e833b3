//! Uniform sink abstraction.
//!
//! Shader compilation and GPU upload live outside this crate. Everything here
//! talks to them through [`ShaderSink`], which only needs to accept named
//! uniforms and draw requests.

use std::collections::HashMap;

use glam::{Mat4, Vec3};

/// Handle to a model owned by the draw layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelId(pub u32);

/// Consumer of named shader uniforms and draw calls.
pub trait ShaderSink {
    fn set_mat4(&mut self, name: &str, value: Mat4);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    /// Draw `model` with the uniforms set so far.
    fn draw_model(&mut self, model: ModelId);
}

/// A recorded uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Mat4(Mat4),
    Vec3(Vec3),
    Float(f32),
    Int(i32),
}

/// Sink that keeps the latest value of every uniform and counts draws.
/// Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct UniformRecorder {
    uniforms: HashMap<String, Uniform>,
    draws: Vec<ModelId>,
}

impl UniformRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value set for `name`, of any type.
    pub fn get(&self, name: &str) -> Option<Uniform> {
        self.uniforms.get(name).copied()
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            Uniform::Mat4(m) => Some(m),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            Uniform::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            Uniform::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            Uniform::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Number of distinct uniform names set so far.
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }

    /// Draw calls issued since the last [`UniformRecorder::clear_draws`].
    pub fn draws(&self) -> &[ModelId] {
        &self.draws
    }

    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    fn record(&mut self, name: &str, value: Uniform) {
        log::trace!("uniform {name} = {value:?}");
        self.uniforms.insert(name.to_owned(), value);
    }
}

impl ShaderSink for UniformRecorder {
    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.record(name, Uniform::Mat4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.record(name, Uniform::Vec3(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, Uniform::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, Uniform::Int(value));
    }

    fn draw_model(&mut self, model: ModelId) {
        log::trace!("draw {model:?}");
        self.draws.push(model);
    }
}
