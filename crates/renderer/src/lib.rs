//! Render-facing side of the scene: camera, placed objects, lights, and the
//! uniform sink they upload through.

pub mod camera;
pub mod light;
pub mod object;
pub mod shader;

pub use camera::*;
pub use light::*;
pub use object::*;
pub use shader::*;
