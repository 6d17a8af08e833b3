//! Core spatial and timing types.
//!
//! This crate provides the foundational types used by every positionable entity:
//! - Basis frames and the Translator / Rotator / Scaler placement components
//! - Transform errors
//! - Clocks, timers and frame counters

pub mod basis;
pub mod error;
pub mod time;
pub mod transform;

pub use basis::*;
pub use error::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
