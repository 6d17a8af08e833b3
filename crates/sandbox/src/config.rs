//! Sandbox configuration (window, pacing, camera). Loaded from sandbox.ron at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent sandbox settings. Loaded from `sandbox.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SandboxConfig {
    /// Viewport width in pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Viewport height in pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Input polling rate.
    #[serde(default = "default_hz")]
    pub input_hz: f64,
    /// Physics step rate.
    #[serde(default = "default_hz")]
    pub physics_hz: f64,
    /// Render rate.
    #[serde(default = "default_hz")]
    pub graphics_hz: f64,
    /// Playback rate of the physics clock (1.0 = real time).
    #[serde(default = "default_rate")]
    pub physics_rate: f64,
    /// Playback rate of the graphics clock.
    #[serde(default = "default_rate")]
    pub graphics_rate: f64,
    /// Camera movement speed in units per second.
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    /// Camera keyboard look speed in degrees per second.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Degrees per pixel of mouse movement.
    #[serde(default = "default_rate_f32")]
    pub rotation_sensitivity: f32,
    /// Drive the camera from mouse movement.
    #[serde(default)]
    pub mouse_look: bool,
    /// Number of frames the headless loop simulates.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Simulated wall-clock time per frame, in milliseconds.
    #[serde(default = "default_frame_step_ms")]
    pub frame_step_ms: f64,
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_hz() -> f64 {
    30.0
}
fn default_rate() -> f64 {
    1.0
}
fn default_rate_f32() -> f32 {
    1.0
}
fn default_movement_speed() -> f32 {
    2.5
}
fn default_rotation_speed() -> f32 {
    30.0
}
fn default_frames() -> u32 {
    300
}
fn default_frame_step_ms() -> f64 {
    1000.0 / 60.0
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            input_hz: default_hz(),
            physics_hz: default_hz(),
            graphics_hz: default_hz(),
            physics_rate: default_rate(),
            graphics_rate: default_rate(),
            movement_speed: default_movement_speed(),
            rotation_speed: default_rotation_speed(),
            rotation_sensitivity: default_rate_f32(),
            mouse_look: false,
            frames: default_frames(),
            frame_step_ms: default_frame_step_ms(),
        }
    }
}

impl SandboxConfig {
    /// Load config from `sandbox.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match Self::load_from(&path) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {:#}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_ron(&data).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse config from a RON string; missing fields take their defaults.
    pub fn from_ron(data: &str) -> Result<Self> {
        Ok(ron::from_str(data)?)
    }

    /// Save current config to `sandbox.ron`. Returns the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save current config as pretty RON to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing config")?;
        std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
    }

    /// Viewport width over height; a zero height counts as one pixel.
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("sandbox.ron")
}
