//! Per-run frame context: clocks, pacing timers, frame counters and the
//! feature toggles driven by the keyboard.

use std::rc::Rc;
use std::time::Duration;

use engine_core::{Clock, FrameCounter, Timer, VirtualClock};

use crate::config::SandboxConfig;

/// Feature switches flipped from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    /// Debug normal visualisation.
    pub debug: bool,
    /// Orbit the first point light around the origin.
    pub move_light: bool,
    pub light_directional: bool,
    /// Spotlight that follows the camera.
    pub light_spotlight: bool,
    pub pendulum_spot_lights: bool,
    /// Stencil outline around objects.
    pub draw_border: bool,
}

/// Clock/timer bundle. Input runs on real time; physics and graphics run on
/// rate-scaled virtual clocks so they can be slowed down independently.
pub struct FrameContext {
    realtime_clock: Rc<dyn Clock>,
    physics_clock: VirtualClock<Rc<dyn Clock>>,
    graphics_clock: VirtualClock<Rc<dyn Clock>>,

    input_timer: Timer,
    physics_timer: Timer,
    graphics_timer: Timer,

    pub realtime_counter: FrameCounter,
    pub input_counter: FrameCounter,
    pub physics_counter: FrameCounter,
    pub graphics_counter: FrameCounter,

    realtime: Duration,
    last_realtime: Duration,
    delta: Duration,
    num_frames: u64,

    do_input: u32,
    do_physics: u32,
    do_render: u32,

    pub toggles: Toggles,
    pub mouse_look: bool,
    aspect_ratio: f32,
}

impl FrameContext {
    pub fn new(config: &SandboxConfig, source: Rc<dyn Clock>) -> Self {
        let mut physics_clock = VirtualClock::new(source.clone());
        physics_clock.set_rate(config.physics_rate);
        let mut graphics_clock = VirtualClock::new(source.clone());
        graphics_clock.set_rate(config.graphics_rate);

        Self {
            realtime_clock: source,
            physics_clock,
            graphics_clock,
            input_timer: Timer::from_hz(config.input_hz),
            physics_timer: Timer::from_hz(config.physics_hz),
            graphics_timer: Timer::from_hz(config.graphics_hz),
            realtime_counter: FrameCounter::default(),
            input_counter: FrameCounter::default(),
            physics_counter: FrameCounter::default(),
            graphics_counter: FrameCounter::default(),
            realtime: Duration::ZERO,
            last_realtime: Duration::ZERO,
            delta: Duration::ZERO,
            num_frames: 0,
            do_input: 0,
            do_physics: 0,
            do_render: 0,
            toggles: Toggles::default(),
            mouse_look: config.mouse_look,
            aspect_ratio: config.aspect_ratio(),
        }
    }

    /// Sample the clocks and latch which stages run this frame.
    pub fn update_time(&mut self) {
        self.realtime = self.realtime_clock.now();
        self.delta = self.realtime.saturating_sub(self.last_realtime);
        self.last_realtime = self.realtime;
        self.num_frames += 1;

        self.graphics_timer.tick_with_clock(&self.graphics_clock);
        self.physics_timer.tick_with_clock(&self.physics_clock);
        self.input_timer.tick_with_time(self.realtime);

        if self.realtime_counter.tick(self.realtime) {
            log::debug!("{:.1} loop fps", self.realtime_counter.fps());
        }

        self.do_input = self.input_timer.passed();
        self.do_physics = self.physics_timer.passed();
        self.do_render = self.graphics_timer.passed();
    }

    pub fn do_input(&self) -> bool {
        self.do_input > 0
    }

    pub fn do_physics(&self) -> bool {
        self.do_physics > 0
    }

    pub fn do_render(&self) -> bool {
        self.do_render > 0
    }

    /// Step applied to input-driven motion: one input interval, so camera
    /// speed does not depend on the loop rate.
    pub fn delta_time(&self) -> f32 {
        self.input_timer.interval().as_secs_f32()
    }

    /// Measured wall-clock time between the last two frames.
    pub fn frame_delta(&self) -> Duration {
        self.delta
    }

    pub fn realtime(&self) -> Duration {
        self.realtime
    }

    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    /// Simulation time on the rate-scaled physics clock.
    pub fn physics_time_secs(&self) -> f32 {
        self.physics_clock.now_secs() as f32
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
