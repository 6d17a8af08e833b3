//! Time sources and frame pacing for the main loop.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;

    fn now_secs(&self) -> f64 {
        self.now().as_secs_f64()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to. Drives the headless loop and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Rate-scaled view of another clock.
///
/// Each read advances virtual time by the source's elapsed time since the
/// previous read, multiplied by the rate. Changing the rate never makes the
/// virtual time jump.
#[derive(Debug)]
pub struct VirtualClock<C: Clock> {
    source: C,
    rate: f64,
    last_source: Cell<Duration>,
    current: Cell<Duration>,
}

impl<C: Clock> VirtualClock<C> {
    pub fn new(source: C) -> Self {
        let start = source.now();
        Self {
            source,
            rate: 1.0,
            last_source: Cell::new(start),
            current: Cell::new(Duration::ZERO),
        }
    }

    /// Set the playback rate. Non-positive or non-finite rates fall back to 1.0.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = if rate > 0.0 && rate.is_finite() {
            rate
        } else {
            log::warn!("Invalid clock rate {rate}, using 1.0");
            1.0
        };
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl<C: Clock> Clock for VirtualClock<C> {
    fn now(&self) -> Duration {
        let source_now = self.source.now();
        let real_delta = source_now.saturating_sub(self.last_source.get());
        self.last_source.set(source_now);
        // Saturates instead of overflowing for huge rates.
        let scaled = Duration::try_from_secs_f64(real_delta.as_secs_f64() * self.rate)
            .unwrap_or(Duration::MAX);
        self.current.set(self.current.get().saturating_add(scaled));
        self.current.get()
    }
}

/// Periodic trigger: accumulates elapsed time and records a pass whenever a
/// full interval has been collected.
///
/// At most one pass is recorded per tick, so a long stall does not cause a
/// burst of catch-up work.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    interval: Duration,
    current: Duration,
    last: Duration,
    collected: Duration,
    passed: u32,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Timer that fires `hz` times per second. A non-positive rate fires on
    /// every tick; a rate too small to express as an interval never fires.
    pub fn from_hz(hz: f64) -> Self {
        if !(hz > 0.0 && hz.is_finite()) {
            log::warn!("Invalid timer rate {hz} Hz, firing every tick");
            return Self::new(Duration::ZERO);
        }
        match Duration::try_from_secs_f64(1.0 / hz) {
            Ok(interval) => Self::new(interval),
            Err(e) => {
                log::warn!("Timer rate {hz} Hz out of range ({e}), using the longest interval");
                Self::new(Duration::MAX)
            }
        }
    }

    /// Replace the interval; time already collected is kept.
    pub fn set_interval(&mut self, interval: Duration) -> &mut Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time seen by the latest tick.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Tick with the current time of `clock`.
    pub fn tick_with_clock(&mut self, clock: &dyn Clock) -> &mut Self {
        self.tick_with_time(clock.now())
    }

    /// Collect the time elapsed since the previous tick and record a pass
    /// if a full interval is available.
    pub fn tick_with_time(&mut self, now: Duration) -> &mut Self {
        self.current = now;
        let delta = now.saturating_sub(self.last);
        self.last = now;

        self.collected = self.collected.saturating_add(delta);
        if self.collected >= self.interval {
            self.collected -= self.interval;
            self.passed += 1;
        }
        self
    }

    /// Number of passes since the previous call. Clears the count.
    pub fn passed(&mut self) -> u32 {
        std::mem::take(&mut self.passed)
    }
}

/// Counts ticks and reports a rate once per interval.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    interval: Duration,
    frames: u32,
    last_report: Duration,
    frames_per_interval: u32,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FrameCounter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frames: 0,
            last_report: Duration::ZERO,
            frames_per_interval: 0,
        }
    }

    /// Count a frame at time `now`. Returns true when a new rate was reported.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.frames += 1;
        if now.saturating_sub(self.last_report) > self.interval {
            self.frames_per_interval = self.frames;
            self.last_report = now;
            self.frames = 0;
            true
        } else {
            false
        }
    }

    /// Rate measured over the last completed interval.
    pub fn fps(&self) -> f64 {
        self.frames_per_interval as f64 / self.interval.as_secs_f64()
    }
}
