//! Frame clocks

use std::time::Instant;

/// Supplies the per-frame `dt` and a running timestamp, both in seconds
pub trait Clock {
    /// Seconds since the previous call (or since creation)
    fn delta(&mut self) -> f32;
    /// Seconds since the clock was created
    fn now(&self) -> f32;
}

/// Wall clock. `dt` is not clamped, so a stall shows up as one large step.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Deterministic clock advancing by a fixed step per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    step: f32,
    elapsed: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.elapsed += self.step;
        self.step
    }

    fn now(&self) -> f32 {
        self.elapsed
    }
}
