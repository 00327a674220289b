// Fixed-step simulation clock
//
// Converts elapsed frame time into a whole number of fixed physics ticks.
// Time is fed in explicitly with `advance`, so the same frame durations
// always produce the same tick sequence.

use std::time::Duration;

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Fixed-step clock state
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Length of one tick
    step: Duration,

    /// Upper bound on ticks returned by a single `advance`
    max_steps: u32,

    /// Whether the simulation is paused
    paused: bool,

    /// Frames fed through `advance`
    frame_count: u64,

    /// Total ticks handed out
    tick_count: u64,

    /// Simulated time covered by handed-out ticks
    simulated: Duration,
}

impl FixedStepClock {
    /// Create a 60 Hz clock
    pub fn new() -> Self {
        Self::with_step(FIXED_TIMESTEP_DURATION, MAX_PHYSICS_STEPS)
    }

    /// Create a clock with a custom step length and per-frame cap
    pub fn with_step(step: Duration, max_steps: u32) -> Self {
        Self {
            accumulator: Duration::ZERO,
            step: step.max(Duration::from_micros(1)),
            max_steps: max_steps.max(1),
            paused: false,
            frame_count: 0,
            tick_count: 0,
            simulated: Duration::ZERO,
        }
    }

    /// Feed one frame's elapsed time, returns the number of ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Drop the backlog we refused to simulate
        if ticks == self.max_steps && self.accumulator >= self.step {
            log::debug!(
                "Clock fell behind, dropping {:.1} ms",
                self.accumulator.as_secs_f64() * 1000.0
            );
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.step.as_nanos()) as u64,
            );
        }

        self.tick_count += u64::from(ticks);
        self.simulated += self.step * ticks;
        ticks
    }

    /// Length of one tick in seconds
    pub fn delta(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Interpolation alpha between the last tick and the next one
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }

    /// Simulated time covered by ticks so far
    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    /// Total number of frames fed in
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new()
    }
}
