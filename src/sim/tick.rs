//! Fixed timestep clock
//!
//! Frame deltas from the host are accumulated and drained in fixed steps.
//! Obstacle motion reads the elapsed simulation time, never the frame delta.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_HZ};
use crate::sim_dt;

#[derive(Debug, Clone)]
pub struct SimClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
    ticks: u64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(SIM_HZ, MAX_SUBSTEPS)
    }
}

impl SimClock {
    pub fn new(hz: u32, max_substeps: u32) -> Self {
        Self {
            dt: sim_dt(hz),
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed simulation time in seconds
    pub fn elapsed(&self) -> f32 {
        (self.ticks as f64 * self.dt as f64) as f32
    }

    /// Run one fixed step and return the new elapsed time
    pub fn step(&mut self) -> f32 {
        self.ticks += 1;
        self.elapsed()
    }

    /// Accumulate a frame and call `on_tick(elapsed)` for each fixed step due.
    /// Returns the number of steps run.
    pub fn advance(&mut self, frame_dt: f32, mut on_tick: impl FnMut(f32)) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            on_tick(self.step());
            self.accumulator -= self.dt;
            substeps += 1;
        }
        // Drop backlog we could not catch up on
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        substeps
    }
}
