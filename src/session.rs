//! Session state and the race driver
//!
//! `SessionState` is the store the rest of the game writes to. `Race` watches
//! the block count and seed, and rebuilds the course when either changes:
//! the old course is torn down before the new one is registered.

use serde::{Deserialize, Serialize};

use crate::physics::PhysicsWorld;
use crate::settings::Settings;
use crate::sim::{Course, Level, LevelError, SegmentType, SimClock, generate};

/// Values the course is generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    blocks_count: i64,
    block_seed: u64,
    obstacle_types: Vec<SegmentType>,
}

impl SessionState {
    pub fn new(blocks_count: i64, block_seed: u64, obstacle_types: Vec<SegmentType>) -> Self {
        Self {
            blocks_count,
            block_seed,
            obstacle_types,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.blocks_count,
            settings.block_seed,
            settings.obstacle_types.clone(),
        )
    }

    pub fn blocks_count(&self) -> i64 {
        self.blocks_count
    }

    pub fn block_seed(&self) -> u64 {
        self.block_seed
    }

    pub fn obstacle_types(&self) -> &[SegmentType] {
        &self.obstacle_types
    }

    pub fn set_blocks_count(&mut self, count: i64) {
        self.blocks_count = count;
    }

    pub fn set_block_seed(&mut self, seed: u64) {
        self.block_seed = seed;
    }

    /// Replace the obstacle set. Does not trigger a rebuild on its own;
    /// pair it with a new seed to get a new layout.
    pub fn set_obstacle_types(&mut self, types: Vec<SegmentType>) {
        self.obstacle_types = types;
    }
}

/// Owns the physics world and the mounted course
#[derive(Debug)]
pub struct Race<W: PhysicsWorld> {
    world: W,
    course: Option<Course>,
    /// (count, seed) of the last build attempt
    built_for: Option<(i64, u64)>,
    clock: SimClock,
}

impl<W: PhysicsWorld> Race<W> {
    pub fn new(world: W, clock: SimClock) -> Self {
        Self {
            world,
            course: None,
            built_for: None,
            clock,
        }
    }

    /// Rebuild if the count or seed changed since the last build.
    /// Returns whether a rebuild happened.
    pub fn sync(&mut self, state: &SessionState) -> Result<bool, LevelError> {
        let key = (state.blocks_count, state.block_seed);
        if self.built_for == Some(key) {
            return Ok(false);
        }
        self.rebuild(state)?;
        Ok(true)
    }

    /// Tear down the current course and build one from `state`.
    /// On failure the race is left without a course.
    pub fn rebuild(&mut self, state: &SessionState) -> Result<(), LevelError> {
        self.built_for = Some((state.blocks_count, state.block_seed));
        if let Some(course) = self.course.take() {
            course.teardown(&mut self.world);
        }

        let result = generate(state.blocks_count, state.block_seed, &state.obstacle_types)
            .and_then(|level| Course::mount(level, &mut self.world));
        match result {
            Ok(course) => {
                self.course = Some(course);
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "Level generation failed (count={}, seed={}): {}",
                    state.blocks_count,
                    state.block_seed,
                    err
                );
                Err(err)
            }
        }
    }

    /// Feed a frame delta; runs the due fixed steps and returns how many ran
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let Self {
            world,
            course,
            clock,
            ..
        } = self;
        clock.advance(frame_dt, |t| {
            if let Some(course) = course.as_ref() {
                course.tick(t, &mut *world);
            }
        })
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn level(&self) -> Option<&Level> {
        self.course.as_ref().map(Course::level)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Tear down the course and hand the world back
    pub fn into_world(mut self) -> W {
        if let Some(course) = self.course.take() {
            course.teardown(&mut self.world);
        }
        self.world
    }
}
