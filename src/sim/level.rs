//! Level assembly
//!
//! `generate` is a pure function of `(count, seed, types)`: both random
//! streams are rebuilt from the seed on every call, so equal inputs always
//! give equal levels.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bounds::BoundsSpec;
use super::segment::{SegmentInstance, SegmentType};
use crate::consts::{MAX_BLOCKS_COUNT, SEGMENT_LENGTH};
use crate::physics::PhysicsError;

/// Stream used to pick segment types
pub const TYPE_STREAM: u64 = 0;
/// Stream used for per-obstacle motion parameters
pub const MOTION_STREAM: u64 = 1;

/// Level generation and mounting failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    PhysicsRegistration(#[from] PhysicsError),
}

/// Seed plus stream selector for one deterministic generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    /// PCG generator on its own increment; streams never alias across seeds
    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// A generated course: start pad, `count` obstacle blocks, finish, bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub count: u32,
    pub seed: u64,
    /// Obstacle set the blocks were sampled from
    pub types: Vec<SegmentType>,
    /// Ordered by slot; always `count + 2` entries
    pub segments: Vec<SegmentInstance>,
    pub bounds: BoundsSpec,
}

impl Level {
    pub fn start(&self) -> &SegmentInstance {
        &self.segments[0]
    }

    pub fn end(&self) -> &SegmentInstance {
        &self.segments[self.segments.len() - 1]
    }

    /// Obstacle blocks in course order
    pub fn blocks(&self) -> &[SegmentInstance] {
        &self.segments[1..self.segments.len() - 1]
    }

    /// Types of the obstacle blocks in course order
    pub fn block_types(&self) -> Vec<SegmentType> {
        self.blocks().iter().map(|s| s.kind).collect()
    }

    /// Number of segments carrying a kinematic obstacle
    pub fn obstacle_count(&self) -> usize {
        self.segments.iter().filter(|s| s.motion.is_some()).count()
    }

    /// Z of the finish segment origin
    pub fn goal_z(&self) -> f32 {
        self.end().position.z
    }

    /// Distance from the near edge of the start pad to the far edge of the finish
    pub fn course_length(&self) -> f32 {
        self.bounds.depth()
    }

    /// Segment whose slot contains course coordinate `z`
    pub fn segment_at_z(&self, z: f32) -> Option<&SegmentInstance> {
        if !z.is_finite() {
            return None;
        }
        let slot = ((SEGMENT_LENGTH / 2.0 - z) / SEGMENT_LENGTH).floor();
        if slot < 0.0 {
            return None;
        }
        self.segments.get(slot as usize)
    }
}

/// Build a level of `count` obstacle blocks sampled uniformly from `types`
pub fn generate(count: i64, seed: u64, types: &[SegmentType]) -> Result<Level, LevelError> {
    let count = u32::try_from(count)
        .ok()
        .filter(|c| *c <= MAX_BLOCKS_COUNT)
        .ok_or_else(|| {
            LevelError::InvalidArgument(format!(
                "block count must be in 0..={}, got {}",
                MAX_BLOCKS_COUNT, count
            ))
        })?;
    if types.is_empty() {
        return Err(LevelError::InvalidArgument(
            "obstacle type set is empty".to_string(),
        ));
    }
    if let Some(kind) = types.iter().find(|t| !t.is_obstacle()) {
        return Err(LevelError::InvalidArgument(format!(
            "`{}` is not an obstacle type",
            kind
        )));
    }

    let mut type_rng = RngState::new(seed, TYPE_STREAM).to_rng();
    let mut motion_rng = RngState::new(seed, MOTION_STREAM).to_rng();

    let mut segments = Vec::with_capacity(count as usize + 2);
    segments.push(SegmentInstance::new(SegmentType::Start, 0, &mut motion_rng));
    for i in 0..count as usize {
        let kind = types[type_rng.random_range(0..types.len())];
        segments.push(SegmentInstance::new(kind, i + 1, &mut motion_rng));
    }
    segments.push(SegmentInstance::new(
        SegmentType::End,
        count as usize + 1,
        &mut motion_rng,
    ));

    let level = Level {
        count,
        seed,
        types: types.to_vec(),
        segments,
        bounds: BoundsSpec::for_count(count),
    };
    log::info!(
        "Generated level: seed={} blocks={} obstacles={} length={}",
        seed,
        count,
        level.obstacle_count(),
        level.bounds.length
    );
    Ok(level)
}
