//! Deterministic course simulation
//!
//! Everything here is a function of its inputs:
//! - Seeded RNG only, rebuilt from the level seed on every generation
//! - Obstacle poses are closed-form functions of elapsed time
//! - Fixed timestep only
//! - No rendering dependencies; physics is reached through `PhysicsWorld`

pub mod bounds;
pub mod course;
pub mod level;
pub mod motion;
pub mod segment;
pub mod tick;

pub use bounds::BoundsSpec;
pub use course::{Course, ObstacleBinding};
pub use level::{Level, LevelError, RngState, generate};
pub use motion::{
    ObstacleMotion, PoseCommand, axe_sideways, axe_translation, limbo_elevation,
    limbo_translation, spin_rotation,
};
pub use segment::{DEFAULT_OBSTACLE_TYPES, FloorStyle, Marker, SegmentInstance, SegmentType};
pub use tick::SimClock;
