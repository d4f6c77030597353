//! Marble Race - procedural obstacle course generation
//!
//! Core modules:
//! - `sim`: Deterministic level assembly and kinematic obstacle motion
//! - `physics`: Boundary to the physics engine (body registration, pose commands)
//! - `session`: Session state store and the race driver that regenerates on change
//! - `settings`: Data-driven configuration

pub mod physics;
pub mod session;
pub mod settings;
pub mod sim;

pub use physics::{BodyHandle, MemoryWorld, PhysicsError, PhysicsWorld};
pub use session::{Race, SessionState};
pub use settings::Settings;
pub use sim::{Level, LevelError, SegmentType, generate};

/// Course configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 120;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Length of one segment slot along -Z
    pub const SEGMENT_LENGTH: f32 = 4.0;
    /// Most obstacle blocks a level may hold. Keeps every slot's Z exact in f32
    /// and the bounds length within u32.
    pub const MAX_BLOCKS_COUNT: u32 = 1 << 16;
    /// Floor footprint (full extents) shared by every segment
    pub const FLOOR_SIZE: [f32; 3] = [4.0, 0.2, 4.0];

    /// Bar obstacle full extents (spinner and limbo)
    pub const BAR_SIZE: [f32; 3] = [3.5, 0.3, 0.3];
    /// Axe panel full extents
    pub const AXE_SIZE: [f32; 3] = [1.5, 1.5, 0.3];
    /// Spinner bar rest height above the segment origin
    pub const SPINNER_HEIGHT: f32 = 0.3;
    /// Limbo and axe rest height above the segment origin
    pub const LOW_OBSTACLE_HEIGHT: f32 = 0.18;

    /// Limbo bar: elevation = sin(t + offset) + LIMBO_BASE
    pub const LIMBO_BASE: f32 = 1.2;
    /// Axe: sideways = sin(t + offset) * AXE_SWING
    pub const AXE_SWING: f32 = 1.25;
    /// Axe panel height above the segment origin while swinging
    pub const AXE_HEIGHT: f32 = 0.75;

    /// Obstacles and walls: bouncy, no drag
    pub const OBSTACLE_RESTITUTION: f32 = 0.2;
    pub const OBSTACLE_FRICTION: f32 = 0.0;
    /// Floors and the catch floor slow a marble down
    pub const FLOOR_RESTITUTION: f32 = 0.2;
    pub const FLOOR_FRICTION: f32 = 1.0;

    /// Side wall distance from the course centre line
    pub const SIDE_WALL_X: f32 = 2.15;
    /// Wall extents: thickness and height
    pub const WALL_THICKNESS: f32 = 0.3;
    pub const WALL_HEIGHT: f32 = 1.5;
    /// End cap spans the floor plus both side walls
    pub const END_WALL_WIDTH: f32 = 4.6;
}

/// Fixed timestep in seconds for a tick rate
#[inline]
pub fn sim_dt(hz: u32) -> f32 {
    1.0 / hz.max(1) as f32
}

/// Half extents of a full-size box
#[inline]
pub fn half_extents(size: [f32; 3]) -> glam::Vec3 {
    glam::Vec3::from_array(size) * 0.5
}
