//! Physics engine boundary
//!
//! The course never integrates bodies itself. It describes static and
//! kinematic bodies, registers them with a `PhysicsWorld`, and afterwards only
//! pushes pose commands through the returned handles.

pub mod memory;
#[cfg(feature = "rapier")]
pub mod rapier;

pub use memory::MemoryWorld;
#[cfg(feature = "rapier")]
pub use rapier::RapierWorld;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Opaque handle to a body owned by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body:{}", self.0)
    }
}

/// Contact response coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
}

impl Material {
    /// Obstacles, walls and the goal prop: bounce without drag
    pub const OBSTACLE: Material = Material {
        restitution: OBSTACLE_RESTITUTION,
        friction: OBSTACLE_FRICTION,
    };
    /// Floor pads and the catch floor
    pub const FLOOR: Material = Material {
        restitution: FLOOR_RESTITUTION,
        friction: FLOOR_FRICTION,
    };
}

/// Collider geometry. Sizes are hardcoded per segment type, never derived from meshes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Axis-aligned box in body space
    Cuboid { half_extents: Vec3 },
}

/// One collider attached to a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    pub shape: ColliderShape,
    /// Offset from the body origin
    pub offset: Vec3,
    pub material: Material,
}

/// Body description handed to the physics world at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Human-readable name for logs and errors
    pub label: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub colliders: Vec<ColliderDesc>,
}

/// Physics collaborator failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("physics world rejected body `{label}`: {reason}")]
    Rejected { label: String, reason: String },
    #[error("unknown body handle {0}")]
    UnknownBody(BodyHandle),
}

/// The physics engine as seen by the course
///
/// Pose setters apply on the next step. Calling one for a handle that has been
/// removed is a no-op; calling one twice in a tick keeps the last pose.
pub trait PhysicsWorld {
    /// Register a fixed body (floors, walls, decoration)
    fn register_static(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError>;

    /// Register a kinematic, position-driven body (unaffected by forces)
    fn register_kinematic(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError>;

    /// Detach and destroy a body
    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError>;

    fn set_next_kinematic_rotation(&mut self, handle: BodyHandle, rotation: Quat);

    fn set_next_kinematic_translation(&mut self, handle: BodyHandle, translation: Vec3);
}
