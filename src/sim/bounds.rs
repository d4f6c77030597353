//! Course bounds: side walls, end cap and the catch floor
//!
//! All of it hangs off one fixed body at the world origin. Geometry depends
//! only on the number of occupied slots.

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::consts::*;
use crate::physics::{BodyDesc, ColliderDesc, ColliderShape, Material};

/// Bounds derived from the occupied length (start + blocks + finish)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundsSpec {
    /// Occupied slots, `count + 2`
    pub length: u32,
}

impl BoundsSpec {
    pub fn new(length: u32) -> Self {
        Self { length }
    }

    /// Bounds for a level with `count` obstacle blocks
    pub fn for_count(count: u32) -> Self {
        Self::new(count + 2)
    }

    /// Total corridor depth along -Z
    pub fn depth(&self) -> f32 {
        self.length as f32 * SEGMENT_LENGTH
    }

    /// Z of the corridor midpoint (the start pad is centred on z = 0)
    pub fn center_z(&self) -> f32 {
        -(self.length as f32 * SEGMENT_LENGTH / 2.0) + SEGMENT_LENGTH / 2.0
    }

    /// Centre of the left (-X) and right (+X) walls
    pub fn side_wall_centers(&self) -> [Vec3; 2] {
        let y = WALL_HEIGHT / 2.0;
        [
            Vec3::new(-SIDE_WALL_X, y, self.center_z()),
            Vec3::new(SIDE_WALL_X, y, self.center_z()),
        ]
    }

    pub fn side_wall_half_extents(&self) -> Vec3 {
        Vec3::new(WALL_THICKNESS / 2.0, WALL_HEIGHT / 2.0, self.depth() / 2.0)
    }

    /// Centre of the wall closing the far end, just inside the last slot
    pub fn end_wall_center(&self) -> Vec3 {
        Vec3::new(0.0, WALL_HEIGHT / 2.0, -self.depth() + 1.8)
    }

    pub fn end_wall_half_extents(&self) -> Vec3 {
        Vec3::new(END_WALL_WIDTH / 2.0, WALL_HEIGHT / 2.0, WALL_THICKNESS / 2.0)
    }

    /// Catch floor collider: spans the whole corridor just below the pads
    pub fn catch_floor_center(&self) -> Vec3 {
        Vec3::new(0.0, -0.1, self.center_z())
    }

    pub fn catch_floor_half_extents(&self) -> Vec3 {
        Vec3::new(FLOOR_SIZE[0] / 2.0, 0.1, self.depth() / 2.0)
    }

    /// The single fixed body carrying every bounds collider
    pub fn body(&self) -> BodyDesc {
        let wall = |center: Vec3, half_extents: Vec3| ColliderDesc {
            shape: ColliderShape::Cuboid { half_extents },
            offset: center,
            material: Material::OBSTACLE,
        };
        let [left, right] = self.side_wall_centers();

        BodyDesc {
            label: format!("bounds[{}]", self.length),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            colliders: vec![
                wall(left, self.side_wall_half_extents()),
                wall(right, self.side_wall_half_extents()),
                wall(self.end_wall_center(), self.end_wall_half_extents()),
                ColliderDesc {
                    shape: ColliderShape::Cuboid {
                        half_extents: self.catch_floor_half_extents(),
                    },
                    offset: self.catch_floor_center(),
                    material: Material::FLOOR,
                },
            ],
        }
    }
}
