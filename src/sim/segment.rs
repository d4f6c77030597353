//! Segment catalog
//!
//! A course is a row of fixed-length slots along -Z. Each slot is one
//! `SegmentType`: the start pad, one of three obstacle blocks, or the finish.
//! The catalog is static data; per-instance state is limited to the slot,
//! the world position and the motion parameters drawn at build time.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::{ObstacleMotion, PoseCommand};
use crate::consts::*;
use crate::half_extents;
use crate::physics::{BodyDesc, ColliderDesc, ColliderShape, Material};

/// Finish decoration collider (rough hull of the goal prop)
pub const END_DECORATION_HALF_EXTENTS: Vec3 = Vec3::new(0.55, 0.3, 0.55);
/// Finish decoration height above the segment origin
pub const END_DECORATION_HEIGHT: f32 = 0.3;

/// Segment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    Start,
    #[serde(alias = "spinner")]
    SpinningBar,
    #[serde(alias = "limbo")]
    LimboBar,
    #[serde(alias = "axe")]
    SwingingAxe,
    End,
}

/// Default obstacle set, in sampling order
pub const DEFAULT_OBSTACLE_TYPES: [SegmentType; 3] = [
    SegmentType::SpinningBar,
    SegmentType::SwingingAxe,
    SegmentType::LimboBar,
];

/// Floor look (the renderer maps these to materials)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FloorStyle {
    /// Start and finish pads
    Pad,
    /// Obstacle blocks
    Obstacle,
}

/// Floating text attached to a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub text: &'static str,
    /// Offset from the segment origin
    pub offset: Vec3,
}

/// Collider and rest pose of an obstacle body, relative to its segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    /// Full extents of the obstacle box
    pub size: [f32; 3],
    /// Height of the body origin above the segment origin at rest
    pub rest_height: f32,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::Start => "start",
            SegmentType::SpinningBar => "spinning_bar",
            SegmentType::LimboBar => "limbo_bar",
            SegmentType::SwingingAxe => "swinging_axe",
            SegmentType::End => "end",
        }
    }

    /// Parse a segment name (case-insensitive, short aliases accepted)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" => Some(SegmentType::Start),
            "spinning_bar" | "spinner" => Some(SegmentType::SpinningBar),
            "limbo_bar" | "limbo" => Some(SegmentType::LimboBar),
            "swinging_axe" | "axe" => Some(SegmentType::SwingingAxe),
            "end" | "finish" => Some(SegmentType::End),
            _ => None,
        }
    }

    /// True for the three obstacle blocks
    pub fn is_obstacle(&self) -> bool {
        self.obstacle().is_some()
    }

    pub fn floor_style(&self) -> FloorStyle {
        if self.is_obstacle() {
            FloorStyle::Obstacle
        } else {
            FloorStyle::Pad
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            SegmentType::Start => Some(Marker {
                text: "Marble Race",
                offset: Vec3::new(0.75, 0.65, 0.0),
            }),
            SegmentType::End => Some(Marker {
                text: "FINISH",
                offset: Vec3::new(0.0, 2.25, 2.0),
            }),
            _ => None,
        }
    }

    /// Obstacle body for this type, if it has one
    pub fn obstacle(&self) -> Option<ObstacleSpec> {
        match self {
            SegmentType::SpinningBar => Some(ObstacleSpec {
                size: BAR_SIZE,
                rest_height: SPINNER_HEIGHT,
            }),
            SegmentType::LimboBar => Some(ObstacleSpec {
                size: BAR_SIZE,
                rest_height: LOW_OBSTACLE_HEIGHT,
            }),
            SegmentType::SwingingAxe => Some(ObstacleSpec {
                size: AXE_SIZE,
                rest_height: LOW_OBSTACLE_HEIGHT,
            }),
            SegmentType::Start | SegmentType::End => None,
        }
    }

    /// Draw the per-instance motion parameters for this type
    pub fn draw_motion<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ObstacleMotion> {
        match self {
            SegmentType::SpinningBar => Some(ObstacleMotion::spin(rng)),
            SegmentType::LimboBar => Some(ObstacleMotion::limbo(rng)),
            SegmentType::SwingingAxe => Some(ObstacleMotion::axe(rng)),
            SegmentType::Start | SegmentType::End => None,
        }
    }
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed segment of a generated level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentInstance {
    pub kind: SegmentType,
    /// Slot along the course: 0 is the start pad, `count + 1` the finish
    pub slot: usize,
    /// World position of the segment origin
    pub position: Vec3,
    /// Motion parameters, present exactly for obstacle types
    pub motion: Option<ObstacleMotion>,
}

impl SegmentInstance {
    /// Build the segment in `slot`, drawing motion parameters from `rng`
    pub fn new<R: Rng + ?Sized>(kind: SegmentType, slot: usize, rng: &mut R) -> Self {
        Self {
            kind,
            slot,
            position: slot_position(slot),
            motion: kind.draw_motion(rng),
        }
    }

    /// 0-based index among the obstacle blocks
    pub fn body_index(&self) -> Option<usize> {
        self.kind.is_obstacle().then(|| self.slot - 1)
    }

    /// Static floor pad
    pub fn floor_body(&self) -> BodyDesc {
        BodyDesc {
            label: format!("{}#{} floor", self.kind, self.slot),
            translation: self.position,
            rotation: Quat::IDENTITY,
            colliders: vec![ColliderDesc {
                shape: ColliderShape::Cuboid {
                    half_extents: half_extents(FLOOR_SIZE),
                },
                offset: Vec3::new(0.0, -FLOOR_SIZE[1] / 2.0, 0.0),
                material: Material::FLOOR,
            }],
        }
    }

    /// Kinematic obstacle body at its rest pose
    pub fn obstacle_body(&self) -> Option<BodyDesc> {
        let spec = self.kind.obstacle()?;
        Some(BodyDesc {
            label: format!("{}#{} obstacle", self.kind, self.slot),
            translation: self.position + Vec3::Y * spec.rest_height,
            rotation: Quat::IDENTITY,
            colliders: vec![ColliderDesc {
                shape: ColliderShape::Cuboid {
                    half_extents: half_extents(spec.size),
                },
                offset: Vec3::ZERO,
                material: Material::OBSTACLE,
            }],
        })
    }

    /// Fixed goal prop on the finish segment
    pub fn decoration_body(&self) -> Option<BodyDesc> {
        if self.kind != SegmentType::End {
            return None;
        }
        Some(BodyDesc {
            label: format!("{}#{} goal", self.kind, self.slot),
            translation: self.position + Vec3::Y * END_DECORATION_HEIGHT,
            rotation: Quat::IDENTITY,
            colliders: vec![ColliderDesc {
                shape: ColliderShape::Cuboid {
                    half_extents: END_DECORATION_HALF_EXTENTS,
                },
                offset: Vec3::ZERO,
                material: Material::OBSTACLE,
            }],
        })
    }

    /// Obstacle pose for elapsed time `t`
    pub fn pose_at(&self, t: f32) -> Option<PoseCommand> {
        self.motion.map(|m| m.pose_at(t, self.position))
    }

    /// Z range [near, far) covered by this slot; near > far since the course runs along -Z
    pub fn z_range(&self) -> (f32, f32) {
        let half = SEGMENT_LENGTH / 2.0;
        (self.position.z + half, self.position.z - half)
    }
}

/// Segment origin for a slot
#[inline]
pub fn slot_position(slot: usize) -> Vec3 {
    Vec3::new(0.0, 0.0, -(slot as f32) * SEGMENT_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catalog_obstacles() {
        assert!(!SegmentType::Start.is_obstacle());
        assert!(!SegmentType::End.is_obstacle());
        for kind in DEFAULT_OBSTACLE_TYPES {
            assert!(kind.is_obstacle());
            assert_eq!(kind.floor_style(), FloorStyle::Obstacle);
        }
        assert_eq!(SegmentType::Start.floor_style(), FloorStyle::Pad);
    }

    #[test]
    fn test_limbo_sits_lower_than_spinner() {
        let spinner = SegmentType::SpinningBar.obstacle().unwrap();
        let limbo = SegmentType::LimboBar.obstacle().unwrap();
        assert_eq!(spinner.size, limbo.size);
        assert!(limbo.rest_height < spinner.rest_height);
        assert_eq!(SegmentType::SwingingAxe.obstacle().unwrap().size, [1.5, 1.5, 0.3]);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in [
            SegmentType::Start,
            SegmentType::SpinningBar,
            SegmentType::LimboBar,
            SegmentType::SwingingAxe,
            SegmentType::End,
        ] {
            assert_eq!(SegmentType::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(SegmentType::from_name(" Axe "), Some(SegmentType::SwingingAxe));
        assert_eq!(SegmentType::from_name("ramp"), None);
    }

    #[test]
    fn test_serde_aliases() {
        let kinds: Vec<SegmentType> =
            serde_json::from_str(r#"["spinner", "limbo_bar", "axe"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                SegmentType::SpinningBar,
                SegmentType::LimboBar,
                SegmentType::SwingingAxe
            ]
        );
    }

    #[test]
    fn test_instance_bodies() {
        let mut rng = Pcg32::seed_from_u64(1);
        let seg = SegmentInstance::new(SegmentType::SpinningBar, 3, &mut rng);
        assert_eq!(seg.position, Vec3::new(0.0, 0.0, -12.0));
        assert_eq!(seg.body_index(), Some(2));
        assert!(matches!(seg.motion, Some(ObstacleMotion::Spin { .. })));

        let body = seg.obstacle_body().unwrap();
        assert_eq!(body.translation, Vec3::new(0.0, 0.3, -12.0));
        assert_eq!(body.colliders[0].material, Material::OBSTACLE);
        assert!(seg.decoration_body().is_none());

        let floor = seg.floor_body();
        assert_eq!(floor.colliders[0].offset.y, -0.1);
    }

    #[test]
    fn test_start_and_end_have_no_obstacle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let start = SegmentInstance::new(SegmentType::Start, 0, &mut rng);
        assert!(start.motion.is_none());
        assert!(start.obstacle_body().is_none());
        assert!(start.pose_at(1.0).is_none());
        assert_eq!(start.kind.marker().map(|m| m.text), Some("Marble Race"));

        let end = SegmentInstance::new(SegmentType::End, 5, &mut rng);
        assert!(end.obstacle_body().is_none());
        let goal = end.decoration_body().unwrap();
        assert_eq!(goal.translation, Vec3::new(0.0, 0.3, -20.0));
    }

    #[test]
    fn test_z_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let seg = SegmentInstance::new(SegmentType::LimboBar, 1, &mut rng);
        assert_eq!(seg.z_range(), (-2.0, -6.0));
    }
}
