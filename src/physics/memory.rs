//! In-process physics world
//!
//! Keeps registered bodies and the latest pose command per kinematic body,
//! without any integration. Used by the demo binary and the tests.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};

use super::{BodyDesc, BodyHandle, PhysicsError, PhysicsWorld};

/// Body mobility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Fixed,
    Kinematic,
}

/// A registered body and its pending pose
#[derive(Debug, Clone)]
pub struct MemoryBody {
    pub kind: BodyKind,
    pub desc: BodyDesc,
    pub next_translation: Vec3,
    pub next_rotation: Quat,
    /// Pose commands received since registration
    pub commands: u64,
}

/// Physics world that only records what it is told
#[derive(Debug, Default)]
pub struct MemoryWorld {
    bodies: BTreeMap<BodyHandle, MemoryBody>,
    next_id: u32,
    /// Reject registrations beyond this many live bodies
    capacity: Option<usize>,
    /// Pose commands aimed at removed or unknown bodies
    ignored_commands: u64,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// World that rejects registrations once `capacity` bodies are live
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&MemoryBody> {
        self.bodies.get(&handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &MemoryBody)> {
        self.bodies.iter().map(|(h, b)| (*h, b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn kinematic_count(&self) -> usize {
        self.count(BodyKind::Kinematic)
    }

    pub fn static_count(&self) -> usize {
        self.count(BodyKind::Fixed)
    }

    pub fn ignored_commands(&self) -> u64 {
        self.ignored_commands
    }

    fn count(&self, kind: BodyKind) -> usize {
        self.bodies.values().filter(|b| b.kind == kind).count()
    }

    fn insert(&mut self, kind: BodyKind, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        if let Some(capacity) = self.capacity {
            if self.bodies.len() >= capacity {
                return Err(PhysicsError::Rejected {
                    label: desc.label.clone(),
                    reason: format!("capacity of {} bodies reached", capacity),
                });
            }
        }
        if desc.colliders.is_empty() {
            return Err(PhysicsError::Rejected {
                label: desc.label.clone(),
                reason: "body has no colliders".to_string(),
            });
        }

        let handle = BodyHandle(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| PhysicsError::Rejected {
                label: desc.label.clone(),
                reason: "body handles exhausted".to_string(),
            })?;
        self.bodies.insert(
            handle,
            MemoryBody {
                kind,
                desc: desc.clone(),
                next_translation: desc.translation,
                next_rotation: desc.rotation,
                commands: 0,
            },
        );
        log::debug!("registered {:?} {} as {}", kind, desc.label, handle);
        Ok(handle)
    }

    fn kinematic_mut(&mut self, handle: BodyHandle) -> Option<&mut MemoryBody> {
        match self.bodies.get_mut(&handle) {
            Some(body) if body.kind == BodyKind::Kinematic => Some(body),
            _ => {
                self.ignored_commands += 1;
                log::debug!("ignoring pose command for {}", handle);
                None
            }
        }
    }
}

impl PhysicsWorld for MemoryWorld {
    fn register_static(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        self.insert(BodyKind::Fixed, desc)
    }

    fn register_kinematic(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        self.insert(BodyKind::Kinematic, desc)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.bodies
            .remove(&handle)
            .map(|_| ())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn set_next_kinematic_rotation(&mut self, handle: BodyHandle, rotation: Quat) {
        if let Some(body) = self.kinematic_mut(handle) {
            body.next_rotation = rotation;
            body.commands += 1;
        }
    }

    fn set_next_kinematic_translation(&mut self, handle: BodyHandle, translation: Vec3) {
        if let Some(body) = self.kinematic_mut(handle) {
            body.next_translation = translation;
            body.commands += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ColliderDesc, ColliderShape, Material};

    fn cube(label: &str) -> BodyDesc {
        BodyDesc {
            label: label.to_string(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            colliders: vec![ColliderDesc {
                shape: ColliderShape::Cuboid {
                    half_extents: Vec3::splat(0.5),
                },
                offset: Vec3::ZERO,
                material: Material::OBSTACLE,
            }],
        }
    }

    #[test]
    fn test_register_and_remove() {
        let mut world = MemoryWorld::new();
        let a = world.register_static(&cube("a")).unwrap();
        let b = world.register_kinematic(&cube("b")).unwrap();
        assert_ne!(a, b);
        assert_eq!(world.static_count(), 1);
        assert_eq!(world.kinematic_count(), 1);

        world.remove_body(b).unwrap();
        assert_eq!(world.kinematic_count(), 0);
        assert_eq!(world.remove_body(b), Err(PhysicsError::UnknownBody(b)));
    }

    #[test]
    fn test_pose_commands_keep_last() {
        let mut world = MemoryWorld::new();
        let h = world.register_kinematic(&cube("bar")).unwrap();
        world.set_next_kinematic_translation(h, Vec3::X);
        world.set_next_kinematic_translation(h, Vec3::X);
        assert_eq!(world.body(h).unwrap().next_translation, Vec3::X);
        assert_eq!(world.body(h).unwrap().commands, 2);
    }

    #[test]
    fn test_commands_to_removed_or_static_bodies_are_ignored() {
        let mut world = MemoryWorld::new();
        let fixed = world.register_static(&cube("wall")).unwrap();
        let h = world.register_kinematic(&cube("bar")).unwrap();
        world.remove_body(h).unwrap();

        world.set_next_kinematic_rotation(h, Quat::from_rotation_y(1.0));
        world.set_next_kinematic_translation(fixed, Vec3::Y);
        assert_eq!(world.ignored_commands(), 2);
        assert_eq!(world.body(fixed).unwrap().next_translation, Vec3::ZERO);
    }

    #[test]
    fn test_capacity_limit_rejects() {
        let mut world = MemoryWorld::with_capacity_limit(1);
        world.register_static(&cube("a")).unwrap();
        let err = world.register_static(&cube("b")).unwrap_err();
        assert!(matches!(err, PhysicsError::Rejected { ref label, .. } if label == "b"));
    }

    #[test]
    fn test_handle_exhaustion_rejects() {
        let mut world = MemoryWorld::new();
        world.next_id = u32::MAX;
        let err = world.register_kinematic(&cube("last")).unwrap_err();
        assert!(matches!(err, PhysicsError::Rejected { ref label, .. } if label == "last"));
        assert!(world.is_empty());
        assert_eq!(world.next_id, u32::MAX);
    }

    #[test]
    fn test_empty_body_rejected() {
        let mut world = MemoryWorld::new();
        let mut desc = cube("ghost");
        desc.colliders.clear();
        assert!(world.register_static(&desc).is_err());
        assert!(world.is_empty());
    }
}
