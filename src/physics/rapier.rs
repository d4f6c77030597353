//! rapier3d adapter
//!
//! Maps course bodies onto a Rapier rigid-body set: statics become fixed
//! bodies, obstacles become kinematic position-based bodies. Stepping the
//! pipeline stays with the host, which owns gravity, integration parameters
//! and the player body; the sets are public so it can pass them to
//! `PhysicsPipeline::step`.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;

use super::{BodyDesc, BodyHandle, ColliderShape, PhysicsError, PhysicsWorld};

pub struct RapierWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub islands: IslandManager,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    handles: HashMap<BodyHandle, RigidBodyHandle>,
    next_id: u32,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl RapierWorld {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            handles: HashMap::new(),
            next_id: 0,
        }
    }

    /// Rapier handle behind a course handle
    pub fn rapier_handle(&self, handle: BodyHandle) -> Option<RigidBodyHandle> {
        self.handles.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    fn insert(&mut self, builder: RigidBodyBuilder, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        if desc.colliders.is_empty() {
            return Err(PhysicsError::Rejected {
                label: desc.label.clone(),
                reason: "body has no colliders".to_string(),
            });
        }
        if !desc.translation.is_finite() || !desc.rotation.is_finite() {
            return Err(PhysicsError::Rejected {
                label: desc.label.clone(),
                reason: "non-finite pose".to_string(),
            });
        }

        let handle = BodyHandle(self.next_id);
        let next_id = self.next_id.checked_add(1).ok_or_else(|| PhysicsError::Rejected {
            label: desc.label.clone(),
            reason: "body handles exhausted".to_string(),
        })?;

        let iso = Isometry::from_parts(
            Translation3::from(to_vector(desc.translation)),
            to_rotation(desc.rotation),
        );
        let rb_handle = self.bodies.insert(builder.pose(iso).build());

        for collider in &desc.colliders {
            let built = match collider.shape {
                ColliderShape::Cuboid { half_extents } => {
                    ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                }
            }
            .translation(to_vector(collider.offset))
            .restitution(collider.material.restitution)
            .friction(collider.material.friction)
            .build();
            self.colliders
                .insert_with_parent(built, rb_handle, &mut self.bodies);
        }

        self.next_id = next_id;
        self.handles.insert(handle, rb_handle);
        log::debug!("registered {} as {} ({:?})", desc.label, handle, rb_handle);
        Ok(handle)
    }

    fn kinematic_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let rb_handle = *self.handles.get(&handle)?;
        self.bodies
            .get_mut(rb_handle)
            .filter(|body| body.is_kinematic())
    }
}

impl PhysicsWorld for RapierWorld {
    fn register_static(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        self.insert(RigidBodyBuilder::fixed(), desc)
    }

    fn register_kinematic(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        self.insert(RigidBodyBuilder::kinematic_position_based(), desc)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        let rb_handle = self
            .handles
            .remove(&handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        self.bodies.remove(
            rb_handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        Ok(())
    }

    fn set_next_kinematic_rotation(&mut self, handle: BodyHandle, rotation: Quat) {
        match self.kinematic_mut(handle) {
            Some(body) => body.set_next_kinematic_rotation(to_rotation(rotation)),
            None => log::debug!("ignoring rotation for {}", handle),
        }
    }

    fn set_next_kinematic_translation(&mut self, handle: BodyHandle, translation: Vec3) {
        match self.kinematic_mut(handle) {
            Some(body) => body.set_next_kinematic_translation(to_vector(translation)),
            None => log::debug!("ignoring translation for {}", handle),
        }
    }
}

#[inline]
fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn to_rotation(q: Quat) -> UnitQuaternion<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}
