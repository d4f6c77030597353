//! Mounting a level into a physics world and driving its obstacles
//!
//! A `Course` owns the handles of every body it registered. Mounting is all
//! or nothing; teardown removes everything the course registered.

use super::level::{Level, LevelError};
use super::motion::PoseCommand;
use crate::physics::{BodyDesc, BodyHandle, PhysicsError, PhysicsWorld};

/// Link between an obstacle segment and its kinematic body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleBinding {
    /// Slot of the owning segment in `Level::segments`
    pub slot: usize,
    pub handle: BodyHandle,
}

/// A level whose bodies live in a physics world
#[derive(Debug)]
pub struct Course {
    level: Level,
    statics: Vec<BodyHandle>,
    obstacles: Vec<ObstacleBinding>,
}

impl Course {
    /// Register every body of `level`. On failure nothing stays registered.
    pub fn mount<W: PhysicsWorld + ?Sized>(level: Level, world: &mut W) -> Result<Self, LevelError> {
        let mut course = Course {
            level,
            statics: Vec::new(),
            obstacles: Vec::new(),
        };
        if let Err(err) = course.register_all(world) {
            log::warn!(
                "Mounting level (seed={}) failed, rolling back: {}",
                course.level.seed,
                err
            );
            course.remove_all(world);
            return Err(err.into());
        }

        log::info!(
            "Mounted level: {} static bodies, {} kinematic obstacles",
            course.statics.len(),
            course.obstacles.len()
        );
        Ok(course)
    }

    fn register_all<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> Result<(), PhysicsError> {
        let mut statics: Vec<BodyDesc> = Vec::new();
        let mut kinematics: Vec<(usize, BodyDesc)> = Vec::new();
        for seg in &self.level.segments {
            statics.push(seg.floor_body());
            statics.extend(seg.decoration_body());
            if let Some(desc) = seg.obstacle_body() {
                kinematics.push((seg.slot, desc));
            }
        }
        statics.push(self.level.bounds.body());

        for desc in &statics {
            self.statics.push(world.register_static(desc)?);
        }
        for (slot, desc) in &kinematics {
            let handle = world.register_kinematic(desc)?;
            self.obstacles.push(ObstacleBinding {
                slot: *slot,
                handle,
            });
        }
        Ok(())
    }

    fn remove_all<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) -> usize {
        let handles = self
            .obstacles
            .drain(..)
            .map(|b| b.handle)
            .chain(self.statics.drain(..));

        let mut removed = 0;
        for handle in handles {
            match world.remove_body(handle) {
                Ok(()) => removed += 1,
                Err(err) => log::warn!("teardown: {}", err),
            }
        }
        removed
    }

    /// Remove every body this course registered; returns the number removed
    pub fn teardown<W: PhysicsWorld + ?Sized>(mut self, world: &mut W) -> usize {
        let removed = self.remove_all(world);
        log::info!("Tore down level (seed={}): {} bodies removed", self.level.seed, removed);
        removed
    }

    /// Push one pose command per obstacle for elapsed time `t` (seconds)
    pub fn tick<W: PhysicsWorld + ?Sized>(&self, t: f32, world: &mut W) {
        for binding in &self.obstacles {
            let Some(pose) = self.level.segments[binding.slot].pose_at(t) else {
                continue;
            };
            match pose {
                PoseCommand::Rotation(q) => world.set_next_kinematic_rotation(binding.handle, q),
                PoseCommand::Translation(v) => {
                    world.set_next_kinematic_translation(binding.handle, v)
                }
            }
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn obstacles(&self) -> &[ObstacleBinding] {
        &self.obstacles
    }

    pub fn static_handles(&self) -> &[BodyHandle] {
        &self.statics
    }

    /// Every handle owned by this course
    pub fn body_count(&self) -> usize {
        self.statics.len() + self.obstacles.len()
    }
}
