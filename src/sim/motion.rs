//! Closed-form obstacle motion
//!
//! Every obstacle pose is a pure function of elapsed simulation time and a
//! parameter drawn once when the segment is built. Nothing here keeps state
//! between ticks, so a tick can be replayed, skipped or issued for a body that
//! is about to be torn down.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pose command for one kinematic body, applied on the next physics step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PoseCommand {
    /// Replace the body's rotation
    Rotation(Quat),
    /// Replace the body's world-space translation
    Translation(Vec3),
}

/// Per-instance motion parameters (immutable once drawn)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleMotion {
    /// Bar spinning around +Y at `speed` rad/s (always -1 or +1)
    Spin { speed: f32 },
    /// Bar bobbing vertically, phase-shifted by `time_offset`
    Limbo { time_offset: f32 },
    /// Panel swinging along X, phase-shifted by `time_offset`
    Axe { time_offset: f32 },
}

impl ObstacleMotion {
    /// Draw spinner parameters
    pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::Spin {
            speed: sample_spin_speed(rng),
        }
    }

    /// Draw limbo parameters
    pub fn limbo<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::Limbo {
            time_offset: sample_time_offset(rng),
        }
    }

    /// Draw axe parameters
    pub fn axe<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::Axe {
            time_offset: sample_time_offset(rng),
        }
    }

    /// Pose for elapsed time `t`, given the owning segment's position
    pub fn pose_at(&self, t: f32, anchor: Vec3) -> PoseCommand {
        match *self {
            ObstacleMotion::Spin { speed } => PoseCommand::Rotation(spin_rotation(t, speed)),
            ObstacleMotion::Limbo { time_offset } => {
                PoseCommand::Translation(limbo_translation(t, time_offset, anchor))
            }
            ObstacleMotion::Axe { time_offset } => {
                PoseCommand::Translation(axe_translation(t, time_offset, anchor))
            }
        }
    }
}

/// Spinner sign. Biased coin: `(u1 + 0.3) * u2 < 0.5` picks -1 (~68% of draws).
pub fn sample_spin_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let a: f32 = rng.random();
    let b: f32 = rng.random();
    if (a + 0.3) * b < 0.5 { -1.0 } else { 1.0 }
}

/// Phase offset in [0, 2π)
pub fn sample_time_offset<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u: f32 = rng.random();
    // u * TAU can round up to TAU for u just below 1.0
    let offset = u * TAU;
    if offset >= TAU { 0.0 } else { offset }
}

/// Rotation around +Y by `t * speed` radians
#[inline]
pub fn spin_rotation(t: f32, speed: f32) -> Quat {
    Quat::from_rotation_y(t * speed)
}

/// Limbo bar height, always within [0.2, 2.2]
#[inline]
pub fn limbo_elevation(t: f32, time_offset: f32) -> f32 {
    (t + time_offset).sin() + LIMBO_BASE
}

/// Limbo bar translation: keeps the segment's X/Z, replaces Y
pub fn limbo_translation(t: f32, time_offset: f32, anchor: Vec3) -> Vec3 {
    Vec3::new(anchor.x, limbo_elevation(t, time_offset), anchor.z)
}

/// Axe sideways offset, always within [-1.25, 1.25]
#[inline]
pub fn axe_sideways(t: f32, time_offset: f32) -> f32 {
    (t + time_offset).sin() * AXE_SWING
}

/// Axe panel translation: swings on X around the course centre line
pub fn axe_translation(t: f32, time_offset: f32, anchor: Vec3) -> Vec3 {
    Vec3::new(axe_sideways(t, time_offset), anchor.y + AXE_HEIGHT, anchor.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spin_rotation_is_about_y() {
        let q = spin_rotation(std::f32::consts::FRAC_PI_2, 1.0);
        let v = q * Vec3::X;
        assert!((v - Vec3::NEG_Z).length() < 1e-5);

        // Reverse speed turns the other way
        let q = spin_rotation(std::f32::consts::FRAC_PI_2, -1.0);
        let v = q * Vec3::X;
        assert!((v - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_spin_speed_is_biased_coin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let draws = 20_000;
        let mut negatives = 0;
        for _ in 0..draws {
            let s = sample_spin_speed(&mut rng);
            assert!(s == -1.0 || s == 1.0);
            if s < 0.0 {
                negatives += 1;
            }
        }
        // P(-1) = 0.2 + 0.5 * ln(1.3 / 0.5) ≈ 0.678
        let ratio = negatives as f32 / draws as f32;
        assert!((0.64..0.72).contains(&ratio), "ratio {}", ratio);
    }

    #[test]
    fn test_limbo_keeps_segment_xz() {
        let anchor = Vec3::new(0.0, 0.0, -12.0);
        let p = limbo_translation(3.0, 0.5, anchor);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, -12.0);
        assert!((p.y - ((3.5f32).sin() + 1.2)).abs() < 1e-6);
    }

    #[test]
    fn test_axe_height_follows_segment() {
        let anchor = Vec3::new(0.0, 0.0, -8.0);
        let p = axe_translation(0.0, 0.0, anchor);
        assert_eq!(p, Vec3::new(0.0, 0.75, -8.0));
    }

    #[test]
    fn test_pose_at_dispatch() {
        let anchor = Vec3::new(0.0, 0.0, -4.0);
        assert!(matches!(
            ObstacleMotion::Spin { speed: 1.0 }.pose_at(1.0, anchor),
            PoseCommand::Rotation(_)
        ));
        assert_eq!(
            ObstacleMotion::Limbo { time_offset: 0.0 }.pose_at(0.0, anchor),
            PoseCommand::Translation(Vec3::new(0.0, 1.2, -4.0))
        );
    }

    proptest! {
        #[test]
        fn limbo_elevation_in_range(t in -1.0e4f32..1.0e4, offset in 0.0f32..TAU) {
            let y = limbo_elevation(t, offset);
            prop_assert!(y >= 0.2 - 1e-5 && y <= 2.2 + 1e-5);
        }

        #[test]
        fn axe_sideways_in_range(t in -1.0e4f32..1.0e4, offset in 0.0f32..TAU) {
            let x = axe_sideways(t, offset);
            prop_assert!(x.abs() <= 1.25 + 1e-5);
        }

        #[test]
        fn time_offset_in_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let offset = sample_time_offset(&mut rng);
            prop_assert!((0.0..TAU).contains(&offset));
        }

        #[test]
        fn motion_is_pure(t in 0.0f32..600.0, offset in 0.0f32..TAU) {
            let anchor = Vec3::new(0.0, 0.0, -20.0);
            let m = ObstacleMotion::Axe { time_offset: offset };
            prop_assert_eq!(m.pose_at(t, anchor), m.pose_at(t, anchor));
        }
    }
}
