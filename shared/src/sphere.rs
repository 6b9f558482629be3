//! Motion and coloring of the faceted sphere.
//!
//! The sphere's pose is a pure function of elapsed wall-clock time: nothing is
//! accumulated between frames, so it cannot drift.

use std::f64::consts::TAU;

use bevy::math::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Time-to-pose parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereMotion {
    /// Simulated time units per elapsed wall-clock second.
    pub time_scale: f64,
    pub bob_amplitude: f64,
    pub bob_offset: f64,
    /// Radians per simulated time unit around X.
    pub spin_x: f64,
    /// Radians per simulated time unit around Z.
    pub spin_z: f64,
}

impl Default for SphereMotion {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            bob_amplitude: 500.0,
            bob_offset: 250.0,
            spin_x: 0.5,
            spin_z: 0.51,
        }
    }
}

/// Where the sphere is at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePose {
    pub height: f64,
    pub rotation_x: f64,
    pub rotation_z: f64,
}

impl SphereMotion {
    pub fn simulated_time(&self, elapsed_secs: f64) -> f64 {
        elapsed_secs * self.time_scale
    }

    /// Pose at simulated time `t`.
    pub fn pose_at(&self, t: f64) -> SpherePose {
        SpherePose {
            height: t.sin() * self.bob_amplitude + self.bob_offset,
            rotation_x: t * self.spin_x,
            rotation_z: t * self.spin_z,
        }
    }

    pub fn pose_for_elapsed(&self, elapsed_secs: f64) -> SpherePose {
        self.pose_at(self.simulated_time(elapsed_secs))
    }

    /// Lowest and highest heights the sphere can reach.
    pub fn height_bounds(&self) -> (f64, f64) {
        let amplitude = self.bob_amplitude.abs();
        (self.bob_offset - amplitude, self.bob_offset + amplitude)
    }
}

impl SpherePose {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(0.0, self.height as f32, 0.0)
    }

    /// X then Z rotation, wrapped before narrowing so large times keep precision.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_x.rem_euclid(TAU) as f32,
            0.0,
            self.rotation_z.rem_euclid(TAU) as f32,
        )
    }
}

/// One random `0xRRGGBB` color per facet.
pub fn random_facet_colors<R: Rng>(facets: usize, rng: &mut R) -> Vec<u32> {
    (0..facets).map(|_| rng.gen_range(0..0x0100_0000)).collect()
}

/// Triangle count of an icosphere with `subdivisions` levels.
pub const fn icosphere_facets(subdivisions: u32) -> usize {
    let per_edge = subdivisions as usize + 1;
    20 * per_edge * per_edge
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_pose_at_zero() {
        let pose = SphereMotion::default().pose_at(0.0);
        assert!((pose.height - 250.0).abs() < EPSILON);
        assert_eq!(pose.rotation_x, 0.0);
        assert_eq!(pose.rotation_z, 0.0);
    }

    #[test]
    fn test_pose_formula_over_sweep() {
        let motion = SphereMotion::default();
        let (low, high) = motion.height_bounds();
        assert_eq!((low, high), (-250.0, 750.0));

        let samples = (0..2000)
            .map(|i| i as f64 * 0.37)
            .chain([1.0e3, 1.0e6, 1.0e9, 123_456_789.123]);
        for t in samples {
            let pose = motion.pose_at(t);
            assert!((pose.height - (t.sin() * 500.0 + 250.0)).abs() < EPSILON);
            assert!(pose.height >= low - EPSILON && pose.height <= high + EPSILON);
            assert!((pose.rotation_x - 0.5 * t).abs() <= EPSILON * t.max(1.0));
            assert!((pose.rotation_z - 0.51 * t).abs() <= EPSILON * t.max(1.0));
        }
    }

    #[test]
    fn test_pose_peaks() {
        let motion = SphereMotion::default();
        let top = motion.pose_at(std::f64::consts::FRAC_PI_2);
        let bottom = motion.pose_at(3.0 * std::f64::consts::FRAC_PI_2);
        assert!((top.height - 750.0).abs() < EPSILON);
        assert!((bottom.height + 250.0).abs() < EPSILON);
    }

    #[test]
    fn test_pose_is_stateless() {
        let motion = SphereMotion::default();
        let first = motion.pose_for_elapsed(42.5);
        let _ = motion.pose_for_elapsed(1.0);
        assert_eq!(first, motion.pose_for_elapsed(42.5));
    }

    #[test]
    fn test_time_scale() {
        let motion = SphereMotion {
            time_scale: 0.5,
            ..Default::default()
        };
        assert_eq!(motion.pose_for_elapsed(4.0), motion.pose_at(2.0));
    }

    #[test]
    fn test_rotation_stays_finite_for_large_time() {
        let pose = SphereMotion::default().pose_at(1.0e12);
        let rotation = pose.rotation();
        assert!(rotation.is_finite());
        assert!((rotation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_random_facet_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = random_facet_colors(icosphere_facets(4), &mut rng);
        assert_eq!(colors.len(), 500);
        assert!(colors.iter().all(|c| *c <= 0xffffff));

        let mut again = StdRng::seed_from_u64(7);
        assert_eq!(colors, random_facet_colors(500, &mut again));
    }

    #[test]
    fn test_icosphere_facets() {
        assert_eq!(icosphere_facets(0), 20);
        assert_eq!(icosphere_facets(1), 80);
    }
}
