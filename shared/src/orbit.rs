//! Orbit-style camera controls.
//!
//! The camera sits on a sphere around a fixed target. Dragging changes the
//! azimuth and polar angles, scrolling scales the radius. Distance and polar
//! angle are clamped after every change, so no input can push the camera past
//! its limits.

use std::f32::consts::{PI, TAU};

use bevy::math::{Vec2, Vec3};
use bevy::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::constants::{ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR_ANGLE, ORBIT_MIN_DISTANCE};

/// Keeps the polar angle off the poles, where the azimuth is undefined.
const POLE_EPSILON: f32 = 1.0e-6;

/// Per-scroll-step radius factor at zoom speed 1.
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angles are measured from straight up.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar_angle: 0.0,
            max_polar_angle: ORBIT_MAX_POLAR_ANGLE,
            enable_pan: false,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl OrbitLimits {
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_polar(&self, polar: f32) -> f32 {
        let low = self.min_polar_angle.max(POLE_EPSILON);
        // A range narrower than the pole margin collapses onto `low`
        let high = self.max_polar_angle.min(PI - POLE_EPSILON).max(low);
        polar.clamp(low, high)
    }
}

/// Spherical camera position around a target.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    limits: OrbitLimits,
}

impl OrbitState {
    /// Starts from a camera at `eye` looking at `target`, clamped into `limits`.
    pub fn from_eye(eye: Vec3, target: Vec3, limits: OrbitLimits) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (azimuth, polar) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, limits.max_polar_angle)
        };

        Self {
            target,
            radius: limits.clamp_distance(radius),
            azimuth,
            polar: limits.clamp_polar(polar),
            limits,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Camera position for the current angles and radius.
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                sin_polar * sin_azimuth,
                cos_polar,
                sin_polar * cos_azimuth,
            ) * self.radius
    }

    /// Adds to the azimuth and polar angles. Non-finite input is ignored.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if delta_azimuth.is_finite() {
            self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(TAU);
        }
        if delta_polar.is_finite() {
            self.polar = self.limits.clamp_polar(self.polar + delta_polar);
        }
    }

    /// Applies a pointer drag of `delta` pixels in a viewport `viewport_height` tall.
    ///
    /// A drag across the full height turns the camera one full revolution.
    pub fn drag(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 || !viewport_height.is_finite() {
            return;
        }
        let per_pixel = TAU / viewport_height * self.limits.rotate_speed;
        self.rotate(-delta.x * per_pixel, -delta.y * per_pixel);
    }

    /// Multiplies the radius by `factor`, then clamps it.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.radius = self.limits.clamp_distance(self.radius * factor);
    }

    /// Zooms by scroll steps; positive steps move toward the target.
    pub fn scroll(&mut self, steps: f32) {
        if !steps.is_finite() || steps == 0.0 {
            return;
        }
        let factor = ZOOM_BASE.powf(steps * self.limits.zoom_speed);
        if factor == 0.0 || !factor.is_finite() {
            // Saturated exponent: jump straight to the matching bound.
            self.radius = if steps > 0.0 {
                self.limits.min_distance
            } else {
                self.limits.max_distance
            };
            return;
        }
        self.zoom(factor);
    }

    /// Moves the target. Returns `false` and does nothing when panning is disabled.
    pub fn pan(&mut self, offset: Vec3) -> bool {
        if !self.limits.enable_pan || !offset.is_finite() {
            return false;
        }
        self.target += offset;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CAMERA_START, ORBIT_TARGET};

    fn start() -> OrbitState {
        OrbitState::from_eye(CAMERA_START, ORBIT_TARGET, OrbitLimits::default())
    }

    fn assert_within_limits(state: &OrbitState) {
        let limits = state.limits();
        assert!(state.radius() >= limits.min_distance && state.radius() <= limits.max_distance);
        assert!(state.polar() < PI * 0.495 + 1e-6);
        let distance = state.eye().distance(state.target());
        assert!(distance >= limits.min_distance - 0.5 && distance <= limits.max_distance + 0.5);
        // Never below the target's horizon
        assert!(state.eye().y > state.target().y);
    }

    #[test]
    fn test_from_eye_round_trips_position() {
        let state = start();
        assert!(state.eye().distance(CAMERA_START) < 0.01);
        assert_within_limits(&state);
    }

    #[test]
    fn test_from_eye_clamps_out_of_range_start() {
        let state = OrbitState::from_eye(
            Vec3::new(0.0, -100.0, 10.0),
            Vec3::ZERO,
            OrbitLimits::default(),
        );
        assert_eq!(state.radius(), ORBIT_MIN_DISTANCE);
        assert_eq!(state.polar(), ORBIT_MAX_POLAR_ANGLE);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut state = start();
        state.zoom(1.0e9);
        assert_eq!(state.radius(), ORBIT_MAX_DISTANCE);
        state.zoom(1.0e-9);
        assert_eq!(state.radius(), ORBIT_MIN_DISTANCE);
        state.zoom(f32::INFINITY);
        state.zoom(-3.0);
        state.zoom(f32::NAN);
        assert_eq!(state.radius(), ORBIT_MIN_DISTANCE);
    }

    #[test]
    fn test_scroll_extreme_steps() {
        let mut state = start();
        state.scroll(1.0e6);
        assert_eq!(state.radius(), ORBIT_MIN_DISTANCE);
        state.scroll(-1.0e6);
        assert_eq!(state.radius(), ORBIT_MAX_DISTANCE);
        state.scroll(1.0);
        assert!((state.radius() - ORBIT_MAX_DISTANCE * 0.95).abs() < 0.01);
    }

    #[test]
    fn test_zero_polar_range_does_not_panic() {
        let limits = OrbitLimits {
            max_polar_angle: 0.0,
            ..OrbitLimits::default()
        };
        let mut state = OrbitState::from_eye(CAMERA_START, ORBIT_TARGET, limits);
        assert!(state.polar() > 0.0 && state.polar() <= POLE_EPSILON);

        state.rotate(0.3, 1.0);
        state.drag(Vec2::new(-500.0, 500.0), 720.0);
        assert!(state.polar() <= POLE_EPSILON);
        assert!(state.eye().is_finite());
    }

    #[test]
    fn test_rotate_is_clamped() {
        let mut state = start();
        state.rotate(0.0, 100.0);
        assert_eq!(state.polar(), ORBIT_MAX_POLAR_ANGLE);
        assert_within_limits(&state);

        state.rotate(0.0, -100.0);
        assert!(state.polar() > 0.0);
        assert_within_limits(&state);

        state.rotate(f32::NAN, f32::INFINITY);
        assert!(state.polar().is_finite() && state.azimuth().is_finite());
    }

    #[test]
    fn test_drag_sweep_never_breaks_limits() {
        let mut state = start();
        for i in -50..50 {
            let delta = Vec2::new(i as f32 * 37.0, i as f32 * 1.0e4);
            state.drag(delta, 720.0);
            state.scroll(i as f32 * 3.0);
            assert_within_limits(&state);
        }
    }

    #[test]
    fn test_drag_full_height_is_full_turn() {
        let mut state = start();
        let azimuth = state.azimuth();
        state.drag(Vec2::new(720.0, 0.0), 720.0);
        let diff = (state.azimuth() - azimuth).rem_euclid(TAU);
        assert!(diff < 1e-4 || (TAU - diff) < 1e-4);
    }

    #[test]
    fn test_pan_disabled_by_default() {
        let mut state = start();
        assert!(!state.pan(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(state.target(), ORBIT_TARGET);

        let mut free = OrbitState::from_eye(
            CAMERA_START,
            ORBIT_TARGET,
            OrbitLimits {
                enable_pan: true,
                ..Default::default()
            },
        );
        assert!(free.pan(Vec3::X));
        assert_eq!(free.target(), ORBIT_TARGET + Vec3::X);
    }
}
