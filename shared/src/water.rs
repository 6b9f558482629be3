//! Water surface state that does not need a GPU.

use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Static shading parameters of the water plane, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    pub base_width: f32,
    pub base_height: f32,
    /// Multiplier applied to the base size.
    pub scale: f32,
    /// Edge of the square reflection render target, in pixels.
    pub reflection_texture_size: u32,
    pub distortion_scale: f32,
    pub sun_color: u32,
    pub water_color: u32,
    pub alpha: f32,
    pub fog: bool,
    /// Shader clock increment per frame.
    pub time_step: f32,
    /// Height of the water plane.
    pub level: f32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            base_width: WATER_BASE_WIDTH,
            base_height: WATER_BASE_HEIGHT,
            scale: WATER_SCALE,
            reflection_texture_size: WATER_REFLECTION_TEXTURE_SIZE,
            distortion_scale: WATER_DISTORTION_SCALE,
            sun_color: WATER_SUN_COLOR,
            water_color: WATER_COLOR,
            alpha: 1.0,
            fog: true,
            time_step: WATER_TIME_STEP,
            level: 0.0,
        }
    }
}

impl WaterSettings {
    /// World-space size of the plane.
    pub fn plane_size(&self) -> (f32, f32) {
        (self.base_width * self.scale, self.base_height * self.scale)
    }
}

/// Monotonic shader clock, advanced by a fixed step once per frame.
///
/// The value is derived from the tick count rather than summed, so it keeps
/// growing by exactly one step per tick no matter how long the scene runs.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WaterClock {
    step: f64,
    ticks: u64,
}

impl WaterClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: f64::from(step),
            ticks: 0,
        }
    }

    /// Advances one frame and returns the new time.
    pub fn tick(&mut self) -> f64 {
        self.ticks += 1;
        self.elapsed()
    }

    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Default for WaterClock {
    fn default() -> Self {
        Self::new(WATER_TIME_STEP)
    }
}

/// Scroll rate of each normal-map layer, in texture repeats per time unit.
const NORMAL_SCROLL_RATES: [[f64; 2]; 4] = [
    [1.0 / 17.0, 1.0 / 29.0],
    [1.0 / 19.0, -1.0 / 31.0],
    [1.0 / 101.0, 1.0 / 97.0],
    [-1.0 / 109.0, 1.0 / 113.0],
];

/// UV offsets of the four normal-map layers at shader time `time`.
///
/// The normal map repeats every unit of UV, so each offset is reduced to
/// `[0, 1)` here in double precision. The values stay small enough for f32 no
/// matter how large `time` grows.
pub fn normal_map_scroll(time: f64) -> [Vec2; 4] {
    let wrap = |phase: f64| {
        let wrapped = phase.rem_euclid(1.0) as f32;
        // Values just below 1.0 can round up when narrowed
        if wrapped >= 1.0 {
            0.0
        } else {
            wrapped
        }
    };
    NORMAL_SCROLL_RATES.map(|[u, v]| Vec2::new(wrap(time * u), wrap(time * v)))
}

/// Pixel size of the reflection render target for a viewport aspect ratio.
///
/// The target keeps the configured height and follows the viewport's aspect,
/// so the main camera's screen coordinates map straight onto it.
pub fn reflection_target_size(aspect: f32, height: u32) -> (u32, u32) {
    let height = height.max(1);
    let width = if aspect.is_finite() && aspect > 0.0 {
        (height as f32 * aspect).round().max(1.0) as u32
    } else {
        height
    };
    (width, height)
}

/// Camera placement for the reflection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Mirrors a camera across the horizontal plane `y = level`.
///
/// The mirrored camera sees the scene flipped left to right relative to a true
/// reflection, so the reflection texture has to be sampled with `u` inverted.
pub fn mirror_across_water(eye: Vec3, target: Vec3, up: Vec3, level: f32) -> MirrorView {
    let reflect_point = |p: Vec3| Vec3::new(p.x, 2.0 * level - p.y, p.z);
    MirrorView {
        eye: reflect_point(eye),
        target: reflect_point(target),
        up: Vec3::new(up.x, -up.y, up.z),
    }
}
