//! GPU-side layout of the water material's uniform block.
//!
//! `ShaderType` expands to layout assertions that are never called, hence the
//! module-wide `dead_code` allowance.

#![allow(dead_code)]

use bevy::{color::ColorToComponents, prelude::*, render::render_resource::ShaderType};
use jets_core::water::{normal_map_scroll, WaterSettings};

use crate::scene::lighting::srgb_hex;

/// Uniform data for the water shader (matches the WGSL `WaterUniform` struct)
#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct WaterUniform {
    /// Scatter color of the water body, linear RGBA
    pub water_color: Vec4,
    /// Sun color used for highlights, linear RGBA
    pub sun_color: Vec4,
    /// Unit vector pointing toward the sun
    pub sun_direction: Vec3,
    /// How far surface normals push the reflection lookup
    pub distortion_scale: f32,
    /// UV offsets of normal-map layers 0 and 1, wrapped to one repeat
    pub scroll_a: Vec4,
    /// UV offsets of normal-map layers 2 and 3, wrapped to one repeat
    pub scroll_b: Vec4,
    pub alpha: f32,
    /// Scale applied to world coordinates before sampling the normal map
    pub size: f32,
    /// Non-zero when scene fog is applied to the surface
    pub fog: u32,
}

impl WaterUniform {
    pub fn new(settings: &WaterSettings, sun_direction: Vec3) -> Self {
        Self {
            water_color: srgb_hex(settings.water_color).to_linear().to_vec4(),
            sun_color: srgb_hex(settings.sun_color).to_linear().to_vec4(),
            sun_direction: sun_direction.normalize_or(Vec3::Y),
            distortion_scale: settings.distortion_scale,
            scroll_a: Vec4::ZERO,
            scroll_b: Vec4::ZERO,
            alpha: settings.alpha,
            size: 1.0,
            fog: u32::from(settings.fog),
        }
    }

    /// Moves the normal-map layers to water time `time`.
    pub fn set_time(&mut self, time: f64) {
        let [l0, l1, l2, l3] = normal_map_scroll(time);
        self.scroll_a = Vec4::new(l0.x, l0.y, l1.x, l1.y);
        self.scroll_b = Vec4::new(l2.x, l2.y, l3.x, l3.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jets_core::water::WaterClock;

    #[test]
    fn test_uniform_from_default_settings() {
        let uniform = WaterUniform::new(&WaterSettings::default(), Vec3::new(-1.0, 1.0, -1.0));

        assert_eq!(uniform.scroll_a, Vec4::ZERO);
        assert_eq!(uniform.scroll_b, Vec4::ZERO);
        assert_eq!(uniform.fog, 1);
        assert_eq!(uniform.distortion_scale, 50.0);
        assert!((uniform.sun_direction.length() - 1.0).abs() < 1e-6);
        // 0x001e0f has no red and more green than blue
        assert_eq!(uniform.water_color.x, 0.0);
        assert!(uniform.water_color.y > uniform.water_color.z);
    }

    #[test]
    fn test_uploaded_scroll_changes_every_tick_after_long_runs() {
        let mut clock = WaterClock::default();
        // 73 hours of frames, where an f32 time value starts to stall
        let base = (73 * 3600 * 60) as f64 * clock.step();
        let mut uniform = WaterUniform::new(&WaterSettings::default(), Vec3::Y);

        let offsets = |uniform: &WaterUniform| {
            [uniform.scroll_a.to_array(), uniform.scroll_b.to_array()].concat()
        };

        uniform.set_time(base + clock.elapsed());
        let mut previous = offsets(&uniform);
        for _ in 0..600 {
            uniform.set_time(base + clock.tick());
            let current = offsets(&uniform);
            for (now, before) in current.iter().zip(&previous) {
                assert_ne!(now, before);
                assert!((0.0..1.0).contains(now));
            }
            previous = current;
        }
    }

    #[test]
    fn test_degenerate_sun_direction_points_up() {
        let uniform = WaterUniform::new(&WaterSettings::default(), Vec3::ZERO);
        assert_eq!(uniform.sun_direction, Vec3::Y);
    }
}
