//! Water material for the reflective plane.
//!
//! Extends Bevy's StandardMaterial with the water uniform, the reflection
//! render target and the tiling normal map. The base material is unlit; all
//! shading happens in `water.wgsl`.

use bevy::{
    asset::Asset,
    pbr::{ExtendedMaterial, MaterialExtension, StandardMaterial},
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use super::uniforms::WaterUniform;
use crate::shaders::paths;

/// Water material extension.
///
/// This is used with `ExtendedMaterial<StandardMaterial, WaterExtension>`.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
pub struct WaterExtension {
    #[uniform(100)]
    pub uniform: WaterUniform,

    /// Mirrored view of the scene, rendered each frame
    #[texture(101)]
    #[sampler(102)]
    pub reflection: Handle<Image>,

    /// Tileable normal map, sampled with repeat addressing
    #[texture(103)]
    #[sampler(104)]
    pub normals: Handle<Image>,
}

impl MaterialExtension for WaterExtension {
    fn fragment_shader() -> ShaderRef {
        paths::WATER_SHADER.into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        paths::WATER_SHADER.into()
    }
}

/// Type alias for the complete water material.
pub type WaterMaterial = ExtendedMaterial<StandardMaterial, WaterExtension>;

pub fn create_water_material(
    uniform: WaterUniform,
    reflection: Handle<Image>,
    normals: Handle<Image>,
) -> WaterMaterial {
    let alpha_mode = if uniform.alpha < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };

    ExtendedMaterial {
        base: StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            alpha_mode,
            ..default()
        },
        extension: WaterExtension {
            uniform,
            reflection,
            normals,
        },
    }
}
