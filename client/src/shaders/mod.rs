//! WGSL shaders compiled into the binary.
//!
//! - `water.wgsl` shades the reflective water plane: noise normals from a
//!   tiling normal map, sun highlights, Fresnel blend with the mirror pass.
//! - `skybox.wgsl` samples the sky cube map by view direction.

use bevy::{asset::embedded_asset, prelude::*};

/// Shader asset paths
pub mod paths {
    pub const WATER_SHADER: &str = "embedded://jets/shaders/water.wgsl";
    pub const SKYBOX_SHADER: &str = "embedded://jets/shaders/skybox.wgsl";
}

pub struct ShadersPlugin;

impl Plugin for ShadersPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "water.wgsl");
        embedded_asset!(app, "skybox.wgsl");
    }
}
