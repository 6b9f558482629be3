//! The scene director: owns the cameras, lights and sphere, and fixes the
//! order of per-frame work.

pub mod camera;
pub mod lighting;
pub mod sphere;

use bevy::prelude::*;
use jets_core::sets::{SceneStartupSet, SceneUpdateSet};

/// Render layer of everything the reflection pass may see.
pub const SCENE_LAYER: usize = 0;
/// Render layer of the water plane, hidden from its own reflection.
pub const WATER_LAYER: usize = 1;

pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .configure_sets(
                Startup,
                (SceneStartupSet::Scene, SceneStartupSet::Attachments).chain(),
            )
            .configure_sets(
                Update,
                (
                    SceneUpdateSet::Input,
                    SceneUpdateSet::Animation,
                    SceneUpdateSet::Water,
                    SceneUpdateSet::Reflection,
                    SceneUpdateSet::Overlay,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    lighting::setup_lighting,
                    camera::spawn_main_camera,
                    sphere::spawn_sphere,
                )
                    .in_set(SceneStartupSet::Scene),
            )
            .add_systems(
                Update,
                (camera::window_resize_system, camera::orbit_controls_system)
                    .chain()
                    .in_set(SceneUpdateSet::Input),
            )
            .add_systems(
                Update,
                sphere::animate_sphere_system.in_set(SceneUpdateSet::Animation),
            );
    }
}
