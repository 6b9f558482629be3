//! The animated, reflective water plane.

mod material;
mod reflection;
mod uniforms;

use bevy::{
    image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor},
    pbr::NotShadowCaster,
    prelude::*,
    render::view::RenderLayers,
};
use jets_core::{
    sets::{SceneStartupSet, SceneUpdateSet},
    water::WaterClock,
    SceneConfig,
};

use material::{create_water_material, WaterMaterial};
use reflection::ReflectionTarget;
use uniforms::WaterUniform;

use crate::scene::WATER_LAYER;

pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<WaterMaterial>::default())
            .add_systems(
                Startup,
                (reflection::spawn_reflection_camera, spawn_water_surface)
                    .chain()
                    .in_set(SceneStartupSet::Attachments),
            )
            .add_systems(Update, advance_water_clock.in_set(SceneUpdateSet::Water))
            .add_systems(
                Update,
                (
                    reflection::resize_reflection_target,
                    reflection::sync_reflection_camera,
                )
                    .in_set(SceneUpdateSet::Reflection),
            );
    }
}

#[derive(Component)]
pub struct WaterPlane;

/// Handle to the single water material.
#[derive(Resource)]
pub struct WaterSurface {
    pub material: Handle<WaterMaterial>,
}

fn spawn_water_surface(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
    target: Res<ReflectionTarget>,
    config: Res<SceneConfig>,
) {
    let water = &config.water;

    // Normal data, not color, and it tiles across the whole plane
    let normals = asset_server.load_with_settings(
        config.assets.water_normals.clone(),
        |settings: &mut ImageLoaderSettings| {
            settings.is_srgb = false;
            settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                ..ImageSamplerDescriptor::linear()
            });
        },
    );

    let uniform = WaterUniform::new(water, Vec3::from_array(config.lighting.sun_position));
    let material = materials.add(create_water_material(
        uniform,
        target.image.clone(),
        normals,
    ));

    let (width, height) = water.plane_size();
    commands.spawn((
        WaterPlane,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(width, height))),
        MeshMaterial3d(material.clone()),
        Transform::from_xyz(0.0, water.level, 0.0),
        NotShadowCaster,
        RenderLayers::layer(WATER_LAYER),
    ));

    commands.insert_resource(WaterSurface { material });
    commands.insert_resource(WaterClock::new(water.time_step));

    info!("Water plane {width}x{height} at y={}", water.level);
}

/// Advances the shader clock by one fixed step per rendered frame.
fn advance_water_clock(
    clock: Option<ResMut<WaterClock>>,
    surface: Option<Res<WaterSurface>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let (Some(mut clock), Some(surface)) = (clock, surface) else {
        return;
    };

    let time = clock.tick();
    if let Some(material) = materials.get_mut(&surface.material) {
        material.extension.uniform.set_time(time);
    }
}
