//! Sky cube map loading.
//!
//! The composite sky image is loaded like any other asset. Once it arrives,
//! its six faces are cut out on the async compute pool, installed into a
//! [`SkyCubeMap`] and uploaded as a single cube texture. The skybox entity
//! exists from startup but stays hidden until that upload happens.

mod material;

use bevy::{
    asset::{AssetLoadFailedEvent, RenderAssetUsages},
    image::ImageLoaderSettings,
    pbr::NotShadowCaster,
    prelude::*,
    render::render_resource::{
        Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
    },
    tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task},
};
use jets_core::{
    sets::SceneStartupSet,
    sky::{extract_faces, SkyCubeMap, SkyFaceSet, SkyboxError},
    SceneConfig,
};

use material::SkyboxMaterial;

use crate::scene::camera::MainCamera;

/// Light intensity used when the sky also lights the sphere.
const ENVIRONMENT_INTENSITY: f32 = 900.0;

pub struct SkyboxPlugin;

impl Plugin for SkyboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<SkyboxMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_event::<SkyboxReady>()
        .add_systems(Startup, spawn_skybox.in_set(SceneStartupSet::Scene))
        .add_systems(
            Update,
            (
                report_sky_load_failure,
                start_face_extraction,
                finish_face_extraction,
                attach_environment_map,
            )
                .chain(),
        );
    }
}

/// Sent once, when the cube texture has all six faces.
#[derive(Event, Debug, Clone)]
pub struct SkyboxReady {
    pub cube: Handle<Image>,
}

#[derive(Component)]
pub struct Skybox;

#[derive(Resource)]
pub struct SkyboxAssets {
    /// Source image; released once its faces have been cut out.
    composite: Option<Handle<Image>>,
    material: Handle<SkyboxMaterial>,
    cube_map: SkyCubeMap,
    extraction: Option<Task<Result<SkyFaceSet, SkyboxError>>>,
}

fn spawn_skybox(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<SkyboxMaterial>>,
    config: Res<SceneConfig>,
) {
    // Only the CPU copy of the composite is needed
    let composite = asset_server.load_with_settings(
        config.assets.sky_image.clone(),
        |settings: &mut ImageLoaderSettings| {
            settings.asset_usage = RenderAssetUsages::MAIN_WORLD;
        },
    );
    let material = materials.add(SkyboxMaterial::default());

    commands.spawn((
        Skybox,
        Mesh3d(meshes.add(Cuboid::from_length(config.skybox.edge))),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        Visibility::Hidden,
        NotShadowCaster,
    ));

    commands.insert_resource(SkyboxAssets {
        composite: Some(composite),
        material,
        cube_map: SkyCubeMap::new(config.skybox.tile_size),
        extraction: None,
    });

    info!("Loading sky image {}", config.assets.sky_image);
}

fn start_face_extraction(
    mut events: EventReader<AssetEvent<Image>>,
    images: Res<Assets<Image>>,
    config: Res<SceneConfig>,
    sky: Option<ResMut<SkyboxAssets>>,
) {
    let Some(mut sky) = sky else {
        return;
    };

    for event in events.read() {
        let AssetEvent::LoadedWithDependencies { id } = event else {
            continue;
        };
        let Some(composite) = sky.composite.as_ref() else {
            continue;
        };
        if composite.id() != *id || sky.extraction.is_some() || sky.cube_map.is_ready() {
            continue;
        }
        let Some(image) = images.get(*id) else {
            continue;
        };

        let image = image.clone();
        let tile_size = config.skybox.tile_size;
        sky.extraction = Some(AsyncComputeTaskPool::get().spawn(async move {
            let composite = image
                .try_into_dynamic()
                .map_err(|err| SkyboxError::Decode(Box::new(err)))?
                .to_rgba8();
            extract_faces(&composite, tile_size)
        }));
        debug!("Started sky face extraction ({tile_size}px tiles)");
    }
}

fn finish_face_extraction(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<SkyboxMaterial>>,
    mut skyboxes: Query<&mut Visibility, With<Skybox>>,
    mut ready_events: EventWriter<SkyboxReady>,
    sky: Option<ResMut<SkyboxAssets>>,
) {
    let Some(mut sky) = sky else {
        return;
    };
    let Some(task) = sky.extraction.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    sky.extraction = None;

    if let Some(composite) = sky.composite.take() {
        images.remove(&composite);
    }

    let installed = result.and_then(|faces| sky.cube_map.fill(faces));
    if let Err(err) = installed {
        error!("Sky cube map unavailable, keeping placeholder: {err}");
        return;
    }

    let edge = sky.cube_map.edge();
    let Some(data) = sky.cube_map.take_upload() else {
        return;
    };
    let cube = images.add(cube_image(edge, data));

    if let Some(material) = materials.get_mut(&sky.material) {
        material.sky = Some(cube.clone());
    }
    for mut visibility in &mut skyboxes {
        *visibility = Visibility::Visible;
    }

    info!("Sky cube map ready ({edge}px faces)");
    ready_events.write(SkyboxReady { cube });
    commands.remove_resource::<SkyboxAssets>();
}

fn report_sky_load_failure(
    mut events: EventReader<AssetLoadFailedEvent<Image>>,
    sky: Option<ResMut<SkyboxAssets>>,
) {
    let Some(mut sky) = sky else {
        return;
    };

    for event in events.read() {
        if sky.composite.as_ref().map(Handle::id) != Some(event.id) {
            continue;
        }
        error!(
            "Could not load sky image {}: {}; keeping placeholder",
            event.path, event.error
        );
        sky.composite = None;
    }
}

fn attach_environment_map(
    mut commands: Commands,
    mut ready_events: EventReader<SkyboxReady>,
    cameras: Query<Entity, With<MainCamera>>,
    config: Res<SceneConfig>,
) {
    for SkyboxReady { cube } in ready_events.read() {
        if !config.sphere.env_map {
            continue;
        }
        for camera in &cameras {
            commands.entity(camera).insert(EnvironmentMapLight {
                diffuse_map: cube.clone(),
                specular_map: cube.clone(),
                intensity: ENVIRONMENT_INTENSITY,
                ..default()
            });
        }
        debug!("Sky attached as environment map");
    }
}

/// Wraps six tightly packed RGBA faces, in cube layer order, as a cube texture.
fn cube_image(edge: u32, data: Vec<u8>) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: edge,
            height: edge,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    image
}
