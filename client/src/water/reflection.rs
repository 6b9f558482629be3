use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::{
        camera::RenderTarget,
        render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
        view::RenderLayers,
    },
    window::{PrimaryWindow, WindowResized},
};
use jets_core::{
    viewport::aspect_ratio,
    water::{mirror_across_water, reflection_target_size},
    SceneConfig,
};

use crate::scene::{
    camera::{perspective, MainCamera},
    lighting::scene_fog,
    SCENE_LAYER,
};

/// Renders the scene mirrored across the water plane, before the main camera.
#[derive(Component)]
pub struct ReflectionCamera;

#[derive(Resource)]
pub struct ReflectionTarget {
    pub image: Handle<Image>,
    /// Fixed pixel height; the width follows the window aspect.
    pub height: u32,
}

fn target_extent(aspect: f32, height: u32) -> Extent3d {
    let (width, height) = reflection_target_size(aspect, height);
    Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

pub fn reflection_image(size: Extent3d) -> Image {
    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
    image
}

pub fn spawn_reflection_camera(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<SceneConfig>,
) {
    let aspect = windows
        .single()
        .ok()
        .and_then(|window| aspect_ratio(window.width(), window.height()))
        .unwrap_or(1.0);
    let height = config.water.reflection_texture_size;
    let size = target_extent(aspect, height);
    let image = images.add(reflection_image(size));

    let mut projection = perspective(&config);
    projection.aspect_ratio = aspect;

    commands.spawn((
        ReflectionCamera,
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(image.clone().into()),
            order: -1,
            ..default()
        },
        Projection::Perspective(projection),
        Transform::default(),
        scene_fog(&config),
        RenderLayers::layer(SCENE_LAYER),
    ));
    commands.insert_resource(ReflectionTarget { image, height });

    debug!("Reflection target {}x{}", size.width, size.height);
}

/// Keeps the reflection target at the window's aspect ratio.
pub fn resize_reflection_target(
    mut resize_events: EventReader<WindowResized>,
    mut images: ResMut<Assets<Image>>,
    target: Option<Res<ReflectionTarget>>,
) {
    let Some(target) = target else {
        return;
    };
    let Some(event) = resize_events.read().last() else {
        return;
    };
    let Some(aspect) = aspect_ratio(event.width, event.height) else {
        return;
    };

    let size = target_extent(aspect, target.height);
    if let Some(image) = images.get_mut(&target.image) {
        if image.texture_descriptor.size != size {
            image.resize(size);
            debug!("Reflection target resized to {}x{}", size.width, size.height);
        }
    }
}

/// Mirrors the main camera across the water plane.
pub fn sync_reflection_camera(
    config: Res<SceneConfig>,
    main_cameras: Query<(&Transform, &Projection), (With<MainCamera>, Without<ReflectionCamera>)>,
    mut reflection_cameras: Query<(&mut Transform, &mut Projection), With<ReflectionCamera>>,
) {
    let Ok((main_transform, main_projection)) = main_cameras.single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = reflection_cameras.single_mut() else {
        return;
    };

    let eye = main_transform.translation;
    let mirror = mirror_across_water(
        eye,
        eye + *main_transform.forward(),
        *main_transform.up(),
        config.water.level,
    );
    *transform = Transform::from_translation(mirror.eye).looking_at(mirror.target, mirror.up);

    if let (Projection::Perspective(main), Projection::Perspective(reflection)) =
        (main_projection, projection.as_mut())
    {
        if reflection.fov != main.fov {
            reflection.fov = main.fov;
        }
    }
}
