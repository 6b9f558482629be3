use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
    prelude::*,
    render::view::RenderLayers,
    window::{PrimaryWindow, WindowResized},
};
use jets_core::{orbit::OrbitState, viewport::aspect_ratio, SceneConfig};

use super::{lighting::scene_fog, SCENE_LAYER, WATER_LAYER};

/// Scroll distance, in pixels, that counts as one wheel notch.
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

#[derive(Component)]
pub struct MainCamera;

pub fn perspective(config: &SceneConfig) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: config.camera.fov_degrees.to_radians(),
        near: config.camera.near,
        far: config.camera.far,
        ..default()
    }
}

fn orbit_transform(orbit: &OrbitState) -> Transform {
    Transform::from_translation(orbit.eye()).looking_at(orbit.target(), Vec3::Y)
}

pub fn spawn_main_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let (eye, target) = config.camera_points();
    let orbit = OrbitState::from_eye(eye, target, config.orbit);

    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Projection::Perspective(perspective(&config)),
        orbit_transform(&orbit),
        scene_fog(&config),
        RenderLayers::from_layers(&[SCENE_LAYER, WATER_LAYER]),
        orbit,
    ));
}

/// Drag with the left button to orbit, scroll to zoom.
pub fn orbit_controls_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut OrbitState, &mut Transform), With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((mut orbit, mut transform)) = cameras.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        orbit.drag(mouse_motion.delta, window.height());
    }

    let steps = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_SCROLL_LINE,
    };
    if steps != 0.0 {
        orbit.scroll(steps);
    }

    if orbit.is_changed() {
        *transform = orbit_transform(&orbit);
    }
}

/// Re-derives the camera aspect on every resize event, unthrottled.
pub fn window_resize_system(
    mut resize_events: EventReader<WindowResized>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    for event in resize_events.read() {
        let Some(aspect) = aspect_ratio(event.width, event.height) else {
            debug!("Ignoring resize to {}x{}", event.width, event.height);
            continue;
        };
        for mut projection in &mut cameras {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = aspect;
            }
        }
        debug!(
            "Viewport resized to {}x{} (aspect {aspect:.3})",
            event.width, event.height
        );
    }
}
