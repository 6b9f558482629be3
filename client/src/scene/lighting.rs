use bevy::{pbr::FogFalloff, prelude::*};
use jets_core::{hex_to_rgb, SceneConfig};

/// `0xRRGGBB` as an sRGB color.
pub fn srgb_hex(hex: u32) -> Color {
    let [r, g, b] = hex_to_rgb(hex);
    Color::srgb_u8(r, g, b)
}

/// Exponential-squared fog shared by the main and reflection cameras.
pub fn scene_fog(config: &SceneConfig) -> DistanceFog {
    DistanceFog {
        color: srgb_hex(config.lighting.fog_color),
        falloff: FogFalloff::ExponentialSquared {
            density: config.lighting.fog_density,
        },
        ..default()
    }
}

pub fn setup_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    let lighting = &config.lighting;

    commands.insert_resource(AmbientLight {
        color: srgb_hex(lighting.ambient_color),
        brightness: lighting.ambient_brightness,
        ..default()
    });

    // The sun sits at `sun_position` and shines toward the origin
    commands.spawn((
        DirectionalLight {
            color: srgb_hex(lighting.sun_color),
            illuminance: lighting.sun_illuminance,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(lighting.sun_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
