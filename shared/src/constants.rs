use std::f32::consts::PI;

use bevy::math::Vec3;

/// Edge length, in pixels, of one tile of the composite sky image.
pub const SKY_TILE_SIZE: u32 = 1024;
/// Edge length of the skybox cube in world units.
pub const SKYBOX_EDGE: f32 = 1_000_000.0;

pub const WATER_BASE_WIDTH: f32 = 2000.0;
pub const WATER_BASE_HEIGHT: f32 = 2000.0;
/// The water plane is this many times larger than its base size so it reads as infinite.
pub const WATER_SCALE: f32 = 500.0;
pub const WATER_REFLECTION_TEXTURE_SIZE: u32 = 512;
pub const WATER_DISTORTION_SCALE: f32 = 50.0;
pub const WATER_COLOR: u32 = 0x001e0f;
pub const WATER_SUN_COLOR: u32 = 0xffffff;
/// Shader clock advance per displayed frame.
pub const WATER_TIME_STEP: f32 = 1.0 / 60.0;

pub const SPHERE_RADIUS: f32 = 400.0;
pub const SPHERE_SUBDIVISIONS: u32 = 4;
pub const SPHERE_SHININESS: f32 = 100.0;

pub const CAMERA_FOV_DEGREES: f32 = 55.0;
pub const CAMERA_NEAR: f32 = 0.5;
pub const CAMERA_FAR: f32 = 3_000_000.0;
pub const CAMERA_START: Vec3 = Vec3::new(2000.0, 750.0, 2000.0);
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 500.0, 0.0);

pub const ORBIT_MIN_DISTANCE: f32 = 1000.0;
pub const ORBIT_MAX_DISTANCE: f32 = 5000.0;
/// Just under the horizon, so the camera never dips below the water.
pub const ORBIT_MAX_POLAR_ANGLE: f32 = PI * 0.495;

pub const AMBIENT_COLOR: u32 = 0x444444;
pub const SUN_LIGHT_COLOR: u32 = 0xffffbb;
pub const SUN_LIGHT_POSITION: Vec3 = Vec3::new(-1.0, 1.0, -1.0);
pub const FOG_COLOR: u32 = 0xaabbbb;
pub const FOG_DENSITY: f32 = 0.0001;

pub const DEFAULT_CONFIG_FILE: &str = "jets.ron";
pub const DEFAULT_ASSETS_FOLDER: &str = "assets";
pub const SKY_IMAGE_PATH: &str = "textures/skyboxsun25degtest.png";
pub const WATER_NORMALS_PATH: &str = "textures/waternormals.jpg";

pub const MISSING_GPU_MESSAGE: &str = "Your graphics card does not seem to support accelerated 3D rendering. \
No usable GPU adapter was found, so the scene cannot be shown.";
pub const CONFIG_LOAD_ERROR: &str = "Failed to load scene configuration";

/// Splits a `0xRRGGBB` color into its three 8-bit channels.
pub const fn hex_to_rgb(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    ]
}
