//! Scene configuration, read from a RON file.
//!
//! Every field has a default matching the shipped scene, and sections may be
//! omitted entirely. A missing file means "all defaults"; a file that exists
//! but cannot be parsed or fails validation is an error.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use bevy::prelude::Resource;
use log::{debug, info};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::*, orbit::OrbitLimits, sphere::SphereMotion, water::WaterSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] ron::Error),

    #[error("could not serialize configuration: {0}")]
    Serialize(#[source] ron::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Root folder the asset server reads from.
    pub folder: PathBuf,
    /// Composite 4x3 sky image, relative to `folder`.
    pub sky_image: String,
    /// Tileable water normal map, relative to `folder`.
    pub water_normals: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_ASSETS_FOLDER),
            sky_image: SKY_IMAGE_PATH.to_string(),
            water_normals: WATER_NORMALS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyboxSettings {
    pub tile_size: u32,
    pub edge: f32,
}

impl Default for SkyboxSettings {
    fn default() -> Self {
        Self {
            tile_size: SKY_TILE_SIZE,
            edge: SKYBOX_EDGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereSettings {
    pub radius: f32,
    pub subdivisions: u32,
    pub shininess: f32,
    /// Reflect the sky cube map on the sphere once it is loaded.
    pub env_map: bool,
    pub motion: SphereMotion,
}

impl Default for SphereSettings {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            subdivisions: SPHERE_SUBDIVISIONS,
            shininess: SPHERE_SHININESS,
            env_map: false,
            motion: SphereMotion::default(),
        }
    }
}

impl SphereSettings {
    /// Maps a Phong shininess exponent onto perceptual roughness.
    pub fn perceptual_roughness(&self) -> f32 {
        (2.0 / (self.shininess.max(0.0) + 2.0)).sqrt().clamp(0.089, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: CAMERA_START.to_array(),
            target: ORBIT_TARGET.to_array(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    pub ambient_color: u32,
    pub ambient_brightness: f32,
    pub sun_color: u32,
    pub sun_illuminance: f32,
    /// The sun shines from this point toward the origin.
    pub sun_position: [f32; 3],
    pub fog_color: u32,
    pub fog_density: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient_color: AMBIENT_COLOR,
            ambient_brightness: 400.0,
            sun_color: SUN_LIGHT_COLOR,
            sun_illuminance: 10_000.0,
            sun_position: SUN_LIGHT_POSITION.to_array(),
            fog_color: FOG_COLOR,
            fog_density: FOG_DENSITY,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub assets: AssetSettings,
    pub skybox: SkyboxSettings,
    pub water: WaterSettings,
    pub sphere: SphereSettings,
    pub camera: CameraSettings,
    pub orbit: OrbitLimits,
    pub lighting: LightingSettings,
    pub show_stats: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: AssetSettings::default(),
            skybox: SkyboxSettings::default(),
            water: WaterSettings::default(),
            sphere: SphereSettings::default(),
            camera: CameraSettings::default(),
            orbit: OrbitLimits::default(),
            lighting: LightingSettings::default(),
            show_stats: true,
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Strictly positive and finite; rejects NaN.
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SceneConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let config = match fs::read_to_string(path) {
            Ok(content) => {
                info!("Loading scene configuration from {}", path.display());
                ron::de::from_str::<SceneConfig>(&content)?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No configuration at {}, using defaults", path.display());
                SceneConfig::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(3)
            .with_enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty_config).map_err(ConfigError::Serialize)?;

        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, serialized).map_err(io_error)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skybox.tile_size == 0 {
            return Err(invalid("skybox.tile_size must be greater than zero"));
        }
        if !positive(self.skybox.edge) {
            return Err(invalid("skybox.edge must be positive"));
        }

        let water = &self.water;
        if !(positive(water.scale) && positive(water.base_width) && positive(water.base_height)) {
            return Err(invalid("water plane dimensions must be positive"));
        }
        if water.reflection_texture_size == 0 {
            return Err(invalid("water.reflection_texture_size must be greater than zero"));
        }
        if !positive(water.time_step) {
            return Err(invalid("water.time_step must be positive"));
        }

        let sphere = &self.sphere;
        if !positive(sphere.radius) {
            return Err(invalid("sphere.radius must be positive"));
        }
        // Icosphere generation refuses anything at or above 80 subdivisions
        if sphere.subdivisions >= 80 {
            return Err(invalid("sphere.subdivisions must be below 80"));
        }
        if !sphere.motion.time_scale.is_finite() {
            return Err(invalid("sphere.motion.time_scale must be finite"));
        }

        let camera = &self.camera;
        if !positive(camera.fov_degrees) || camera.fov_degrees >= 180.0 {
            return Err(invalid("camera.fov_degrees must be between 0 and 180"));
        }
        if !positive(camera.near) || !positive(camera.far) || camera.near >= camera.far {
            return Err(invalid("camera.near must be positive and below camera.far"));
        }

        let orbit = &self.orbit;
        if !positive(orbit.min_distance)
            || !positive(orbit.max_distance)
            || orbit.min_distance > orbit.max_distance
        {
            return Err(invalid(
                "orbit.min_distance must be positive and not above orbit.max_distance",
            ));
        }
        let polar_ok = orbit.min_polar_angle >= 0.0
            && orbit.max_polar_angle > 0.0
            && orbit.min_polar_angle <= orbit.max_polar_angle
            && orbit.max_polar_angle < std::f32::consts::PI;
        if !polar_ok {
            return Err(invalid("orbit polar angles must satisfy 0 <= min <= max < PI and max > 0"));
        }

        Ok(())
    }

    /// Initial camera eye and orbit target.
    pub fn camera_points(&self) -> (bevy::math::Vec3, bevy::math::Vec3) {
        (
            bevy::math::Vec3::from_array(self.camera.position),
            bevy::math::Vec3::from_array(self.camera.target),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.skybox.tile_size, 1024);
        assert_eq!(config.skybox.edge, 1_000_000.0);
        assert_eq!(config.orbit.min_distance, 1000.0);
        assert_eq!(config.orbit.max_distance, 5000.0);
        assert!(!config.orbit.enable_pan);
        assert_eq!(config.water.water_color, 0x001e0f);
        assert_eq!(config.camera.far, 3_000_000.0);
        assert!(!config.sphere.env_map);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SceneConfig::load_or_default(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jets.ron");
        fs::write(
            &path,
            "(sphere: (env_map: true, motion: (time_scale: 0.01)), show_stats: false)",
        )
        .unwrap();

        let config = SceneConfig::load_or_default(&path).unwrap();
        assert!(config.sphere.env_map);
        assert_eq!(config.sphere.motion.time_scale, 0.01);
        assert_eq!(config.sphere.motion.bob_amplitude, 500.0);
        assert!(!config.show_stats);
        assert_eq!(config.water, WaterSettings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jets.ron");
        fs::write(&path, "(sphere: (radius: \"big\"))").unwrap();
        assert!(matches!(
            SceneConfig::load_or_default(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jets.ron");
        fs::write(&path, "(orbit: (min_distance: 6000.0))").unwrap();
        assert!(matches!(
            SceneConfig::load_or_default(&path),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = SceneConfig::default();
        config.skybox.tile_size = 0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.orbit.max_polar_angle = 4.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.orbit.max_polar_angle = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_serialize_error_is_not_reported_as_parse() {
        use std::error::Error as _;

        let err = ConfigError::Serialize(<ron::Error as serde::ser::Error>::custom(
            "unsupported value",
        ));
        let message = err.to_string();
        assert!(message.starts_with("could not serialize configuration"));
        assert!(!message.contains("malformed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jets.ron");

        let mut config = SceneConfig::default();
        config.water.distortion_scale = 20.0;
        config.assets.folder = PathBuf::from("data");
        config.save(&path).unwrap();

        assert_eq!(SceneConfig::load_or_default(&path).unwrap(), config);
    }

    #[test]
    fn test_roughness_from_shininess() {
        let sphere = SphereSettings::default();
        let roughness = sphere.perceptual_roughness();
        assert!(roughness > 0.089 && roughness < 0.2);
    }
}
