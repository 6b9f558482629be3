//! Skybox cube-map assembly.
//!
//! The sky ships as one composite image laid out as a 4x3 grid of square
//! tiles. Six of the twelve cells hold the cube faces:
//!
//! ```text
//!         +----+
//!         | +Y |
//!    +----+----+----+----+
//!    | -X | +Z | +X | -Z |
//!    +----+----+----+----+
//!         | -Y |
//!         +----+
//! ```
//!
//! [`extract_faces`] crops them into an immutable [`FaceSet`], which is then
//! handed to a [`CubeMapTexture`] that only exposes pixel data once every
//! face is present.

mod cubemap;
mod error;
mod faces;

pub use cubemap::*;
pub use error::*;
pub use faces::*;

/// 8-bit RGBA faces, the format the sky is uploaded in.
pub type SkyFaceSet = FaceSet<image::Rgba<u8>>;
pub type SkyCubeMap = CubeMapTexture<image::Rgba<u8>>;
