use thiserror::Error;

use super::CubeFace;

#[derive(Debug, Error)]
pub enum SkyboxError {
    #[error("sky tile size must be greater than zero")]
    ZeroTileSize,

    #[error(
        "composite sky image is {width}x{height}, but a 4x3 grid of {tile_size}px tiles needs at least {required_width}x{required_height}"
    )]
    SourceTooSmall {
        width: u32,
        height: u32,
        tile_size: u32,
        required_width: u64,
        required_height: u64,
    },

    #[error("face {face:?} is {width}x{height}, expected {edge}x{edge}")]
    FaceEdgeMismatch {
        face: CubeFace,
        edge: u32,
        width: u32,
        height: u32,
    },

    #[error("face {0:?} has already been assigned")]
    FaceAlreadyAssigned(CubeFace),

    #[error("could not read composite sky image: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
