//! GPU-free building blocks of the Jets scene.
//!
//! Everything here can be exercised without a window or a graphics adapter:
//! cube-map face extraction, sphere motion, the water clock, orbit-control
//! clamping and scene configuration. The `jets` binary wires these into Bevy.

pub mod config;
pub mod constants;
pub mod orbit;
pub mod sets;
pub mod sky;
pub mod sphere;
pub mod viewport;
pub mod water;

pub use config::*;
pub use constants::*;
