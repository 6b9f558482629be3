use bevy::prelude::*;

/// Per-frame work, in the order the director chains it.
///
/// Animation recomputes the sphere from elapsed time, Water advances the
/// shader clock, Reflection prepares the mirrored pass that the renderer draws
/// before the main camera, and Overlay refreshes the on-screen counters.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneUpdateSet {
    Input,
    Animation,
    Water,
    Reflection,
    Overlay,
}

/// Startup ordering: the scene graph exists before anything attaches to it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneStartupSet {
    Scene,
    Attachments,
}
