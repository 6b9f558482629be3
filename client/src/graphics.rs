//! Startup check for accelerated 3D support.

/// Looks for a GPU adapter the renderer could use and returns its name.
/// Renderer setup panics without one, so this runs before the app exists.
pub fn probe_adapter() -> Option<String> {
    let instance = wgpu::Instance::default();
    let adapter = pollster::block_on(
        instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
    )?;
    let info = adapter.get_info();
    Some(format!("{} ({:?})", info.name, info.backend))
}
