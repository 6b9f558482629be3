use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, Face, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
        },
    },
};

use crate::shaders::paths;

/// Inside-out box shaded from a cube texture.
///
/// `sky` stays `None` until all six faces are uploaded; the entity using it is
/// hidden until then.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone, Default)]
pub struct SkyboxMaterial {
    #[texture(0, dimension = "cube")]
    #[sampler(1)]
    pub sky: Option<Handle<Image>>,
}

impl Material for SkyboxMaterial {
    fn fragment_shader() -> ShaderRef {
        paths::SKYBOX_SHADER.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Only the inner faces are visible and nothing should be hidden by the box
        descriptor.primitive.cull_mode = Some(Face::Front);
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
