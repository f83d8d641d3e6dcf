//! Point sprite material for the wave surface.
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::path::POINT_SPRITE_SHADER_PATH;

use crate::engine::config::wave_config::PointStyleConfig;

#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
#[repr(C)]
pub struct PointSpriteUniform {
    /// Linear RGBA tint multiplied with the texture.
    pub colour: Vec4,
    pub size: f32,
    pub alpha_test: f32,
    /// 1 scales sprites with distance, 0 keeps a constant pixel size.
    pub size_attenuation: u32,
    pub _padding: u32,
}

impl PointSpriteUniform {
    pub fn from_style(style: &PointStyleConfig) -> Self {
        // Validated configs always parse; fall back to white otherwise.
        let colour = style.colour().unwrap_or(Color::WHITE);
        Self {
            colour: colour.to_linear().to_vec4(),
            size: style.size,
            alpha_test: style.alpha_test,
            size_attenuation: u32::from(style.size_attenuation),
            _padding: 0,
        }
    }
}

impl Default for PointSpriteUniform {
    fn default() -> Self {
        Self::from_style(&PointStyleConfig::default())
    }
}

/// Material for the wave point cloud. Vertex positions carry the point centre
/// and `UV_0` the sprite corner; the shader expands each quad in clip space.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointSpriteMaterial {
    #[uniform(0)]
    pub settings: PointSpriteUniform,

    #[texture(1)]
    #[sampler(2)]
    pub sprite_texture: Handle<Image>,
}

impl PointSpriteMaterial {
    pub fn new(sprite_texture: Handle<Image>, style: &PointStyleConfig) -> Self {
        Self {
            settings: PointSpriteUniform::from_style(style),
            sprite_texture,
        }
    }

    pub fn apply_style(&mut self, style: &PointStyleConfig) {
        self.settings = PointSpriteUniform::from_style(style);
    }
}

impl Material for PointSpriteMaterial {
    fn vertex_shader() -> ShaderRef {
        POINT_SPRITE_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        POINT_SPRITE_SHADER_PATH.into()
    }

    // Opaque: alpha testing happens in the fragment shader via discard.
    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Opaque
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Quads are screen aligned but winding flips with the projection.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
