use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};

use crate::engine::wave::position_buffer::PositionBuffer;

#[derive(Component)]
pub struct WavePoints;

/// Quad corners in sprite space, counter-clockwise from bottom left.
pub const SPRITE_CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

const VERTICES_PER_POINT: usize = SPRITE_CORNERS.len();

/// Create the sprite mesh for a position buffer.
/// Positions hold the point centre on all four vertices, `UV_0` holds the corner.
pub fn create_point_sprite_mesh(buffer: &PositionBuffer) -> Mesh {
    // Kept in the main world as well so the position attribute can be
    // rewritten every frame.
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());

    let point_count = buffer.point_count();
    let mut positions = Vec::with_capacity(point_count * VERTICES_PER_POINT);
    let mut corners = Vec::with_capacity(point_count * VERTICES_PER_POINT);
    let mut indices = Vec::with_capacity(point_count * 6);

    for (point_index, centre) in buffer.points().enumerate() {
        let base = (point_index * VERTICES_PER_POINT) as u32;
        for corner in SPRITE_CORNERS {
            positions.push(centre);
            corners.push(corner);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, corners);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Copy buffer positions into an existing sprite mesh.
///
/// Returns false when the mesh has no float3 position attribute or its
/// vertex count no longer matches the buffer.
pub fn write_sprite_positions(mesh: &mut Mesh, buffer: &PositionBuffer) -> bool {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    else {
        return false;
    };

    if positions.len() != buffer.point_count() * VERTICES_PER_POINT {
        return false;
    }

    for (quad, centre) in positions
        .chunks_exact_mut(VERTICES_PER_POINT)
        .zip(buffer.points())
    {
        quad.fill(centre);
    }

    true
}
