//! Mesh generation for point sprite rendering.
//!
//! Each surface point becomes a four-vertex quad whose corners share the
//! point's centre; the vertex shader pushes them apart in clip space so the
//! sprite always faces the camera.

/// Point sprite quad mesh creation and position upload.
pub mod point_sprite_mesh;
