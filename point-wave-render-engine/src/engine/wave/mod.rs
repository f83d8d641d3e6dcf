//! Procedural wave surface generation and per-frame animation.
//!
//! The surface is a centred N×N grid of points whose heights follow
//! `amplitude * sin(frequency * (x² + z² + tick))`. Generation and the
//! frame updater walk the grid in the same row-major order so a cell's
//! triple always lives at the same buffer offset.

/// Per-frame tick advance and in-place height rewrite systems.
pub mod frame_updater;

/// Grid dimensions, centred coordinates and traversal order.
pub mod grid;

/// Closed-form height function of planar position and tick.
pub mod height;

/// Flat position buffer with an upload flag and memoised generation.
pub mod position_buffer;
