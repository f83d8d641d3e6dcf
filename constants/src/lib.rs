//! Compile-time defaults shared by the point wave renderer.
//!
//! Every value here can be overridden at runtime through the wave
//! configuration asset; these are the fallbacks used when it is missing.

pub mod camera;
pub mod path;
pub mod render_settings;
pub mod texture;
pub mod wave;
