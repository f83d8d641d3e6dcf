//! Runtime configuration for the wave surface, camera and sprites.
//!
//! Defaults come from the `constants` crate; a `*.wave.json` asset can
//! override any subset of them.

/// Validation errors for configuration values.
pub mod error;

/// Serde-backed configuration asset, validation and hot-reload handling.
pub mod wave_config;
