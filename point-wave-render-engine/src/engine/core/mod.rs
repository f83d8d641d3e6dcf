//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the point sprite material, configuration asset
/// loading, camera controls and the per-frame wave systems.
pub mod app_setup;

/// Application state machine: Loading until the surface settles, then Running.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the web build to the host page's canvas and enables vsync.
pub mod window_config;
