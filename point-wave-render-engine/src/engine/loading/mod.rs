//! Staged loading of configuration, sprite texture and surface.
//!
//! Configuration resolves first (falling back to defaults), then the sprite
//! texture loads, then the surface is generated and spawned. A texture
//! failure settles loading without a point cloud.

/// Wave configuration asset loading and fallback to defaults.
///
/// Resets the clock and camera from the resolved configuration and requests the texture.
pub mod config_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Surface generation and point cloud spawning once the texture is ready.
pub mod surface_creator;

/// Sprite texture load state monitoring.
pub mod texture_loader;
