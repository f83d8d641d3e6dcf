//! Runtime systems for diagnostics and the loading fallback.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate and tick updates to the host page via RPC and updates native UI overlays.
pub mod fps_tracking;

/// "Loading ..." overlay shown until the surface is created or given up on.
pub mod loading_overlay;
