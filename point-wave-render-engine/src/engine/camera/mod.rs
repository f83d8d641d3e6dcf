//! Orbit camera for viewing the wave surface.
//!
//! Pointer drag rotates and pans, the wheel dollies, and the camera slowly
//! auto-rotates around the origin whenever it is not being dragged.

/// Orbit controls resource, camera spawning and per-frame update systems.
pub mod orbit_controls;
