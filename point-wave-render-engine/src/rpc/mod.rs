//! JSON-RPC 2.0 bridge between the wave renderer and the hosting page.
//!
//! Messages travel over `postMessage` to the parent window when the canvas
//! is embedded in a frame. A top-level page has no host, so nothing is sent,
//! and messages a window posts to itself are ignored by the listener.
//!
//! ```text
//! Host page  <──postMessage──>  Bevy (canvas)
//!     │                               │
//!     ├─ Request (with ID) ─────────> │
//!     │ <──────── Response (with ID) ─┤
//!     │ <─────── Notification (no ID) ┤
//! ```
//!
//! ## Requests
//!
//! - `get_fps`: smoothed frame rate, `{ "fps": f32 }`
//! - `get_wave_state`: tick, tick step, frame count, point count, surface
//!   availability and auto-rotate settings
//! - `set_auto_rotate`: `{ "enabled"?: bool, "speed"?: number }`, at least
//!   one field required
//!
//! ## Notifications sent to the host
//!
//! - `loading_progress`: config, texture and surface status while loading
//! - `surface_ready`: point count once the surface is in the scene
//! - `surface_unavailable`: the point texture failed to load
//! - `fps_update`: fps and tick, twice a second while running
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! Requests sent without an ID are executed but never answered.

pub mod web_rpc;
