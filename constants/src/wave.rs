/// Points per grid axis. The surface holds `GRID_POINT_COUNT²` points.
pub const GRID_POINT_COUNT: u32 = 100;

/// Largest accepted points per axis. Six sprite indices per point must stay
/// addressable by `u32` indices and by a 32-bit `usize` on wasm32.
pub const MAX_GRID_POINT_COUNT: u32 = 26_754;

/// Distance between neighbouring grid points in world units.
pub const GRID_SPACING: f32 = 3.0;

/// Frequency coefficient of the radial sine wave.
pub const WAVE_FREQUENCY: f64 = 0.002;

/// Peak displacement of the wave along Y.
pub const WAVE_AMPLITUDE: f64 = 3.0;

/// Tick added once per rendered frame. Not scaled by frame time.
pub const TICK_STEP: f64 = 15.0;
