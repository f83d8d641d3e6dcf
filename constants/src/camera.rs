/// Initial camera translation, looking at the origin.
pub const CAMERA_START_POSITION: [f32; 3] = [100.0, 10.0, 0.0];

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Auto-rotation speed. Negative values rotate the other way round.
/// At 1.0 a full orbit takes 60 seconds.
pub const AUTO_ROTATE_SPEED: f32 = -0.2;

pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.0;
pub const PAN_SPEED: f32 = 1.0;

/// Fraction of the pending motion applied per frame when damping is enabled.
pub const DAMPING_FACTOR: f32 = 0.05;

pub const MIN_DISTANCE: f32 = 0.0;
pub const MAX_DISTANCE: f32 = f32::INFINITY;

/// Keeps the camera off the poles so `looking_at` never degenerates.
pub const POLAR_EPSILON: f32 = 0.000001;

/// Pixel-scroll to wheel-step conversion.
pub const PIXELS_PER_WHEEL_STEP: f32 = 100.0;
