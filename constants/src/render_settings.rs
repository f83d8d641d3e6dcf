/// Sprite size. Pixel size is `POINT_SIZE * viewport_height / 2 / depth`
/// when size attenuation is on, otherwise `POINT_SIZE` pixels.
pub const POINT_SIZE: f32 = 0.5;

/// sRGB tint applied to the sprite texture.
pub const POINT_COLOUR_HEX: &str = "00aaff";

/// Fragments with texture alpha below this value are discarded.
pub const POINT_ALPHA_TEST: f32 = 0.5;

pub const POINT_SIZE_ATTENUATION: bool = true;

/// Background behind the surface (sRGB).
pub const CLEAR_COLOUR: [f32; 3] = [0.0, 0.0, 0.0];
