/// Sprite texture drawn for every point, relative to the asset root.
pub const POINT_TEXTURE_PATH: &str = "img/circle.png";
