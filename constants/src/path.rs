/// Runtime configuration file, relative to the asset root.
pub const WAVE_CONFIG_PATH: &str = "config/default.wave.json";

/// Extension registered for wave configuration assets.
pub const WAVE_CONFIG_EXTENSION: &str = "wave.json";

/// Point sprite shader, relative to the asset root.
pub const POINT_SPRITE_SHADER_PATH: &str = "shaders/point_sprite.wgsl";

/// CSS selector of the canvas the app mounts into on the web.
pub const CANVAS_SELECTOR: &str = "#wave-canvas";
