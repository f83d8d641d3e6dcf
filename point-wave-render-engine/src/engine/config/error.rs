use bevy::color::HexColorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaveConfigError {
    #[error("grid must contain at least one point per axis")]
    EmptyGrid,

    #[error("grid of {count} points per axis exceeds the maximum of {max}")]
    GridTooLarge { count: u32, max: u32 },

    #[error("grid spacing must be a positive finite number, got {0}")]
    InvalidSpacing(f32),

    #[error("wave frequency must be finite, got {0}")]
    NonFiniteFrequency(f64),

    #[error("wave amplitude must be finite, got {0}")]
    NonFiniteAmplitude(f64),

    #[error("tick step must be a positive finite number, got {0}")]
    InvalidTickStep(f64),

    #[error("camera field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("point size must be a positive finite number, got {0}")]
    InvalidPointSize(f32),

    #[error("invalid point colour: {0}")]
    PointColour(#[from] HexColorError),
}
