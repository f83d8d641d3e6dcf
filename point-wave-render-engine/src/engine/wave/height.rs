use constants::wave::{WAVE_AMPLITUDE, WAVE_FREQUENCY};
use serde::{Deserialize, Serialize};

use crate::engine::config::error::WaveConfigError;

/// Coefficients of the radial sine wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            frequency: WAVE_FREQUENCY,
            amplitude: WAVE_AMPLITUDE,
        }
    }
}

impl WaveParams {
    pub fn new(frequency: f64, amplitude: f64) -> Result<Self, WaveConfigError> {
        let params = Self {
            frequency,
            amplitude,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), WaveConfigError> {
        if !self.frequency.is_finite() {
            return Err(WaveConfigError::NonFiniteFrequency(self.frequency));
        }
        if !self.amplitude.is_finite() {
            return Err(WaveConfigError::NonFiniteAmplitude(self.amplitude));
        }
        Ok(())
    }

    /// Surface height at planar position (x, z) for the given tick.
    ///
    /// Evaluated in f64 so large ticks keep their precision; callers
    /// narrow to f32 when writing into the vertex buffer.
    pub fn height(&self, x: f64, z: f64, tick: f64) -> f64 {
        (self.frequency * (x * x + z * z + tick)).sin() * self.amplitude
    }

    /// Height as stored in the position buffer.
    pub fn height_f32(&self, x: f32, z: f32, tick: f64) -> f32 {
        self.height(f64::from(x), f64::from(z), tick) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_matches_closed_form() {
        let wave = WaveParams::default();
        let expected = 3.0 * (0.002_f64 * 18.0).sin();
        assert!((wave.height(-3.0, -3.0, 0.0) - expected).abs() < 1e-12);
        assert!((wave.height(-3.0, -3.0, 0.0) - 0.108).abs() < 1e-3);
    }

    #[test]
    fn tick_shifts_phase() {
        let wave = WaveParams::default();
        let after_one_frame = wave.height(-3.0, -3.0, 15.0);
        let expected = 3.0 * (0.002_f64 * 33.0).sin();
        assert!((after_one_frame - expected).abs() < 1e-12);
    }

    #[test]
    fn height_is_idempotent_for_same_tick() {
        let wave = WaveParams::default();
        let first = wave.height_f32(42.0, -9.0, 300.0);
        let second = wave.height_f32(42.0, -9.0, 300.0);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn origin_tracks_tick_only() {
        let wave = WaveParams::new(0.01, 2.0).unwrap();
        assert_eq!(wave.height(0.0, 0.0, 0.0), 0.0);
        let quarter_period = std::f64::consts::FRAC_PI_2 / 0.01;
        assert!((wave.height(0.0, 0.0, quarter_period) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        assert!(matches!(
            WaveParams::new(f64::NAN, 3.0),
            Err(WaveConfigError::NonFiniteFrequency(_))
        ));
        assert!(matches!(
            WaveParams::new(0.002, f64::INFINITY),
            Err(WaveConfigError::NonFiniteAmplitude(_))
        ));
    }
}
