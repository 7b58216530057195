//! Procedural height sources for filling a [`HeightGrid`].
//!
//! Two sources are provided: a closed-form wave pattern that is cheap and
//! predictable, and multi-octave fractal Brownian motion over simplex noise.

use std::f32::consts::PI;

use noise::{NoiseFn, Simplex};

use crate::{HeightGrid, HeightfieldError};

/// Configuration for multi-octave fBm noise.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// Seed for deterministic generation.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per grid sample.
    pub base_frequency: f64,
    /// Amplitude of the first octave, in height units.
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.02,
            amplitude: 5.0,
        }
    }
}

/// Fractal Brownian motion sampler: each octave doubles frequency and halves
/// amplitude (with the default lacunarity and persistence).
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(params.seed);
        Self { noise, params }
    }

    /// Height at grid coordinate `(x, y)`.
    ///
    /// The result lies within `[-max_amplitude, max_amplitude]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, y * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

/// Where terrain heights come from.
#[derive(Clone, Debug, PartialEq)]
pub enum HeightSource {
    /// `sin(u * pi * frequency) * cos(v * pi * frequency) * amplitude`, with
    /// `u = x / width` and `v = y / height`.
    Waves { amplitude: f32, frequency: f32 },
    /// Multi-octave simplex noise.
    Fbm(HeightmapParams),
}

impl Default for HeightSource {
    fn default() -> Self {
        Self::Waves {
            amplitude: 5.0,
            frequency: 4.0,
        }
    }
}

impl HeightSource {
    /// Fill a `width x height` grid from this source.
    pub fn generate(&self, width: usize, height: usize) -> Result<HeightGrid, HeightfieldError> {
        match self {
            Self::Waves {
                amplitude,
                frequency,
            } => HeightGrid::from_fn(width, height, |x, y| {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;
                (u * PI * frequency).sin() * (v * PI * frequency).cos() * amplitude
            }),
            Self::Fbm(params) => {
                let sampler = HeightmapSampler::new(params.clone());
                HeightGrid::from_fn(width, height, |x, y| {
                    sampler.sample(x as f64, y as f64) as f32
                })
            }
        }
    }
}
