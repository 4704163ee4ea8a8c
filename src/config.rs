//! Envelope configuration.
//!
//! `EnvelopeConfig` is the plain-data description of an envelope: what a host
//! stores in a preset or passes on the command line. It is not clamped; the
//! parameter store sanitizes every field when the envelope is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `Start` treats an envelope that is still sounding.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Attack picks up from the current level.
    #[default]
    FromCurrent,
    /// A short startup ramp returns to 0 before every Attack.
    FromSilence,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub start_mode: StartMode,
    pub attack_ms: f32,
    pub decay_ms: f32,
    pub sustain_level: f32,
    pub release_ms: f32,
    /// Normalized curvature in [-1, 1], 0 = linear.
    pub attack_shape: f32,
    /// Normalized curvature in [-1, 1], 0 = linear.
    pub release_shape: f32,
    pub gain: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            start_mode: StartMode::FromCurrent,
            attack_ms: 0.01,
            decay_ms: 100.0,
            sustain_level: 0.7,
            release_ms: 200.0,
            attack_shape: 0.0,
            release_shape: 0.0,
            gain: 1.0,
        }
    }
}

impl EnvelopeConfig {
    /// Classic four-parameter ADSR with linear curves and unity gain.
    pub fn adsr(attack_ms: f32, decay_ms: f32, sustain_level: f32, release_ms: f32) -> Self {
        Self {
            attack_ms,
            decay_ms,
            sustain_level,
            release_ms,
            ..Self::default()
        }
    }

    pub fn start_mode(mut self, mode: StartMode) -> Self {
        self.start_mode = mode;
        self
    }

    pub fn attack_ms(mut self, ms: f32) -> Self {
        self.attack_ms = ms;
        self
    }

    pub fn decay_ms(mut self, ms: f32) -> Self {
        self.decay_ms = ms;
        self
    }

    pub fn sustain_level(mut self, level: f32) -> Self {
        self.sustain_level = level;
        self
    }

    pub fn release_ms(mut self, ms: f32) -> Self {
        self.release_ms = ms;
        self
    }

    pub fn attack_shape(mut self, amount: f32) -> Self {
        self.attack_shape = amount;
        self
    }

    pub fn release_shape(mut self, amount: f32) -> Self {
        self.release_shape = amount;
        self
    }

    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}
