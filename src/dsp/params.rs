use crate::{
    config::{EnvelopeConfig, StartMode},
    control::EnvelopeMessage,
};

/*
Envelope Parameter Store
========================

Every parameter enters through exactly one setter, and every setter does the
same three things in the same order:

  1. clamp    Force the raw input into the parameter's legal range.
  2. store    Keep the clamped value (this is what the getters return).
  3. derive   Recompute the sample budget that depends on it.

Because nothing else writes these fields, the phase engine can divide by any
budget and raise any progress to any exponent without checking first.


Sample Budgets
--------------

A phase's budget is how many samples it lasts:

    samples = max(1, round(time_ms * sample_rate / 1000))

The floor of one sample means a 0 ms attack still produces one sample at the
target level instead of being skipped (and the engine never divides by zero).

  Example: 10 ms at 44.1 kHz → round(441.0) = 441 samples


Shape Exponents
---------------

Shapes are entered as a normalized amount in [-1, 1] and mapped piecewise
onto an exponent:

    -1.0 ──────── 0.0 ──────────────────── 1.0     (normalized)
     0.1          1.0                      10.0    (exponent)

The negative half is compressed (0.9 per unit) and the positive half is
stretched (9 per unit), so both ends are equally far from linear in log
terms. Exponent 1.0 is a straight line.


Startup Compensation
--------------------

In FromSilence mode every release is followed by a Startup ramp on the next
Start. The 3 ms of Startup are taken out of the stored release time so the
audible release plus the ramp still add up to what was asked for.
*/

/// Duration of the anti-click ramp inserted before Attack in
/// [`StartMode::FromSilence`].
pub const STARTUP_TIME_MS: f32 = 3.0;

/// Longest accepted attack, decay or release time.
pub const MAX_TIME_MS: f32 = 10_000.0;

/// Sample rate assumed until the host reports one.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Map a normalized shape amount in [-1, 1] onto a curve exponent.
#[inline]
pub fn shape_exponent(amount: f32) -> f32 {
    let amount = amount.clamp(-1.0, 1.0);
    if amount < 0.0 {
        1.0 + amount * 0.9
    } else {
        1.0 + amount * 9.0
    }
}

/// Convert a duration into a sample count, never less than one sample.
#[inline]
pub fn phase_samples(time_ms: f32, sample_rate: f32) -> u32 {
    let samples = (time_ms as f64 * sample_rate as f64 / 1000.0).round();
    samples.max(1.0) as u32
}

/// Clamped envelope parameters and the sample budgets derived from them.
#[derive(Debug, Clone)]
pub struct EnvelopeParams {
    start_mode: StartMode,
    sample_rate: f32,

    attack_ms: f32,
    decay_ms: f32,
    release_ms: f32,
    sustain_level: f32,
    attack_shape: f32,  // normalized, [-1, 1]
    release_shape: f32, // normalized, [-1, 1]
    gain: f32,

    // Derived
    attack_exponent: f32,
    release_exponent: f32,
    attack_samples: u32,
    decay_samples: u32,
    release_samples: u32,
    startup_samples: u32,
}

impl EnvelopeParams {
    /// Build a parameter store from a configuration, pushing every value
    /// through its setter.
    pub fn new(config: &EnvelopeConfig) -> Self {
        let mut params = Self {
            start_mode: config.start_mode,
            sample_rate: DEFAULT_SAMPLE_RATE,
            attack_ms: 0.0,
            decay_ms: 0.0,
            release_ms: 0.0,
            sustain_level: 0.0,
            attack_shape: 0.0,
            release_shape: 0.0,
            gain: 0.0,
            attack_exponent: 1.0,
            release_exponent: 1.0,
            attack_samples: 1,
            decay_samples: 1,
            release_samples: 1,
            startup_samples: 1,
        };

        params.set_attack_ms(config.attack_ms);
        params.set_decay_ms(config.decay_ms);
        params.set_release_ms(config.release_ms);
        params.set_sustain_level(config.sustain_level);
        params.set_attack_shape(config.attack_shape);
        params.set_release_shape(config.release_shape);
        params.set_gain(config.gain);
        params.startup_samples = phase_samples(STARTUP_TIME_MS, params.sample_rate);

        params
    }

    /// Update the sample rate and every budget derived from it.
    ///
    /// Rates that are not finite or fall below 1 Hz are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate < 1.0 {
            return;
        }
        if sample_rate == self.sample_rate {
            return;
        }

        self.sample_rate = sample_rate;
        self.attack_samples = phase_samples(self.attack_ms, sample_rate);
        self.decay_samples = phase_samples(self.decay_ms, sample_rate);
        self.release_samples = phase_samples(self.release_ms, sample_rate);
        self.startup_samples = phase_samples(STARTUP_TIME_MS, sample_rate);
    }

    pub fn set_attack_ms(&mut self, ms: f32) {
        if ms.is_nan() {
            return;
        }
        self.attack_ms = ms.clamp(0.0, MAX_TIME_MS);
        self.attack_samples = phase_samples(self.attack_ms, self.sample_rate);
    }

    pub fn set_decay_ms(&mut self, ms: f32) {
        if ms.is_nan() {
            return;
        }
        self.decay_ms = ms.clamp(0.0, MAX_TIME_MS);
        self.decay_samples = phase_samples(self.decay_ms, self.sample_rate);
    }

    /// Set the release time. In [`StartMode::FromSilence`] the startup
    /// duration is subtracted before clamping.
    pub fn set_release_ms(&mut self, ms: f32) {
        if ms.is_nan() {
            return;
        }
        let ms = match self.start_mode {
            StartMode::FromSilence => ms - STARTUP_TIME_MS,
            StartMode::FromCurrent => ms,
        };
        self.release_ms = ms.clamp(0.0, MAX_TIME_MS);
        self.release_samples = phase_samples(self.release_ms, self.sample_rate);
    }

    pub fn set_sustain_level(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    /// Set the attack curvature from a normalized amount in [-1, 1].
    pub fn set_attack_shape(&mut self, amount: f32) {
        if amount.is_nan() {
            return;
        }
        self.attack_shape = amount.clamp(-1.0, 1.0);
        self.attack_exponent = shape_exponent(self.attack_shape);
    }

    /// Set the release curvature from a normalized amount in [-1, 1].
    pub fn set_release_shape(&mut self, amount: f32) {
        if amount.is_nan() {
            return;
        }
        self.release_shape = amount.clamp(-1.0, 1.0);
        self.release_exponent = shape_exponent(self.release_shape);
    }

    pub fn set_gain(&mut self, gain: f32) {
        if gain.is_nan() {
            return;
        }
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Apply a parameter message. Returns false for triggers, which belong
    /// to the phase engine.
    pub fn apply(&mut self, msg: EnvelopeMessage) -> bool {
        match msg {
            EnvelopeMessage::Start | EnvelopeMessage::Stop => return false,
            EnvelopeMessage::Attack(ms) => self.set_attack_ms(ms),
            EnvelopeMessage::Decay(ms) => self.set_decay_ms(ms),
            EnvelopeMessage::Sustain(level) => self.set_sustain_level(level),
            EnvelopeMessage::Release(ms) => self.set_release_ms(ms),
            EnvelopeMessage::Shape(amount) => {
                self.set_attack_shape(amount);
                self.set_release_shape(amount);
            }
            EnvelopeMessage::AttackShape(amount) => self.set_attack_shape(amount),
            EnvelopeMessage::ReleaseShape(amount) => self.set_release_shape(amount),
            EnvelopeMessage::Gain(gain) => self.set_gain(gain),
        }
        true
    }

    pub fn start_mode(&self) -> StartMode {
        self.start_mode
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    pub fn decay_ms(&self) -> f32 {
        self.decay_ms
    }

    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    /// Normalized attack shape as last set.
    pub fn attack_shape(&self) -> f32 {
        self.attack_shape
    }

    /// Normalized release shape as last set.
    pub fn release_shape(&self) -> f32 {
        self.release_shape
    }

    pub fn attack_exponent(&self) -> f32 {
        self.attack_exponent
    }

    pub fn release_exponent(&self) -> f32 {
        self.release_exponent
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn attack_samples(&self) -> u32 {
        self.attack_samples
    }

    pub fn decay_samples(&self) -> u32 {
        self.decay_samples
    }

    pub fn release_samples(&self) -> u32 {
        self.release_samples
    }

    pub fn startup_samples(&self) -> u32 {
        self.startup_samples
    }

    /// Snapshot the current parameters as a configuration.
    ///
    /// In [`StartMode::FromSilence`] the startup compensation is added back
    /// to the release time so the snapshot rebuilds an identical store.
    pub fn to_config(&self) -> EnvelopeConfig {
        let release_ms = match self.start_mode {
            StartMode::FromSilence => self.release_ms + STARTUP_TIME_MS,
            StartMode::FromCurrent => self.release_ms,
        };

        EnvelopeConfig {
            start_mode: self.start_mode,
            attack_ms: self.attack_ms,
            decay_ms: self.decay_ms,
            sustain_level: self.sustain_level,
            release_ms,
            attack_shape: self.attack_shape,
            release_shape: self.release_shape,
            gain: self.gain,
        }
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self::new(&EnvelopeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let params = EnvelopeParams::default();

        assert_eq!(params.attack_ms(), 0.01);
        assert_eq!(params.decay_ms(), 100.0);
        assert_eq!(params.sustain_level(), 0.7);
        assert_eq!(params.release_ms(), 200.0);
        assert_eq!(params.attack_exponent(), 1.0);
        assert_eq!(params.release_exponent(), 1.0);
        assert_eq!(params.gain(), 1.0);
        assert_eq!(params.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn times_are_clamped() {
        let mut params = EnvelopeParams::default();

        params.set_attack_ms(-5.0);
        assert_eq!(params.attack_ms(), 0.0);

        params.set_decay_ms(20_000.0);
        assert_eq!(params.decay_ms(), MAX_TIME_MS);

        params.set_release_ms(f32::INFINITY);
        assert_eq!(params.release_ms(), MAX_TIME_MS);
    }

    #[test]
    fn levels_are_clamped() {
        let mut params = EnvelopeParams::default();

        params.set_sustain_level(1.5);
        assert_eq!(params.sustain_level(), 1.0);

        params.set_gain(-0.2);
        assert_eq!(params.gain(), 0.0);
    }

    #[test]
    fn nan_input_keeps_previous_value() {
        let mut params = EnvelopeParams::default();
        params.set_sustain_level(0.4);
        params.set_sustain_level(f32::NAN);
        assert_eq!(params.sustain_level(), 0.4);

        params.set_attack_ms(f32::NAN);
        assert_eq!(params.attack_ms(), 0.01);
    }

    #[test]
    fn zero_time_still_lasts_one_sample() {
        let mut params = EnvelopeParams::default();
        params.set_attack_ms(0.0);
        params.set_decay_ms(0.0);
        params.set_release_ms(0.0);

        assert_eq!(params.attack_samples(), 1);
        assert_eq!(params.decay_samples(), 1);
        assert_eq!(params.release_samples(), 1);
    }

    #[test]
    fn budgets_follow_sample_rate() {
        let mut params = EnvelopeParams::default();
        params.set_attack_ms(10.0);
        assert_eq!(params.attack_samples(), 441);
        assert_eq!(params.startup_samples(), 132);

        params.set_sample_rate(48_000.0);
        assert_eq!(params.attack_samples(), 480);
        assert_eq!(params.decay_samples(), 4_800);
        assert_eq!(params.release_samples(), 9_600);
        assert_eq!(params.startup_samples(), 144);
    }

    #[test]
    fn invalid_sample_rate_is_ignored() {
        let mut params = EnvelopeParams::default();
        params.set_sample_rate(0.0);
        params.set_sample_rate(f32::NAN);
        params.set_sample_rate(-48_000.0);
        assert_eq!(params.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn shape_mapping_is_piecewise_linear() {
        assert_eq!(shape_exponent(0.0), 1.0);
        assert_eq!(shape_exponent(1.0), 10.0);
        assert!((shape_exponent(-1.0) - 0.1).abs() < 1e-6);
        assert!((shape_exponent(-0.5) - 0.55).abs() < 1e-6);
        assert_eq!(shape_exponent(0.5), 5.5);
        assert_eq!(shape_exponent(3.0), 10.0);
    }

    #[test]
    fn from_silence_release_is_compensated() {
        let config = EnvelopeConfig::default().start_mode(StartMode::FromSilence);
        let mut params = EnvelopeParams::new(&config);
        assert_eq!(params.release_ms(), 197.0);

        params.set_release_ms(1.0);
        assert_eq!(params.release_ms(), 0.0);
        assert_eq!(params.release_samples(), 1);
    }

    #[test]
    fn apply_updates_parameters_only() {
        let mut params = EnvelopeParams::default();

        assert!(params.apply(EnvelopeMessage::Shape(-1.0)));
        assert_eq!(params.attack_shape(), -1.0);
        assert_eq!(params.release_shape(), -1.0);

        assert!(params.apply(EnvelopeMessage::Gain(0.3)));
        assert_eq!(params.gain(), 0.3);

        assert!(!params.apply(EnvelopeMessage::Start));
        assert!(!params.apply(EnvelopeMessage::Stop));
    }

    #[test]
    fn config_snapshot_rebuilds_same_store() {
        let config = EnvelopeConfig::default()
            .start_mode(StartMode::FromSilence)
            .attack_ms(25.0)
            .release_ms(500.0)
            .attack_shape(0.5);
        let params = EnvelopeParams::new(&config);
        let rebuilt = EnvelopeParams::new(&params.to_config());

        assert_eq!(rebuilt.release_ms(), params.release_ms());
        assert_eq!(rebuilt.attack_exponent(), params.attack_exponent());
        assert_eq!(rebuilt.attack_samples(), params.attack_samples());
    }
}
