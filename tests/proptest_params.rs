//! Property-based tests for parameter clamping and envelope output bounds.
//!
//! ```bash
//! cargo test --test proptest_params
//! ```

use proptest::prelude::*;

use saavy_adsr::{
    dsp::params::{phase_samples, shape_exponent, MAX_TIME_MS},
    Envelope, EnvelopeConfig, EnvelopeParams, EnvelopePhase, StartMode,
};

fn any_input() -> impl Strategy<Value = f32> {
    prop_oneof![
        -20_000.0f32..20_000.0,
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        Just(0.0f32),
        Just(-0.0f32),
    ]
}

proptest! {
    /// Stored values never leave their documented range.
    #[test]
    fn setters_clamp_into_range(x in any_input()) {
        let mut params = EnvelopeParams::default();
        params.set_attack_ms(x);
        params.set_decay_ms(x);
        params.set_release_ms(x);
        params.set_sustain_level(x);
        params.set_gain(x);
        params.set_attack_shape(x);
        params.set_release_shape(x);

        prop_assert!((0.0..=MAX_TIME_MS).contains(&params.attack_ms()));
        prop_assert!((0.0..=MAX_TIME_MS).contains(&params.decay_ms()));
        prop_assert!((0.0..=MAX_TIME_MS).contains(&params.release_ms()));
        prop_assert!((0.0..=1.0).contains(&params.sustain_level()));
        prop_assert!((0.0..=1.0).contains(&params.gain()));
        prop_assert!((0.1 - 1e-6..=10.0).contains(&params.attack_exponent()));
        prop_assert!((0.1 - 1e-6..=10.0).contains(&params.release_exponent()));
    }

    /// Reading a parameter back yields the clamp of what was set, and
    /// setting the same value again changes nothing.
    #[test]
    fn set_then_get_is_clamp(x in any_input()) {
        let mut params = EnvelopeParams::default();

        params.set_sustain_level(x);
        prop_assert_eq!(params.sustain_level(), x.clamp(0.0, 1.0));
        params.set_sustain_level(x);
        prop_assert_eq!(params.sustain_level(), x.clamp(0.0, 1.0));

        params.set_decay_ms(x);
        prop_assert_eq!(params.decay_ms(), x.clamp(0.0, MAX_TIME_MS));
        let samples = params.decay_samples();
        params.set_decay_ms(x);
        prop_assert_eq!(params.decay_samples(), samples);

        params.set_attack_shape(x);
        prop_assert_eq!(params.attack_shape(), x.clamp(-1.0, 1.0));
        prop_assert_eq!(params.attack_exponent(), shape_exponent(x));
    }

    /// Every budget lasts at least one sample.
    #[test]
    fn budgets_are_never_zero(
        ms in 0.0f32..=MAX_TIME_MS,
        sample_rate in 1.0f32..384_000.0,
    ) {
        prop_assert!(phase_samples(ms, sample_rate) >= 1);

        let mut params = EnvelopeParams::new(&EnvelopeConfig::adsr(ms, ms, 0.5, ms));
        params.set_sample_rate(sample_rate);
        prop_assert!(params.attack_samples() >= 1);
        prop_assert!(params.decay_samples() >= 1);
        prop_assert!(params.release_samples() >= 1);
        prop_assert!(params.startup_samples() >= 1);
    }

    /// Output stays finite and inside [0, gain] for any reachable parameters
    /// and any trigger schedule.
    #[test]
    fn output_is_bounded(
        attack in any_input(),
        decay in any_input(),
        release in any_input(),
        sustain in any_input(),
        attack_shape in any_input(),
        release_shape in any_input(),
        gain in 0.0f32..=1.0,
        from_silence in any::<bool>(),
        schedule in prop::collection::vec((any::<bool>(), 1usize..200), 1..12),
    ) {
        let mode = if from_silence { StartMode::FromSilence } else { StartMode::FromCurrent };
        let config = EnvelopeConfig {
            start_mode: mode,
            attack_ms: attack / 100.0,
            decay_ms: decay / 100.0,
            sustain_level: sustain,
            release_ms: release / 100.0,
            attack_shape,
            release_shape,
            gain,
        };
        let mut env = Envelope::new(&config);
        env.on_block_start(8_000.0);

        for (start, frames) in schedule {
            if start { env.trigger() } else { env.release() }
            for sample in env.render_to_vec(frames) {
                prop_assert!(sample.is_finite());
                prop_assert!(sample >= 0.0 && sample <= gain);
            }
        }
    }

    /// Stop during Sustain releases linearly from the sustain level to 0 in
    /// exactly the release budget.
    #[test]
    fn linear_release_from_sustain(sustain in 0.0f32..=1.0, release_ms in 0.0f32..200.0) {
        let mut env = Envelope::new(&EnvelopeConfig::adsr(0.0, 0.0, sustain, release_ms));
        env.on_block_start(1_000.0);
        env.trigger();
        env.render_to_vec(3);
        prop_assert_eq!(env.phase(), EnvelopePhase::Sustain);

        env.release();
        prop_assert_eq!(env.phase_start_value(), sustain);

        let budget = env.params().release_samples() as usize;
        let out = env.render_to_vec(budget);
        prop_assert!(out.windows(2).all(|w| w[1] <= w[0]));
        prop_assert_eq!(*out.last().unwrap(), 0.0);
        prop_assert_eq!(env.phase(), EnvelopePhase::Idle);
    }
}
