use crate::{
    config::{EnvelopeConfig, StartMode},
    control::EnvelopeMessage,
    dsp::params::EnvelopeParams,
};

/*
Shaped ADSR Envelope
====================

This module implements the phase engine: a six-phase state machine that
produces one envelope value per call and never allocates, locks or fails.

Vocabulary
----------

  value        The envelope's current output before gain (0.0 to 1.0).

  phase        Which segment we're in: Idle, Startup, Attack, Decay, Sustain
               or Release.

  budget       How many samples a phase lasts. Precomputed by the parameter
               store, never less than 1.

  index        Samples spent in the current phase. Reset to 0 on entry.

  start value  `value` at the moment a phase was entered. Every shaped
               segment interpolates FROM here, so a retrigger or an early
               release never jumps.


The Shape
---------

  Level
    1.0 ┐      ╱╲
        │     ╱  ╲___________
    S   │    ╱               ╲
        │   ╱                 ╲
    0.0 └╲─╱───────────────────╲──→ Time
        Startup Attack Decay Sustain Release

Startup only exists in FromSilence mode: a 3 ms linear ramp from wherever
the envelope was back down to 0, so retriggering a note that is still
releasing restarts the attack from silence without a click.


Curves
------

Startup, Attack and Release go through `shaped_lerp`. The exponent bends the
progress `p` before interpolating:

    rising   start + (end - start) * p^k
    falling  end + (start - end) * (1 - p)^k

The exponent always bends the curve toward the bottom of the segment for
k > 1: a rising segment starts slowly and a falling one drops fast and
tails off. k < 1 bends it toward the top.

Decay is always linear from 1.0 to the sustain level.


Progress and Endpoints
----------------------

Shaped segments use endpoint-inclusive progress:

    p = index / (budget - 1)        (p = 1 when budget == 1)

so the last Attack sample is exactly 1.0, the last Release sample exactly
0.0, and the next phase starts on the value the previous one ended on.
Decay uses `index / budget` and hands over to Sustain one step above the
sustain level.


The State Machine
-----------------

    ┌──────┐ start  ┌─────────┐       ┌────────┐       ┌───────┐       ┌─────────┐
    │ Idle │ ─────→ │ Startup │ ────→ │ Attack │ ────→ │ Decay │ ────→ │ Sustain │
    └──────┘        └─────────┘       └────────┘       └───────┘       └─────────┘
        ↑  (FromSilence only)              ↑                                │
        │                                  │ start (FromCurrent)            │ stop
        │         ┌─────────┐              │                                │
        └──────── │ Release │ ←────────────┴── stop from any active phase ──┘
                  └─────────┘

Stop is ignored in Idle and Release, so a second note-off never restarts the
release curve.
*/

/// The envelope's current segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePhase {
    Idle,    // value = 0, waiting for Start
    Startup, // ramping to 0 before Attack (FromSilence only)
    Attack,  // ramping to 1.0
    Decay,   // ramping from 1.0 to the sustain level
    Sustain, // holding the sustain level until Stop
    Release, // ramping to 0
}

/// Interpolate from `start` to `end` with curvature `shape`.
///
/// `p` is expected in [0, 1]. The curve always passes through `start` at
/// `p = 0` and `end` at `p = 1`, and never leaves the segment between them.
#[inline]
pub fn shaped_lerp(start: f32, end: f32, p: f32, shape: f32) -> f32 {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };

    let value = if shape == 1.0 {
        start + (end - start) * p
    } else {
        if end >= start {
            start + (end - start) * p.powf(shape)
        } else {
            end + (start - end) * (1.0 - p).max(0.0).powf(shape)
        }
    };

    // Rounding may land one ulp outside the segment.
    value.clamp(lo, hi)
}

#[inline]
fn inclusive_progress(index: u32, budget: u32) -> f32 {
    if budget <= 1 {
        1.0
    } else {
        (index as f32 / (budget - 1) as f32).min(1.0)
    }
}

pub struct Envelope {
    params: EnvelopeParams,

    // Runtime state (changes every sample)
    phase: EnvelopePhase,
    value: f32,
    phase_start_value: f32,
    phase_index: u32,
}

impl Envelope {
    pub fn new(config: &EnvelopeConfig) -> Self {
        Self {
            params: EnvelopeParams::new(config),
            phase: EnvelopePhase::Idle,
            value: 0.0,
            phase_start_value: 0.0,
            phase_index: 0,
        }
    }

    /// Linear ADSR with times in milliseconds.
    pub fn adsr(attack_ms: f32, decay_ms: f32, sustain: f32, release_ms: f32) -> Self {
        Self::new(&EnvelopeConfig::adsr(attack_ms, decay_ms, sustain, release_ms))
    }

    /// Host block setup: adopt the current sample rate before rendering.
    pub fn on_block_start(&mut self, sample_rate: f32) {
        self.params.set_sample_rate(sample_rate);
    }

    pub fn set_attack_ms(&mut self, ms: f32) {
        self.params.set_attack_ms(ms);
    }

    pub fn set_decay_ms(&mut self, ms: f32) {
        self.params.set_decay_ms(ms);
    }

    pub fn set_sustain_level(&mut self, level: f32) {
        self.params.set_sustain_level(level);
    }

    pub fn set_release_ms(&mut self, ms: f32) {
        self.params.set_release_ms(ms);
    }

    pub fn set_attack_shape(&mut self, amount: f32) {
        self.params.set_attack_shape(amount);
    }

    pub fn set_release_shape(&mut self, amount: f32) {
        self.params.set_release_shape(amount);
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.params.set_gain(gain);
    }

    /// Start: begin a new note from wherever the envelope currently is.
    pub fn trigger(&mut self) {
        match self.params.start_mode() {
            StartMode::FromSilence => self.enter_phase(EnvelopePhase::Startup),
            StartMode::FromCurrent => self.enter_phase(EnvelopePhase::Attack),
        }
    }

    /// Stop: release from the current value. No-op when idle or releasing.
    pub fn release(&mut self) {
        if matches!(self.phase, EnvelopePhase::Idle | EnvelopePhase::Release) {
            return;
        }
        self.enter_phase(EnvelopePhase::Release);
    }

    /// Route a decoded control message to the matching setter or trigger.
    pub fn apply(&mut self, msg: EnvelopeMessage) {
        match msg {
            EnvelopeMessage::Start => self.trigger(),
            EnvelopeMessage::Stop => self.release(),
            _ => {
                self.params.apply(msg);
            }
        }
    }

    fn enter_phase(&mut self, phase: EnvelopePhase) {
        self.phase = phase;
        self.phase_index = 0;
        self.phase_start_value = self.value;
    }

    /// Advance the envelope by one sample and return the pre-gain value.
    pub fn next_sample(&mut self) -> f32 {
        let params = &self.params;

        match self.phase {
            EnvelopePhase::Idle => {
                self.value = 0.0;
            }

            EnvelopePhase::Startup => {
                let budget = params.startup_samples();
                let p = inclusive_progress(self.phase_index, budget);
                self.value = shaped_lerp(self.phase_start_value, 0.0, p, 1.0);

                self.phase_index += 1;
                if self.phase_index >= budget {
                    self.enter_phase(EnvelopePhase::Attack);
                }
            }

            EnvelopePhase::Attack => {
                let budget = params.attack_samples();
                let p = inclusive_progress(self.phase_index, budget);
                self.value =
                    shaped_lerp(self.phase_start_value, 1.0, p, params.attack_exponent());

                self.phase_index += 1;
                if self.phase_index >= budget {
                    self.enter_phase(EnvelopePhase::Decay);
                }
            }

            EnvelopePhase::Decay => {
                let budget = params.decay_samples();
                let sustain = params.sustain_level();
                let p = (self.phase_index as f32 / budget as f32).min(1.0);
                self.value = ((1.0 - p) * (1.0 - sustain) + sustain).clamp(sustain, 1.0);

                self.phase_index += 1;
                if self.phase_index >= budget {
                    self.enter_phase(EnvelopePhase::Sustain);
                }
            }

            EnvelopePhase::Sustain => {
                self.value = params.sustain_level();
            }

            EnvelopePhase::Release => {
                let budget = params.release_samples();
                let p = inclusive_progress(self.phase_index, budget);
                self.value =
                    shaped_lerp(self.phase_start_value, 0.0, p, params.release_exponent());

                self.phase_index += 1;
                if self.phase_index >= budget {
                    self.enter_phase(EnvelopePhase::Idle);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.value));
        self.value
    }

    /// Render a block of gained envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        let gain = self.params.gain();
        for sample in buffer.iter_mut() {
            *sample = self.next_sample() * gain;
        }
    }

    /// Render `frames` samples into a fresh buffer. Allocates; offline use only.
    pub fn render_to_vec(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.render(&mut out);
        out
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, EnvelopePhase::Idle)
    }

    /// Hard reset to Idle at zero. Clicks if the envelope was sounding.
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.enter_phase(EnvelopePhase::Idle);
    }

    /// Get the current pre-gain value (0.0 to 1.0)
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn phase(&self) -> EnvelopePhase {
        self.phase
    }

    /// Value the current phase is interpolating from.
    pub fn phase_start_value(&self) -> f32 {
        self.phase_start_value
    }

    pub fn params(&self) -> &EnvelopeParams {
        &self.params
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(&EnvelopeConfig::default())
    }
}
