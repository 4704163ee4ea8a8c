//! State shared between the audio callback and the UI
//!
//! Updates are Copy so the audio thread can send them without allocating.

use saavy_adsr::EnvelopePhase;

/// Envelope status sent from the audio thread once per callback
#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    /// Phase after the last rendered sample
    pub phase: EnvelopePhase,
    /// Pre-gain envelope value after the last rendered sample
    pub level: f32,
}

impl Default for UiStateUpdate {
    fn default() -> Self {
        Self {
            phase: EnvelopePhase::Idle,
            level: 0.0,
        }
    }
}
