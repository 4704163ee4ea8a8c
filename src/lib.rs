pub mod config;
pub mod control; // Decoded control events
pub mod dsp;
pub mod error;
pub mod graph; // Block rendering and cross-thread control

pub use config::{EnvelopeConfig, StartMode};
pub use dsp::{Envelope, EnvelopePhase, EnvelopeParams};
pub use error::{ControlError, ControlResult};

pub const MAX_BLOCK_SIZE: usize = 2048;
