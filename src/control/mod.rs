//! Control path: decoded envelope events and the seam the audio thread pulls
//! them through.

pub mod message;

pub use message::{EnvelopeMessage, MessageReceiver};
