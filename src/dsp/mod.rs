//! Low-level envelope primitives used by the graph nodes.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal math; the graph layer adds block rendering and control
//! plumbing on top.

/// Six-phase shaped ADSR state machine.
pub mod envelope;
/// Clamped parameters and derived sample budgets.
pub mod params;

pub use envelope::{Envelope, EnvelopePhase};
pub use params::EnvelopeParams;
