//! Block-rendering adapters around the envelope.
//!
//! Graph nodes wrap the low-level phase engine with what a host needs: a
//! per-block render call that picks up the sample rate, note events, and a
//! lock-free control queue for hosts that drive the envelope from another
//! thread.

/// Owned and shared envelope nodes.
pub mod envelope;
/// Core traits shared by all graph nodes.
pub mod node;

pub use node::{GraphNode, RenderCtx};
