/// Context passed to graph nodes at the top of every block
///
/// The host may change its sample rate between blocks; nodes must adopt it
/// before producing any sample of the block.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for block-rendered control signal nodes
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when a note starts
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn note_on(&mut self) {
        // Default: do nothing
    }

    /// Triggered when a note is released
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn note_off(&mut self) {
        // Default: do nothing
    }

    fn get_envelope_level(&self) -> Option<f32> {
        None
    }

    /// Check if this node is still producing signal
    fn is_active(&self) -> bool {
        true
    }
}
