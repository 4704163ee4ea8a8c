#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, PushError, RingBuffer};

#[cfg(feature = "rtrb")]
use crate::{
    control::MessageReceiver,
    dsp::envelope::EnvelopePhase,
    error::{ControlError, ControlResult},
};
use crate::{
    config::EnvelopeConfig,
    control::EnvelopeMessage,
    dsp::envelope::Envelope,
    graph::node::{GraphNode, RenderCtx},
};

/// Envelope owned by a single-threaded host: control calls and rendering
/// happen on the same thread, between blocks.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn new(config: &EnvelopeConfig) -> Self {
        Self {
            env: Envelope::new(config),
        }
    }

    pub fn apply(&mut self, msg: EnvelopeMessage) {
        self.env.apply(msg);
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.on_block_start(ctx.sample_rate);
        self.env.render(out);
    }

    fn note_on(&mut self) {
        self.env.trigger();
    }

    fn note_off(&mut self) {
        self.env.release();
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.value())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

/// Control-thread side of a [`SharedEnvNode`].
#[cfg(feature = "rtrb")]
pub struct EnvelopeHandle {
    tx: Producer<EnvelopeMessage>,
}

/// Envelope rendered on the audio thread and controlled from another.
///
/// Messages queued on the [`EnvelopeHandle`] are applied at the top of the
/// next block, so every sample in a block sees the same parameters.
#[cfg(feature = "rtrb")]
pub struct SharedEnvNode<R: MessageReceiver = Consumer<EnvelopeMessage>> {
    env: Envelope,
    rx: R,
}

#[cfg(feature = "rtrb")]
impl EnvelopeHandle {
    /// Queue a message for the audio thread.
    pub fn send(&mut self, msg: EnvelopeMessage) -> ControlResult<()> {
        match self.tx.push(msg) {
            Ok(()) => {
                log::trace!("queued envelope {} {:?}", msg.selector(), msg);
                Ok(())
            }
            Err(PushError::Full(msg)) => {
                log::warn!("envelope control queue full, dropping {:?}", msg);
                Err(ControlError::QueueFull {
                    selector: msg.selector(),
                })
            }
        }
    }

    pub fn trigger(&mut self) -> ControlResult<()> {
        self.send(EnvelopeMessage::Start)
    }

    pub fn release(&mut self) -> ControlResult<()> {
        self.send(EnvelopeMessage::Stop)
    }

    /// Number of messages that can still be queued.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

pub const ENVELOPE_QUEUE_SIZE: usize = 64;

#[cfg(feature = "rtrb")]
impl SharedEnvNode {
    pub fn new(config: &EnvelopeConfig) -> (Self, EnvelopeHandle) {
        let (tx, rx) = RingBuffer::<EnvelopeMessage>::new(ENVELOPE_QUEUE_SIZE);

        let handle = EnvelopeHandle { tx };
        let node = Self::with_receiver(config, rx);

        (node, handle)
    }
}

#[cfg(feature = "rtrb")]
impl<R: MessageReceiver> SharedEnvNode<R> {
    /// Build a node around any message source.
    pub fn with_receiver(config: &EnvelopeConfig, rx: R) -> Self {
        Self {
            env: Envelope::new(config),
            rx,
        }
    }

    /// Check if envelope is currently active (not Idle)
    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }

    pub fn phase(&self) -> EnvelopePhase {
        self.env.phase()
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    fn drain(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.env.apply(msg);
        }
    }
}

#[cfg(feature = "rtrb")]
impl<R: MessageReceiver + Send> GraphNode for SharedEnvNode<R> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.drain();
        self.env.on_block_start(ctx.sample_rate);
        self.env.render(out);
    }

    fn note_on(&mut self) {
        self.env.trigger();
    }

    fn note_off(&mut self) {
        self.env.release();
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.value())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
