//! Audio setup and the realtime callback

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use ratatui::DefaultTerminal;
use rtrb::{Producer, RingBuffer};

use saavy_adsr::{
    graph::{envelope::SharedEnvNode, GraphNode, RenderCtx},
    EnvelopeConfig, MAX_BLOCK_SIZE,
};

use super::ui::{UiApp, UiStateUpdate, SCOPE_LEN};

/// Keep one scope point out of this many envelope samples
const SCOPE_DECIMATION: usize = 16;
/// Capacity of the audio→UI scope ring, in scope windows
const SCOPE_RING_WINDOWS: usize = 8;

/// Sine oscillator carrying the envelope so it can be heard
struct Tone {
    phase: f32,
    increment: f32,
}

impl Tone {
    fn new(freq: f32, sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            increment: freq / sample_rate,
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let out = (self.phase * std::f32::consts::TAU).sin();
        self.phase = (self.phase + self.increment).fract();
        out
    }
}

/// Everything the audio callback owns
struct AudioState {
    node: SharedEnvNode,
    tone: Tone,
    ctx: RenderCtx,
    env_buf: Vec<f32>,
    scope_tx: Producer<f32>,
    state_tx: Producer<UiStateUpdate>,
    decimation_counter: usize,
}

impl AudioState {
    fn process(&mut self, data: &mut [f32], channels: usize) {
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let env = &mut self.env_buf[..frames];
            self.node.render_block(env, &self.ctx);

            let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
            for (frame, &level) in out.chunks_mut(channels).zip(env.iter()) {
                let sample = self.tone.next_sample() * level;
                frame.fill(sample);

                self.decimation_counter += 1;
                if self.decimation_counter >= SCOPE_DECIMATION {
                    self.decimation_counter = 0;
                    // Scope points are dropped if the UI falls behind.
                    let _ = self.scope_tx.push(level);
                }
            }

            frames_written += frames;
        }

        let _ = self.state_tx.push(UiStateUpdate {
            phase: self.node.phase(),
            level: self.node.envelope().value(),
        });
    }
}

/// Open the default output device and run the UI until the user quits
pub fn run(mut terminal: DefaultTerminal, config: EnvelopeConfig, freq: f32) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;
    log::info!("output: {} Hz, {} channels", sample_rate, channels);

    // --- Cross-thread rings ---
    let (node, handle) = SharedEnvNode::new(&config);
    let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_LEN * SCOPE_RING_WINDOWS);
    let (state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(32);

    let mut audio = AudioState {
        node,
        tone: Tone::new(freq, sample_rate),
        ctx: RenderCtx::new(sample_rate),
        env_buf: vec![0.0; MAX_BLOCK_SIZE],
        scope_tx,
        state_tx,
        decimation_counter: 0,
    };

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| audio.process(data, channels),
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    let mut app = UiApp::new(handle, config, sample_rate, scope_rx, state_rx);
    app.run(&mut terminal)
}
