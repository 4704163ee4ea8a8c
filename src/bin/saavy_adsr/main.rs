//! saavy-adsr - play a tone through the shaped envelope and watch it move
//!
//! Run with: cargo run -- --attack 20 --release-shape -0.5 --from-silence

mod app;
mod ui;

use std::fs::File;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use saavy_adsr::{EnvelopeConfig, StartMode};

#[derive(Debug, Parser)]
#[command(name = "saavy-adsr", about = "Interactive shaped ADSR envelope")]
pub struct Args {
    /// Ramp to silence before every attack
    #[arg(long)]
    from_silence: bool,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = 220.0)]
    freq: f32,

    /// Attack time in ms
    #[arg(long, default_value_t = 10.0)]
    attack: f32,

    /// Decay time in ms
    #[arg(long, default_value_t = 100.0)]
    decay: f32,

    /// Sustain level, 0..1
    #[arg(long, default_value_t = 0.7)]
    sustain: f32,

    /// Release time in ms
    #[arg(long, default_value_t = 200.0)]
    release: f32,

    /// Attack curvature, -1..1 (0 = linear)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    attack_shape: f32,

    /// Release curvature, -1..1 (0 = linear)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    release_shape: f32,

    /// Output gain, 0..1
    #[arg(long, default_value_t = 0.5)]
    gain: f32,
}

impl Args {
    fn envelope_config(&self) -> EnvelopeConfig {
        let mode = if self.from_silence {
            StartMode::FromSilence
        } else {
            StartMode::FromCurrent
        };

        EnvelopeConfig::adsr(self.attack, self.decay, self.sustain, self.release)
            .start_mode(mode)
            .attack_shape(self.attack_shape)
            .release_shape(self.release_shape)
            .gain(self.gain)
    }
}

fn init_logging() -> EyreResult<()> {
    // The terminal belongs to the UI, so logs go to a file.
    let path = std::env::temp_dir().join("saavy-adsr.log");
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    log::info!("logging to {}", path.display());
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let args = Args::parse();
    log::info!("starting with {:?}", args);

    let terminal = ratatui::init();
    let res = app::run(terminal, args.envelope_config(), args.freq);
    ratatui::restore();
    res
}
