/// Demonstrates the shaped envelope offline
/// Prints each phase as it is entered and a coarse text plot of the output
use saavy_adsr::{
    control::EnvelopeMessage,
    graph::{envelope::EnvNode, GraphNode, RenderCtx},
    EnvelopeConfig, EnvelopePhase, StartMode,
};

const BLOCK: usize = 64;
const PLOT_WIDTH: usize = 60;

fn main() {
    println!("=== Shaped ADSR Demo ===\n");

    let sample_rate = 8_000.0;
    let config = EnvelopeConfig::adsr(40.0, 60.0, 0.5, 120.0)
        .attack_shape(0.4)
        .release_shape(-0.4)
        .start_mode(StartMode::FromSilence);

    println!("Envelope parameters:");
    println!("  Attack:  {:.0}ms (shape {:+.1})", config.attack_ms, config.attack_shape);
    println!("  Decay:   {:.0}ms", config.decay_ms);
    println!("  Sustain: {:.0}%", config.sustain_level * 100.0);
    println!("  Release: {:.0}ms (shape {:+.1})\n", config.release_ms, config.release_shape);

    let mut node = EnvNode::new(&config);
    let ctx = RenderCtx::new(sample_rate);
    let mut block = [0.0f32; BLOCK];

    // (block index, message) script: hold for 200ms, retrigger mid-release
    let script = [
        (0, EnvelopeMessage::Start),
        (25, EnvelopeMessage::Stop),
        (32, EnvelopeMessage::Start),
        (50, EnvelopeMessage::Stop),
    ];

    let mut last_phase = EnvelopePhase::Idle;
    for index in 0..70 {
        for (_, msg) in script.iter().filter(|(at, _)| *at == index) {
            println!("-- {:?}", msg);
            node.apply(*msg);
        }

        node.render_block(&mut block, &ctx);

        let phase = node.envelope().phase();
        if phase != last_phase {
            println!("   now in {:?}", phase);
            last_phase = phase;
        }

        let level = block[BLOCK - 1];
        let bar = (level * PLOT_WIDTH as f32).round() as usize;
        println!(
            "{:>6.1}ms |{:<width$}| {:.3}",
            (index + 1) as f32 * BLOCK as f32 / sample_rate * 1000.0,
            "#".repeat(bar),
            level,
            width = PLOT_WIDTH,
        );
    }
}
