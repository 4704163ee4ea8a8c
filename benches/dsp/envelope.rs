//! Benchmarks for the shaped ADSR envelope.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use saavy_adsr::{
    control::EnvelopeMessage,
    graph::{envelope::SharedEnvNode, GraphNode, RenderCtx},
    Envelope, EnvelopeConfig, StartMode,
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn envelope(config: EnvelopeConfig) -> Envelope {
    let mut env = Envelope::new(&config);
    env.on_block_start(SAMPLE_RATE);
    env
}

fn triggered(config: EnvelopeConfig) -> Envelope {
    let mut env = envelope(config);
    env.trigger();
    env
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase, linear. Each batch starts a fresh note so the
        // measurement never runs past the end of Attack.
        let config = EnvelopeConfig::adsr(10_000.0, 100.0, 0.7, 300.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter_batched_ref(
                || triggered(config),
                |env| env.render(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });

        // Attack phase, shaped (powf per sample)
        let config = config.attack_shape(0.6);
        group.bench_with_input(BenchmarkId::new("attack_shaped", size), &size, |b, _| {
            b.iter_batched_ref(
                || triggered(config),
                |env| env.render(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });

        // Sustain phase (holding steady)
        let mut env = envelope(EnvelopeConfig::adsr(1.0, 1.0, 0.7, 300.0));
        env.trigger();
        env.render_to_vec(200);
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase, shaped, retriggered from silence
        let config = EnvelopeConfig::adsr(1.0, 1.0, 0.7, 10_000.0)
            .release_shape(-0.5)
            .start_mode(StartMode::FromSilence);
        group.bench_with_input(BenchmarkId::new("release_shaped", size), &size, |b, _| {
            b.iter_batched_ref(
                || {
                    let mut env = triggered(config);
                    env.render_to_vec(400);
                    env.release();
                    env
                },
                |env| env.render(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

pub fn bench_shared_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/shared");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let (mut node, mut handle) = SharedEnvNode::new(&EnvelopeConfig::default());

        // One parameter change and one trigger per block
        group.bench_with_input(BenchmarkId::new("drain_and_render", size), &size, |b, _| {
            b.iter(|| {
                let _ = handle.send(EnvelopeMessage::Sustain(0.5));
                let _ = handle.trigger();
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
