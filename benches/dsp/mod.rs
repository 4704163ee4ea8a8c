//! Benchmarks for the envelope primitives.

mod envelope;

pub use envelope::{bench_envelope, bench_shared_node};
