//! Shared helpers for integration tests

#![allow(dead_code)]

use mrl_stats::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once, filtered by `RUST_LOG`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .with(filter)
            .try_init();
    });
}

/// Uniform integers in `[-50, 50)`
pub fn uniform_ints(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-50..50)).collect()
}

/// Add every element of `data` to a fresh accumulator
pub fn summarize<T, O>(summarizer: &MrlSummarizer<O>, data: impl IntoIterator<Item = T>) -> QuantileState<T>
where
    T: Clone,
    O: ElementOrder<T>,
{
    let mut state = summarizer.create_accumulator();
    for x in data {
        summarizer.add_input(&mut state, x);
    }
    state
}
