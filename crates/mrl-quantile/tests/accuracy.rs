//! Accuracy and resource-bound tests against exact order statistics
//!
//! Every test uses seeded ChaCha streams so failures reproduce exactly.

use mrl_quantile::prelude::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Test parameters for accuracy testing
struct AccuracyParams {
    epsilon: f64,
    max_num_elements: u64,
    num_quantiles: usize,
    stream_len: usize,
    seed: u64,
}

impl Default for AccuracyParams {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            max_num_elements: 100_000,
            num_quantiles: 11,
            stream_len: 50_000,
            seed: 42,
        }
    }
}

fn generate_uniform(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-50.0..50.0)).collect()
}

fn generate_normal(n: usize, mean: f64, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Largest distance between each estimate's rank range in `data` and the
/// rank it should have had
fn max_rank_error(data: &[f64], quantiles: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    let intervals = (quantiles.len() - 1) as f64;

    quantiles
        .iter()
        .enumerate()
        .map(|(j, value)| {
            let target = j as f64 * (n - 1.0) / intervals;
            let lo = sorted.partition_point(|x| x < value) as f64;
            let hi = sorted.partition_point(|x| x <= value) as f64 - 1.0;
            if target < lo {
                lo - target
            } else if target > hi {
                target - hi
            } else {
                0.0
            }
        })
        .fold(0.0, f64::max)
}

fn summarize(summarizer: &MrlSummarizer<FloatOrder>, data: &[f64]) -> QuantileState<f64> {
    let mut state = summarizer.create_accumulator();
    for &x in data {
        summarizer.add_input(&mut state, x);
    }
    state
}

fn tuned(params: &AccuracyParams) -> MrlSummarizer<FloatOrder> {
    SummarizerBuilder::new()
        .num_quantiles(params.num_quantiles)
        .epsilon(params.epsilon)
        .max_num_elements(params.max_num_elements)
        .order(FloatOrder)
        .build()
        .unwrap()
}

#[test]
fn test_uniform_rank_error_within_bound() {
    let params = AccuracyParams::default();
    let summarizer = tuned(&params);

    for seed in params.seed..params.seed + 3 {
        let data = generate_uniform(params.stream_len, seed);
        let state = summarize(&summarizer, &data);
        let quantiles = summarizer.extract_output(&state);

        assert_eq!(quantiles.len(), params.num_quantiles);
        let bound = params.epsilon * params.stream_len as f64;
        let error = max_rank_error(&data, &quantiles);
        assert!(
            error <= bound,
            "seed {}: rank error {} exceeds {}",
            seed,
            error,
            bound
        );
    }
}

#[test]
fn test_normal_rank_error_within_bound() {
    let params = AccuracyParams {
        epsilon: 0.05,
        max_num_elements: 20_000,
        num_quantiles: 5,
        stream_len: 20_000,
        ..Default::default()
    };
    let summarizer = tuned(&params);
    let data = generate_normal(params.stream_len, 0.0, 1.0, params.seed);

    let state = summarize(&summarizer, &data);
    let quantiles = summarizer.extract_output(&state);
    let bound = params.epsilon * params.stream_len as f64;
    assert!(max_rank_error(&data, &quantiles) <= bound);

    // the median of a standard normal sits near zero
    assert!(quantiles[2].abs() < 0.2);
}

#[test]
fn test_exact_extremes() {
    let data = generate_normal(10_000, 100.0, 15.0, 7);
    let summarizer = MrlSummarizer::new(3, 32, 4, FloatOrder).unwrap();
    let quantiles = summarizer.extract_output(&summarize(&summarizer, &data));

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(quantiles[0], min);
    assert_eq!(quantiles[2], max);
}

#[test]
fn test_partitioned_merge_within_bound() {
    let params = AccuracyParams {
        stream_len: 40_000,
        ..Default::default()
    };
    let summarizer = tuned(&params);
    let data = generate_uniform(params.stream_len, params.seed);

    let partials: Vec<_> = data
        .chunks(7_000)
        .map(|chunk| summarize(&summarizer, chunk))
        .collect();
    let merged = summarizer.merge_accumulators(partials).unwrap();

    assert_eq!(merged.count(), params.stream_len as u64);
    assert!(merged.num_buffers() <= merged.max_buffers());
    assert!(merged.unbuffered_len() < merged.buffer_size());

    let quantiles = summarizer.extract_output(&merged);
    let bound = params.epsilon * params.stream_len as f64;
    assert!(max_rank_error(&data, &quantiles) <= bound);
}

#[test]
fn test_memory_stays_bounded() {
    let summarizer = MrlSummarizer::new(5, 50, 6, NaturalOrder).unwrap();
    let capacity = summarizer.config().capacity();
    let mut state = summarizer.create_accumulator();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..200_000 {
        summarizer.add_input(&mut state, rng.gen::<u32>());
        assert!(state.stored_elements() <= capacity);
    }
    assert_eq!(state.count(), 200_000);
    assert!(state.levels().iter().any(|&level| level > 0));
}

proptest! {
    #[test]
    fn prop_output_shape(
        data in prop::collection::vec(-1000i32..1000, 1..400),
        num_quantiles in 2usize..12,
        buffer_size in 2usize..10,
        num_buffers in 2usize..6,
    ) {
        let summarizer = MrlSummarizer::new(num_quantiles, buffer_size, num_buffers, NaturalOrder).unwrap();
        let mut state = summarizer.create_accumulator();
        for &x in &data {
            summarizer.add_input(&mut state, x);
            prop_assert!(state.num_buffers() <= num_buffers);
            prop_assert!(state.unbuffered_len() < buffer_size);
            prop_assert!(state.stored_elements() <= summarizer.config().capacity());
        }
        prop_assert_eq!(state.count(), data.len() as u64);

        let quantiles = summarizer.extract_output(&state);
        prop_assert_eq!(quantiles.len(), num_quantiles);
        prop_assert_eq!(quantiles[0], *data.iter().min().unwrap());
        prop_assert_eq!(quantiles[num_quantiles - 1], *data.iter().max().unwrap());
        prop_assert!(quantiles.windows(2).all(|w| w[0] <= w[1]));
        for q in &quantiles {
            prop_assert!(data.contains(q));
        }
    }

    #[test]
    fn prop_merge_preserves_count_and_extremes(
        parts in prop::collection::vec(prop::collection::vec(any::<i16>(), 0..120), 1..6),
        buffer_size in 2usize..12,
        num_buffers in 2usize..5,
    ) {
        let summarizer = MrlSummarizer::new(5, buffer_size, num_buffers, NaturalOrder).unwrap();
        let states: Vec<QuantileState<i16>> = parts
            .iter()
            .map(|part| {
                let mut state = summarizer.create_accumulator();
                for &x in part {
                    summarizer.add_input(&mut state, x);
                }
                state
            })
            .collect();

        let merged = summarizer.merge_accumulators(states).unwrap();
        let all: Vec<i16> = parts.iter().flatten().copied().collect();
        prop_assert_eq!(merged.count(), all.len() as u64);
        prop_assert_eq!(merged.min(), all.iter().min());
        prop_assert_eq!(merged.max(), all.iter().max());
        prop_assert!(merged.num_buffers() <= num_buffers);
        prop_assert!(merged.unbuffered_len() < buffer_size);

        let quantiles = summarizer.extract_output(&merged);
        if all.is_empty() {
            prop_assert!(quantiles.is_empty());
        } else {
            prop_assert_eq!(quantiles.len(), 5);
            prop_assert!(quantiles.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
