//! Property and acceptance tests for the numeric core

use keyspread_stats::{
    sample_cdf, ContinuousDistribution, DisplayDomain, Ecdf, FitWindow, Histogram,
    NormalDistribution, QuantilePartition, SegmentFit, StatsError, SummaryStats,
};
use proptest::prelude::*;
use rstest::rstest;

fn wide_normal() -> NormalDistribution {
    NormalDistribution::new(0.0, 1e7).unwrap()
}

// === Summary statistics ===

proptest! {
    #[test]
    fn test_summary_std_non_negative_and_exact_range(
        data in prop::collection::vec(-1e9f64..1e9, 1..200)
    ) {
        let stats = SummaryStats::from_data(&data).unwrap();
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(stats.std_dev >= 0.0);
        prop_assert_eq!(stats.range(), max - min);
    }

    #[test]
    fn test_histogram_counts_every_sample(
        data in prop::collection::vec(-1e6f64..1e6, 1..300),
        width in 10.0f64..5e4,
    ) {
        let hist = Histogram::build(&data, width).unwrap();

        prop_assert_eq!(hist.total(), data.len());
        prop_assert_eq!(hist.edges.len(), hist.counts.len() + 1);
        for (i, pair) in hist.edges.windows(2).enumerate() {
            let gap = pair[1] - pair[0];
            prop_assert!((gap - width).abs() <= 1e-6, "gap {} at bin {}", gap, i);
        }
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(*hist.edges.last().unwrap() > max);
    }

    #[test]
    fn test_integer_histogram_counts(
        data in prop::collection::vec(-100_000i64..100_000, 1..300),
    ) {
        let samples: Vec<f64> = data.iter().map(|&x| x as f64).collect();
        let hist = Histogram::build(&samples, 5000.0).unwrap();

        for &x in &samples {
            let idx = hist.bin_index(x).unwrap();
            prop_assert!(hist.edges[idx] <= x && x < hist.edges[idx + 1]);
        }
    }
}

#[test]
fn test_summary_uses_population_estimator() {
    let data = vec![1.0, 2.0, 3.0, 4.0];
    let stats = SummaryStats::from_data(&data).unwrap();

    // Population variance 1.25, sample variance 5/3
    assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    assert!((stats.sample_std_dev().unwrap() - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
}

// === Quantile partition ===

#[test]
fn test_decile_boundaries_symmetric() {
    let partition = QuantilePartition::compute(&wide_normal(), 10).unwrap();
    let b = &partition.boundaries;

    assert_eq!(b.len(), 9);
    for i in 0..=8 {
        let mirrored = -b[8 - i];
        let scale = b[i].abs().max(1.0);
        assert!(
            (b[i] - mirrored).abs() / scale < 1e-3,
            "boundary {} = {} vs mirrored {}",
            i,
            b[i],
            mirrored
        );
    }
}

#[test]
fn test_decile_regions_carry_equal_mass() {
    let dist = wide_normal();
    let partition = QuantilePartition::compute(&dist, 10).unwrap();

    let mut edges = vec![f64::NEG_INFINITY];
    edges.extend(partition.boundaries.iter().copied());
    edges.push(f64::INFINITY);

    let cdf = |x: f64| match x {
        x if x == f64::NEG_INFINITY => 0.0,
        x if x == f64::INFINITY => 1.0,
        x => dist.cdf(x),
    };
    for pair in edges.windows(2) {
        let mass = cdf(pair[1]) - cdf(pair[0]);
        assert!((mass - 0.1).abs() < 1e-6, "region mass {}", mass);
    }
}

#[test]
fn test_display_domain_tail_cutoff() {
    let dist = wide_normal();
    let domain = DisplayDomain::from_tail(&dist, 0.01).unwrap();

    assert!((dist.cdf(domain.x_min) - 0.01).abs() < 1e-6);
    assert!((dist.cdf(domain.x_max) - 0.99).abs() < 1e-6);
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_partition_rejects_small_counts(#[case] count: usize) {
    assert_eq!(
        QuantilePartition::compute(&wide_normal(), count),
        Err(StatsError::InvalidPartitionCount { count })
    );
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(10)]
#[case(64)]
fn test_partition_boundary_masses(#[case] count: usize) {
    let dist = NormalDistribution::new(-3.0, 0.25).unwrap();
    let partition = QuantilePartition::compute(&dist, count).unwrap();

    assert_eq!(partition.num_regions(), count);
    for (k, &b) in partition.boundaries.iter().enumerate() {
        let expected = (k + 1) as f64 / count as f64;
        assert!((dist.cdf(b) - expected).abs() < 1e-6);
    }
}

// === Segment fit ===

#[test]
fn test_exact_line_recovered_through_window() {
    // y = 2x + 3 over x in [-1.5, -1.0) keeps y within [0, 1]
    let curve: Vec<(f64, f64)> = (0..100)
        .map(|i| {
            let x = -1.5 + i as f64 * 0.005;
            (x, 2.0 * x + 3.0)
        })
        .collect();
    let fit = SegmentFit::fit(&curve, FitWindow::full()).unwrap();

    assert_eq!(fit.len(), 100);
    assert!((fit.slope() - 2.0).abs() < 1e-9);
    assert!((fit.intercept() - 3.0).abs() < 1e-9);
}

#[test]
fn test_local_fit_beats_global_fit() {
    let dist = wide_normal();
    let curve = sample_cdf(&dist, dist.quantile(0.001), dist.quantile(0.999), 1000);

    let local = SegmentFit::fit(&curve, FitWindow::new(0.1, 0.3).unwrap()).unwrap();
    let global = SegmentFit::fit(&curve, FitWindow::full()).unwrap();

    assert!(local.len() < global.len());
    assert!(local.residual_sum_of_squares() < global.residual_sum_of_squares());
    assert!(local.observed.iter().all(|&y| (0.1..=0.3).contains(&y)));
}

#[test]
fn test_fit_on_empirical_cdf() {
    let keys: Vec<f64> = (0..500).map(|i| (i * 2) as f64).collect();
    let ecdf = Ecdf::from_data(&keys).unwrap();
    let fit = SegmentFit::fit(&ecdf.curve(), FitWindow::new(0.2, 0.8).unwrap()).unwrap();

    // Uniform keys two apart: slope 1 / (2 * 500)
    assert!((fit.slope() - 1e-3).abs() < 1e-9);
    assert!(fit.max_abs_residual() < 1e-9);
}

// === Idempotence ===

#[test]
fn test_repeated_calls_bit_identical() {
    let data: Vec<f64> = (0..257).map(|i| ((i * 7919) % 1013) as f64 - 500.0).collect();
    let dist = wide_normal();
    let curve = sample_cdf(&dist, dist.quantile(0.001), dist.quantile(0.999), 1000);
    let window = FitWindow::new(0.1, 0.3).unwrap();

    assert_eq!(
        SummaryStats::from_data(&data).unwrap(),
        SummaryStats::from_data(&data).unwrap()
    );
    assert_eq!(
        Histogram::build(&data, 50.0).unwrap(),
        Histogram::build(&data, 50.0).unwrap()
    );
    assert_eq!(
        QuantilePartition::compute(&dist, 10).unwrap(),
        QuantilePartition::compute(&dist, 10).unwrap()
    );
    let first = SegmentFit::fit(&curve, window).unwrap();
    let second = SegmentFit::fit(&curve, window).unwrap();
    assert_eq!(first.slope().to_bits(), second.slope().to_bits());
    assert_eq!(first.intercept().to_bits(), second.intercept().to_bits());
    assert_eq!(first, second);
}
