//! Property tests for simplex projection and the quadratic minimizer.

use folio_math::prelude::*;
use nalgebra::DMatrix;
use proptest::prelude::*;

/// Builds a PSD matrix as `A A'` from a flat vector of entries.
fn gram(n: usize, entries: &[f64]) -> DMatrix<f64> {
    let a = DMatrix::from_row_slice(n, n, &entries[..n * n]);
    &a * a.transpose()
}

proptest! {
    #[test]
    fn projection_lands_on_simplex(v in prop::collection::vec(-50.0f64..50.0, 1..20)) {
        let w = project_onto_simplex(&v);
        prop_assert_eq!(w.len(), v.len());
        prop_assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        prop_assert!(w.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn projection_is_idempotent(v in prop::collection::vec(-5.0f64..5.0, 1..12)) {
        let once = project_onto_simplex(&v);
        let twice = project_onto_simplex(&once);
        for (a, b) in once.iter().zip(twice.iter()) {
            prop_assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn minimizer_never_worse_than_start(
        n in 2usize..6,
        entries in prop::collection::vec(-1.0f64..1.0, 36),
    ) {
        let q = gram(n, &entries);
        let start = vec![1.0 / n as f64; n];
        let start_value = quadratic_form(&start, &q).unwrap();

        let config = OptimizationConfig::default().with_max_iterations(200_000).with_tolerance(1e-9);
        let result = minimize_quadratic_on_simplex(&q, &start, &config).unwrap();

        prop_assert!(result.objective_value <= start_value + 1e-12);
        prop_assert!((result.parameters.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        prop_assert!(result.parameters.iter().all(|&x| x >= 0.0));
    }
}

// =============================================================================
// FACTOR-MODEL COVARIANCES
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

/// Value in `[-1, 1)` from the hash.
fn unit(seed: u64, i: u64) -> f64 {
    (simple_hash(seed, i) % 20_000) as f64 / 10_000.0 - 1.0
}

/// Sample covariance of one market factor plus small asset-specific noise.
fn factor_covariance(assets: usize, periods: usize, seed: u64) -> DMatrix<f64> {
    let market: Vec<f64> = (0..periods).map(|t| 0.01 * unit(seed, t as u64)).collect();
    let columns: Vec<Vec<f64>> = (0..assets)
        .map(|a| {
            let beta = 0.8 + 0.4 * (a as f64 / assets as f64);
            (0..periods)
                .map(|t| {
                    let noise = unit(seed + 1 + a as u64, 10_000 + t as u64);
                    beta * market[t] + 0.003 * noise
                })
                .collect()
        })
        .collect();
    let refs: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();
    sample_covariance(&refs).unwrap()
}

/// First-order optimality on the simplex: `(Q x)_i >= x'Qx` for every `i`.
fn assert_near_optimal(q: &DMatrix<f64>, x: &[f64]) {
    let n = q.nrows();
    let qx = q * nalgebra::DVector::from_column_slice(x);
    let value = quadratic_form(x, q).unwrap();
    let mean_diagonal = q.diagonal().sum() / n as f64;
    for i in 0..n {
        assert!(
            qx[i] >= value - 1e-6 * mean_diagonal,
            "asset {i}: marginal variance {} below portfolio variance {}",
            qx[i],
            value
        );
    }
}

#[test]
fn test_thirty_assets_one_year_daily_converges() {
    for seed in [1, 7, 42] {
        let q = factor_covariance(30, 252, seed);
        let start = vec![1.0 / 30.0; 30];
        let result = minimize_quadratic_on_simplex(&q, &start, &OptimizationConfig::default())
            .unwrap();

        assert!(result.converged, "seed {seed}: {result:?}");
        assert!(result.objective_value <= quadratic_form(&start, &q).unwrap());
        assert!((result.parameters.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_near_optimal(&q, &result.parameters);
    }
}

#[test]
fn test_more_assets_than_periods_converges() {
    // Rank-deficient sample covariance: 40 assets over 20 periods.
    let q = factor_covariance(40, 20, 3);
    let start = vec![1.0 / 40.0; 40];
    let result =
        minimize_quadratic_on_simplex(&q, &start, &OptimizationConfig::default()).unwrap();

    assert!(result.converged, "{result:?}");
    assert!(result.parameters.iter().all(|&x| x >= 0.0));
    assert_near_optimal(&q, &result.parameters);
}
