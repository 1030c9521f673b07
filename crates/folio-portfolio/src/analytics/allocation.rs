//! Portfolio allocation strategies.
//!
//! - Equal weight: `1/n` in every asset
//! - Minimum variance: long-only, fully invested weights minimizing `wᵀ C w`

use folio_math::optimization::{minimize_quadratic_on_simplex, OptimizationConfig};

use super::risk::check_mean_returns;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{CovarianceMatrix, WeightVector};

/// Equal allocation across `n` assets.
///
/// # Errors
///
/// `InvalidUniverse` when `n` is zero.
pub fn equal_weight_allocation(n: usize) -> PortfolioResult<WeightVector> {
    WeightVector::equal(n)
}

/// Long-only minimum-variance weights with the default solver settings.
///
/// `mean_returns` fixes the asset ordering and is checked against the
/// matrix; it does not enter the objective.
///
/// # Errors
///
/// - `DimensionMismatch` if `mean_returns` and `covariance` disagree
/// - `NonFiniteInput` if a mean return is `NaN` or infinite
/// - `OptimizationDidNotConverge` if the iteration budget runs out
pub fn optimize_minimum_variance(
    mean_returns: &[f64],
    covariance: &CovarianceMatrix,
) -> PortfolioResult<WeightVector> {
    optimize_minimum_variance_with_config(mean_returns, covariance, &OptimizationConfig::default())
}

/// Long-only minimum-variance weights with explicit solver settings.
///
/// The search starts from the equal-weight allocation, so the result is
/// never riskier than `1/n` in every asset. It stops once the weights stop
/// moving or the variance is provably within the objective tolerance of
/// the minimum.
pub fn optimize_minimum_variance_with_config(
    mean_returns: &[f64],
    covariance: &CovarianceMatrix,
    config: &OptimizationConfig,
) -> PortfolioResult<WeightVector> {
    let n = covariance.dim();
    if mean_returns.len() != n {
        return Err(PortfolioError::dimension_mismatch(n, mean_returns.len()));
    }
    check_mean_returns(mean_returns)?;

    let start = WeightVector::equal(n)?;
    let result = minimize_quadratic_on_simplex(covariance.as_matrix(), start.as_slice(), config)?;

    if !result.converged {
        return Err(PortfolioError::OptimizationDidNotConverge {
            iterations: result.iterations,
            residual: result.residual,
        });
    }

    log::debug!(
        "minimum variance over {} assets: variance={:.3e} after {} iterations",
        n,
        result.objective_value,
        result.iterations
    );

    WeightVector::from_unnormalized(result.parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::portfolio_volatility;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_weight() {
        let w = equal_weight_allocation(3).unwrap();
        for x in w.iter() {
            assert_relative_eq!(*x, 1.0 / 3.0, epsilon = 1e-15);
        }
        assert!(matches!(
            equal_weight_allocation(0),
            Err(PortfolioError::InvalidUniverse { .. })
        ));
    }

    #[test]
    fn test_min_variance_uncorrelated() {
        // Inverse-variance weights: 1/0.04 : 1/0.01 = 1 : 4.
        let cov =
            CovarianceMatrix::from_rows(vec![vec![0.04, 0.0], vec![0.0, 0.01]]).unwrap();
        let w = optimize_minimum_variance(&[0.0, 0.0], &cov).unwrap();
        assert_relative_eq!(w.as_slice()[0], 0.2, epsilon = 1e-6);
        assert_relative_eq!(w.as_slice()[1], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_min_variance_corner() {
        // Strong positive correlation pushes all weight into the calmer asset.
        let cov =
            CovarianceMatrix::from_rows(vec![vec![0.09, 0.05], vec![0.05, 0.04]]).unwrap();
        let w = optimize_minimum_variance(&[0.1, 0.05], &cov).unwrap();
        assert!(w.as_slice()[0] < 1e-6);
        assert_relative_eq!(w.as_slice()[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_not_worse_than_equal_weight() {
        let cov = CovarianceMatrix::from_rows(vec![
            vec![0.040, 0.006, 0.010],
            vec![0.006, 0.020, -0.004],
            vec![0.010, -0.004, 0.090],
        ])
        .unwrap();
        let mv = optimize_minimum_variance(&[0.01, 0.02, 0.03], &cov).unwrap();
        let ew = equal_weight_allocation(3).unwrap();
        assert!(
            portfolio_volatility(&mv, &cov).unwrap()
                < portfolio_volatility(&ew, &cov).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let cov = CovarianceMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert_eq!(
            optimize_minimum_variance(&[0.1, 0.2], &cov),
            Err(PortfolioError::dimension_mismatch(1, 2))
        );
    }

    /// Daily returns of `assets` names driven by one market factor.
    fn factor_returns(assets: usize, periods: usize) -> Vec<Vec<f64>> {
        let wobble = |a: usize, t: usize| {
            let mut x = (((a as u64) << 32) | t as u64).wrapping_mul(0x517cc1b727220a95);
            x ^= x >> 32;
            x = x.wrapping_mul(0x517cc1b727220a95);
            x ^= x >> 32;
            (x % 20_000) as f64 / 10_000.0 - 1.0
        };
        (0..assets)
            .map(|a| {
                let beta = 0.8 + 0.4 * a as f64 / assets as f64;
                (0..periods)
                    .map(|t| beta * 0.01 * wobble(0, t) + 0.003 * wobble(a + 1, t))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_factor_dominated_universe_converges() {
        for (assets, periods) in [(20, 252), (30, 252), (40, 20)] {
            let columns = factor_returns(assets, periods);
            let refs: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();
            let cov = CovarianceMatrix::from_returns(&refs).unwrap();
            let mu = vec![0.0; assets];

            let mv = optimize_minimum_variance(&mu, &cov)
                .unwrap_or_else(|e| panic!("{assets} assets over {periods} periods: {e}"));
            let ew = equal_weight_allocation(assets).unwrap();
            assert!(
                portfolio_volatility(&mv, &cov).unwrap()
                    <= portfolio_volatility(&ew, &cov).unwrap() + 1e-12
            );
        }
    }

    #[test]
    fn test_budget_exhausted() {
        let cov =
            CovarianceMatrix::from_rows(vec![vec![0.04, 0.0], vec![0.0, 0.01]]).unwrap();
        let config = OptimizationConfig::default().with_max_iterations(1);
        assert!(matches!(
            optimize_minimum_variance_with_config(&[0.0, 0.0], &cov, &config),
            Err(PortfolioError::OptimizationDidNotConverge { iterations: 1, .. })
        ));
    }
}
