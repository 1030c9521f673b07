//! Expected return and volatility of a weighted portfolio.
//!
//! ## Formulas
//!
//! ```text
//! R_p     = Σ(w_i × μ_i)
//! σ²_p    = wᵀ C w
//! σ_p     = √max(σ²_p, 0)
//! ```
//!
//! The return is the one-period expected return of a portfolio rebalanced
//! to `w` each period.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsWarning, CovarianceMatrix, WeightVector};

/// Radicands below `-DEGENERATE_VARIANCE_TOLERANCE` are reported as a
/// degenerate covariance. Smaller negatives are rounding noise and are
/// clamped silently.
pub const DEGENERATE_VARIANCE_TOLERANCE: f64 = 1e-14;

/// Portfolio variance and volatility, with the clamping warning if one
/// was raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// `wᵀ C w` before clamping.
    pub variance: f64,

    /// Square root of the clamped variance.
    pub volatility: f64,

    /// Set when the variance was materially negative.
    pub warning: Option<AnalyticsWarning>,
}

/// Rejects mean-return vectors holding `NaN` or infinities.
pub(crate) fn check_mean_returns(mean_returns: &[f64]) -> PortfolioResult<()> {
    match mean_returns.iter().position(|mu| !mu.is_finite()) {
        Some(index) => Err(PortfolioError::non_finite_input("mean return", index)),
        None => Ok(()),
    }
}

/// Expected one-period portfolio return `Σ w_i μ_i`.
///
/// # Errors
///
/// - `DimensionMismatch` if `mean_returns` and `weights` differ in length
/// - `NonFiniteInput` if a mean return is `NaN` or infinite
pub fn portfolio_return(weights: &WeightVector, mean_returns: &[f64]) -> PortfolioResult<f64> {
    if weights.len() != mean_returns.len() {
        return Err(PortfolioError::dimension_mismatch(
            weights.len(),
            mean_returns.len(),
        ));
    }
    check_mean_returns(mean_returns)?;
    Ok(weights
        .iter()
        .zip(mean_returns)
        .map(|(w, mu)| w * mu)
        .sum())
}

/// Computes `wᵀ C w` and its clamped square root without logging.
pub(crate) fn risk_estimate(
    weights: &WeightVector,
    covariance: &CovarianceMatrix,
) -> PortfolioResult<RiskEstimate> {
    if weights.len() != covariance.dim() {
        return Err(PortfolioError::dimension_mismatch(
            covariance.dim(),
            weights.len(),
        ));
    }

    let variance = folio_math::linear_algebra::quadratic_form(
        weights.as_slice(),
        covariance.as_matrix(),
    )?;
    let warning = (variance < -DEGENERATE_VARIANCE_TOLERANCE)
        .then_some(AnalyticsWarning::DegenerateCovariance { variance });

    Ok(RiskEstimate {
        variance,
        volatility: variance.max(0.0).sqrt(),
        warning,
    })
}

/// Variance, volatility and any degenerate-covariance warning.
///
/// A materially negative variance is logged at `warn` level and returned
/// in [`RiskEstimate::warning`]; the volatility is clamped to zero.
pub fn portfolio_risk(
    weights: &WeightVector,
    covariance: &CovarianceMatrix,
) -> PortfolioResult<RiskEstimate> {
    let mut estimate = risk_estimate(weights, covariance)?;
    estimate.warning = estimate.warning.map(AnalyticsWarning::emit);
    Ok(estimate)
}

/// Portfolio volatility `√(wᵀ C w)`, never negative.
///
/// # Errors
///
/// `DimensionMismatch` if the weights and matrix disagree in size.
pub fn portfolio_volatility(
    weights: &WeightVector,
    covariance: &CovarianceMatrix,
) -> PortfolioResult<f64> {
    Ok(portfolio_risk(weights, covariance)?.volatility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cov(rows: Vec<Vec<f64>>) -> CovarianceMatrix {
        CovarianceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_portfolio_return() {
        let w = WeightVector::new(vec![0.5, 0.5]).unwrap();
        let r = portfolio_return(&w, &[0.1, -0.05]).unwrap();
        assert_relative_eq!(r, 0.025, epsilon = 1e-15);
    }

    #[test]
    fn test_return_dimension_mismatch() {
        let w = WeightVector::equal(3).unwrap();
        assert_eq!(
            portfolio_return(&w, &[0.1, 0.2]),
            Err(PortfolioError::dimension_mismatch(3, 2))
        );
    }

    #[test]
    fn test_return_rejects_nan_mean() {
        let w = WeightVector::equal(2).unwrap();
        assert_eq!(
            portfolio_return(&w, &[0.1, f64::NAN]),
            Err(PortfolioError::non_finite_input("mean return", 1))
        );
    }

    #[test]
    fn test_single_asset_volatility() {
        let w = WeightVector::new(vec![1.0]).unwrap();
        let vol = portfolio_volatility(&w, &cov(vec![vec![0.04]])).unwrap();
        assert_relative_eq!(vol, 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_diversification() {
        // Two uncorrelated assets with equal variance: σ_p = σ / √2.
        let w = WeightVector::equal(2).unwrap();
        let c = cov(vec![vec![0.04, 0.0], vec![0.0, 0.04]]);
        let vol = portfolio_volatility(&w, &c).unwrap();
        assert_relative_eq!(vol, 0.2 / 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_hedge_is_zero() {
        let w = WeightVector::equal(2).unwrap();
        let c = cov(vec![vec![0.01, -0.01], vec![-0.01, 0.01]]);
        let risk = portfolio_risk(&w, &c).unwrap();
        assert!(risk.volatility.abs() < 1e-12);
        assert!(risk.warning.is_none());
    }

    #[test]
    fn test_negative_radicand_clamped_with_warning() {
        // Symmetric but indefinite: eigenvalues 1.5 and -0.5.
        let w = WeightVector::equal(2).unwrap();
        let c = cov(vec![vec![0.5, -1.0], vec![-1.0, 0.5]]);
        let risk = portfolio_risk(&w, &c).unwrap();
        assert_relative_eq!(risk.variance, -0.25, epsilon = 1e-15);
        assert_eq!(risk.volatility, 0.0);
        assert!(matches!(
            risk.warning,
            Some(AnalyticsWarning::DegenerateCovariance { .. })
        ));
        assert_eq!(portfolio_volatility(&w, &c).unwrap(), 0.0);
    }

    #[test]
    fn test_volatility_dimension_mismatch() {
        let w = WeightVector::equal(3).unwrap();
        let c = cov(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(matches!(
            portfolio_volatility(&w, &c),
            Err(PortfolioError::DimensionMismatch { .. })
        ));
    }
}
