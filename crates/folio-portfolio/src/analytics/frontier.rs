//! Random-search approximation of the efficient frontier.
//!
//! Long-only, fully invested weight vectors are drawn uniformly from the
//! simplex with a seeded generator and scored by expected return,
//! volatility and a Sharpe-like ratio. The same seed always yields the
//! same points in the same order.

use folio_math::sampling::SimplexSampler;
use serde::{Deserialize, Serialize};

use super::parallel::maybe_parallel_map;
use super::risk::{check_mean_returns, portfolio_return, risk_estimate, RiskEstimate};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, CovarianceMatrix, WeightVector};

/// One sampled portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Sampled weights.
    pub weights: WeightVector,

    /// `Σ w_i μ_i`.
    pub expected_return: f64,

    /// `√(wᵀ C w)`, clamped at zero.
    pub volatility: f64,

    /// `(expected_return - risk_free_rate) / volatility`; `None` when the
    /// volatility is zero.
    pub sharpe: Option<f64>,
}

impl FrontierPoint {
    /// `(return, volatility, sharpe)`.
    #[must_use]
    pub fn as_triple(&self) -> (f64, f64, Option<f64>) {
        (self.expected_return, self.volatility, self.sharpe)
    }
}

/// Sampled portfolios in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontier {
    /// The sampled points.
    pub points: Vec<FrontierPoint>,
}

impl Frontier {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no samples were drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points.
    pub fn iter(&self) -> impl Iterator<Item = &FrontierPoint> {
        self.points.iter()
    }

    /// Point with the highest finite Sharpe ratio. Ties go to the
    /// earliest draw.
    #[must_use]
    pub fn max_sharpe(&self) -> Option<&FrontierPoint> {
        self.points
            .iter()
            .filter_map(|p| p.sharpe.filter(|s| s.is_finite()).map(|s| (s, p)))
            .fold(None, |best: Option<(f64, &FrontierPoint)>, (s, p)| match best {
                Some((bs, _)) if bs >= s => best,
                _ => Some((s, p)),
            })
            .map(|(_, p)| p)
    }

    /// Point with the lowest volatility. Ties go to the earliest draw.
    #[must_use]
    pub fn min_volatility(&self) -> Option<&FrontierPoint> {
        self.points.iter().fold(None, |best, p| match best {
            Some(b) if b.volatility <= p.volatility => Some(b),
            _ => Some(p),
        })
    }
}

/// Samples `num_samples` portfolios with the default configuration.
///
/// # Errors
///
/// - `DimensionMismatch` if `mean_returns` and `covariance` disagree
/// - `NonFiniteInput` if a mean return is `NaN` or infinite
/// - `InvalidUniverse` if there are no assets
pub fn random_search_frontier(
    mean_returns: &[f64],
    covariance: &CovarianceMatrix,
    num_samples: usize,
    seed: u64,
) -> PortfolioResult<Frontier> {
    random_search_frontier_with_config(
        mean_returns,
        covariance,
        num_samples,
        seed,
        &AnalyticsConfig::default(),
    )
}

/// Samples `num_samples` portfolios.
///
/// Weights are drawn sequentially from one generator seeded with `seed`;
/// scoring may run in parallel but keeps draw order. Zero samples yields
/// an empty frontier.
pub fn random_search_frontier_with_config(
    mean_returns: &[f64],
    covariance: &CovarianceMatrix,
    num_samples: usize,
    seed: u64,
    config: &AnalyticsConfig,
) -> PortfolioResult<Frontier> {
    let n = covariance.dim();
    if mean_returns.len() != n {
        return Err(PortfolioError::dimension_mismatch(n, mean_returns.len()));
    }
    if n == 0 {
        return Err(PortfolioError::invalid_universe("no assets to sample"));
    }
    check_mean_returns(mean_returns)?;

    let mut sampler = SimplexSampler::new(n, seed)?;
    let draws = sampler
        .sample_n(num_samples)
        .into_iter()
        .map(WeightVector::from_unnormalized)
        .collect::<PortfolioResult<Vec<_>>>()?;

    let rf = config.risk_free_rate;
    let scored = maybe_parallel_map(
        &draws,
        config,
        |weights| -> PortfolioResult<(f64, RiskEstimate)> {
            let expected_return = portfolio_return(weights, mean_returns)?;
            let risk = risk_estimate(weights, covariance)?;
            Ok((expected_return, risk))
        },
    );

    let mut points = Vec::with_capacity(num_samples);
    let mut degenerate = 0usize;
    for (weights, outcome) in draws.into_iter().zip(scored) {
        let (expected_return, risk) = outcome?;
        if risk.warning.is_some() {
            degenerate += 1;
        }
        let volatility = risk.volatility;
        let sharpe = (volatility > 0.0).then(|| (expected_return - rf) / volatility);
        points.push(FrontierPoint {
            weights,
            expected_return,
            volatility,
            sharpe,
        });
    }

    if degenerate > 0 {
        log::warn!(
            "{degenerate} of {num_samples} frontier samples had negative variance clamped to zero"
        );
    }
    log::debug!("sampled {num_samples} frontier points over {n} assets (seed {seed})");

    Ok(Frontier { points })
}
