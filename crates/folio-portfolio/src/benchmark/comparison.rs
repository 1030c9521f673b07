//! Portfolio versus benchmark performance over aligned periods.

use folio_core::types::{Date, ReturnSeries};
use serde::{Deserialize, Serialize};

use crate::analytics::{compute_cumulative_return, AlignedReturns};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, WeightVector};

/// Per-period return of a portfolio rebalanced to `weights` every period.
///
/// ```text
/// R_p,t = Σ(w_i × r_i,t)
/// ```
///
/// # Errors
///
/// `DimensionMismatch` if `weights` does not have one entry per aligned asset.
pub fn portfolio_return_series(
    aligned: &AlignedReturns,
    weights: &WeightVector,
) -> PortfolioResult<ReturnSeries> {
    if weights.len() != aligned.num_assets() {
        return Err(PortfolioError::dimension_mismatch(
            aligned.num_assets(),
            weights.len(),
        ));
    }

    let values: Vec<f64> = (0..aligned.num_periods())
        .map(|t| {
            weights
                .iter()
                .zip(aligned.returns())
                .map(|(w, series)| w * series.values()[t])
                .sum::<f64>()
        })
        .collect();

    Ok(ReturnSeries::from_parts(aligned.dates().to_vec(), values)?)
}

/// Portfolio and benchmark performance side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Period end dates.
    pub dates: Vec<Date>,

    /// Per-period portfolio returns.
    pub portfolio_returns: ReturnSeries,

    /// Per-period benchmark returns.
    pub benchmark_returns: ReturnSeries,

    /// Compounded portfolio return to each date.
    pub portfolio_cumulative: ReturnSeries,

    /// Compounded benchmark return to each date.
    pub benchmark_cumulative: ReturnSeries,

    /// Portfolio return over the whole window.
    pub portfolio_total_return: f64,

    /// Benchmark return over the whole window.
    pub benchmark_total_return: f64,

    /// Portfolio minus benchmark total return.
    pub excess_total_return: f64,

    /// Sample standard deviation of per-period excess returns; `None` with
    /// fewer than two periods.
    pub tracking_error: Option<f64>,

    /// Tracking error scaled by `√periods_per_year`.
    pub annualized_tracking_error: Option<f64>,
}

impl BenchmarkComparison {
    /// True when the portfolio beat the benchmark over the window.
    #[must_use]
    pub fn is_outperforming(&self) -> bool {
        self.excess_total_return > 0.0
    }
}

/// Compares the weighted portfolio with the aligned benchmark.
///
/// # Errors
///
/// - `MissingBenchmark` if alignment had no benchmark or dropped it
/// - `DimensionMismatch` if `weights` does not match the aligned assets
pub fn compare_to_benchmark(
    aligned: &AlignedReturns,
    weights: &WeightVector,
    config: &AnalyticsConfig,
) -> PortfolioResult<BenchmarkComparison> {
    let benchmark_returns = aligned
        .benchmark()
        .cloned()
        .ok_or(PortfolioError::MissingBenchmark)?;
    let portfolio_returns = portfolio_return_series(aligned, weights)?;

    let portfolio_cumulative = compute_cumulative_return(&portfolio_returns)?;
    let benchmark_cumulative = compute_cumulative_return(&benchmark_returns)?;
    let portfolio_total_return = portfolio_cumulative.last().unwrap_or(0.0);
    let benchmark_total_return = benchmark_cumulative.last().unwrap_or(0.0);

    let excess: Vec<f64> = portfolio_returns
        .values()
        .iter()
        .zip(benchmark_returns.values())
        .map(|(p, b)| p - b)
        .collect();
    let tracking_error = sample_std_dev(&excess);

    Ok(BenchmarkComparison {
        dates: aligned.dates().to_vec(),
        portfolio_returns,
        benchmark_returns,
        portfolio_cumulative,
        benchmark_cumulative,
        portfolio_total_return,
        benchmark_total_return,
        excess_total_return: portfolio_total_return - benchmark_total_return,
        tracking_error,
        annualized_tracking_error: tracking_error
            .map(|te| te * f64::from(config.periods_per_year).sqrt()),
    })
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (n - 1.0)).sqrt())
}
