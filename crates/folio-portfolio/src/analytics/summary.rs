//! Per-asset return and risk statistics over aligned periods.

use folio_core::types::Ticker;
use serde::{Deserialize, Serialize};

use super::alignment::AlignedReturns;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::AnalyticsConfig;

/// Summary statistics for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    /// The asset.
    pub ticker: Ticker,

    /// Mean period return.
    pub mean_return: f64,

    /// Sample standard deviation of period returns.
    pub volatility: f64,

    /// `mean_return × periods_per_year`.
    pub annualized_return: f64,

    /// `volatility × √periods_per_year`.
    pub annualized_volatility: f64,

    /// Compounded return over all periods.
    pub total_return: f64,
}

/// Computes [`AssetStatistics`] for every aligned asset, in ticker order.
///
/// # Errors
///
/// `InsufficientData` if fewer than two periods are aligned.
pub fn asset_statistics(
    aligned: &AlignedReturns,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<AssetStatistics>> {
    let periods = aligned.num_periods();
    if periods < 2 {
        return Err(PortfolioError::insufficient_data(2, periods));
    }
    let covariance = aligned.covariance()?;
    let scale = f64::from(config.periods_per_year);

    Ok(aligned
        .tickers()
        .iter()
        .zip(aligned.returns())
        .zip(covariance.volatilities())
        .map(|((ticker, series), volatility)| {
            let mean_return = series.mean().unwrap_or(0.0);
            let total_return = series.values().iter().map(|r| r.ln_1p()).sum::<f64>().exp_m1();
            AssetStatistics {
                ticker: ticker.clone(),
                mean_return,
                volatility,
                annualized_return: mean_return * scale,
                annualized_volatility: volatility * scale.sqrt(),
                total_return,
            }
        })
        .collect())
}
