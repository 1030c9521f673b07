//! Period returns and compounded return curves.

use folio_core::types::{PriceSeries, ReturnSeries};

use crate::error::{PortfolioError, PortfolioResult};

/// Minimum number of prices needed to form one return.
pub const MIN_PRICE_POINTS: usize = 2;

/// Simple period-over-period returns, `r[i] = p[i] / p[i-1] - 1`.
///
/// Each return is dated at the end of its period, so the result has one
/// fewer element than the input.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{Date, PriceSeries};
/// use folio_portfolio::analytics::compute_returns;
///
/// let d = Date::from_ymd(2025, 1, 1).unwrap();
/// let prices = PriceSeries::new(vec![(d, 100.0), (d.add_days(1), 110.0)]).unwrap();
/// let returns = compute_returns(&prices).unwrap();
/// assert!((returns.values()[0] - 0.10).abs() < 1e-12);
/// ```
pub fn compute_returns(series: &PriceSeries) -> PortfolioResult<ReturnSeries> {
    if series.len() < MIN_PRICE_POINTS {
        return Err(PortfolioError::insufficient_data(
            MIN_PRICE_POINTS,
            series.len(),
        ));
    }

    let values = series
        .prices()
        .windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    let dates = series.dates()[1..].to_vec();

    Ok(ReturnSeries::from_parts(dates, values)?)
}

/// Compounded return curve, `c[i] = (1 + r[0]) ... (1 + r[i]) - 1`.
///
/// Accumulated in log space (`ln_1p` / `exp_m1`), so long series keep
/// precision near zero and the running product never overflows before the
/// final exponentiation.
pub fn compute_cumulative_return(returns: &ReturnSeries) -> PortfolioResult<ReturnSeries> {
    let mut log_growth = 0.0;
    let values = returns
        .values()
        .iter()
        .map(|r| {
            log_growth += r.ln_1p();
            log_growth.exp_m1()
        })
        .collect();

    Ok(ReturnSeries::from_parts(returns.dates().to_vec(), values)?)
}
