//! Timestamp alignment of asset and benchmark histories.
//!
//! Price histories from a data provider rarely share an index: assets
//! list on different dates and feeds have gaps. Every cross-asset
//! computation runs on the inner join of the price dates, with returns
//! computed after the join so that each period spans the same dates for
//! every asset.

use std::collections::BTreeSet;

use folio_core::types::{AssetUniverse, Date, PriceSeries, ReturnSeries, Ticker};
use serde::{Deserialize, Serialize};

use super::returns::{compute_returns, MIN_PRICE_POINTS};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsWarning, CovarianceMatrix};

/// Return series of several assets over one shared set of periods.
///
/// Built by [`align`]. Every series is dated by [`AlignedReturns::dates`];
/// deserialization checks this again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlignedReturnsData")]
pub struct AlignedReturns {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    returns: Vec<ReturnSeries>,
    benchmark: Option<ReturnSeries>,
    warnings: Vec<AnalyticsWarning>,
}

/// Unchecked wire form of [`AlignedReturns`].
#[derive(Deserialize)]
struct AlignedReturnsData {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    returns: Vec<ReturnSeries>,
    benchmark: Option<ReturnSeries>,
    #[serde(default)]
    warnings: Vec<AnalyticsWarning>,
}

fn check_dated_by(label: &str, series: &ReturnSeries, dates: &[Date]) -> PortfolioResult<()> {
    if series.len() != dates.len() {
        return Err(PortfolioError::dimension_mismatch(dates.len(), series.len()));
    }
    if series.dates() != dates {
        return Err(PortfolioError::invalid_universe(format!(
            "{label} returns are not dated by the aligned dates"
        )));
    }
    Ok(())
}

impl TryFrom<AlignedReturnsData> for AlignedReturns {
    type Error = PortfolioError;

    fn try_from(data: AlignedReturnsData) -> Result<Self, Self::Error> {
        if data.tickers.len() != data.returns.len() {
            return Err(PortfolioError::dimension_mismatch(
                data.tickers.len(),
                data.returns.len(),
            ));
        }
        for (ticker, series) in data.tickers.iter().zip(&data.returns) {
            check_dated_by(ticker.as_str(), series, &data.dates)?;
        }
        if let Some(bench) = &data.benchmark {
            check_dated_by("benchmark", bench, &data.dates)?;
        }
        Ok(Self {
            dates: data.dates,
            tickers: data.tickers,
            returns: data.returns,
            benchmark: data.benchmark,
            warnings: data.warnings,
        })
    }
}

impl AlignedReturns {
    /// Period end dates shared by every series.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Surviving assets, in universe order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// One return series per ticker.
    #[must_use]
    pub fn returns(&self) -> &[ReturnSeries] {
        &self.returns
    }

    /// Benchmark returns over the same periods, if a benchmark survived.
    #[must_use]
    pub fn benchmark(&self) -> Option<&ReturnSeries> {
        self.benchmark.as_ref()
    }

    /// Assets or benchmark dropped along the way.
    #[must_use]
    pub fn warnings(&self) -> &[AnalyticsWarning] {
        &self.warnings
    }

    /// Number of assets.
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.tickers.len()
    }

    /// Number of return periods.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.dates.len()
    }

    /// Returns for `ticker`, if it survived alignment.
    #[must_use]
    pub fn asset(&self, ticker: &Ticker) -> Option<&ReturnSeries> {
        self.tickers
            .iter()
            .zip(&self.returns)
            .find_map(|(t, r)| (t == ticker).then_some(r))
    }

    /// Return values per asset, in ticker order.
    #[must_use]
    pub fn columns(&self) -> Vec<&[f64]> {
        self.returns.iter().map(ReturnSeries::values).collect()
    }

    /// Mean period return per asset.
    #[must_use]
    pub fn mean_returns(&self) -> Vec<f64> {
        self.returns
            .iter()
            .map(|r| r.mean().unwrap_or(0.0))
            .collect()
    }

    /// Sample covariance of the aligned returns.
    pub fn covariance(&self) -> PortfolioResult<CovarianceMatrix> {
        CovarianceMatrix::from_returns(&self.columns())
    }
}

fn date_set(series: &PriceSeries) -> BTreeSet<Date> {
    series.dates().iter().copied().collect()
}

/// Picks the assets to keep and their common dates.
///
/// Returns one flag per candidate and the joined dates, or `None` when
/// every candidate was dropped.
fn join_candidates(
    candidates: &[(&Ticker, &PriceSeries)],
    warnings: &mut Vec<AnalyticsWarning>,
) -> Option<(Vec<bool>, BTreeSet<Date>)> {
    let n = candidates.len();
    let sets: Vec<BTreeSet<Date>> = candidates.iter().map(|(_, s)| date_set(s)).collect();
    let overlap: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        0
                    } else {
                        sets[i].intersection(&sets[j]).count()
                    }
                })
                .collect()
        })
        .collect();

    let mut order = Vec::with_capacity(n);
    for (i, (ticker, _)) in candidates.iter().enumerate() {
        let isolated = n > 1 && overlap[i].iter().all(|&c| c < MIN_PRICE_POINTS);
        if isolated {
            warnings.push(
                AnalyticsWarning::AssetDropped {
                    ticker: (*ticker).clone(),
                    reason: "no overlapping dates with any other asset".to_string(),
                }
                .emit(),
            );
        } else {
            order.push(i);
        }
    }
    // Stable: equally connected assets keep ticker order.
    order.sort_by_key(|&i| std::cmp::Reverse(overlap[i].iter().sum::<usize>()));

    let mut keep = vec![false; n];
    let mut common: Option<BTreeSet<Date>> = None;
    for i in order {
        let joined: BTreeSet<Date> = match &common {
            None => sets[i].clone(),
            Some(dates) => dates.intersection(&sets[i]).copied().collect(),
        };
        if joined.len() < MIN_PRICE_POINTS {
            warnings.push(
                AnalyticsWarning::AssetDropped {
                    ticker: candidates[i].0.clone(),
                    reason: format!(
                        "would leave only {} dates in common with the other assets",
                        joined.len()
                    ),
                }
                .emit(),
            );
        } else {
            keep[i] = true;
            common = Some(joined);
        }
    }

    common.map(|dates| (keep, dates))
}

/// Inner-joins a universe (and optional benchmark) on common dates.
///
/// # Rules
///
/// 1. An empty universe is rejected with `InvalidUniverse`.
/// 2. Assets with fewer than two prices are dropped with a warning.
/// 3. When more than one asset remains, an asset sharing fewer than two
///    dates with every other asset is dropped with a warning.
/// 4. The rest are joined best-connected first; an asset that would leave
///    fewer than two common dates is dropped with a warning.
/// 5. If nothing remains, alignment fails with `NoOverlap`.
/// 6. The benchmark joins last; if it would leave fewer than two dates it
///    is dropped with a warning instead.
///
/// Returns are computed on the joined prices. Surviving assets keep
/// universe order.
pub fn align(
    universe: &AssetUniverse,
    benchmark: Option<&PriceSeries>,
) -> PortfolioResult<AlignedReturns> {
    if universe.is_empty() {
        return Err(PortfolioError::invalid_universe("asset universe is empty"));
    }

    let mut warnings = Vec::new();

    let mut candidates: Vec<(&Ticker, &PriceSeries)> = Vec::new();
    for (ticker, series) in universe.iter() {
        if series.len() < MIN_PRICE_POINTS {
            warnings.push(
                AnalyticsWarning::AssetDropped {
                    ticker: ticker.clone(),
                    reason: format!("only {} price observations", series.len()),
                }
                .emit(),
            );
        } else {
            candidates.push((ticker, series));
        }
    }

    let Some((keep, mut common)) = join_candidates(&candidates, &mut warnings) else {
        return Err(PortfolioError::NoOverlap {
            assets: universe.tickers().map(ToString::to_string).collect(),
        });
    };
    let candidates: Vec<(&Ticker, &PriceSeries)> = candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, kept)| kept.then_some(candidate))
        .collect();

    let mut benchmark_prices = None;
    if let Some(bench) = benchmark {
        let joined: BTreeSet<Date> = common
            .iter()
            .copied()
            .filter(|d| bench.price_on(*d).is_some())
            .collect();
        if joined.len() < MIN_PRICE_POINTS {
            warnings.push(
                AnalyticsWarning::BenchmarkDropped {
                    reason: format!(
                        "only {} dates in common with the assets",
                        joined.len()
                    ),
                }
                .emit(),
            );
        } else {
            common = joined;
            benchmark_prices = Some(bench);
        }
    }

    let common: Vec<Date> = common.into_iter().collect();

    let mut tickers = Vec::with_capacity(candidates.len());
    let mut returns = Vec::with_capacity(candidates.len());
    for (ticker, series) in &candidates {
        tickers.push((*ticker).clone());
        returns.push(compute_returns(&series.restrict_to(&common))?);
    }

    let benchmark = benchmark_prices
        .map(|b| compute_returns(&b.restrict_to(&common)))
        .transpose()?;

    log::debug!(
        "aligned {} of {} assets over {} periods",
        tickers.len(),
        universe.len(),
        common.len() - 1
    );

    Ok(AlignedReturns {
        dates: common[1..].to_vec(),
        tickers,
        returns,
        benchmark,
        warnings,
    })
}
