//! Collections of asset price histories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PriceSeries, Ticker};
use crate::error::{CoreError, CoreResult};

/// Price histories keyed by ticker.
///
/// Iteration is in ticker order, which fixes the asset ordering used by
/// weight vectors and covariance matrices downstream. Series may start on
/// different dates; nothing here aligns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetUniverse {
    assets: BTreeMap<Ticker, PriceSeries>,
}

impl AssetUniverse {
    /// Creates an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateAsset` if the ticker is already present.
    pub fn insert(&mut self, ticker: Ticker, series: PriceSeries) -> CoreResult<()> {
        if self.assets.contains_key(&ticker) {
            return Err(CoreError::DuplicateAsset {
                ticker: ticker.to_string(),
            });
        }
        self.assets.insert(ticker, series);
        Ok(())
    }

    /// Builder-style [`AssetUniverse::insert`].
    pub fn with_asset(mut self, ticker: Ticker, series: PriceSeries) -> CoreResult<Self> {
        self.insert(ticker, series)?;
        Ok(self)
    }

    /// Builds a universe from `(ticker, series)` pairs.
    pub fn try_from_iter<I>(iter: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (Ticker, PriceSeries)>,
    {
        iter.into_iter()
            .try_fold(Self::new(), |universe, (t, s)| universe.with_asset(t, s))
    }

    /// Series for `ticker`, if present.
    #[must_use]
    pub fn get(&self, ticker: &Ticker) -> Option<&PriceSeries> {
        self.assets.get(ticker)
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True if there are no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Tickers in iteration order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.assets.keys()
    }

    /// Iterates over `(ticker, series)` in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, &PriceSeries)> {
        self.assets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Date;

    fn series(start: i64, prices: &[f64]) -> PriceSeries {
        let base = Date::from_ymd(2025, 1, 1).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (base.add_days(start + i as i64), p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_ordering_is_by_ticker() {
        let universe = AssetUniverse::new()
            .with_asset(Ticker::new("msft").unwrap(), series(0, &[1.0, 2.0]))
            .unwrap()
            .with_asset(Ticker::new("aapl").unwrap(), series(3, &[5.0]))
            .unwrap();

        let tickers: Vec<&str> = universe.tickers().map(Ticker::as_str).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected_after_normalization() {
        let mut universe = AssetUniverse::new();
        universe
            .insert(Ticker::new("spy").unwrap(), series(0, &[1.0]))
            .unwrap();
        let err = universe
            .insert(Ticker::new(" SPY").unwrap(), series(0, &[2.0]))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateAsset { .. }));
    }

    #[test]
    fn test_try_from_iter() {
        let universe = AssetUniverse::try_from_iter(vec![
            (Ticker::new("a").unwrap(), series(0, &[1.0])),
            (Ticker::new("b").unwrap(), series(0, &[1.0])),
        ])
        .unwrap();
        assert!(universe.get(&Ticker::new("A").unwrap()).is_some());
        assert!(AssetUniverse::new().is_empty());
    }
}
