//! Dated price and return series.
//!
//! Both series types hold parallel, strictly date-ordered vectors and are
//! validated on construction, so downstream analytics never see an
//! unsorted index, a non-positive price, or a `NaN`.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{CoreError, CoreResult};

fn check_dates(dates: &[Date]) -> CoreResult<()> {
    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CoreError::non_increasing(i + 1, pair[1]));
        }
    }
    Ok(())
}

fn split(points: Vec<(Date, f64)>) -> (Vec<Date>, Vec<f64>) {
    points.into_iter().unzip()
}

/// Price history of a single asset.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{Date, PriceSeries};
///
/// let d = Date::from_ymd(2025, 1, 2).unwrap();
/// let series = PriceSeries::new(vec![(d, 100.0), (d.add_days(1), 101.0)]).unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.price_on(d.add_days(1)), Some(101.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Date, f64)>", into = "Vec<(Date, f64)>")]
pub struct PriceSeries {
    dates: Vec<Date>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Creates a price series from `(date, price)` observations.
    ///
    /// # Errors
    ///
    /// Fails if dates are not strictly increasing or a price is not a
    /// positive finite number.
    pub fn new(points: Vec<(Date, f64)>) -> CoreResult<Self> {
        let (dates, prices) = split(points);
        Self::from_parts(dates, prices)
    }

    /// Creates a price series from parallel date and price vectors.
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or under the same conditions as [`PriceSeries::new`].
    pub fn from_parts(dates: Vec<Date>, prices: Vec<f64>) -> CoreResult<Self> {
        if dates.len() != prices.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: prices.len(),
            });
        }
        check_dates(&dates)?;
        if let Some((index, &price)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(CoreError::InvalidPrice { index, price });
        }
        Ok(Self { dates, prices })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// True if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Observation dates in increasing order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Prices, aligned with [`PriceSeries::dates`].
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Price observed on `date`, if any.
    #[must_use]
    pub fn price_on(&self, date: Date) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.prices[i])
    }

    /// First observation date.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Last observation date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Iterates over `(date, price)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.prices.iter().copied())
    }

    /// Restricts the series to the given dates.
    ///
    /// Dates absent from the series are skipped, so the result is the
    /// intersection of both indexes.
    #[must_use]
    pub fn restrict_to(&self, dates: &[Date]) -> Self {
        let (dates, prices) = dates
            .iter()
            .filter_map(|&d| self.price_on(d).map(|p| (d, p)))
            .unzip();
        Self { dates, prices }
    }
}

impl TryFrom<Vec<(Date, f64)>> for PriceSeries {
    type Error = CoreError;

    fn try_from(points: Vec<(Date, f64)>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<(Date, f64)> {
    fn from(series: PriceSeries) -> Self {
        series.dates.into_iter().zip(series.prices).collect()
    }
}

/// Period-over-period fractional changes, dated at the end of each period.
///
/// Every value is finite and not below `-1.0`, a total loss. Simple returns
/// of a positive price series stay strictly above it; compounded curves
/// may round onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Date, f64)>", into = "Vec<(Date, f64)>")]
pub struct ReturnSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Creates a return series from `(date, return)` observations.
    ///
    /// # Errors
    ///
    /// Fails if dates are not strictly increasing or a value is not finite
    /// or below -1.
    pub fn new(points: Vec<(Date, f64)>) -> CoreResult<Self> {
        let (dates, values) = split(points);
        Self::from_parts(dates, values)
    }

    /// Creates a return series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or under the same conditions as [`ReturnSeries::new`].
    pub fn from_parts(dates: Vec<Date>, values: Vec<f64>) -> CoreResult<Self> {
        if dates.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        check_dates(&dates)?;
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < -1.0)
        {
            return Err(CoreError::InvalidReturn { index, value });
        }
        Ok(Self { dates, values })
    }

    /// An empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the series has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Period end dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns, aligned with [`ReturnSeries::dates`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean of the period returns.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }

    /// Last value, e.g. the total return of a cumulative curve.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Iterates over `(date, return)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

impl TryFrom<Vec<(Date, f64)>> for ReturnSeries {
    type Error = CoreError;

    fn try_from(points: Vec<(Date, f64)>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ReturnSeries> for Vec<(Date, f64)> {
    fn from(series: ReturnSeries) -> Self {
        series.dates.into_iter().zip(series.values).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(n: i64) -> Date {
        Date::from_ymd(2025, 1, 1).unwrap().add_days(n)
    }

    #[test]
    fn test_price_series_valid() {
        let series = PriceSeries::new(vec![(day(0), 10.0), (day(2), 11.0), (day(3), 9.5)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(day(0)));
        assert_eq!(series.last_date(), Some(day(3)));
        assert_eq!(series.price_on(day(1)), None);
        assert_relative_eq!(series.price_on(day(3)).unwrap(), 9.5);
    }

    #[test]
    fn test_price_series_rejects_bad_prices() {
        let err = PriceSeries::new(vec![(day(0), 10.0), (day(1), 0.0)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice { index: 1, .. }));

        assert!(PriceSeries::new(vec![(day(0), f64::NAN)]).is_err());
        assert!(PriceSeries::new(vec![(day(0), -3.0)]).is_err());
    }

    #[test]
    fn test_price_series_rejects_unordered_dates() {
        let err = PriceSeries::new(vec![(day(1), 10.0), (day(1), 11.0)]).unwrap_err();
        assert!(matches!(err, CoreError::NonIncreasingTimestamp { index: 1, .. }));

        assert!(PriceSeries::new(vec![(day(2), 10.0), (day(1), 11.0)]).is_err());
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let err = PriceSeries::from_parts(vec![day(0)], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, CoreError::LengthMismatch { dates: 1, values: 2 });
    }

    #[test]
    fn test_empty_series_allowed() {
        let series = PriceSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
    }

    #[test]
    fn test_restrict_to() {
        let series = PriceSeries::new(vec![(day(0), 1.0), (day(1), 2.0), (day(2), 3.0)]).unwrap();
        let restricted = series.restrict_to(&[day(0), day(2), day(5)]);
        assert_eq!(restricted.dates(), &[day(0), day(2)]);
        assert_eq!(restricted.prices(), &[1.0, 3.0]);
    }

    #[test]
    fn test_return_series() {
        let returns = ReturnSeries::new(vec![(day(1), 0.1), (day(2), -0.05)]).unwrap();
        assert_relative_eq!(returns.mean().unwrap(), 0.025, epsilon = 1e-15);
        assert_relative_eq!(returns.last().unwrap(), -0.05);
        assert!(ReturnSeries::empty().mean().is_none());
    }

    #[test]
    fn test_return_series_rejects_loss_beyond_total() {
        assert!(ReturnSeries::new(vec![(day(1), -1.0)]).is_ok());
        let err = ReturnSeries::new(vec![(day(1), -1.5)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidReturn { index: 0, .. }));
        assert!(ReturnSeries::new(vec![(day(1), f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let series = PriceSeries::new(vec![(day(0), 1.0), (day(1), 2.0)]).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let parsed: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, series);

        let bad = r#"[["2025-01-02", 1.0], ["2025-01-01", 2.0]]"#;
        assert!(serde_json::from_str::<PriceSeries>(bad).is_err());
    }
}
