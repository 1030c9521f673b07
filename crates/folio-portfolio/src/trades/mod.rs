//! Trade logs from strategy backtests.
//!
//! A trade log is a time-ordered list of fills with a signed quantity and
//! the strategy's portfolio value at the fill. Positive quantities are
//! buys and negative quantities are sells.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// Positive quantity.
    Buy,
    /// Negative quantity.
    Sell,
    /// Zero quantity.
    Flat,
}

/// One row of a trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Fill time.
    pub time: NaiveDateTime,

    /// Signed quantity.
    pub quantity: f64,

    /// Portfolio value at the fill.
    pub value: f64,
}

impl TradeRecord {
    /// Creates a trade record.
    #[must_use]
    pub fn new(time: NaiveDateTime, quantity: f64, value: f64) -> Self {
        Self {
            time,
            quantity,
            value,
        }
    }

    /// Buy, sell or flat, from the sign of the quantity.
    #[must_use]
    pub fn side(&self) -> TradeSide {
        if self.quantity > 0.0 {
            TradeSide::Buy
        } else if self.quantity < 0.0 {
            TradeSide::Sell
        } else {
            TradeSide::Flat
        }
    }
}

/// Trade records sorted by time.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use folio_portfolio::trades::{TradeLog, TradeRecord};
///
/// let t = |h| NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// let log = TradeLog::new(vec![
///     TradeRecord::new(t(11), -5.0, 1010.0),
///     TradeRecord::new(t(10), 5.0, 1000.0),
/// ])
/// .unwrap();
///
/// assert_eq!(log.buys().count(), 1);
/// assert_eq!(log.records()[0].quantity, 5.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TradeRecord>", into = "Vec<TradeRecord>")]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    /// Validates and sorts the records. Rows with equal times keep their
    /// input order.
    ///
    /// # Errors
    ///
    /// `InvalidTrade` for the first row with a non-finite quantity or value.
    pub fn new(mut records: Vec<TradeRecord>) -> PortfolioResult<Self> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.quantity.is_finite() || !r.value.is_finite())
        {
            return Err(PortfolioError::InvalidTrade {
                index,
                reason: format!(
                    "quantity {} and value {} must both be finite",
                    record.quantity, record.value
                ),
            });
        }
        records.sort_by_key(|r| r.time);
        Ok(Self { records })
    }

    /// All records in time order.
    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with positive quantity.
    pub fn buys(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter(|r| r.side() == TradeSide::Buy)
    }

    /// Records with negative quantity.
    pub fn sells(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter(|r| r.side() == TradeSide::Sell)
    }

    /// `(time, value)` pairs for plotting the portfolio value line.
    #[must_use]
    pub fn value_series(&self) -> Vec<(NaiveDateTime, f64)> {
        self.records.iter().map(|r| (r.time, r.value)).collect()
    }
}

impl TryFrom<Vec<TradeRecord>> for TradeLog {
    type Error = PortfolioError;

    fn try_from(records: Vec<TradeRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<TradeLog> for Vec<TradeRecord> {
    fn from(log: TradeLog) -> Self {
        log.records
    }
}
