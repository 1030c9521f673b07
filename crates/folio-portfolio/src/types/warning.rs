//! Non-fatal conditions reported alongside analytics results.

use folio_core::types::Ticker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition that did not stop the computation but changed its inputs
/// or clamped its output.
///
/// Warnings are returned to the caller and also logged at `warn` level
/// when raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsWarning {
    /// An asset was excluded during alignment.
    AssetDropped {
        /// The excluded asset.
        ticker: Ticker,
        /// Why it was excluded.
        reason: String,
    },

    /// The benchmark was excluded during alignment.
    BenchmarkDropped {
        /// Why it was excluded.
        reason: String,
    },

    /// `w' C w` came out negative; the covariance matrix is not PSD.
    DegenerateCovariance {
        /// The negative radicand before clamping.
        variance: f64,
    },
}

impl AnalyticsWarning {
    /// Logs the warning and returns it.
    pub(crate) fn emit(self) -> Self {
        log::warn!("{self}");
        self
    }
}

impl fmt::Display for AnalyticsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetDropped { ticker, reason } => {
                write!(f, "asset {ticker} dropped: {reason}")
            }
            Self::BenchmarkDropped { reason } => write!(f, "benchmark dropped: {reason}"),
            Self::DegenerateCovariance { variance } => write!(
                f,
                "degenerate covariance: portfolio variance {variance:.3e} clamped to zero"
            ),
        }
    }
}
