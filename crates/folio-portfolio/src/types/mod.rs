//! Core portfolio types.
//!
//! - [`WeightVector`]: long-only, fully invested weights
//! - [`CovarianceMatrix`]: validated asset covariance
//! - [`AnalyticsConfig`]: computation parameters
//! - [`AnalyticsWarning`]: non-fatal conditions

mod config;
mod covariance;
mod warning;
mod weights;

pub use config::{AnalyticsConfig, Validate, ValidationError};
pub use covariance::CovarianceMatrix;
pub use warning::AnalyticsWarning;
pub use weights::{WeightVector, WEIGHT_SUM_TOLERANCE};
