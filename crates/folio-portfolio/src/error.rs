//! Error types for portfolio analytics.
//!
//! This module defines the error types used throughout the portfolio crate.
//! Non-fatal conditions (dropped assets, degenerate covariance) are not
//! errors; see [`crate::types::AnalyticsWarning`].

use folio_core::CoreError;
use folio_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A series is shorter than the operation requires.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// No usable common dates remain after alignment.
    #[error("No overlapping dates across assets {assets:?}")]
    NoOverlap {
        /// Assets that were considered.
        assets: Vec<String>,
    },

    /// Vector or matrix lengths disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// The minimum-variance search ran out of iterations.
    #[error("Optimization did not converge after {iterations} iterations (residual: {residual:.2e})")]
    OptimizationDidNotConverge {
        /// Iterations performed.
        iterations: u32,
        /// Largest weight change in the last iteration.
        residual: f64,
    },

    /// An input vector holds `NaN` or an infinity.
    #[error("Non-finite {context} at index {index}")]
    NonFiniteInput {
        /// Which input was rejected.
        context: String,
        /// Position of the first offending value.
        index: usize,
    },

    /// Empty or otherwise unusable asset set.
    #[error("Invalid universe: {reason}")]
    InvalidUniverse {
        /// The reason the universe is invalid.
        reason: String,
    },

    /// Weights violate the full-investment or no-short constraints.
    #[error("Invalid weights: {reason}")]
    InvalidWeights {
        /// The reason the weights are invalid.
        reason: String,
    },

    /// Covariance matrix is not square, symmetric, or finite.
    #[error("Invalid covariance matrix: {reason}")]
    InvalidCovariance {
        /// The reason the matrix is invalid.
        reason: String,
    },

    /// A benchmark comparison was requested without an aligned benchmark.
    #[error("No benchmark series available")]
    MissingBenchmark,

    /// Trade record with unusable fields.
    #[error("Invalid trade at row {index}: {reason}")]
    InvalidTrade {
        /// Row of the trade in the input.
        index: usize,
        /// The reason the trade is invalid.
        reason: String,
    },

    /// Configuration failed to parse or validate.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// Error from a core domain type.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from a numerical kernel.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a non-finite input error.
    #[must_use]
    pub fn non_finite_input(context: impl Into<String>, index: usize) -> Self {
        Self::NonFiniteInput {
            context: context.into(),
            index,
        }
    }

    /// Create an invalid universe error.
    #[must_use]
    pub fn invalid_universe(reason: impl Into<String>) -> Self {
        Self::InvalidUniverse {
            reason: reason.into(),
        }
    }

    /// Create an invalid weights error.
    #[must_use]
    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        Self::InvalidWeights {
            reason: reason.into(),
        }
    }

    /// Create an invalid covariance error.
    #[must_use]
    pub fn invalid_covariance(reason: impl Into<String>) -> Self {
        Self::InvalidCovariance {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
