//! Error types for the Folio core types.
//!
//! Construction of every domain type is validated; failures surface
//! here with enough context to locate the offending observation.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or manipulating core domain types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Asset identifier is empty after normalization.
    #[error("Invalid ticker: {reason}")]
    InvalidTicker {
        /// Why the ticker was rejected.
        reason: String,
    },

    /// Price is zero, negative, or not finite.
    #[error("Invalid price {price} at observation {index}")]
    InvalidPrice {
        /// Position of the observation in the input.
        index: usize,
        /// The rejected price.
        price: f64,
    },

    /// Return is not finite or implies a price below zero.
    #[error("Invalid return {value} at observation {index}")]
    InvalidReturn {
        /// Position of the observation in the input.
        index: usize,
        /// The rejected return.
        value: f64,
    },

    /// Timestamps are not strictly increasing.
    #[error("Timestamp {date} at observation {index} is not after the previous one")]
    NonIncreasingTimestamp {
        /// Position of the observation in the input.
        index: usize,
        /// The offending timestamp.
        date: String,
    },

    /// Parallel date and value vectors differ in length.
    #[error("Length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// Asset appears twice in a universe.
    #[error("Duplicate asset in universe: {ticker}")]
    DuplicateAsset {
        /// The duplicated ticker.
        ticker: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid ticker error.
    #[must_use]
    pub fn invalid_ticker(reason: impl Into<String>) -> Self {
        Self::InvalidTicker {
            reason: reason.into(),
        }
    }

    /// Creates a non-increasing timestamp error.
    #[must_use]
    pub fn non_increasing(index: usize, date: impl std::fmt::Display) -> Self {
        Self::NonIncreasingTimestamp {
            index,
            date: date.to_string(),
        }
    }
}
