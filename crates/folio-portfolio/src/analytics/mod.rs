//! Portfolio return, risk and allocation analytics.
//!
//! This module provides:
//! - Simple and cumulative return series
//! - Inner-join alignment of asset and benchmark histories
//! - Expected return and covariance-based volatility
//! - Equal-weight and minimum-variance allocations
//! - Random-search efficient frontier
//! - Per-asset summary statistics
//!
//! All functions are pure - they take series, weights and configuration as
//! input and return computed results. No caching, no I/O, no side effects
//! beyond logging.

mod alignment;
mod allocation;
mod frontier;
mod parallel;
mod returns;
mod risk;
mod summary;

pub use alignment::*;
pub use allocation::*;
pub use frontier::*;
pub use parallel::*;
pub use returns::*;
pub use risk::*;
pub use summary::*;
