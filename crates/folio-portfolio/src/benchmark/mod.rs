//! Benchmark-relative analytics.
//!
//! Provides:
//! - Per-period returns of a rebalanced portfolio
//! - Cumulative performance against the benchmark
//! - Excess total return and tracking error
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_portfolio::prelude::*;
//!
//! let aligned = align(&universe, Some(&benchmark_prices))?;
//! let weights = optimize_minimum_variance(&aligned.mean_returns(), &aligned.covariance()?)?;
//! let cmp = compare_to_benchmark(&aligned, &weights, &AnalyticsConfig::default())?;
//! println!("Excess return: {:.2}%", cmp.excess_total_return * 100.0);
//! ```

mod comparison;

pub use comparison::*;
