//! # Folio Portfolio
//!
//! Portfolio return, risk and allocation analytics over daily price
//! histories.
//!
//! This crate turns per-asset price series into the numbers behind a
//! portfolio-versus-benchmark dashboard: aligned returns, covariance-based
//! volatility, minimum-variance weights and a sampled efficient frontier.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Validated inputs**: `WeightVector` and `CovarianceMatrix` enforce their
//!   invariants at construction
//! - **Warnings, not failures**: Dropped assets and clamped variances are
//!   reported alongside results and logged through `log`
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Returns**: Simple period returns and compounded cumulative returns
//! - **Alignment**: Inner join of asset and benchmark histories
//! - **Risk**: Expected portfolio return and `√(wᵀ C w)` volatility
//! - **Allocation**: Equal weight and long-only minimum variance
//! - **Frontier**: Seeded random search over the weight simplex
//! - **Benchmark Comparison**: Cumulative curves, excess return, tracking error
//! - **Trade Logs**: Buy/sell classification for backtest fills
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio_portfolio::prelude::*;
//!
//! let aligned = align(&universe, Some(&benchmark))?;
//! let mu = aligned.mean_returns();
//! let cov = aligned.covariance()?;
//!
//! let weights = optimize_minimum_variance(&mu, &cov)?;
//! let vol = portfolio_volatility(&weights, &cov)?;
//! let frontier = random_search_frontier(&mu, &cov, 5_000, 42)?;
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Returns, alignment, risk, allocation, frontier, statistics
//! - [`benchmark`] - Portfolio return series and benchmark comparison
//! - [`trades`] - Backtest trade logs
//! - [`types`] - Weights, covariance, config and warnings
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel evaluation of large frontiers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod analytics;
pub mod benchmark;
pub mod error;
pub mod trades;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    AnalyticsConfig, AnalyticsWarning, CovarianceMatrix, Validate, ValidationError, WeightVector,
    WEIGHT_SUM_TOLERANCE,
};

// Re-export analytics types and functions
pub use analytics::{
    // Alignment
    align,
    // Summary
    asset_statistics,
    // Returns
    compute_cumulative_return,
    compute_returns,
    // Allocation
    equal_weight_allocation,
    // Parallel utilities
    maybe_parallel_map,
    optimize_minimum_variance,
    optimize_minimum_variance_with_config,
    // Risk
    portfolio_return,
    portfolio_risk,
    portfolio_volatility,
    // Frontier
    random_search_frontier,
    random_search_frontier_with_config,
    AlignedReturns,
    AssetStatistics,
    Frontier,
    FrontierPoint,
    RiskEstimate,
    DEGENERATE_VARIANCE_TOLERANCE,
    MIN_PRICE_POINTS,
};

// Re-export benchmark comparison types and functions
pub use benchmark::{compare_to_benchmark, portfolio_return_series, BenchmarkComparison};

// Re-export trade log types
pub use trades::{TradeLog, TradeRecord, TradeSide};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use folio_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core portfolio types
    pub use crate::types::{
        AnalyticsConfig, AnalyticsWarning, CovarianceMatrix, Validate, WeightVector,
    };

    // Analytics
    pub use crate::analytics::{
        align, asset_statistics, compute_cumulative_return, compute_returns,
        equal_weight_allocation, optimize_minimum_variance, portfolio_return, portfolio_risk,
        portfolio_volatility, random_search_frontier, AlignedReturns, AssetStatistics, Frontier,
        FrontierPoint, RiskEstimate,
    };

    // Benchmark comparison
    pub use crate::benchmark::{compare_to_benchmark, portfolio_return_series, BenchmarkComparison};

    // Trade logs
    pub use crate::trades::{TradeLog, TradeRecord, TradeSide};

    // Re-export commonly used types from dependencies
    pub use folio_core::types::{AssetUniverse, Date, PriceSeries, ReturnSeries, Ticker};
}
