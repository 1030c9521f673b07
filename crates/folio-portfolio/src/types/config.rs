//! Configuration for portfolio analytics computation.

use folio_math::optimization::{
    OptimizationConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_OBJECTIVE_TOLERANCE, DEFAULT_TOLERANCE,
};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Configuration for portfolio analytics computation.
///
/// Controls annualization, the Sharpe proxy, the minimum-variance solver,
/// and parallel frontier evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Return periods per year (252 for daily trading data).
    pub periods_per_year: u32,

    /// Per-period risk-free rate subtracted in the Sharpe proxy.
    pub risk_free_rate: f64,

    /// Largest per-iteration weight change at which the solver stops.
    pub optimizer_tolerance: f64,

    /// Optimality gap, relative to the mean asset variance, at which the
    /// solver stops.
    pub optimizer_objective_tolerance: f64,

    /// Iteration budget for the minimum-variance solver.
    pub optimizer_max_iterations: u32,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum frontier sample count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            risk_free_rate: 0.0,
            optimizer_tolerance: DEFAULT_TOLERANCE,
            optimizer_objective_tolerance: DEFAULT_OBJECTIVE_TOLERANCE,
            optimizer_max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates it.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> PortfolioResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PortfolioError::invalid_config(e.to_string()))?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Sets the number of periods per year.
    #[must_use]
    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Sets the per-period risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_optimizer_tolerance(mut self, tolerance: f64) -> Self {
        self.optimizer_tolerance = tolerance;
        self
    }

    /// Sets the solver optimality-gap tolerance.
    #[must_use]
    pub fn with_optimizer_objective_tolerance(mut self, tolerance: f64) -> Self {
        self.optimizer_objective_tolerance = tolerance;
        self
    }

    /// Sets the solver iteration budget.
    #[must_use]
    pub fn with_optimizer_max_iterations(mut self, max_iterations: u32) -> Self {
        self.optimizer_max_iterations = max_iterations;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Solver settings in the form the numerical kernel expects.
    #[must_use]
    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig::new(self.optimizer_tolerance, self.optimizer_max_iterations)
            .with_objective_tolerance(self.optimizer_objective_tolerance)
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every validation failure, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error listing every failure.
    fn validate_or_error(&self) -> PortfolioResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(PortfolioError::invalid_config(joined))
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.periods_per_year == 0 {
            errors.push(ValidationError::new("periods_per_year", "must be positive"));
        }
        if !self.risk_free_rate.is_finite() {
            errors.push(ValidationError::new("risk_free_rate", "must be finite"));
        }
        if !(self.optimizer_tolerance.is_finite() && self.optimizer_tolerance > 0.0) {
            errors.push(ValidationError::new(
                "optimizer_tolerance",
                "must be a positive finite number",
            ));
        }
        if !(self.optimizer_objective_tolerance.is_finite()
            && self.optimizer_objective_tolerance >= 0.0)
        {
            errors.push(ValidationError::new(
                "optimizer_objective_tolerance",
                "must be a non-negative finite number",
            ));
        }
        if self.optimizer_max_iterations == 0 {
            errors.push(ValidationError::new(
                "optimizer_max_iterations",
                "must be positive",
            ));
        }
        errors
    }
}
