//! Long-only, fully invested portfolio weights.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Allowed deviation of the weight sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One weight per asset, in the asset ordering of the analysis.
///
/// Invariants: non-empty, every component finite and in `[0, 1]`, and the
/// components sum to 1 within [`WEIGHT_SUM_TOLERANCE`]. No short positions
/// and no leverage.
///
/// # Example
///
/// ```rust
/// use folio_portfolio::types::WeightVector;
///
/// let w = WeightVector::new(vec![0.25, 0.75]).unwrap();
/// assert_eq!(w.len(), 2);
/// assert!(WeightVector::new(vec![0.5, 0.6]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validates and wraps the given weights.
    pub fn new(weights: Vec<f64>) -> PortfolioResult<Self> {
        if weights.is_empty() {
            return Err(PortfolioError::invalid_weights("no weights supplied"));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0 || **w > 1.0)
        {
            return Err(PortfolioError::invalid_weights(format!(
                "weight {w} at position {i} is outside [0, 1]"
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PortfolioError::invalid_weights(format!(
                "weights sum to {sum}, expected 1"
            )));
        }
        Ok(Self(weights))
    }

    /// Scales non-negative raw values so they sum to 1.
    pub fn from_unnormalized(raw: Vec<f64>) -> PortfolioResult<Self> {
        if raw.iter().any(|x| !x.is_finite() || *x < 0.0) {
            return Err(PortfolioError::invalid_weights(
                "raw weights must be finite and non-negative",
            ));
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(PortfolioError::invalid_weights("raw weights sum to zero"));
        }
        Self::new(raw.into_iter().map(|x| x / total).collect())
    }

    /// `[1/n; n]`.
    pub fn equal(n: usize) -> PortfolioResult<Self> {
        if n == 0 {
            return Err(PortfolioError::invalid_universe(
                "cannot allocate across zero assets",
            ));
        }
        Ok(Self(vec![1.0 / n as f64; n]))
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The weights as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates over the weights.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Unwraps into the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = PortfolioError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0
    }
}

impl AsRef<[f64]> for WeightVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
