//! Asset return covariance matrices.

use folio_math::linear_algebra::{is_symmetric, min_eigenvalue, sample_covariance};
use folio_math::MathError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Square, symmetric, finite covariance matrix over a fixed asset ordering.
///
/// Positive semi-definiteness is expected but not enforced: matrices
/// estimated from degenerate inputs can be slightly indefinite, and
/// [`crate::analytics::portfolio_risk`] reports that case as a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CovarianceMatrix {
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Validates and wraps a matrix.
    pub fn new(matrix: DMatrix<f64>) -> PortfolioResult<Self> {
        if matrix.nrows() == 0 {
            return Err(PortfolioError::invalid_covariance("matrix is empty"));
        }
        if matrix.nrows() != matrix.ncols() {
            return Err(PortfolioError::invalid_covariance(format!(
                "matrix is {}x{}, expected square",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(PortfolioError::invalid_covariance("matrix has non-finite entries"));
        }
        if !is_symmetric(&matrix, SYMMETRY_TOLERANCE) {
            return Err(PortfolioError::invalid_covariance("matrix is not symmetric"));
        }
        Ok(Self { matrix })
    }

    /// Builds a matrix from rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PortfolioResult<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(PortfolioError::dimension_mismatch(n, bad.len()));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Self::new(DMatrix::from_row_slice(n, n, &flat))
    }

    /// Sample covariance of aligned return columns, one per asset.
    pub fn from_returns(columns: &[&[f64]]) -> PortfolioResult<Self> {
        if columns.is_empty() {
            return Err(PortfolioError::invalid_universe("no return series supplied"));
        }
        let matrix = sample_covariance(columns).map_err(|e| match e {
            MathError::InsufficientData { required, actual } => {
                PortfolioError::insufficient_data(required, actual)
            }
            MathError::DimensionMismatch { rows1, rows2, .. } => {
                PortfolioError::dimension_mismatch(rows1, rows2)
            }
            other => PortfolioError::Math(other),
        })?;
        Self::new(matrix)
    }

    /// Number of assets.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// The underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Diagonal entries.
    #[must_use]
    pub fn variances(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().copied().collect()
    }

    /// Square roots of the diagonal.
    #[must_use]
    pub fn volatilities(&self) -> Vec<f64> {
        self.matrix
            .diagonal()
            .iter()
            .map(|v| v.max(0.0).sqrt())
            .collect()
    }

    /// Every entry multiplied by `factor`, e.g. to annualize.
    pub fn scaled(&self, factor: f64) -> PortfolioResult<Self> {
        Self::new(&self.matrix * factor)
    }

    /// Pearson correlation matrix. Assets with zero variance get zero
    /// off-diagonal correlation.
    #[must_use]
    pub fn correlation(&self) -> DMatrix<f64> {
        let vols = self.volatilities();
        DMatrix::from_fn(self.dim(), self.dim(), |i, j| {
            if i == j {
                1.0
            } else if vols[i] > 0.0 && vols[j] > 0.0 {
                self.matrix[(i, j)] / (vols[i] * vols[j])
            } else {
                0.0
            }
        })
    }

    /// Smallest eigenvalue; negative means the matrix is not PSD.
    pub fn min_eigenvalue(&self) -> PortfolioResult<f64> {
        Ok(min_eigenvalue(&self.matrix)?)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CovarianceMatrix {
    type Error = PortfolioError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<CovarianceMatrix> for Vec<Vec<f64>> {
    fn from(cov: CovarianceMatrix) -> Self {
        cov.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rows() {
        let cov = CovarianceMatrix::from_rows(vec![vec![0.04, 0.01], vec![0.01, 0.09]]).unwrap();
        assert_eq!(cov.dim(), 2);
        assert_relative_eq!(cov.get(0, 1), 0.01);
        assert_eq!(cov.variances(), vec![0.04, 0.09]);
        assert_relative_eq!(cov.volatilities()[1], 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_invalid_shapes() {
        assert!(CovarianceMatrix::from_rows(vec![]).is_err());
        assert!(CovarianceMatrix::from_rows(vec![vec![1.0, 0.0]]).is_err());
        assert!(CovarianceMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.3, 1.0]]).is_err());
        assert!(CovarianceMatrix::from_rows(vec![vec![f64::NAN]]).is_err());
    }

    #[test]
    fn test_from_returns() {
        let a = [0.10, 0.10, -0.02];
        let b = [-0.05, -0.05, 0.01];
        let cov = CovarianceMatrix::from_returns(&[&a, &b]).unwrap();
        assert!(cov.get(0, 1) < 0.0);
        assert_eq!(cov.get(0, 1), cov.get(1, 0));
    }

    #[test]
    fn test_from_returns_too_short() {
        let err = CovarianceMatrix::from_returns(&[&[0.1]]).unwrap_err();
        assert_eq!(err, PortfolioError::insufficient_data(2, 1));
    }

    #[test]
    fn test_correlation() {
        let cov = CovarianceMatrix::from_rows(vec![vec![0.04, -0.06], vec![-0.06, 0.09]]).unwrap();
        let corr = cov.correlation();
        assert_relative_eq!(corr[(0, 1)], -1.0, epsilon = 1e-12);
        assert_relative_eq!(corr[(1, 1)], 1.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let cov = CovarianceMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 2.0]]).unwrap();
        let json = serde_json::to_string(&cov).unwrap();
        assert_eq!(json, "[[1.0,0.5],[0.5,2.0]]");
        let parsed: CovarianceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cov);
    }
}
