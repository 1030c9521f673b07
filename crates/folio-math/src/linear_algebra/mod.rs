//! Linear algebra utilities.
//!
//! Covariance estimation and the small set of matrix diagnostics needed
//! to evaluate portfolio variance.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Sample covariance matrix of equally long observation columns.
///
/// Column `j` holds the observations of variable `j`. Uses the unbiased
/// `n - 1` denominator. The result is exactly symmetric: the upper
/// triangle is computed and mirrored.
///
/// # Arguments
///
/// * `columns` - One slice per variable, all of the same length
///
/// # Returns
///
/// A `k x k` matrix for `k` columns.
pub fn sample_covariance(columns: &[&[f64]]) -> MathResult<DMatrix<f64>> {
    let k = columns.len();
    if k == 0 {
        return Err(MathError::invalid_input("no columns supplied"));
    }

    let n = columns[0].len();
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: 1,
            rows2: bad.len(),
            cols2: 1,
        });
    }
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }
    if columns.iter().any(|c| c.iter().any(|x| !x.is_finite())) {
        return Err(MathError::non_finite("covariance input"));
    }

    let means: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / n as f64)
        .collect();

    let mut cov = DMatrix::zeros(k, k);
    let denom = (n - 1) as f64;
    for i in 0..k {
        for j in i..k {
            let s: f64 = columns[i]
                .iter()
                .zip(columns[j].iter())
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum();
            let v = s / denom;
            cov[(i, j)] = v;
            cov[(j, i)] = v;
        }
    }

    Ok(cov)
}

/// Computes `x' M x`.
pub fn quadratic_form(x: &[f64], matrix: &DMatrix<f64>) -> MathResult<f64> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if x.len() != matrix.nrows() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: x.len(),
            cols2: 1,
        });
    }

    let v = DVector::from_column_slice(x);
    Ok(v.dot(&(matrix * &v)))
}

/// Checks symmetry within a tolerance relative to the largest entry.
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    if matrix.nrows() != matrix.ncols() {
        return false;
    }
    let scale = matrix.amax().max(1.0);
    let n = matrix.nrows();
    for i in 0..n {
        for j in i + 1..n {
            if (matrix[(i, j)] - matrix[(j, i)]).abs() > tolerance * scale {
                return false;
            }
        }
    }
    true
}

/// Largest absolute row sum (the infinity norm).
///
/// Upper-bounds the spectral radius, which makes `2 * max_abs_row_sum`
/// a Lipschitz constant for the gradient of `x' M x`.
pub fn max_abs_row_sum(matrix: &DMatrix<f64>) -> f64 {
    matrix
        .row_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Smallest eigenvalue of a symmetric matrix.
///
/// A negative value means the matrix is not positive semi-definite.
pub fn min_eigenvalue(matrix: &DMatrix<f64>) -> MathResult<f64> {
    if matrix.nrows() != matrix.ncols() || matrix.nrows() == 0 {
        return Err(MathError::invalid_input("Matrix must be square and non-empty"));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("eigenvalue input"));
    }
    Ok(matrix.clone().symmetric_eigenvalues().min())
}
