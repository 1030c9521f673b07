//! # Folio Math
//!
//! Numerical kernels for the Folio portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: Sample covariance, quadratic forms, symmetry and
//!   eigenvalue diagnostics
//! - **Optimization**: Euclidean projection onto the probability simplex and
//!   an accelerated projected-gradient minimizer for convex quadratics over it
//! - **Sampling**: Seeded uniform sampling of points on the simplex
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: No global state; every random draw comes from a
//!   caller-seeded generator
//! - **Explicit failure**: Dimension and finiteness checks return errors
//!   instead of propagating `NaN`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod linear_algebra;
pub mod optimization;
pub mod sampling;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        is_symmetric, max_abs_row_sum, min_eigenvalue, quadratic_form, sample_covariance,
    };
    pub use crate::optimization::{
        minimize_quadratic_on_simplex, project_onto_simplex, OptimizationConfig,
        OptimizationResult,
    };
    pub use crate::sampling::SimplexSampler;
}

pub use error::{MathError, MathResult};
