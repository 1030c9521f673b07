//! Optimization algorithms.
//!
//! Minimization of convex quadratics over the probability simplex
//! `{ x : x_i >= 0, sum x_i = 1 }`, the feasible set of a fully invested,
//! long-only portfolio.

use crate::error::{MathError, MathResult};
use crate::linear_algebra::{max_abs_row_sum, quadratic_form};
use nalgebra::{DMatrix, DVector};

/// Default tolerance on the largest per-iteration parameter change.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default tolerance on the optimality gap, relative to the mean diagonal
/// entry of the matrix.
pub const DEFAULT_OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    /// Converged once no parameter moves by more than this in one iteration.
    pub tolerance: f64,
    /// Converged once the objective is provably within this fraction of the
    /// mean diagonal entry of the optimum. Zero disables the test.
    pub objective_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            objective_tolerance: DEFAULT_OBJECTIVE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl OptimizationConfig {
    /// Creates a new optimization configuration with the default
    /// objective tolerance.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the objective tolerance.
    #[must_use]
    pub fn with_objective_tolerance(mut self, objective_tolerance: f64) -> Self {
        self.objective_tolerance = objective_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters found.
    pub parameters: Vec<f64>,
    /// Objective value at `parameters`.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Largest parameter change in the final iteration.
    pub residual: f64,
    /// Upper bound on `objective_value` minus the true minimum.
    pub optimality_gap: f64,
    /// Whether the tolerance was reached within the budget.
    pub converged: bool,
}

/// Euclidean projection of `v` onto the probability simplex.
///
/// Sort-based algorithm: find the threshold `theta` such that
/// `sum max(v_i - theta, 0) = 1` and shift every coordinate by it.
/// The result is non-negative, sums to one, and therefore also lies in
/// `[0, 1]` component-wise.
///
/// # Example
///
/// ```rust
/// use folio_math::optimization::project_onto_simplex;
///
/// let w = project_onto_simplex(&[0.8, 0.8]);
/// assert!((w[0] - 0.5).abs() < 1e-15 && (w[1] - 0.5).abs() < 1e-15);
/// ```
pub fn project_onto_simplex(v: &[f64]) -> Vec<f64> {
    if v.is_empty() {
        return Vec::new();
    }

    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumulative = 0.0;
    let mut theta = 0.0;
    for (j, &u) in sorted.iter().enumerate() {
        cumulative += u;
        let candidate = (cumulative - 1.0) / (j + 1) as f64;
        if u - candidate > 0.0 {
            theta = candidate;
        }
    }

    v.iter().map(|&x| (x - theta).max(0.0)).collect()
}

/// Frank-Wolfe gap `x'g - min_i g_i` of a simplex point.
///
/// For a convex objective with gradient `g` at `x` this bounds the
/// distance of the objective from its minimum over the simplex.
fn simplex_gap(x: &[f64], gradient: &DVector<f64>) -> f64 {
    let inner: f64 = x.iter().zip(gradient.iter()).map(|(a, b)| a * b).sum();
    let smallest = gradient.iter().copied().fold(f64::INFINITY, f64::min);
    (inner - smallest).max(0.0)
}

fn gradient(q: &DMatrix<f64>, x: &[f64]) -> DVector<f64> {
    (q * DVector::from_column_slice(x)) * 2.0
}

/// Minimizes `x' Q x` over the probability simplex.
///
/// Accelerated projected gradient (FISTA) with a backtracking step size
/// capped by `L = 2 * ||Q||_inf`, the Lipschitz bound of the gradient
/// `2 Q x`. Momentum is reset whenever an accelerated step would raise
/// the objective, so accepted iterates never get worse than the start.
///
/// Iteration stops when either
/// - no coordinate moves by more than `config.tolerance`, or
/// - the Frank-Wolfe gap, an upper bound on `f(x) - min f`, falls below
///   `config.objective_tolerance` times the mean diagonal of `Q`.
///
/// Returns `converged: false` rather than an error when the budget runs
/// out, so the caller decides whether a partial answer is usable.
///
/// # Arguments
///
/// * `q` - Symmetric square matrix
/// * `initial` - Starting point; projected onto the simplex first
/// * `config` - Tolerances and iteration budget
pub fn minimize_quadratic_on_simplex(
    q: &DMatrix<f64>,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult> {
    let n = q.nrows();
    if n == 0 || n != q.ncols() {
        return Err(MathError::invalid_input("Matrix must be square and non-empty"));
    }
    if initial.len() != n {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: initial.len(),
            cols2: 1,
        });
    }
    if q.iter().chain(initial.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("quadratic program input"));
    }
    if !(config.tolerance > 0.0)
        || !(config.objective_tolerance >= 0.0)
        || config.max_iterations == 0
    {
        return Err(MathError::invalid_input(
            "tolerance must be positive, objective_tolerance non-negative and \
             max_iterations non-zero",
        ));
    }

    let mut x = project_onto_simplex(initial);
    let lipschitz_bound = 2.0 * max_abs_row_sum(q);

    if lipschitz_bound == 0.0 {
        // Zero objective: every feasible point is optimal.
        return Ok(OptimizationResult {
            objective_value: 0.0,
            parameters: x,
            iterations: 0,
            residual: 0.0,
            optimality_gap: 0.0,
            converged: true,
        });
    }

    let mean_diagonal = q.diagonal().iter().map(|d| d.abs()).sum::<f64>() / n as f64;
    let scale = if mean_diagonal > 0.0 {
        mean_diagonal
    } else {
        lipschitz_bound
    };
    let gap_target = config.objective_tolerance * scale;

    let mut objective = quadratic_form(&x, q)?;
    let mut gap = simplex_gap(&x, &gradient(q, &x));
    if gap <= gap_target {
        return Ok(OptimizationResult {
            parameters: x,
            objective_value: objective,
            iterations: 0,
            residual: 0.0,
            optimality_gap: gap,
            converged: true,
        });
    }

    let mut previous = x.clone();
    let mut momentum = 1.0_f64;
    let mut lipschitz = lipschitz_bound;
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let next_momentum = (1.0 + (1.0 + 4.0 * momentum * momentum).sqrt()) / 2.0;
        let beta = (momentum - 1.0) / next_momentum;
        let y: Vec<f64> = x
            .iter()
            .zip(previous.iter())
            .map(|(xi, pi)| xi + beta * (xi - pi))
            .collect();
        let grad_y = gradient(q, &y);
        let objective_y = 0.5 * y.iter().zip(grad_y.iter()).map(|(a, b)| a * b).sum::<f64>();

        // Try a longer step first; back off until the quadratic model holds.
        lipschitz = (lipschitz / 2.0).max(lipschitz_bound * f64::EPSILON);
        let (candidate, candidate_objective) = loop {
            let trial: Vec<f64> = y
                .iter()
                .zip(grad_y.iter())
                .map(|(yi, gi)| yi - gi / lipschitz)
                .collect();
            let point = project_onto_simplex(&trial);
            let value = quadratic_form(&point, q)?;
            let (linear, squared) = point
                .iter()
                .zip(y.iter())
                .zip(grad_y.iter())
                .fold((0.0, 0.0), |(l, s), ((p, yi), g)| {
                    let d = p - yi;
                    (l + g * d, s + d * d)
                });
            let model = objective_y + linear + 0.5 * lipschitz * squared;
            if value <= model + f64::EPSILON * objective_y.abs() || lipschitz >= lipschitz_bound {
                break (point, value);
            }
            lipschitz = (2.0 * lipschitz).min(lipschitz_bound);
        };

        if candidate_objective > objective && beta > 0.0 {
            momentum = 1.0;
            previous.clone_from(&x);
            continue;
        }

        residual = candidate
            .iter()
            .zip(x.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        previous = std::mem::replace(&mut x, candidate);
        objective = candidate_objective;
        momentum = next_momentum;
        gap = simplex_gap(&x, &gradient(q, &x));

        if residual < config.tolerance || gap <= gap_target {
            log::debug!(
                "simplex QP converged: n={}, iterations={}, objective={:.3e}, gap={:.2e}",
                n,
                iteration,
                objective,
                gap
            );
            return Ok(OptimizationResult {
                parameters: x,
                objective_value: objective,
                iterations: iteration,
                residual,
                optimality_gap: gap,
                converged: true,
            });
        }
    }

    log::debug!(
        "simplex QP exhausted {} iterations (residual {:.2e}, gap {:.2e})",
        config.max_iterations,
        residual,
        gap
    );
    Ok(OptimizationResult {
        parameters: x,
        objective_value: objective,
        iterations: config.max_iterations,
        residual,
        optimality_gap: gap,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_of_feasible_point_is_identity() {
        let w = project_onto_simplex(&[0.2, 0.3, 0.5]);
        assert_relative_eq!(w[0], 0.2, epsilon = 1e-15);
        assert_relative_eq!(w[1], 0.3, epsilon = 1e-15);
        assert_relative_eq!(w[2], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_projection_clips_negative_coordinates() {
        let w = project_onto_simplex(&[2.0, -1.0, 0.0]);
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(w[1], 0.0);
        assert_relative_eq!(w[2], 0.0);
    }

    #[test]
    fn test_projection_sums_to_one() {
        let w = project_onto_simplex(&[10.0, -3.0, 4.5, 0.25, 4.4]);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(w.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(project_onto_simplex(&[]).is_empty());
    }

    #[test]
    fn test_minimize_diagonal() {
        // Minimum of a x^2 + b y^2 on x + y = 1 is at x = b / (a + b).
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 3.0]);
        let result =
            minimize_quadratic_on_simplex(&q, &[0.5, 0.5], &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 0.75, epsilon = 1e-8);
        assert_relative_eq!(result.parameters[1], 0.25, epsilon = 1e-8);
        assert_relative_eq!(result.objective_value, 0.75, epsilon = 1e-8);
    }

    #[test]
    fn test_minimize_respects_bounds() {
        // Unconstrained optimum would short the second asset.
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 4.0]);
        let result =
            minimize_quadratic_on_simplex(&q, &[0.5, 0.5], &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(result.parameters[1], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_matrix_is_immediately_optimal() {
        let q = DMatrix::zeros(3, 3);
        let result =
            minimize_quadratic_on_simplex(&q, &[1.0, 1.0, 1.0], &OptimizationConfig::default())
                .unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.parameters.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_budget_exhaustion_reports_not_converged() {
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 3.0]);
        let config = OptimizationConfig::new(1e-300, 3).with_objective_tolerance(0.0);
        let result = minimize_quadratic_on_simplex(&q, &[1.0, 0.0], &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_gap_rule_stops_without_weight_tolerance() {
        let q = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 2.0, 0.3, 0.5, 0.3, 1.0]);
        let config = OptimizationConfig::default().with_tolerance(1e-300);
        let result = minimize_quadratic_on_simplex(&q, &[1.0, 0.0, 0.0], &config).unwrap();

        assert!(result.converged);
        assert!(result.optimality_gap <= 1e-9 * 7.0 / 3.0);
        assert!(result.iterations < config.max_iterations);
    }

    #[test]
    fn test_input_validation() {
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let config = OptimizationConfig::default();

        assert!(minimize_quadratic_on_simplex(&q, &[1.0], &config).is_err());
        assert!(minimize_quadratic_on_simplex(&DMatrix::zeros(0, 0), &[], &config).is_err());
        assert!(minimize_quadratic_on_simplex(&q, &[f64::NAN, 0.0], &config).is_err());
        assert!(
            minimize_quadratic_on_simplex(&q, &[0.5, 0.5], &config.with_max_iterations(0))
                .is_err()
        );
        assert!(minimize_quadratic_on_simplex(
            &q,
            &[0.5, 0.5],
            &config.with_objective_tolerance(-1.0)
        )
        .is_err());
    }
}
