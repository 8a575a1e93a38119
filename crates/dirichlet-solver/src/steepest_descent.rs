//! Steepest-descent iteration for symmetric, diagonally dominant systems.
//!
//! Minimises the quadratic form `1/2 x^T A x - b^T x` by stepping along the
//! negated gradient `d = b - A x` with the exact line-search step
//!
//! ```text
//! alpha = (d . d) / (d . A d)
//! ```
//!
//! Starting point is `x = b`. The loop stops once `||d||_1 <= tolerance` or
//! the iteration cap is hit; in the latter case the current iterate is
//! returned with `converged == false`.

use std::time::Instant;

use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Precondition, SolverError};
use crate::matrix::{is_symmetric, Matrix};
use crate::norm::l1_norm;
use crate::traits::{check_system, SolverEngine};
use crate::types::{
    Algorithm, ConvergenceInfo, SolverResult, DEFAULT_STEEPEST_DESCENT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
use crate::vector::Vector;

/// Steepest-descent solver.
#[derive(Debug, Clone)]
pub struct SteepestDescentSolver {
    /// Stop once `||b - A x||_1 <= tolerance`.
    pub tolerance: f64,
    /// Step cap; `None` iterates until the stop rule is met.
    pub max_iterations: Option<usize>,
}

impl SteepestDescentSolver {
    pub fn new(tolerance: f64, max_iterations: Option<usize>) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    fn check_preconditions(matrix: &dyn Matrix<f64>) -> Result<(), Precondition> {
        if !is_symmetric(matrix) {
            return Err(Precondition::NotSymmetric);
        }
        if !matrix.is_diagonally_dominant() {
            return Err(Precondition::NotDiagonallyDominant);
        }
        Ok(())
    }
}

impl Default for SteepestDescentSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, Some(DEFAULT_STEEPEST_DESCENT_MAX_ITERATIONS))
    }
}

impl SolverEngine for SteepestDescentSolver {
    /// # Errors
    ///
    /// - [`SolverError::Linalg`] on a non-square matrix or mismatched `rhs`.
    /// - [`Precondition::NotSymmetric`], checked first.
    /// - [`Precondition::NotDiagonallyDominant`].
    #[instrument(skip(self, matrix, rhs), fields(n = matrix.rows()))]
    fn solve(
        &self,
        matrix: &dyn Matrix<f64>,
        rhs: &Vector<f64>,
    ) -> Result<SolverResult, SolverError> {
        let start = Instant::now();
        check_system(matrix, rhs, "SteepestDescentSolver::solve")?;
        Self::check_preconditions(matrix)?;

        let mut x = rhs.clone();
        let mut d = rhs.subtract(&matrix.mul_vector(&x)?)?;
        let mut gradient_norm = l1_norm(&d);
        debug!(gradient_norm, "initial gradient");

        let mut convergence_history =
            Vec::with_capacity(self.max_iterations.unwrap_or(256).min(256));
        let mut iterations = 0usize;
        let mut converged = gradient_norm <= self.tolerance;

        while !converged && self.max_iterations.map_or(true, |cap| iterations < cap) {
            let ad = matrix.mul_vector(&d)?;
            let curvature = d.dot(&ad)?;
            if curvature == 0.0 || !curvature.is_finite() {
                warn!(iteration = iterations, curvature, "degenerate step size, stopping");
                break;
            }
            let alpha = d.dot(&d)? / curvature;

            x.add_assign(&d.scale(alpha))?;
            d = rhs.subtract(&matrix.mul_vector(&x)?)?;
            gradient_norm = l1_norm(&d);

            convergence_history.push(ConvergenceInfo {
                iteration: iterations,
                residual_norm: gradient_norm,
            });
            trace!(iteration = iterations, alpha, gradient_norm, "descent step");
            iterations += 1;

            if !gradient_norm.is_finite() {
                warn!(iteration = iterations, gradient_norm, "gradient is not finite, stopping");
                break;
            }
            converged = gradient_norm <= self.tolerance;
        }

        if converged {
            info!(iterations, gradient_norm, "converged");
        } else {
            warn!(
                iterations,
                gradient_norm,
                tolerance = self.tolerance,
                "returning best iterate without convergence",
            );
        }

        Ok(SolverResult {
            solution: x,
            iterations,
            residual_norm: gradient_norm,
            converged,
            wall_time: start.elapsed(),
            convergence_history,
            algorithm: Algorithm::SteepestDescent,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::SteepestDescent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DenseMatrix, SymmetricMatrix};
    use approx::assert_relative_eq;

    fn spd() -> SymmetricMatrix<f64> {
        let dense = DenseMatrix::from_rows(vec![
            vec![4.0, -1.0, 0.0],
            vec![-1.0, 4.0, -1.0],
            vec![0.0, -1.0, 4.0],
        ])
        .unwrap();
        SymmetricMatrix::from_matrix(&dense).unwrap()
    }

    #[test]
    fn converges_to_known_solution() {
        let a = spd();
        let expected = Vector::from_vec(vec![1.0, -2.0, 0.5]);
        let b = a.mul_vector(&expected).unwrap();

        let result = SteepestDescentSolver::default().solve(&a, &b).unwrap();
        assert!(result.converged);
        assert!(result.residual_norm <= 1e-7);
        for (got, want) in result.solution.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-7);
        }
    }

    #[test]
    fn identity_converges_without_steps() {
        // x starts at b, which already solves I x = b.
        let a = DenseMatrix::<f64>::identity(3);
        let b = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let result = SteepestDescentSolver::default().solve(&a, &b).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert!(result.convergence_history.is_empty());
        assert_eq!(result.solution, b);
    }

    #[test]
    fn asymmetric_matrix_is_rejected_first() {
        // Neither symmetric nor dominant: symmetry is reported.
        let a = DenseMatrix::from_rows(vec![vec![1.0, 5.0], vec![-1.0, 1.0]]).unwrap();
        let err = SteepestDescentSolver::default()
            .solve(&a, &Vector::new(2))
            .unwrap_err();
        assert_eq!(err, SolverError::Precondition(Precondition::NotSymmetric));
    }

    #[test]
    fn non_dominant_matrix_is_rejected() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 3.0], vec![3.0, 4.0]]).unwrap();
        let err = SteepestDescentSolver::default()
            .solve(&a, &Vector::new(2))
            .unwrap_err();
        assert_eq!(
            err,
            SolverError::Precondition(Precondition::NotDiagonallyDominant)
        );
    }

    #[test]
    fn iteration_cap_returns_best_so_far() {
        let a = spd();
        let b = Vector::from_vec(vec![1.0, 0.0, 1.0]);
        let capped = SteepestDescentSolver::new(1e-15, Some(2)).solve(&a, &b).unwrap();
        assert!(!capped.converged);
        assert_eq!(capped.iterations, 2);
        assert_eq!(capped.convergence_history.len(), 2);

        let start = l1_norm(&b.subtract(&a.mul_vector(&b).unwrap()).unwrap());
        assert!(capped.residual_norm < start);
    }
}
