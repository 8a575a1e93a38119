//! Gauss-Seidel relaxation.
//!
//! Each sweep recomputes every component in place:
//!
//! ```text
//! x_i = (b_i - sum_{j<i} a_ij x_j - sum_{j>i} a_ij x_j) / a_ii
//! ```
//!
//! so components `j < i` already carry this sweep's values. Starting from
//! `x = 0`, sweeps continue until the L1 norm of the change between two
//! sweeps is at most the tolerance.
//!
//! # Convergence
//!
//! Guaranteed for diagonally dominant and symmetric positive-definite
//! matrices. Anything else may diverge, which is why the sweep count is
//! capped by default; a non-finite update norm also ends the loop early.

use std::time::Instant;

use tracing::{info, instrument, trace, warn};

use crate::error::{Precondition, SolverError};
use crate::matrix::Matrix;
use crate::norm::l1_norm;
use crate::traits::{check_system, SolverEngine};
use crate::types::{
    Algorithm, ConvergenceInfo, SolverResult, DEFAULT_GAUSS_SEIDEL_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
use crate::vector::Vector;

/// Gauss-Seidel solver.
///
/// # Example
///
/// ```rust
/// use dirichlet_solver::{DenseMatrix, GaussSeidelSolver, SolverEngine, Vector};
///
/// let a = DenseMatrix::from_rows(vec![vec![4.0, -1.0], vec![-1.0, 4.0]]).unwrap();
/// let b = Vector::from_vec(vec![3.0, 3.0]);
///
/// let result = GaussSeidelSolver::default().solve(&a, &b).unwrap();
/// assert!(result.converged);
/// assert!((result.solution[0] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct GaussSeidelSolver {
    /// Stop once `||x_k - x_{k-1}||_1 <= tolerance`.
    pub tolerance: f64,
    /// Sweep cap; `None` sweeps until the stop rule is met.
    pub max_iterations: Option<usize>,
}

impl GaussSeidelSolver {
    pub fn new(tolerance: f64, max_iterations: Option<usize>) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// One in-place sweep.
    fn sweep(matrix: &dyn Matrix<f64>, rhs: &Vector<f64>, x: &mut Vector<f64>) {
        let n = rhs.len();
        for i in 0..n {
            let mut sum = rhs[i];
            for j in 0..n {
                if j != i {
                    sum -= matrix.at(i, j) * x[j];
                }
            }
            x[i] = sum / matrix.at(i, i);
        }
    }
}

impl Default for GaussSeidelSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, Some(DEFAULT_GAUSS_SEIDEL_MAX_ITERATIONS))
    }
}

impl SolverEngine for GaussSeidelSolver {
    /// # Errors
    ///
    /// - [`SolverError::Linalg`] on a non-square matrix or mismatched `rhs`.
    /// - [`Precondition::ZeroDiagonal`] for the first row with `a_ii == 0`.
    #[instrument(skip(self, matrix, rhs), fields(n = matrix.rows()))]
    fn solve(
        &self,
        matrix: &dyn Matrix<f64>,
        rhs: &Vector<f64>,
    ) -> Result<SolverResult, SolverError> {
        let start = Instant::now();
        check_system(matrix, rhs, "GaussSeidelSolver::solve")?;
        let n = matrix.rows();

        if let Some(row) = (0..n).find(|&i| matrix.at(i, i) == 0.0) {
            return Err(Precondition::ZeroDiagonal { row }.into());
        }

        let mut x = Vector::new(n);
        if n == 0 {
            return Ok(SolverResult {
                solution: x,
                iterations: 0,
                residual_norm: 0.0,
                converged: true,
                wall_time: start.elapsed(),
                convergence_history: Vec::new(),
                algorithm: Algorithm::GaussSeidel,
            });
        }

        let mut convergence_history =
            Vec::with_capacity(self.max_iterations.unwrap_or(256).min(256));
        let mut iterations = 0usize;
        let mut delta = f64::INFINITY;
        let mut converged = false;

        while self.max_iterations.map_or(true, |cap| iterations < cap) {
            let prev = x.clone();
            Self::sweep(matrix, rhs, &mut x);
            delta = l1_norm(&x.subtract(&prev)?);

            convergence_history.push(ConvergenceInfo {
                iteration: iterations,
                residual_norm: delta,
            });
            trace!(iteration = iterations, delta, "gauss-seidel sweep");
            iterations += 1;

            if !delta.is_finite() {
                warn!(iteration = iterations, delta, "update norm is not finite, stopping");
                break;
            }
            if delta <= self.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            info!(iterations, delta, "converged");
        } else if delta.is_finite() {
            warn!(
                iterations,
                delta,
                tolerance = self.tolerance,
                "sweep cap reached before convergence",
            );
        }

        Ok(SolverResult {
            solution: x,
            iterations,
            residual_norm: delta,
            converged,
            wall_time: start.elapsed(),
            convergence_history,
            algorithm: Algorithm::GaussSeidel,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::GaussSeidel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DenseMatrix, SymmetricMatrix};
    use crate::norm::residual_l1;
    use approx::assert_relative_eq;

    fn tridiagonal(n: usize) -> DenseMatrix<f64> {
        let mut a = DenseMatrix::square(n);
        for i in 0..n {
            a.put(i, i, 4.0);
            if i + 1 < n {
                a.put(i, i + 1, -1.0);
                a.put(i + 1, i, -1.0);
            }
        }
        a
    }

    #[test]
    fn converges_on_dominant_system() {
        let a = tridiagonal(6);
        let b = Vector::filled(6, 1.0);
        let result = GaussSeidelSolver::default().solve(&a, &b).unwrap();

        assert!(result.converged);
        assert!(result.residual_norm <= 1e-7);
        assert_eq!(result.iterations, result.convergence_history.len());
        assert!(residual_l1(&a, &result.solution, &b).unwrap() < 1e-6);
    }

    #[test]
    fn first_sweep_from_zero() {
        // x starts at 0, so the first sweep is forward substitution on the
        // lower triangle.
        let a = DenseMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let b = Vector::from_vec(vec![2.0, 3.0]);
        let solver = GaussSeidelSolver::new(1e-7, Some(1));
        let result = solver.solve(&a, &b).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.solution[0], 1.0);
        assert_relative_eq!(result.solution[1], 1.0);
        assert_relative_eq!(result.residual_norm, 2.0);
    }

    #[test]
    fn zero_diagonal_is_rejected() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 0.0]]).unwrap();
        let err = GaussSeidelSolver::default()
            .solve(&a, &Vector::new(2))
            .unwrap_err();
        assert_eq!(
            err,
            SolverError::Precondition(Precondition::ZeroDiagonal { row: 1 })
        );
    }

    #[test]
    fn divergent_system_stops_without_error() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let b = Vector::from_vec(vec![1.0, 1.0]);
        let result = GaussSeidelSolver::new(1e-7, Some(50)).solve(&a, &b).unwrap();
        assert!(!result.converged);
        assert!(result.iterations <= 50);
    }

    #[test]
    fn overflowing_iterate_stops_without_error() {
        // The second sweep overflows to infinity, well before the cap.
        let a = DenseMatrix::from_rows(vec![vec![1.0, 1e300], vec![1e300, 1.0]]).unwrap();
        let b = Vector::from_vec(vec![1.0, 1.0]);
        let result = GaussSeidelSolver::new(1e-7, Some(1_000))
            .solve(&a, &b)
            .unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
        assert!(result.residual_norm.is_infinite());
        assert!(result.convergence_history[0].residual_norm.is_finite());
        assert!(result.solution[0].is_infinite());
    }

    #[test]
    fn uncapped_solver_still_terminates_when_convergent() {
        let mut a = SymmetricMatrix::new(3);
        for i in 0..3 {
            a.put(i, i, 3.0);
        }
        a.put(0, 1, 1.0);
        a.put(1, 2, 1.0);
        let b = Vector::from_vec(vec![4.0, 5.0, 4.0]);
        let result = GaussSeidelSolver::new(1e-10, None).solve(&a, &b).unwrap();
        assert!(result.converged);
        for &xi in result.solution.iter() {
            assert_relative_eq!(xi, 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = tridiagonal(3);
        let b = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let (a0, b0) = (a.clone(), b.clone());
        GaussSeidelSolver::default().solve(&a, &b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }
}
