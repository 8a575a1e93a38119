//! Direct solver: Gaussian elimination with partial pivoting.
//!
//! Works on a copy of the augmented matrix `[A | b]`:
//!
//! ```text
//! for p in 0..n-1:                       forward pass
//!     if |a_pp| < pivot_tolerance:
//!         swap row p with the row r >= p maximising |a_rp|
//!     zero column p below the diagonal
//! for p in n-1..1:                       backward pass
//!     zero column p above the diagonal
//! x_i = aug[i][n] / aug[i][i]
//! ```
//!
//! Pivoting only kicks in for small pivots, so well-conditioned diagonally
//! dominant systems are reduced without any row exchange. A pivot that stays
//! below the tolerance after the search is reported through
//! `converged == false` rather than as an error.

use std::time::Instant;

use tracing::{debug, info, instrument, trace, warn};

use crate::error::SolverError;
use crate::matrix::{DenseMatrix, Matrix};
use crate::norm::residual_l1;
use crate::traits::{check_system, SolverEngine};
use crate::types::{Algorithm, ConvergenceInfo, SolverResult, DEFAULT_PIVOT_TOLERANCE};
use crate::vector::Vector;

/// Gaussian elimination solver for dense square systems.
///
/// # Example
///
/// ```rust
/// use dirichlet_solver::{DenseMatrix, GaussianElimination, SolverEngine, Vector};
///
/// let a = DenseMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
/// let b = Vector::from_vec(vec![3.0, 5.0]);
///
/// let result = GaussianElimination::default().solve(&a, &b).unwrap();
/// assert!((result.solution[0] - 0.8).abs() < 1e-12);
/// assert!((result.solution[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianElimination {
    /// Pivots with magnitude below this trigger a row search.
    pub pivot_tolerance: f64,
}

impl GaussianElimination {
    pub fn new(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    /// First row in `p..n` with the strictly largest `|a_rp|`.
    fn pivot_row(aug: &DenseMatrix<f64>, p: usize, n: usize) -> usize {
        (p + 1..n).fold(p, |best, r| {
            if aug.at(r, p).abs() > aug.at(best, p).abs() {
                r
            } else {
                best
            }
        })
    }

    /// Forward pass over pivot columns `0..n-1`. Returns `false` if some
    /// pivot is still below tolerance after the row search.
    fn forward(&self, aug: &mut DenseMatrix<f64>, n: usize) -> Result<bool, SolverError> {
        let mut pivots_ok = true;
        for p in 0..n.saturating_sub(1) {
            if aug.at(p, p).abs() < self.pivot_tolerance {
                let best = Self::pivot_row(aug, p, n);
                if best != p {
                    trace!(column = p, from = best, "swapping pivot row");
                    aug.swap_rows(p, best)?;
                }
            }

            let pivot = aug.at(p, p);
            if pivot.abs() < self.pivot_tolerance {
                warn!(column = p, pivot, "pivot below tolerance after row search");
                pivots_ok = false;
            }
            if pivot == 0.0 {
                // Whole column below is zero; nothing to eliminate.
                continue;
            }

            for r in p + 1..n {
                let factor = aug.at(r, p) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for c in p..=n {
                    aug.put(r, c, aug.at(r, c) - factor * aug.at(p, c));
                }
            }
        }

        if n > 0 && aug.at(n - 1, n - 1).abs() < self.pivot_tolerance {
            warn!(column = n - 1, pivot = aug.at(n - 1, n - 1), "last pivot below tolerance");
            pivots_ok = false;
        }
        Ok(pivots_ok)
    }

    /// Backward pass over pivot columns `n-1..1`, leaving `aug` diagonal.
    fn backward(aug: &mut DenseMatrix<f64>, n: usize) {
        for p in (1..n).rev() {
            let pivot = aug.at(p, p);
            if pivot == 0.0 {
                continue;
            }
            for r in 0..p {
                let factor = aug.at(r, p) / pivot;
                if factor == 0.0 {
                    continue;
                }
                // Row p is zero outside columns p and n at this point.
                aug.put(r, p, aug.at(r, p) - factor * pivot);
                aug.put(r, n, aug.at(r, n) - factor * aug.at(p, n));
            }
        }
    }
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self::new(DEFAULT_PIVOT_TOLERANCE)
    }
}

impl SolverEngine for GaussianElimination {
    #[instrument(skip(self, matrix, rhs), fields(n = matrix.rows()))]
    fn solve(
        &self,
        matrix: &dyn Matrix<f64>,
        rhs: &Vector<f64>,
    ) -> Result<SolverResult, SolverError> {
        let start = Instant::now();
        check_system(matrix, rhs, "GaussianElimination::solve")?;
        let n = matrix.rows();

        let mut aug = matrix.to_dense();
        aug.append_column(rhs)?;

        let pivots_ok = self.forward(&mut aug, n)?;
        Self::backward(&mut aug, n);

        let solution: Vector<f64> = (0..n).map(|i| aug.at(i, n) / aug.at(i, i)).collect();
        let residual_norm = residual_l1(matrix, &solution, rhs)?;
        let converged = pivots_ok && residual_norm.is_finite();

        debug!(residual_norm, "elimination complete");
        if converged {
            info!(n, residual_norm, "solved by elimination");
        } else {
            warn!(n, residual_norm, "elimination result is unreliable");
        }

        Ok(SolverResult {
            solution,
            iterations: 1,
            residual_norm,
            converged,
            wall_time: start.elapsed(),
            convergence_history: vec![ConvergenceInfo {
                iteration: 0,
                residual_norm,
            }],
            algorithm: Algorithm::GaussianElimination,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::GaussianElimination
    }
}
