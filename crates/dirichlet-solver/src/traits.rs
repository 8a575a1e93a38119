//! Solver trait.
//!
//! Every algorithm implements [`SolverEngine`], so the orchestrator can hold
//! any of them behind a `Box<dyn SolverEngine>` chosen at runtime.

use crate::error::{LinalgError, SolverError};
use crate::matrix::Matrix;
use crate::types::{Algorithm, SolverResult};
use crate::vector::Vector;

/// Core trait that every solver algorithm implements.
pub trait SolverEngine: Send + Sync {
    /// Solve `A x = b`.
    ///
    /// Neither `matrix` nor `rhs` is modified.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] on non-conformant dimensions or a violated
    /// precondition. Exhausting the iteration budget is not an error; see
    /// [`SolverResult::converged`].
    fn solve(
        &self,
        matrix: &dyn Matrix<f64>,
        rhs: &Vector<f64>,
    ) -> Result<SolverResult, SolverError>;

    /// Return the algorithm identifier for this engine.
    fn algorithm(&self) -> Algorithm;
}

/// Reject a non-square matrix (carrying `cols`) or a right-hand side whose
/// length differs from `rows` (carrying `rhs.len()`).
pub(crate) fn check_system(
    matrix: &dyn Matrix<f64>,
    rhs: &Vector<f64>,
    operation: &'static str,
) -> Result<(), LinalgError> {
    if !matrix.is_square() {
        return Err(LinalgError::size(matrix.cols(), operation));
    }
    if rhs.len() != matrix.rows() {
        return Err(LinalgError::size(rhs.len(), operation));
    }
    Ok(())
}
