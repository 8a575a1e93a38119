//! Error types for the solver crate.
//!
//! Container operations fail with [`LinalgError`] (out-of-range indices,
//! non-conformant dimensions, non-symmetric operands for symmetric storage).
//! Solver entry points fail with [`SolverError`], which wraps container faults
//! and adds precondition, configuration, size-limit and parse failures. All errors
//! implement `std::error::Error` via `thiserror`.
//!
//! Numerical non-convergence is deliberately absent: an iterative solver that
//! runs out of budget still returns its best iterate, flagged through
//! [`SolverResult::converged`](crate::types::SolverResult::converged).

/// Structural fault raised by vectors and matrices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// An index was outside `0..len` for the dimension being accessed.
    #[error("index {index} out of range in {operation}")]
    Range {
        /// The offending index.
        index: usize,
        /// Operation that performed the access.
        operation: &'static str,
    },

    /// Operand dimensions do not conform, or a requested shape is invalid.
    #[error("invalid size {size} in {operation}")]
    Size {
        /// The offending size.
        size: usize,
        /// Operation that detected the mismatch.
        operation: &'static str,
    },

    /// Symmetric storage was combined with a non-symmetric operand.
    #[error("{operation} requires a symmetric operand")]
    NotSymmetric {
        /// Operation that rejected the operand.
        operation: &'static str,
    },
}

impl LinalgError {
    #[inline]
    pub(crate) fn range(index: usize, operation: &'static str) -> Self {
        Self::Range { index, operation }
    }

    #[inline]
    pub(crate) fn size(size: usize, operation: &'static str) -> Self {
        Self::Size { size, operation }
    }
}

/// A matrix property required by a solver does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    /// `A[i][j] != A[j][i]` for some pair, or the matrix is not square.
    #[error("matrix must be symmetric")]
    NotSymmetric,
    /// Some row has `|a_ii| < sum_{j != i} |a_ij|`.
    #[error("matrix must be diagonally dominant")]
    NotDiagonallyDominant,
    /// A diagonal entry is zero, so a relaxation sweep would divide by zero.
    #[error("diagonal entry at row {row} is zero")]
    ZeroDiagonal {
        /// Row of the zero diagonal entry.
        row: usize,
    },
}

/// Primary error type for solver operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// A range or size fault from the underlying containers.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// The input matrix violates a solver precondition.
    #[error("precondition violated: {0}")]
    Precondition(#[from] Precondition),

    /// A configuration parameter is outside its valid range.
    #[error("invalid configuration: {name} = {value} (expected {expected})")]
    InvalidConfig {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value, rendered as text.
        value: String,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },

    /// A requested system exceeds [`MAX_DENSE_DIM`](crate::types::MAX_DENSE_DIM).
    #[error("matrix size {rows}x{cols} exceeds maximum supported {max_dim}x{max_dim}")]
    MatrixTooLarge {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
        /// Maximum supported dimension.
        max_dim: usize,
    },

    /// A token in a numeric stream could not be parsed.
    #[error("cannot parse token {token:?} at position {position}")]
    Parse {
        /// Zero-based token position in the stream.
        position: usize,
        /// The offending token.
        token: String,
    },
}

impl SolverError {
    /// Returns the container fault wrapped by this error, if any.
    pub fn as_linalg(&self) -> Option<&LinalgError> {
        match self {
            SolverError::Linalg(e) => Some(e),
            _ => None,
        }
    }
}
