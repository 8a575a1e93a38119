//! Whitespace-delimited numeric input.
//!
//! A system is stored as its size `n`, then `n * n` matrix entries in
//! row-major order, then `n` right-hand-side entries:
//!
//! ```text
//! 2
//! 4 -1
//! -1 4
//! 3 3
//! ```
//!
//! Running out of input is not an error. Filling stops at the end of the
//! stream and the unread entries keep their previous value.

use std::str::SplitWhitespace;

use tracing::debug;

use crate::error::SolverError;
use crate::matrix::{DenseMatrix, Matrix};
use crate::types::MAX_DENSE_DIM;
use crate::vector::Vector;

/// Token cursor that remembers its position for error reporting.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    /// Zero-based index of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parse the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// [`SolverError::Parse`] if the token is not a valid `f64`.
    pub fn next_value(&mut self) -> Result<Option<f64>, SolverError> {
        self.next_parsed()
    }

    fn next_parsed<V: std::str::FromStr>(&mut self) -> Result<Option<V>, SolverError> {
        let Some(token) = self.inner.next() else {
            return Ok(None);
        };
        let position = self.position;
        self.position += 1;
        token.parse().map(Some).map_err(|_| SolverError::Parse {
            position,
            token: token.to_owned(),
        })
    }
}

/// Fill `v` front to back. Returns how many entries were written.
pub fn fill_vector(v: &mut Vector<f64>, tokens: &mut Tokens<'_>) -> Result<usize, SolverError> {
    for i in 0..v.len() {
        match tokens.next_value()? {
            Some(value) => v[i] = value,
            None => return Ok(i),
        }
    }
    Ok(v.len())
}

/// Fill `m` row by row. Returns how many entries were written.
pub fn fill_matrix(
    m: &mut DenseMatrix<f64>,
    tokens: &mut Tokens<'_>,
) -> Result<usize, SolverError> {
    let cols = m.cols();
    for i in 0..m.rows() {
        for j in 0..cols {
            match tokens.next_value()? {
                Some(value) => m.put(i, j, value),
                None => return Ok(i * cols + j),
            }
        }
    }
    Ok(m.rows() * cols)
}

/// Read a size-prefixed system `(A, b)`.
///
/// An empty input yields a `0 x 0` system.
///
/// # Errors
///
/// - [`SolverError::Parse`] if the size is not a non-negative integer or an
///   entry is not a number.
/// - [`SolverError::MatrixTooLarge`] if the size exceeds [`MAX_DENSE_DIM`].
///   Nothing is allocated in that case.
///
/// ```
/// use dirichlet_solver::{stream::read_system, Matrix};
///
/// let (a, b) = read_system("2  4 -1  -1 4  3").unwrap();
/// assert_eq!(a.at(1, 0), -1.0);
/// // Input ended early: b[1] keeps its zero value.
/// assert_eq!(b.as_slice(), &[3.0, 0.0]);
/// ```
pub fn read_system(input: &str) -> Result<(DenseMatrix<f64>, Vector<f64>), SolverError> {
    let mut tokens = Tokens::new(input);
    let n: usize = tokens.next_parsed()?.unwrap_or(0);
    if n > MAX_DENSE_DIM {
        return Err(SolverError::MatrixTooLarge {
            rows: n,
            cols: n,
            max_dim: MAX_DENSE_DIM,
        });
    }

    let mut matrix = DenseMatrix::square(n);
    let mut rhs = Vector::new(n);
    let matrix_read = fill_matrix(&mut matrix, &mut tokens)?;
    let rhs_read = fill_vector(&mut rhs, &mut tokens)?;
    debug!(n, matrix_read, rhs_read, "system read");
    Ok((matrix, rhs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_complete_system() {
        let (a, b) = read_system("2\n4 -1\n-1 4\n3 3\n").unwrap();
        assert_eq!(
            a,
            DenseMatrix::from_rows(vec![vec![4.0, -1.0], vec![-1.0, 4.0]]).unwrap()
        );
        assert_eq!(b.as_slice(), &[3.0, 3.0]);
    }

    #[test]
    fn truncated_vector_keeps_previous_values() {
        let mut v = Vector::filled(4, 9.0);
        let mut tokens = Tokens::new("1 2");
        assert_eq!(fill_vector(&mut v, &mut tokens).unwrap(), 2);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 9.0, 9.0]);
    }

    #[test]
    fn truncated_matrix_stops_mid_row() {
        let mut m = DenseMatrix::<f64>::new(2, 2);
        let mut tokens = Tokens::new("1 2 3");
        assert_eq!(fill_matrix(&mut m, &mut tokens).unwrap(), 3);
        assert_eq!(m.at(1, 0), 3.0);
        assert_eq!(m.at(1, 1), 0.0);
    }

    #[test]
    fn bad_token_reports_position() {
        let err = read_system("2 1 x 3 4").unwrap_err();
        assert_eq!(
            err,
            SolverError::Parse {
                position: 2,
                token: "x".into()
            }
        );
        assert!(matches!(
            read_system("-3"),
            Err(SolverError::Parse { position: 0, .. })
        ));
    }

    #[test]
    fn oversized_header_is_rejected_before_allocating() {
        let err = read_system("18446744073709551615 1 2").unwrap_err();
        assert_eq!(
            err,
            SolverError::MatrixTooLarge {
                rows: usize::MAX,
                cols: usize::MAX,
                max_dim: MAX_DENSE_DIM,
            }
        );
        assert!(matches!(
            read_system(&(MAX_DENSE_DIM + 1).to_string()),
            Err(SolverError::MatrixTooLarge { .. })
        ));
    }

    #[test]
    fn empty_input_is_empty_system() {
        let (a, b) = read_system("   ").unwrap();
        assert_eq!(a.rows(), 0);
        assert!(b.is_empty());
    }
}
