//! Matrix capability trait and its two storage variants.
//!
//! [`Matrix`] is the shared contract used by every solver: shape queries,
//! checked element access, in-place arithmetic and a handful of provided
//! helpers (row/column extraction, matrix-vector product, diagonal
//! dominance). Two independent types implement it:
//!
//! | Type | Storage |
//! |------|---------|
//! | [`DenseMatrix`] | one [`Vector`] per row, `rows x cols` |
//! | [`SymmetricMatrix`] | upper triangle only, row `i` holds columns `i..n` |
//!
//! The trait is object safe, so solvers accept `&dyn Matrix<f64>` and work on
//! either variant.

mod dense;
mod symmetric;

pub use dense::DenseMatrix;
pub use symmetric::SymmetricMatrix;

use crate::error::LinalgError;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// Read/write access and arithmetic shared by all matrix storages.
pub trait Matrix<T: Scalar> {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `row >= rows()` or `col >= cols()`. Use [`get`](Self::get) for a
    /// checked read.
    fn at(&self, row: usize, col: usize) -> T;

    /// Store `value` at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If the position is out of range. Use [`set`](Self::set) for a checked
    /// write.
    fn put(&mut self, row: usize, col: usize, value: T);

    /// Multiply every element by `k`.
    fn scale_in_place(&mut self, k: T);

    /// `self += rhs`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] on a shape mismatch; storages with structural
    /// constraints may reject operands that would break them.
    fn add_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError>;

    /// `self -= rhs`.
    fn sub_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError>;

    /// `self = self * rhs`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying `self.cols()` if
    /// `self.cols() != rhs.rows()`.
    fn multiply_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError>;

    #[inline]
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Checked read. The row index is validated before the column index.
    fn get(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        check_position(self.rows(), self.cols(), row, col, "Matrix::get")?;
        Ok(self.at(row, col))
    }

    /// Checked write.
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), LinalgError> {
        check_position(self.rows(), self.cols(), row, col, "Matrix::set")?;
        self.put(row, col, value);
        Ok(())
    }

    /// Copy of row `i` as a vector of length `cols()`.
    fn row(&self, i: usize) -> Result<Vector<T>, LinalgError> {
        if i >= self.rows() {
            return Err(LinalgError::range(i, "Matrix::row"));
        }
        Ok((0..self.cols()).map(|j| self.at(i, j)).collect())
    }

    /// Copy of column `j` as a vector of length `rows()`.
    fn column(&self, j: usize) -> Result<Vector<T>, LinalgError> {
        if j >= self.cols() {
            return Err(LinalgError::range(j, "Matrix::column"));
        }
        Ok((0..self.rows()).map(|i| self.at(i, j)).collect())
    }

    /// Matrix-vector product `A * v`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying `v.len()` if it differs from `cols()`.
    fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if v.len() != self.cols() {
            return Err(LinalgError::size(v.len(), "Matrix::mul_vector"));
        }
        Ok((0..self.rows())
            .map(|i| {
                (0..self.cols()).fold(T::zero(), |acc, j| acc + self.at(i, j) * v[j])
            })
            .collect())
    }

    /// `true` if `|a_ii| >= sum_{j != i} |a_ij|` for every row.
    ///
    /// A non-square matrix has no full diagonal and is never dominant.
    fn is_diagonally_dominant(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.rows()).all(|i| {
            let off_diag = (0..self.cols())
                .filter(|&j| j != i)
                .fold(T::zero(), |acc, j| acc + self.at(i, j).abs());
            self.at(i, i).abs() >= off_diag
        })
    }

    /// Dense copy of the logical matrix.
    fn to_dense(&self) -> DenseMatrix<T> {
        let mut out = DenseMatrix::new(self.rows(), self.cols());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                out.put(i, j, self.at(i, j));
            }
        }
        out
    }
}

/// `true` if `matrix` is square and `A[i][j] == A[j][i]` for all `i > j`.
///
/// Comparison is exact; used to validate inputs to solvers and storages that
/// rely on symmetry.
pub fn is_symmetric<T: Scalar, M: Matrix<T> + ?Sized>(matrix: &M) -> bool {
    if !matrix.is_square() {
        return false;
    }
    (0..matrix.rows()).all(|i| (0..i).all(|j| matrix.at(i, j) == matrix.at(j, i)))
}

#[inline]
pub(crate) fn check_position(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
    operation: &'static str,
) -> Result<(), LinalgError> {
    if row >= rows {
        return Err(LinalgError::range(row, operation));
    }
    if col >= cols {
        return Err(LinalgError::range(col, operation));
    }
    Ok(())
}

/// Cell `(i, j)` of `lhs * rhs`: row `i` of `lhs` dotted with column `j` of `rhs`.
#[inline]
pub(crate) fn product_cell<T: Scalar, M: Matrix<T> + ?Sized>(
    lhs: &M,
    rhs: &dyn Matrix<T>,
    i: usize,
    j: usize,
) -> T {
    (0..lhs.cols()).fold(T::zero(), |acc, k| acc + lhs.at(i, k) * rhs.at(k, j))
}
