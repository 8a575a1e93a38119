//! Square symmetric matrix with packed upper-triangular storage.
//!
//! Row `i` stores `n - i` entries for columns `i..n`, so the matrix occupies
//! `n (n + 1) / 2` slots instead of `n^2`. Any access with `row > col` is
//! redirected to the canonical `(col, row)` slot before the lookup, which
//! makes `A(i, j) == A(j, i)` hold by construction: writing one of the pair
//! writes both.

use serde::{Deserialize, Serialize};

use super::{is_symmetric, product_cell, Matrix};
use crate::error::LinalgError;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// Square matrix satisfying `A[i][j] == A[j][i]`, storing only the upper
/// triangle.
///
/// ```
/// use dirichlet_solver::{Matrix, SymmetricMatrix};
///
/// let mut a = SymmetricMatrix::<f64>::new(3);
/// a.set(2, 0, 5.0).unwrap();
/// assert_eq!(a.at(0, 2), 5.0);
/// assert_eq!(a.stored_len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetricMatrix<T> {
    data: Vec<Vector<T>>,
    n: usize,
}

impl<T: Scalar> SymmetricMatrix<T> {
    /// Zero-filled `n x n` symmetric matrix.
    pub fn new(n: usize) -> Self {
        Self {
            data: (0..n).map(|i| Vector::new(n - i)).collect(),
            n,
        }
    }

    /// Copy a square, symmetric matrix into packed storage.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::Size`] carrying `cols()` if `source` is not square.
    /// - [`LinalgError::NotSymmetric`] if `A[i][j] != A[j][i]` somewhere.
    pub fn from_matrix(source: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        if !source.is_square() {
            return Err(LinalgError::size(
                source.cols(),
                "SymmetricMatrix::from_matrix",
            ));
        }
        if !is_symmetric(source) {
            return Err(LinalgError::NotSymmetric {
                operation: "SymmetricMatrix::from_matrix",
            });
        }
        let n = source.rows();
        Ok(Self {
            data: (0..n)
                .map(|i| (i..n).map(|j| source.at(i, j)).collect())
                .collect(),
            n,
        })
    }

    /// Number of stored scalars, `n (n + 1) / 2`.
    pub fn stored_len(&self) -> usize {
        self.data.iter().map(Vector::len).sum()
    }

    /// Resize to `rows x cols`, discarding contents if the size changes.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying `cols` if `rows != cols`; the matrix is
    /// left untouched.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), LinalgError> {
        if rows != cols {
            return Err(LinalgError::size(cols, "SymmetricMatrix::resize"));
        }
        if rows != self.n {
            *self = Self::new(rows);
        }
        Ok(())
    }

    /// The transpose of a symmetric matrix is itself.
    pub fn transpose(&self) -> Self {
        self.clone()
    }

    pub fn add(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        let mut out = self.clone();
        out.add_assign(rhs)?;
        Ok(out)
    }

    pub fn subtract(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        let mut out = self.clone();
        out.sub_assign(rhs)?;
        Ok(out)
    }

    pub fn scale(&self, k: T) -> Self {
        let mut out = self.clone();
        out.scale_in_place(k);
        out
    }

    /// Product with a symmetric operand, see [`Matrix::multiply_assign`].
    pub fn multiply(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        let mut out = self.clone();
        out.multiply_assign(rhs)?;
        Ok(out)
    }

    #[inline]
    fn slot(row: usize, col: usize) -> (usize, usize) {
        if row > col {
            (col, row - col)
        } else {
            (row, col - row)
        }
    }

    fn check_symmetric_operand(
        &self,
        rhs: &dyn Matrix<T>,
        operation: &'static str,
    ) -> Result<(), LinalgError> {
        if self.n != rhs.rows() {
            return Err(LinalgError::size(self.n, operation));
        }
        if self.n != rhs.cols() {
            return Err(LinalgError::size(self.n, operation));
        }
        if !is_symmetric(rhs) {
            return Err(LinalgError::NotSymmetric { operation });
        }
        Ok(())
    }
}

impl<T: Scalar> Matrix<T> for SymmetricMatrix<T> {
    #[inline]
    fn rows(&self) -> usize {
        self.n
    }

    #[inline]
    fn cols(&self) -> usize {
        self.n
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.n && col < self.n,
            "index ({row}, {col}) out of range for {n}x{n} symmetric matrix",
            n = self.n
        );
        let (r, offset) = Self::slot(row, col);
        self.data[r][offset]
    }

    #[inline]
    fn put(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.n && col < self.n,
            "index ({row}, {col}) out of range for {n}x{n} symmetric matrix",
            n = self.n
        );
        let (r, offset) = Self::slot(row, col);
        self.data[r][offset] = value;
    }

    fn scale_in_place(&mut self, k: T) {
        self.data.iter_mut().for_each(|row| row.scale_in_place(k));
    }

    /// # Errors
    ///
    /// [`LinalgError::Size`] on a shape mismatch and
    /// [`LinalgError::NotSymmetric`] if `rhs` is not symmetric, since the sum
    /// could not be stored in packed form.
    fn add_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        self.check_symmetric_operand(rhs, "SymmetricMatrix::add_assign")?;
        for (i, row) in self.data.iter_mut().enumerate() {
            for offset in 0..row.len() {
                row[offset] = row[offset] + rhs.at(i, i + offset);
            }
        }
        Ok(())
    }

    fn sub_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        self.check_symmetric_operand(rhs, "SymmetricMatrix::sub_assign")?;
        for (i, row) in self.data.iter_mut().enumerate() {
            for offset in 0..row.len() {
                row[offset] = row[offset] - rhs.at(i, i + offset);
            }
        }
        Ok(())
    }

    /// Stores the upper triangle of `self * rhs`: `c(i, j) = row_i(self) ·
    /// col_j(rhs)` for `i <= j`, mirrored below the diagonal.
    ///
    /// The exact product of two symmetric matrices is itself symmetric only
    /// when they commute; otherwise the lower triangle of the true product is
    /// not represented.
    fn multiply_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        self.check_symmetric_operand(rhs, "SymmetricMatrix::multiply_assign")?;
        let n = self.n;
        let lhs: &Self = self;
        let product: Vec<Vector<T>> = (0..n)
            .map(|i| (i..n).map(|j| product_cell(lhs, rhs, i, j)).collect())
            .collect();
        self.data = product;
        Ok(())
    }

    /// Single pass over the packed triangle; each off-diagonal slot
    /// contributes to two output rows.
    fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if v.len() != self.n {
            return Err(LinalgError::size(v.len(), "SymmetricMatrix::mul_vector"));
        }
        let mut out = Vector::new(self.n);
        for (i, row) in self.data.iter().enumerate() {
            for (offset, &a) in row.iter().enumerate() {
                let j = i + offset;
                out[i] = out[i] + a * v[j];
                if j != i {
                    out[j] = out[j] + a * v[i];
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DenseMatrix;

    fn sample() -> SymmetricMatrix<f64> {
        let dense = DenseMatrix::from_rows(vec![
            vec![4.0, -1.0, 0.5],
            vec![-1.0, 3.0, 2.0],
            vec![0.5, 2.0, 6.0],
        ])
        .unwrap();
        SymmetricMatrix::from_matrix(&dense).unwrap()
    }

    #[test]
    fn packed_layout() {
        let a = SymmetricMatrix::<f64>::new(4);
        assert_eq!(a.rows(), 4);
        assert_eq!(a.cols(), 4);
        assert_eq!(a.stored_len(), 10);
        assert_eq!(SymmetricMatrix::<f64>::new(0).stored_len(), 0);
    }

    #[test]
    fn write_below_diagonal_mirrors() {
        let mut a = SymmetricMatrix::<f64>::new(3);
        a.set(2, 1, -7.0).unwrap();
        assert_eq!(a.get(1, 2).unwrap(), -7.0);
        a.set(1, 2, 3.0).unwrap();
        assert_eq!(a.get(2, 1).unwrap(), 3.0);
        assert_eq!(a.get(3, 0), Err(LinalgError::range(3, "Matrix::get")));
        assert_eq!(a.get(0, 3), Err(LinalgError::range(3, "Matrix::get")));
    }

    #[test]
    fn from_matrix_validates() {
        let rect = DenseMatrix::<f64>::new(2, 3);
        assert_eq!(
            SymmetricMatrix::from_matrix(&rect),
            Err(LinalgError::size(3, "SymmetricMatrix::from_matrix"))
        );

        let asym = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 1.0]]).unwrap();
        assert_eq!(
            SymmetricMatrix::from_matrix(&asym),
            Err(LinalgError::NotSymmetric {
                operation: "SymmetricMatrix::from_matrix"
            })
        );

        assert_eq!(sample().to_dense().at(2, 0), 0.5);
    }

    #[test]
    fn resize_must_stay_square() {
        let mut a = sample();
        assert_eq!(
            a.resize(3, 4),
            Err(LinalgError::size(4, "SymmetricMatrix::resize"))
        );
        assert_eq!(a, sample(), "rejected resize leaves contents intact");

        a.resize(3, 3).unwrap();
        assert_eq!(a, sample());

        a.resize(2, 2).unwrap();
        assert_eq!(a.rows(), 2);
        assert_eq!(a.at(1, 0), 0.0);
    }

    #[test]
    fn mul_vector_matches_dense() {
        let a = sample();
        let x = Vector::from_vec(vec![1.0, -2.0, 0.5]);
        let packed = a.mul_vector(&x).unwrap();
        let dense = a.to_dense().mul_vector(&x).unwrap();
        assert_eq!(packed, dense);
        assert_eq!(
            a.mul_vector(&Vector::new(2)),
            Err(LinalgError::size(2, "SymmetricMatrix::mul_vector"))
        );
    }

    #[test]
    fn arithmetic_requires_symmetric_operand() {
        let a = sample();
        let doubled = a.add(&a).unwrap();
        assert_eq!(doubled, a.scale(2.0));
        assert_eq!(doubled.subtract(&a).unwrap(), a);

        let asym = DenseMatrix::from_rows(vec![
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert_eq!(
            a.add(&asym),
            Err(LinalgError::NotSymmetric {
                operation: "SymmetricMatrix::add_assign"
            })
        );
        assert_eq!(
            a.add(&SymmetricMatrix::new(2)),
            Err(LinalgError::size(3, "SymmetricMatrix::add_assign"))
        );
    }

    #[test]
    fn multiply_by_identity_and_self() {
        let a = sample();
        let id = DenseMatrix::<f64>::identity(3);
        assert_eq!(a.multiply(&id).unwrap(), a);

        // A * A commutes with itself, so the packed product is exact.
        let squared = a.multiply(&a).unwrap();
        let dense = a.to_dense().multiply(&a).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(squared.at(i, j), dense.at(i, j));
            }
        }
    }

    #[test]
    fn transpose_is_identity_operation() {
        let a = sample();
        assert_eq!(a.transpose(), a);
    }
}
