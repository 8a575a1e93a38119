//! Rectangular matrix stored as rows of [`Vector`].

use serde::{Deserialize, Serialize};

use super::{check_position, product_cell, Matrix};
use crate::error::LinalgError;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// Dense `rows x cols` matrix. Every row has exactly `cols` elements.
///
/// Besides the [`Matrix`] contract it supports the operations Gaussian
/// elimination needs: row swaps, appending a right-hand-side column to form
/// an augmented system, and transposition.
///
/// ```
/// use dirichlet_solver::{DenseMatrix, Matrix, Vector};
///
/// let mut a = DenseMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
/// a.append_column(&Vector::from_vec(vec![5.0, 6.0])).unwrap();
/// assert_eq!((a.rows(), a.cols()), (2, 3));
/// assert_eq!(a.at(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix<T> {
    data: Vec<Vector<T>>,
    ncols: usize,
}

impl<T: Scalar> DenseMatrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: (0..rows).map(|_| Vector::new(cols)).collect(),
            ncols: cols,
        }
    }

    /// Zero-filled `n x n` matrix.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m.data[i][i] = T::one();
        }
        m
    }

    /// Build from row-major nested vectors.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying the length of the first row whose length
    /// differs from row 0.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, LinalgError> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(LinalgError::size(bad.len(), "DenseMatrix::from_rows"));
        }
        Ok(Self {
            data: rows.into_iter().map(Vector::from_vec).collect(),
            ncols,
        })
    }

    /// Resize to `rows x cols`. Changing either dimension discards the
    /// contents and zero-fills; the same shape is a no-op.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows != self.data.len() || cols != self.ncols {
            *self = Self::new(rows, cols);
        }
    }

    /// Borrow row `i` without copying.
    pub fn row_vector(&self, i: usize) -> Result<&Vector<T>, LinalgError> {
        self.data
            .get(i)
            .ok_or(LinalgError::range(i, "DenseMatrix::row_vector"))
    }

    /// Exchange rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), LinalgError> {
        let n = self.data.len();
        if a >= n {
            return Err(LinalgError::range(a, "DenseMatrix::swap_rows"));
        }
        if b >= n {
            return Err(LinalgError::range(b, "DenseMatrix::swap_rows"));
        }
        self.data.swap(a, b);
        Ok(())
    }

    /// Append `column` as a new last column, e.g. to build `[A | b]`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying `column.len()` if it differs from
    /// `rows()`.
    pub fn append_column(&mut self, column: &Vector<T>) -> Result<(), LinalgError> {
        if column.len() != self.data.len() {
            return Err(LinalgError::size(column.len(), "DenseMatrix::append_column"));
        }
        for (row, &value) in self.data.iter_mut().zip(column.iter()) {
            let mut widened = Vec::with_capacity(self.ncols + 1);
            widened.extend_from_slice(row.as_slice());
            widened.push(value);
            *row = Vector::from_vec(widened);
        }
        self.ncols += 1;
        Ok(())
    }

    /// Independent `cols x rows` matrix with rows and columns exchanged.
    pub fn transpose(&self) -> Self {
        Self {
            data: (0..self.ncols)
                .map(|j| self.data.iter().map(|row| row[j]).collect())
                .collect(),
            ncols: self.data.len(),
        }
    }

    /// `self + rhs` as a new matrix.
    pub fn add(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        let mut out = self.clone();
        out.add_assign(rhs)?;
        Ok(out)
    }

    /// `self - rhs` as a new matrix.
    pub fn subtract(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        let mut out = self.clone();
        out.sub_assign(rhs)?;
        Ok(out)
    }

    /// `self * k` as a new matrix.
    pub fn scale(&self, k: T) -> Self {
        let mut out = self.clone();
        out.scale_in_place(k);
        out
    }

    /// Matrix product `self * rhs`, shaped `self.rows() x rhs.cols()`.
    pub fn multiply(&self, rhs: &dyn Matrix<T>) -> Result<Self, LinalgError> {
        if self.ncols != rhs.rows() {
            return Err(LinalgError::size(self.ncols, "DenseMatrix::multiply"));
        }
        let mut out = Self::new(self.data.len(), rhs.cols());
        for i in 0..self.data.len() {
            for j in 0..rhs.cols() {
                out.data[i][j] = product_cell(self, rhs, i, j);
            }
        }
        Ok(out)
    }

    fn check_same_shape(
        &self,
        rhs: &dyn Matrix<T>,
        operation: &'static str,
    ) -> Result<(), LinalgError> {
        if self.data.len() != rhs.rows() {
            return Err(LinalgError::size(self.data.len(), operation));
        }
        if self.ncols != rhs.cols() {
            return Err(LinalgError::size(self.ncols, operation));
        }
        Ok(())
    }
}

impl<T: Scalar> Matrix<T> for DenseMatrix<T> {
    #[inline]
    fn rows(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        self.data[row][col]
    }

    #[inline]
    fn put(&mut self, row: usize, col: usize, value: T) {
        self.data[row][col] = value;
    }

    fn get(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        check_position(self.rows(), self.ncols, row, col, "DenseMatrix::get")?;
        Ok(self.data[row][col])
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), LinalgError> {
        check_position(self.rows(), self.ncols, row, col, "DenseMatrix::set")?;
        self.data[row][col] = value;
        Ok(())
    }

    fn scale_in_place(&mut self, k: T) {
        self.data.iter_mut().for_each(|row| row.scale_in_place(k));
    }

    fn add_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        self.check_same_shape(rhs, "DenseMatrix::add_assign")?;
        for (i, row) in self.data.iter_mut().enumerate() {
            for j in 0..self.ncols {
                row[j] = row[j] + rhs.at(i, j);
            }
        }
        Ok(())
    }

    fn sub_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        self.check_same_shape(rhs, "DenseMatrix::sub_assign")?;
        for (i, row) in self.data.iter_mut().enumerate() {
            for j in 0..self.ncols {
                row[j] = row[j] - rhs.at(i, j);
            }
        }
        Ok(())
    }

    fn multiply_assign(&mut self, rhs: &dyn Matrix<T>) -> Result<(), LinalgError> {
        *self = self.multiply(rhs)?;
        Ok(())
    }

    fn row(&self, i: usize) -> Result<Vector<T>, LinalgError> {
        self.row_vector(i).cloned()
    }

    fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if v.len() != self.ncols {
            return Err(LinalgError::size(v.len(), "DenseMatrix::mul_vector"));
        }
        self.data.iter().map(|row| row.dot(v)).collect()
    }
}
