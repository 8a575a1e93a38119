//! Dense one-dimensional numeric container.
//!
//! [`Vector`] owns its storage exclusively; `clone` is a deep copy. Every
//! arithmetic operation is a named method that returns a new value or a
//! [`LinalgError`] when operand sizes do not match.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::LinalgError;
use crate::scalar::Scalar;

/// Fixed-size, heap-allocated vector of scalars.
///
/// # Example
///
/// ```
/// use dirichlet_solver::Vector;
///
/// let a = Vector::from_vec(vec![1.0_f64, 2.0, 3.0]);
/// let b = Vector::filled(3, 1.0_f64);
/// assert_eq!(a.add(&b).unwrap().as_slice(), &[2.0, 3.0, 4.0]);
/// assert_eq!(a.dot(&b).unwrap(), 6.0);
/// assert!(a.get(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Create a zero-filled vector of `size` elements.
    pub fn new(size: usize) -> Self {
        Self::filled(size, T::zero())
    }

    /// Create a vector of `size` copies of `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            data: vec![value; size],
        }
    }

    /// Wrap an existing `Vec<T>` without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Checked read of element `i`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Range`] carrying `i` if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> Result<T, LinalgError> {
        self.data
            .get(i)
            .copied()
            .ok_or(LinalgError::range(i, "Vector::get"))
    }

    /// Checked mutable access to element `i`.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Result<&mut T, LinalgError> {
        self.data
            .get_mut(i)
            .ok_or(LinalgError::range(i, "Vector::get_mut"))
    }

    /// Checked write of element `i`.
    #[inline]
    pub fn set(&mut self, i: usize, value: T) -> Result<(), LinalgError> {
        let slot = self
            .data
            .get_mut(i)
            .ok_or(LinalgError::range(i, "Vector::set"))?;
        *slot = value;
        Ok(())
    }

    /// Assign `value` to every element.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Resize to `n` elements.
    ///
    /// Destructive: if `n` differs from the current length the old contents
    /// are discarded and the vector is zero-filled. Resizing to the current
    /// length keeps the contents.
    pub fn resize(&mut self, n: usize) {
        if n != self.data.len() {
            self.data = vec![T::zero(); n];
        }
    }

    /// Return `self * k`.
    pub fn scale(&self, k: T) -> Self {
        let mut out = self.clone();
        out.scale_in_place(k);
        out
    }

    /// Multiply every element by `k` in place.
    pub fn scale_in_place(&mut self, k: T) {
        self.data.iter_mut().for_each(|x| *x = *x * k);
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] carrying `rhs.len()` if the lengths differ.
    pub fn add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_len(rhs, "Vector::add")?;
        let mut out = self.clone();
        out.add_assign(rhs)?;
        Ok(out)
    }

    /// In-place element-wise sum.
    pub fn add_assign(&mut self, rhs: &Self) -> Result<(), LinalgError> {
        self.check_len(rhs, "Vector::add_assign")?;
        for (x, &y) in self.data.iter_mut().zip(rhs.data.iter()) {
            *x = *x + y;
        }
        Ok(())
    }

    /// Element-wise difference `self - rhs`.
    pub fn subtract(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_len(rhs, "Vector::subtract")?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&x, &y)| x - y)
            .collect())
    }

    /// Dot product.
    pub fn dot(&self, rhs: &Self) -> Result<T, LinalgError> {
        self.check_len(rhs, "Vector::dot")?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    #[inline]
    fn check_len(&self, rhs: &Self, operation: &'static str) -> Result<(), LinalgError> {
        if self.data.len() != rhs.data.len() {
            return Err(LinalgError::size(rhs.data.len(), operation));
        }
        Ok(())
    }
}

/// Unchecked-by-`Result` indexing; panics on out-of-range like a slice.
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
