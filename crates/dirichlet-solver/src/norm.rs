//! Convergence metric shared by the iterative solvers.
//!
//! Every stop rule in this crate measures vectors with the L1 norm
//! `sum_i |v_i|`.

use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// Sum of absolute values.
///
/// ```
/// use dirichlet_solver::{norm::l1_norm, Vector};
///
/// assert_eq!(l1_norm(&Vector::from_vec(vec![1.0, -2.0, 3.0])), 6.0);
/// ```
#[inline]
pub fn l1_norm<T: Scalar>(v: &Vector<T>) -> T {
    v.iter().fold(T::zero(), |acc, &x| acc + x.abs())
}

/// `‖A·x − b‖₁`.
///
/// # Errors
///
/// [`LinalgError::Size`] if `x` or `b` does not conform to `matrix`.
pub fn residual_l1(
    matrix: &dyn Matrix<f64>,
    x: &Vector<f64>,
    b: &Vector<f64>,
) -> Result<f64, LinalgError> {
    let ax = matrix.mul_vector(x)?;
    Ok(l1_norm(&ax.subtract(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DenseMatrix;

    #[test]
    fn l1_of_empty_is_zero() {
        assert_eq!(l1_norm(&Vector::<f64>::new(0)), 0.0);
    }

    #[test]
    fn residual_of_exact_solution_is_zero() {
        let a = DenseMatrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 4.0]]).unwrap();
        let x = Vector::from_vec(vec![1.0, 0.5]);
        let b = Vector::from_vec(vec![2.0, 2.0]);
        assert_eq!(residual_l1(&a, &x, &b).unwrap(), 0.0);

        let off = Vector::from_vec(vec![1.0, 1.0]);
        assert_eq!(residual_l1(&a, &off, &b).unwrap(), 2.0);
        assert!(residual_l1(&a, &x, &Vector::new(3)).is_err());
    }
}
