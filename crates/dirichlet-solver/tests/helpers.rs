//! Shared test helpers for the dirichlet-solver integration test suite.
//!
//! Deterministic random matrix generators and residual utilities.

#![allow(dead_code)]

use dirichlet_solver::{DenseMatrix, Matrix, SymmetricMatrix, Vector};

// ---------------------------------------------------------------------------
// Random number generator (simple LCG for deterministic reproducibility)
// ---------------------------------------------------------------------------

/// Minimal linear congruential generator for reproducible test data.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

// ---------------------------------------------------------------------------
// Matrix generators
// ---------------------------------------------------------------------------

/// Random symmetric, strictly diagonally dominant dense matrix.
///
/// Off-diagonal entries are drawn with probability `density` from
/// `[-1, 1)`; the diagonal is `1 + sum |off-diagonal|`.
pub fn random_spd_dense(n: usize, density: f64, seed: u64) -> DenseMatrix<f64> {
    let mut rng = Lcg::new(seed);
    let mut a = DenseMatrix::square(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.next_f64() < density {
                let v = rng.next_f64_range(-1.0, 1.0);
                a.put(i, j, v);
                a.put(j, i, v);
            }
        }
    }
    for i in 0..n {
        let off: f64 = (0..n).filter(|&j| j != i).map(|j| a.at(i, j).abs()).sum();
        a.put(i, i, off + 1.0);
    }
    a
}

/// Same matrix as [`random_spd_dense`] in packed symmetric storage.
pub fn random_spd_symmetric(n: usize, density: f64, seed: u64) -> SymmetricMatrix<f64> {
    SymmetricMatrix::from_matrix(&random_spd_dense(n, density, seed))
        .expect("generator produces symmetric matrices")
}

/// Random vector with entries in [-1, 1).
pub fn random_vector(n: usize, seed: u64) -> Vector<f64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_f64_range(-1.0, 1.0)).collect()
}

// ---------------------------------------------------------------------------
// Residual utilities
// ---------------------------------------------------------------------------

/// `b - A x`.
pub fn compute_residual(a: &dyn Matrix<f64>, x: &Vector<f64>, b: &Vector<f64>) -> Vector<f64> {
    b.subtract(&a.mul_vector(x).unwrap()).unwrap()
}

pub fn max_abs_diff(a: &Vector<f64>, b: &Vector<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
