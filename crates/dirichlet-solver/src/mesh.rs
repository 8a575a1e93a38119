//! Uniform mesh on the unit square and the linear system it induces.
//!
//! With `N` divisions the interior has `(N-1)^2` points at spacing
//! `h = 1/N`. Unknowns are numbered row-major from the bottom-left corner:
//!
//! ```text
//! x = h * (1 + row % (N-1))
//! y = h * (1 + row / (N-1))
//! ```
//!
//! Each unknown couples to its four neighbours with weight `-h`; neighbours
//! outside the interior are boundary points whose values move to the
//! right-hand side.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::LinalgError;
use crate::matrix::{Matrix, SymmetricMatrix};
use crate::types::MAX_DENSE_DIM;
use crate::vector::Vector;

/// Largest division count whose `(N-1)^2` unknowns fit in [`MAX_DENSE_DIM`].
pub const MAX_DIVISIONS: usize = 65;

/// Interior mesh of the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    divisions: usize,
}

/// Location of one unknown and which sides of the square it touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPoint {
    pub x: f64,
    pub y: f64,
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl MeshPoint {
    /// `true` if at least one neighbour is a boundary point.
    pub fn touches_boundary(&self) -> bool {
        self.left || self.right || self.bottom || self.top
    }
}

impl Mesh {
    /// Mesh with `divisions` intervals per side.
    ///
    /// # Errors
    ///
    /// [`LinalgError::Size`] if `divisions < 2`, which leaves no interior, or
    /// if `divisions > MAX_DIVISIONS`.
    pub fn new(divisions: usize) -> Result<Self, LinalgError> {
        if !(2..=MAX_DIVISIONS).contains(&divisions) {
            return Err(LinalgError::size(divisions, "Mesh::new"));
        }
        Ok(Self { divisions })
    }

    #[inline]
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Mesh spacing `h = 1/N`.
    #[inline]
    pub fn spacing(&self) -> f64 {
        1.0 / self.divisions as f64
    }

    /// Interior points per side, `N - 1`.
    #[inline]
    pub fn side(&self) -> usize {
        self.divisions - 1
    }

    /// Number of unknowns, `(N - 1)^2`.
    #[inline]
    pub fn unknowns(&self) -> usize {
        self.side() * self.side()
    }

    /// Coordinates and edge flags of unknown `row`.
    pub fn point(&self, row: usize) -> Result<MeshPoint, LinalgError> {
        if row >= self.unknowns() {
            return Err(LinalgError::range(row, "Mesh::point"));
        }
        let side = self.side();
        let (i, j) = (row % side, row / side);
        let h = self.spacing();
        Ok(MeshPoint {
            x: h * (i + 1) as f64,
            y: h * (j + 1) as f64,
            left: i == 0,
            right: i == side - 1,
            bottom: j == 0,
            top: j == side - 1,
        })
    }

    /// The `(N-1)^2` square coefficient matrix: 1 on the diagonal and `-h`
    /// between horizontally or vertically adjacent unknowns.
    #[instrument(skip(self), fields(divisions = self.divisions))]
    pub fn coefficient_matrix(&self) -> SymmetricMatrix<f64> {
        let n = self.unknowns();
        let side = self.side();
        let h = self.spacing();
        let mut a = SymmetricMatrix::new(n);

        // Upper triangle only: right and up neighbours.
        for row in 0..n {
            a.put(row, row, 1.0);
            if row % side != side - 1 {
                a.put(row, row + 1, -h);
            }
            if row + side < n {
                a.put(row, row + side, -h);
            }
        }
        debug!(unknowns = n, "coefficient matrix generated");
        a
    }

    /// `b_row = h * sum f(boundary neighbour)` over the sides the unknown
    /// touches. Boundary neighbours are evaluated at exact coordinates
    /// (`x = 0`, `x = 1`, `y = 0`, `y = 1`); interior unknowns get 0.
    pub fn right_hand_side<F>(&self, boundary: F) -> Vector<f64>
    where
        F: Fn(f64, f64) -> f64,
    {
        let h = self.spacing();
        let side = self.side();
        (0..self.unknowns())
            .map(|row| {
                let (i, j) = (row % side, row / side);
                let (x, y) = (h * (i + 1) as f64, h * (j + 1) as f64);
                let mut sum = 0.0;
                if j == side - 1 {
                    sum += boundary(x, 1.0);
                }
                if j == 0 {
                    sum += boundary(x, 0.0);
                }
                if i == side - 1 {
                    sum += boundary(1.0, y);
                }
                if i == 0 {
                    sum += boundary(0.0, y);
                }
                sum * h
            })
            .collect()
    }
}
