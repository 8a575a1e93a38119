//! Dense linear solvers and a Dirichlet boundary-value solver for the unit
//! square.
//!
//! The crate provides generic vector and matrix containers, three solvers
//! for `Ax = b` that work on any [`Matrix`] storage, and an orchestrator that
//! discretises Laplace's equation on a uniform mesh and solves for the
//! interior values given boundary values `f(x, y)`.
//!
//! # Available Solvers
//!
//! | Solver | Method | Requirements |
//! |--------|--------|--------------|
//! | [`GaussianElimination`] | direct, partial pivoting | non-singular |
//! | [`GaussSeidelSolver`] | in-place relaxation | non-zero diagonal |
//! | [`SteepestDescentSolver`] | gradient descent, exact line search | symmetric, diagonally dominant |
//!
//! # Example
//!
//! ```rust
//! use dirichlet_solver::{Algorithm, DirichletSolver};
//!
//! // Heat the bottom edge with a parabola, hold the other edges at zero.
//! let boundary = |x: f64, y: f64| if y == 0.0 { 1.0 - 4.0 * (x - 0.5).powi(2) } else { 0.0 };
//!
//! let solver = DirichletSolver::new(8, boundary).unwrap();
//! let result = solver.solve().unwrap();
//! assert!(result.converged);
//! assert_eq!(result.solution.len(), 49);
//!
//! let direct = solver.solve_with(Algorithm::GaussianElimination).unwrap();
//! assert!((direct.solution[3] - result.solution[3]).abs() < 1e-6);
//! ```

pub mod dirichlet;
pub mod error;
pub mod gauss_seidel;
pub mod gaussian;
pub mod matrix;
pub mod mesh;
pub mod norm;
pub mod scalar;
pub mod steepest_descent;
pub mod stream;
pub mod traits;
pub mod types;
pub mod vector;

pub use dirichlet::DirichletSolver;
pub use error::{LinalgError, Precondition, SolverError};
pub use gauss_seidel::GaussSeidelSolver;
pub use gaussian::GaussianElimination;
pub use matrix::{is_symmetric, DenseMatrix, Matrix, SymmetricMatrix};
pub use mesh::{Mesh, MeshPoint};
pub use scalar::Scalar;
pub use steepest_descent::SteepestDescentSolver;
pub use traits::SolverEngine;
pub use types::{Algorithm, ConvergenceInfo, SolverConfig, SolverResult};
pub use vector::Vector;
