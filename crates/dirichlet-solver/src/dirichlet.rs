//! Dirichlet boundary-value solver for the unit square.
//!
//! [`DirichletSolver`] owns a [`Mesh`], the boundary callback and the linear
//! system derived from both. The system is kept in sync with its inputs:
//! changing the division count rebuilds the matrix and right-hand side,
//! changing the boundary rebuilds only the right-hand side.

use tracing::{debug, info, instrument};

use crate::error::SolverError;
use crate::matrix::SymmetricMatrix;
use crate::mesh::Mesh;
use crate::types::{Algorithm, SolverConfig, SolverResult};
use crate::vector::Vector;

/// Solves for interior values given boundary values `f(x, y)`.
///
/// The solution is ordered row-major over the interior, see [`Mesh`].
///
/// ```
/// use dirichlet_solver::DirichletSolver;
///
/// let solver = DirichletSolver::new(4, |x: f64, y: f64| x + y).unwrap();
/// let result = solver.solve().unwrap();
/// assert!(result.converged);
/// assert_eq!(result.solution.len(), 9);
/// ```
pub struct DirichletSolver<F> {
    mesh: Mesh,
    boundary: F,
    config: SolverConfig,
    matrix: SymmetricMatrix<f64>,
    rhs: Vector<f64>,
}

impl<F> DirichletSolver<F>
where
    F: Fn(f64, f64) -> f64,
{
    /// Solver with the default (Gauss-Seidel) configuration.
    pub fn new(divisions: usize, boundary: F) -> Result<Self, SolverError> {
        Self::with_config(divisions, boundary, SolverConfig::default())
    }

    /// # Errors
    ///
    /// - [`SolverError::Linalg`] if `divisions < 2`.
    /// - [`SolverError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(
        divisions: usize,
        boundary: F,
        config: SolverConfig,
    ) -> Result<Self, SolverError> {
        config.validate()?;
        let mesh = Mesh::new(divisions)?;
        let matrix = mesh.coefficient_matrix();
        let rhs = mesh.right_hand_side(&boundary);
        Ok(Self {
            mesh,
            boundary,
            config,
            matrix,
            rhs,
        })
    }

    /// Change the division count, regenerating the whole system. On error
    /// the solver is left unchanged.
    pub fn set_divisions(&mut self, divisions: usize) -> Result<(), SolverError> {
        let mesh = Mesh::new(divisions)?;
        self.mesh = mesh;
        self.matrix = mesh.coefficient_matrix();
        self.rhs = mesh.right_hand_side(&self.boundary);
        debug!(divisions, unknowns = mesh.unknowns(), "system regenerated");
        Ok(())
    }

    /// Replace the boundary callback and rebuild the right-hand side.
    pub fn set_boundary(&mut self, boundary: F) {
        self.boundary = boundary;
        self.rhs = self.mesh.right_hand_side(&self.boundary);
    }

    pub fn set_config(&mut self, config: SolverConfig) -> Result<(), SolverError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn matrix(&self) -> &SymmetricMatrix<f64> {
        &self.matrix
    }

    pub fn rhs(&self) -> &Vector<f64> {
        &self.rhs
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve with the configured engine.
    #[instrument(
        skip(self),
        fields(divisions = self.mesh.divisions(), algorithm = %self.config.algorithm)
    )]
    pub fn solve(&self) -> Result<SolverResult, SolverError> {
        let engine = self.config.build_engine()?;
        let result = engine.solve(&self.matrix, &self.rhs)?;
        info!(
            iterations = result.iterations,
            converged = result.converged,
            "dirichlet solve finished",
        );
        Ok(result)
    }

    /// One-off solve with the reference parameters of `algorithm`; the
    /// stored configuration is left as is.
    pub fn solve_with(&self, algorithm: Algorithm) -> Result<SolverResult, SolverError> {
        let engine = SolverConfig::for_algorithm(algorithm).build_engine()?;
        engine.solve(&self.matrix, &self.rhs)
    }
}

impl<F> std::fmt::Debug for DirichletSolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirichletSolver")
            .field("mesh", &self.mesh)
            .field("config", &self.config)
            .field("unknowns", &self.rhs.len())
            .finish_non_exhaustive()
    }
}
