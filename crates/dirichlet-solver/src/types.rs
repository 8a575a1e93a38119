//! Core types shared by the solvers: algorithm identifiers, configuration
//! and result records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::gauss_seidel::GaussSeidelSolver;
use crate::gaussian::GaussianElimination;
use crate::steepest_descent::SteepestDescentSolver;
use crate::traits::SolverEngine;
use crate::vector::Vector;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Algorithm identifier for solver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Direct row reduction of `[A | b]` with partial pivoting.
    ///
    /// O(n^3); exact up to rounding for any non-singular square matrix.
    GaussianElimination,
    /// Gauss-Seidel relaxation.
    ///
    /// Converges for diagonally dominant and for symmetric positive-definite
    /// systems. O(n^2) per sweep on dense storage.
    GaussSeidel,
    /// Steepest-descent gradient iteration.
    ///
    /// Requires a symmetric, diagonally dominant matrix.
    SteepestDescent,
}

impl Algorithm {
    /// All algorithms, in the order they are documented.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::GaussianElimination,
        Algorithm::GaussSeidel,
        Algorithm::SteepestDescent,
    ];

    /// `true` for methods that iterate towards a tolerance.
    pub fn is_iterative(self) -> bool {
        !matches!(self, Algorithm::GaussianElimination)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::GaussianElimination => write!(f, "gaussian-elimination"),
            Algorithm::GaussSeidel => write!(f, "gauss-seidel"),
            Algorithm::SteepestDescent => write!(f, "steepest-descent"),
        }
    }
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Stop-rule tolerance shared by the iterative solvers.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Sweep cap for Gauss-Seidel. The classical method has no cap; this one
/// exists so a non-convergent matrix cannot spin forever.
pub const DEFAULT_GAUSS_SEIDEL_MAX_ITERATIONS: usize = 100_000;

/// Iteration cap for steepest descent.
pub const DEFAULT_STEEPEST_DESCENT_MAX_ITERATIONS: usize = 5000;

/// Pivot magnitude below which elimination searches for a larger pivot.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 0.01;

/// Largest system dimension accepted from an external size (a stream header
/// or a mesh division count). Dense storage for it is `n^2` entries.
pub const MAX_DENSE_DIM: usize = 4096;

/// Solver selection and stop-rule parameters.
///
/// Fields that do not apply to the selected algorithm are ignored. Use
/// [`SolverConfig::for_algorithm`] to get the reference parameters for each
/// method.
///
/// ```
/// use dirichlet_solver::types::{Algorithm, SolverConfig};
///
/// let config = SolverConfig {
///     max_iterations: Some(10),
///     ..SolverConfig::for_algorithm(Algorithm::SteepestDescent)
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Engine to dispatch to.
    pub algorithm: Algorithm,
    /// Iterative methods stop once the L1 convergence metric is `<=` this.
    pub tolerance: f64,
    /// Iteration cap for iterative methods. `None` means uncapped.
    pub max_iterations: Option<usize>,
    /// Pivot threshold for Gaussian elimination.
    pub pivot_tolerance: f64,
}

impl SolverConfig {
    /// Reference parameters for `algorithm`.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        let max_iterations = match algorithm {
            Algorithm::GaussianElimination => None,
            Algorithm::GaussSeidel => Some(DEFAULT_GAUSS_SEIDEL_MAX_ITERATIONS),
            Algorithm::SteepestDescent => Some(DEFAULT_STEEPEST_DESCENT_MAX_ITERATIONS),
        };
        Self {
            algorithm,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidConfig`] for a non-finite or non-positive
    /// tolerance, a zero iteration cap, or a negative / non-finite pivot
    /// tolerance.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidConfig {
                name: "tolerance",
                value: self.tolerance.to_string(),
                expected: "finite and > 0",
            });
        }
        if self.max_iterations == Some(0) {
            return Err(SolverError::InvalidConfig {
                name: "max_iterations",
                value: "0".into(),
                expected: ">= 1 or unset",
            });
        }
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(SolverError::InvalidConfig {
                name: "pivot_tolerance",
                value: self.pivot_tolerance.to_string(),
                expected: "finite and >= 0",
            });
        }
        Ok(())
    }

    /// Validate and instantiate the configured engine.
    pub fn build_engine(&self) -> Result<Box<dyn SolverEngine>, SolverError> {
        self.validate()?;
        Ok(match self.algorithm {
            Algorithm::GaussianElimination => {
                Box::new(GaussianElimination::new(self.pivot_tolerance))
            }
            Algorithm::GaussSeidel => {
                Box::new(GaussSeidelSolver::new(self.tolerance, self.max_iterations))
            }
            Algorithm::SteepestDescent => {
                Box::new(SteepestDescentSolver::new(self.tolerance, self.max_iterations))
            }
        })
    }
}

impl Default for SolverConfig {
    /// Gauss-Seidel is the production default.
    fn default() -> Self {
        Self::for_algorithm(Algorithm::GaussSeidel)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Per-iteration convergence snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceInfo {
    /// Iteration index (0-based).
    pub iteration: usize,
    /// Value of the stop-rule metric after this iteration.
    pub residual_norm: f64,
}

/// Result returned by a solver invocation.
///
/// Running out of iterations is not an error: the best iterate is returned
/// with `converged == false`.
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Solution vector x.
    pub solution: Vector<f64>,
    /// Iterations (sweeps, descent steps) performed; 1 for elimination.
    pub iterations: usize,
    /// Final L1 stop-rule metric: the update `x - x_prev` for Gauss-Seidel,
    /// the negated gradient `b - A x` for steepest descent, and `A x - b`
    /// for elimination.
    pub residual_norm: f64,
    /// Whether the stop rule was met. For elimination, `false` means some
    /// pivot stayed below the pivot tolerance.
    pub converged: bool,
    /// Wall-clock time taken.
    pub wall_time: Duration,
    /// Per-iteration convergence history.
    pub convergence_history: Vec<ConvergenceInfo>,
    /// Algorithm used.
    pub algorithm: Algorithm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_gauss_seidel() {
        let c = SolverConfig::default();
        assert_eq!(c.algorithm, Algorithm::GaussSeidel);
        assert_eq!(c.tolerance, 1e-7);
        assert_eq!(c.max_iterations, Some(100_000));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn reference_caps_per_algorithm() {
        assert_eq!(
            SolverConfig::for_algorithm(Algorithm::SteepestDescent).max_iterations,
            Some(5000)
        );
        let ge = SolverConfig::for_algorithm(Algorithm::GaussianElimination);
        assert_eq!(ge.max_iterations, None);
        assert_eq!(ge.pivot_tolerance, 0.01);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let bad_tol = SolverConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_tol.validate(),
            Err(SolverError::InvalidConfig { name: "tolerance", .. })
        ));

        let zero_cap = SolverConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            zero_cap.validate(),
            Err(SolverError::InvalidConfig { name: "max_iterations", .. })
        ));

        let nan_pivot = SolverConfig {
            pivot_tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(nan_pivot.build_engine().is_err());

        let uncapped = SolverConfig {
            max_iterations: None,
            ..Default::default()
        };
        assert!(uncapped.validate().is_ok());
    }

    #[test]
    fn build_engine_matches_algorithm() {
        for algorithm in Algorithm::ALL {
            let engine = SolverConfig::for_algorithm(algorithm).build_engine().unwrap();
            assert_eq!(engine.algorithm(), algorithm);
        }
    }

    #[test]
    fn algorithm_display_and_serde_agree() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{algorithm}\""));
        }
        assert!(Algorithm::GaussSeidel.is_iterative());
        assert!(!Algorithm::GaussianElimination.is_iterative());
    }

    #[test]
    fn config_serde_roundtrip_with_defaults() {
        let c = SolverConfig {
            algorithm: Algorithm::SteepestDescent,
            tolerance: 1e-9,
            max_iterations: None,
            pivot_tolerance: 0.01,
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);

        let partial: SolverConfig =
            serde_json::from_str(r#"{ "algorithm": "gaussian-elimination" }"#).unwrap();
        assert_eq!(partial.algorithm, Algorithm::GaussianElimination);
        assert_eq!(partial.tolerance, DEFAULT_TOLERANCE);
    }
}
