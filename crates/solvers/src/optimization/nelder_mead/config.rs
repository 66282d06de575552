use thiserror::Error;

/// Configuration for the Nelder–Mead solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    max_evals: usize,
    x_abs_tol: f64,
    f_abs_tol: f64,
}

/// Errors that can occur when validating a Nelder–Mead solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("f_abs_tol must be finite and non-negative")]
    FAbs,
}

impl Default for Config {
    fn default() -> Self {
        Self::scaled(1)
    }
}

impl Config {
    /// Iteration and evaluation budget per solver variable.
    const BUDGET_PER_DIM: usize = 200;

    /// Default absolute tolerance on both x and the objective.
    const TOL: f64 = 1e-9;

    /// Creates a new config with validated tolerances.
    ///
    /// The search converges once every simplex vertex is within `x_abs_tol`
    /// of the best vertex in each coordinate and every objective is within
    /// `f_abs_tol` of the best objective.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(
        max_iters: usize,
        max_evals: usize,
        x_abs_tol: f64,
        f_abs_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }
        if !f_abs_tol.is_finite() || f_abs_tol < 0.0 {
            return Err(ConfigError::FAbs);
        }

        Ok(Self {
            max_iters,
            max_evals,
            x_abs_tol,
            f_abs_tol,
        })
    }

    /// Creates a config sized for `dims` solver variables.
    ///
    /// Both the iteration and evaluation limits are `200 · dims`, and both
    /// tolerances are `1e-9`.
    #[must_use]
    pub fn scaled(dims: usize) -> Self {
        let budget = Self::BUDGET_PER_DIM * dims.max(1);
        Self {
            max_iters: budget,
            max_evals: budget,
            x_abs_tol: Self::TOL,
            f_abs_tol: Self::TOL,
        }
    }

    /// Returns a copy with the given tolerance on both x and the objective.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is negative or non-finite.
    pub fn with_tol(self, tol: f64) -> Result<Self, ConfigError> {
        Self::new(self.max_iters, self.max_evals, tol, tol)
    }

    /// Returns the maximum number of simplex iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the maximum number of objective evaluations.
    #[must_use]
    pub fn max_evals(&self) -> usize {
        self.max_evals
    }

    /// Returns the absolute tolerance for x convergence.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    /// Returns the absolute tolerance for objective convergence.
    #[must_use]
    pub fn f_abs_tol(&self) -> f64 {
        self.f_abs_tol
    }
}
