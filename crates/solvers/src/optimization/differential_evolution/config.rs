use thiserror::Error;

/// Configuration for the differential evolution solver.
///
/// Built with [`Config::new`] and refined with the `with_*` methods:
///
/// ```
/// use hyperfit_solvers::optimization::differential_evolution::Config;
///
/// let config = Config::new(200, 15, 1e-6)?
///     .with_seed(7)
///     .with_mutation(0.4, 0.9)?
///     .with_parallel(false);
/// # Ok::<(), hyperfit_solvers::optimization::differential_evolution::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    pop_factor: usize,
    tol: f64,
    atol: f64,
    mutation: (f64, f64),
    recombination: f64,
    seed: u64,
    polish: bool,
    parallel: bool,
}

/// Errors that can occur when validating a differential evolution config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("population factor must be at least 1")]
    ZeroPopulation,

    #[error("tol must be finite and non-negative")]
    Tol,

    #[error("atol must be finite and non-negative")]
    ATol,

    #[error("mutation must satisfy 0 <= low <= high < 2")]
    Mutation,

    #[error("recombination must lie in [0, 1]")]
    Recombination,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 500,
            pop_factor: 20,
            tol: 1e-9,
            atol: 0.0,
            mutation: (0.5, 1.0),
            recombination: 0.7,
            seed: 0,
            polish: true,
            parallel: true,
        }
    }
}

impl Config {
    /// Smallest population the `best1bin` strategy is run with.
    const MIN_POPULATION: usize = 5;

    /// Creates a config with the given generation limit, population factor
    /// and relative convergence tolerance.
    ///
    /// The remaining settings take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if `pop_factor` is zero or `tol` is negative or
    /// non-finite.
    pub fn new(max_iters: usize, pop_factor: usize, tol: f64) -> Result<Self, ConfigError> {
        if pop_factor == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Tol);
        }

        Ok(Self {
            max_iters,
            pop_factor,
            tol,
            ..Self::default()
        })
    }

    /// Sets the absolute convergence tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `atol` is negative or non-finite.
    pub fn with_atol(self, atol: f64) -> Result<Self, ConfigError> {
        if !atol.is_finite() || atol < 0.0 {
            return Err(ConfigError::ATol);
        }
        Ok(Self { atol, ..self })
    }

    /// Sets the dither range for the mutation constant.
    ///
    /// A new mutation constant is drawn uniformly from `[low, high)` each
    /// generation. Pass `low == high` for a fixed constant.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 <= low <= high < 2`.
    pub fn with_mutation(self, low: f64, high: f64) -> Result<Self, ConfigError> {
        if !(0.0..2.0).contains(&low) || !(0.0..2.0).contains(&high) || low > high {
            return Err(ConfigError::Mutation);
        }
        Ok(Self {
            mutation: (low, high),
            ..self
        })
    }

    /// Sets the crossover probability.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 <= recombination <= 1`.
    pub fn with_recombination(self, recombination: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&recombination) {
            return Err(ConfigError::Recombination);
        }
        Ok(Self {
            recombination,
            ..self
        })
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Enables or disables the final Nelder–Mead polish.
    #[must_use]
    pub fn with_polish(self, polish: bool) -> Self {
        Self { polish, ..self }
    }

    /// Enables or disables parallel evaluation of each generation.
    #[must_use]
    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    /// Returns the maximum number of generations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the population factor.
    #[must_use]
    pub fn pop_factor(&self) -> usize {
        self.pop_factor
    }

    /// Returns the population size used for `dims` solver variables.
    #[must_use]
    pub fn population_size(&self, dims: usize) -> usize {
        (self.pop_factor * dims).max(Self::MIN_POPULATION)
    }

    /// Returns the relative convergence tolerance.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the absolute convergence tolerance.
    #[must_use]
    pub fn atol(&self) -> f64 {
        self.atol
    }

    /// Returns the mutation dither range.
    #[must_use]
    pub fn mutation(&self) -> (f64, f64) {
        self.mutation
    }

    /// Returns the crossover probability.
    #[must_use]
    pub fn recombination(&self) -> f64 {
        self.recombination
    }

    /// Returns the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns `true` if the best member is polished with Nelder–Mead.
    #[must_use]
    pub fn polish(&self) -> bool {
        self.polish
    }

    /// Returns `true` if generations are evaluated in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}
