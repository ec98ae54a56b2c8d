//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::operators::Crossover;
use super::selection::Selection;
use super::types::Direction;
use crate::error::ConfigError;

/// Configuration for a [`Simulation`](super::Simulation).
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.num_parents, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::StochasticUniversal)
///     .with_crossover(Crossover::Uniform)
///     .with_mutation_rate(0.02)
///     .with_elitism(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Hard cap on the number of generations.
    ///
    /// The simulation finishes after evaluating generation `max_generations`.
    pub max_generations: usize,

    /// Parents selected per generation; also the elite count when
    /// [`elitism`](Self::elitism) is on.
    pub num_parents: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination strategy.
    pub crossover: Crossover,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether the best `num_parents` individuals pass unchanged into the
    /// next generation.
    ///
    /// "Best" follows [`direction`](Self::direction): under
    /// [`Direction::Minimize`] the elites are the lowest fitness values.
    pub elitism: bool,

    /// Whether higher or lower fitness is better.
    pub direction: Direction,

    /// Keep every superseded population in the simulation history.
    ///
    /// Memory grows with `population_size × generations`; off by default.
    pub keep_history: bool,

    /// Evaluate fitness in parallel with rayon.
    ///
    /// Only has an effect when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            num_parents: 10,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation_rate: 0.01,
            elitism: false,
            direction: Direction::default(),
            keep_history: false,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of parents selected per generation.
    pub fn with_num_parents(mut self, n: usize) -> Self {
        self.num_parents = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Enables or disables population history.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and sets the selection strategy from its identifier
    /// (`"rws"`, `"sus"`, ...).
    pub fn with_selection_name(self, name: &str) -> Result<Self, ConfigError> {
        Ok(self.with_selection(name.parse()?))
    }

    /// Parses and sets the crossover strategy from its identifier
    /// (`"onepoint"`, `"multipoint"`, `"uniform"`).
    pub fn with_crossover_name(self, name: &str) -> Result<Self, ConfigError> {
        Ok(self.with_crossover(name.parse()?))
    }

    /// Number of individuals carried over unchanged each generation.
    pub fn elite_count(&self) -> usize {
        if self.elitism {
            self.num_parents.min(self.population_size)
        } else {
            0
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 1 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.num_parents == 0 {
            return Err(ConfigError::NoParents);
        }
        if self.elitism && self.num_parents >= self.population_size {
            return Err(ConfigError::ElitesFillPopulation);
        }
        Ok(())
    }
}
