//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::Crossover;
use super::selection::Selection;
use crate::error::MmkpError;
use crate::repair::RepairStrategy;
use crate::search::{InitStrategy, SearchConfig};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_mmkp::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.selection, Selection::Tournament(2));
/// assert_eq!(config.crossover, Crossover::Uniform);
/// assert_eq!(config.offspring(), config.search.population_size);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mmkp::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_selection(Selection::Rank)
///     .with_crossover(Crossover::TwoPoint)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Shared settings; `population_size` is the number of chromosomes
    /// kept between generations.
    pub search: SearchConfig,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover operator over selection vectors.
    pub crossover: Crossover,

    /// Probability of applying crossover to a parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, the child is a copy of the first
    /// parent.
    pub crossover_rate: f64,

    /// Per-class probability that mutation reassigns the chosen item
    /// (0.0–1.0).
    pub mutation_rate: f64,

    /// Offspring per generation. `None` uses the population size.
    pub offspring_count: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.9,
            mutation_rate: 0.05,
            offspring_count: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.search.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.search.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.search.seed = Some(seed);
        self
    }

    /// Sets the repair strategy.
    pub fn with_repair(mut self, repair: RepairStrategy) -> Self {
        self.search.repair = repair;
        self
    }

    /// Sets the initial population strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.search.init = init;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.search.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel offspring generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.search.parallel = parallel;
        self
    }

    /// Enables or disables the final local-search polish.
    pub fn with_polish(mut self, polish: bool) -> Self {
        self.search.polish = polish;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets tournament selection with the given size.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate. Values outside [0, 1] fail
    /// [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Values outside [0, 1] fail
    /// [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the number of offspring per generation.
    pub fn with_offspring_count(mut self, n: usize) -> Self {
        self.offspring_count = Some(n);
        self
    }

    /// Offspring per generation after applying the default.
    pub fn offspring(&self) -> usize {
        self.offspring_count.unwrap_or(self.search.population_size)
    }

    /// Preset for quick runs: small population, few generations, early
    /// stop after 20 stagnant generations.
    pub fn fast() -> Self {
        Self::default()
            .with_population_size(20)
            .with_max_generations(50)
            .with_stagnation_limit(20)
    }

    /// Preset for thorough runs: large population, stronger selection.
    pub fn quality() -> Self {
        Self::default()
            .with_population_size(100)
            .with_max_generations(500)
            .with_tournament_size(3)
            .with_stagnation_limit(100)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), MmkpError> {
        self.search.validate()?;
        if self.selection == Selection::Tournament(0) {
            return Err(MmkpError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(MmkpError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        if self.offspring_count == Some(0) {
            return Err(MmkpError::InvalidConfig(
                "offspring_count must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
