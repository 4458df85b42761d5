//! Settings shared by every population optimizer.

use super::init::InitStrategy;
use crate::error::MmkpError;
use crate::repair::RepairStrategy;

/// Parameters common to ABC, TLBO and GA.
///
/// Algorithm configs embed one `SearchConfig` and forward the shared
/// builder methods to it.
///
/// # Defaults
///
/// ```
/// use u_mmkp::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.max_generations, 60);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of individuals (food sources, learners, chromosomes).
    pub population_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a random seed; the seed used is logged at debug level.
    pub seed: Option<u64>,

    /// Repair applied to every new candidate.
    pub repair: RepairStrategy,

    /// How the initial population is built.
    pub init: InitStrategy,

    /// Generations without improvement of the best solution before
    /// stopping. 0 disables the check.
    pub stagnation_limit: usize,

    /// Whether candidates of one phase are built in parallel.
    ///
    /// Results do not depend on this flag. Without the `parallel` feature
    /// it is ignored.
    pub parallel: bool,

    /// Whether the returned best solution is polished with
    /// [`improve`](crate::repair::improve) after the last generation.
    pub polish: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_generations: 60,
            seed: None,
            repair: RepairStrategy::default(),
            init: InitStrategy::default(),
            stagnation_limit: 0,
            parallel: true,
            polish: false,
        }
    }
}

impl SearchConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the repair strategy.
    pub fn with_repair(mut self, repair: RepairStrategy) -> Self {
        self.repair = repair;
        self
    }

    /// Sets the initial population strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel candidate generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables the final local-search polish.
    pub fn with_polish(mut self, polish: bool) -> Self {
        self.polish = polish;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), MmkpError> {
        if self.population_size < 2 {
            return Err(MmkpError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(MmkpError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if let InitStrategy::Given(selections) = &self.init {
            if selections.len() > self.population_size {
                return Err(MmkpError::InvalidConfig(format!(
                    "{} initial solutions given for a population of {}",
                    selections.len(),
                    self.population_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::{ChoiceRepair, DimRepair};

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_generations, 60);
        assert_eq!(config.repair, RepairStrategy::default());
        assert_eq!(config.init, InitStrategy::Random);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.parallel);
        assert!(!config.polish);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let repair = RepairStrategy::new(ChoiceRepair::FixedSurrogate, DimRepair::MinSurrogate);
        let config = SearchConfig::default()
            .with_population_size(12)
            .with_max_generations(7)
            .with_seed(3)
            .with_repair(repair)
            .with_init(InitStrategy::Greedy)
            .with_stagnation_limit(4)
            .with_parallel(false)
            .with_polish(true);
        assert_eq!(config.population_size, 12);
        assert_eq!(config.max_generations, 7);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.repair, repair);
        assert_eq!(config.init, InitStrategy::Greedy);
        assert_eq!(config.stagnation_limit, 4);
        assert!(!config.parallel);
        assert!(config.polish);
    }

    #[test]
    fn test_validate_population_too_small() {
        let err = SearchConfig::default()
            .with_population_size(1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, MmkpError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(SearchConfig::default()
            .with_max_generations(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_too_many_given() {
        let config = SearchConfig::default()
            .with_population_size(2)
            .with_init(InitStrategy::Given(vec![vec![0], vec![0], vec![0]]));
        assert!(config.validate().is_err());
    }
}
