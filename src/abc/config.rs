//! ABC configuration.

use crate::error::MmkpError;
use crate::repair::RepairStrategy;
use crate::search::{InitStrategy, SearchConfig};

/// Configuration for the Artificial Bee Colony.
///
/// # Builder Pattern
///
/// ```
/// use u_mmkp::abc::AbcConfig;
///
/// let config = AbcConfig::default()
///     .with_population_size(40)
///     .with_trial_limit(8)
///     .with_flip_rate(0.2)
///     .with_seed(7);
/// assert_eq!(config.search.population_size, 40);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbcConfig {
    /// Shared settings; `population_size` is the number of food sources.
    pub search: SearchConfig,

    /// Failed improvement attempts after which a scout abandons a source.
    pub trial_limit: usize,

    /// Per-item probability that a neighbor move touches the item's bit
    /// (0.0–1.0).
    pub flip_rate: f64,

    /// Number of onlooker bees per generation. `None` uses the number of
    /// food sources.
    pub onlooker_count: Option<usize>,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            trial_limit: 5,
            flip_rate: 0.3,
            onlooker_count: None,
        }
    }
}

impl AbcConfig {
    /// Sets the number of food sources.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.search.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.search.max_generations = n;
        self
    }

    /// Sets the random seed.
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

    /// Enables or disables parallel candidate generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.search.parallel = parallel;
        self
    }

    /// Enables or disables the final local-search polish.
    pub fn with_polish(mut self, polish: bool) -> Self {
        self.search.polish = polish;
        self
    }

    /// Sets the scout trial limit.
    pub fn with_trial_limit(mut self, limit: usize) -> Self {
        self.trial_limit = limit;
        self
    }

    /// Sets the neighbor flip rate. Values outside [0, 1] fail
    /// [`validate`](Self::validate).
    pub fn with_flip_rate(mut self, rate: f64) -> Self {
        self.flip_rate = rate;
        self
    }

    /// Sets the number of onlooker bees.
    pub fn with_onlooker_count(mut self, n: usize) -> Self {
        self.onlooker_count = Some(n);
        self
    }

    /// Onlooker bees per generation after applying the default.
    pub fn onlookers(&self) -> usize {
        self.onlooker_count.unwrap_or(self.search.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), MmkpError> {
        self.search.validate()?;
        if self.trial_limit == 0 {
            return Err(MmkpError::InvalidConfig(
                "trial_limit must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.flip_rate) {
            return Err(MmkpError::InvalidConfig(format!(
                "flip_rate must be within [0, 1], got {}",
                self.flip_rate
            )));
        }
        if self.onlooker_count == Some(0) {
            return Err(MmkpError::InvalidConfig(
                "onlooker_count must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AbcConfig::default();
        assert_eq!(config.trial_limit, 5);
        assert!((config.flip_rate - 0.3).abs() < 1e-12);
        assert_eq!(config.onlookers(), config.search.population_size);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_forwards_search_settings() {
        let config = AbcConfig::default()
            .with_population_size(10)
            .with_max_generations(3)
            .with_stagnation_limit(2)
            .with_parallel(false)
            .with_onlooker_count(4);
        assert_eq!(config.search.population_size, 10);
        assert_eq!(config.search.max_generations, 3);
        assert_eq!(config.search.stagnation_limit, 2);
        assert!(!config.search.parallel);
        assert_eq!(config.onlookers(), 4);
    }

    #[test]
    fn test_out_of_range_flip_rate_rejected() {
        for rate in [7.0, -2.0, f64::NAN] {
            let config = AbcConfig::default().with_flip_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(MmkpError::InvalidConfig(_))
            ));
        }
        assert!(AbcConfig::default().with_flip_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AbcConfig::default().with_trial_limit(0).validate().is_err());
        assert!(AbcConfig::default().with_onlooker_count(0).validate().is_err());
        assert!(AbcConfig::default()
            .with_population_size(1)
            .validate()
            .is_err());

        let mut config = AbcConfig::default();
        config.flip_rate = 2.0;
        assert!(config.validate().is_err());
    }
}
