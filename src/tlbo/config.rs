//! TLBO configuration.

use crate::error::MmkpError;
use crate::repair::RepairStrategy;
use crate::search::{InitStrategy, SearchConfig};

/// Configuration for Teaching-Learning-Based Optimization.
///
/// # Builder Pattern
///
/// ```
/// use u_mmkp::tlbo::TlboConfig;
///
/// let config = TlboConfig::default()
///     .with_population_size(40)
///     .with_classroom_size(10)
///     .with_random_teacher(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TlboConfig {
    /// Shared settings; `population_size` is the number of learners.
    pub search: SearchConfig,

    /// Draw the teacher uniformly from the best tenth of the classroom
    /// instead of always using the best learner.
    pub random_teacher: bool,

    /// Learners per classroom, each classroom with its own teacher and
    /// mean. 0 puts everyone in one classroom.
    pub classroom_size: usize,
}

impl TlboConfig {
    /// Sets the number of learners.
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

    /// Enables or disables the random teacher.
    pub fn with_random_teacher(mut self, random: bool) -> Self {
        self.random_teacher = random;
        self
    }

    /// Sets the classroom size (0 for a single classroom).
    pub fn with_classroom_size(mut self, size: usize) -> Self {
        self.classroom_size = size;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), MmkpError> {
        self.search.validate()?;
        if self.classroom_size == 1 {
            return Err(MmkpError::InvalidConfig(
                "classroom_size must be 0 or at least 2".into(),
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
        let config = TlboConfig::default();
        assert!(!config.random_teacher);
        assert_eq!(config.classroom_size, 0);
        assert_eq!(config.search, SearchConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classroom_of_one_rejected() {
        assert!(TlboConfig::default()
            .with_classroom_size(1)
            .validate()
            .is_err());
        assert!(TlboConfig::default()
            .with_classroom_size(2)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_search_errors_propagate() {
        let config = TlboConfig::default().with_max_generations(0);
        assert!(matches!(
            config.validate(),
            Err(MmkpError::InvalidConfig(_))
        ));
    }
}
