//! GA run entry points.
//!
//! [`GaRunner`] wraps the whole evolutionary process:
//! initialization → selection → crossover → mutation → repair → survival.

use super::config::GaConfig;
use super::evolution::Ga;
use crate::error::MmkpError;
use crate::model::DataSet;
use crate::search::{SearchResult, SearchRunner};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_mmkp::ga::{GaConfig, GaRunner};
/// use u_mmkp::model::DataSet;
///
/// let data = DataSet::from_items(
///     vec![
///         vec![(3.0, vec![2.0, 1.0]), (7.0, vec![6.0, 6.0])],
///         vec![(5.0, vec![3.0, 3.0]), (1.0, vec![1.0, 1.0])],
///     ],
///     vec![9.0, 8.0],
/// )
/// .unwrap();
///
/// let config = GaConfig::default().with_max_generations(20).with_seed(42);
/// let result = GaRunner::run(&data, &config).unwrap();
/// assert!(result.feasible);
/// assert_eq!(result.best_profit, 8.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Fails before any generation runs if the configuration is invalid or
    /// the instance has no classes or dimensions.
    pub fn run(data: &DataSet, config: &GaConfig) -> Result<SearchResult, MmkpError> {
        Self::run_with_cancel(data, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best solution found so
    /// far.
    pub fn run_with_cancel(
        data: &DataSet,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, MmkpError> {
        let mut ga = Ga::new(data, config.clone())?;
        let mut result = SearchRunner::run_with_cancel(&mut ga, cancel)?;
        if config.search.polish {
            result.polish(data);
        }
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
