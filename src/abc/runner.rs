//! ABC run entry points.

use super::colony::Abc;
use super::config::AbcConfig;
use crate::error::MmkpError;
use crate::model::DataSet;
use crate::search::{SearchResult, SearchRunner};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Executes a complete ABC run.
///
/// # Usage
///
/// ```
/// use u_mmkp::abc::{AbcConfig, AbcRunner};
/// use u_mmkp::model::DataSet;
///
/// let data = DataSet::from_items(
///     vec![
///         vec![(4.0, vec![3.0]), (9.0, vec![8.0])],
///         vec![(2.0, vec![1.0]), (6.0, vec![4.0])],
///     ],
///     vec![10.0],
/// )
/// .unwrap();
///
/// let config = AbcConfig::default().with_max_generations(10).with_seed(42);
/// let result = AbcRunner::run(&data, &config).unwrap();
/// assert!(result.feasible);
/// assert_eq!(result.best_profit, 11.0);
/// ```
pub struct AbcRunner;

impl AbcRunner {
    /// Runs the colony for the configured budget.
    pub fn run(data: &DataSet, config: &AbcConfig) -> Result<SearchResult, MmkpError> {
        Self::run_with_cancel(data, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    pub fn run_with_cancel(
        data: &DataSet,
        config: &AbcConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, MmkpError> {
        let mut abc = Abc::new(data, config.clone())?;
        let mut result = SearchRunner::run_with_cancel(&mut abc, cancel)?;
        if config.search.polish {
            result.polish(data);
        }
        Ok(result)
    }
}
