//! TLBO run entry points.

use super::classroom::Tlbo;
use super::config::TlboConfig;
use crate::error::MmkpError;
use crate::model::DataSet;
use crate::search::{SearchResult, SearchRunner};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Executes a complete TLBO run.
pub struct TlboRunner;

impl TlboRunner {
    /// Runs the optimizer for the configured budget.
    pub fn run(data: &DataSet, config: &TlboConfig) -> Result<SearchResult, MmkpError> {
        Self::run_with_cancel(data, config, None)
    }

    /// Runs the optimizer with an optional cancellation token.
    pub fn run_with_cancel(
        data: &DataSet,
        config: &TlboConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, MmkpError> {
        let mut tlbo = Tlbo::new(data, config.clone())?;
        let mut result = SearchRunner::run_with_cancel(&mut tlbo, cancel)?;
        if config.search.polish {
            result.polish(data);
        }
        Ok(result)
    }
}
