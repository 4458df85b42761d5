//! Capability set shared by the population optimizers.

use super::SearchConfig;
use crate::error::MmkpError;
use crate::model::Solution;
use rand::Rng;

/// A population-based MMKP optimizer.
///
/// The generational loop itself lives in
/// [`SearchRunner`](super::SearchRunner); an optimizer only knows how to
/// build its first population and advance it by one generation.
///
/// All randomness comes from the generator passed in, so two runs with the
/// same seed are identical.
pub trait PopulationSearch {
    /// Short algorithm name, used in log records.
    fn name(&self) -> &'static str;

    /// Shared settings.
    fn search_config(&self) -> &SearchConfig;

    /// Builds and repairs the initial population and records its best
    /// member. Fails if a caller-supplied initial solution is invalid.
    fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<(), MmkpError>;

    /// Runs one generation.
    fn step<R: Rng>(&mut self, rng: &mut R);

    /// Best solution seen so far under the competitive order, or `None`
    /// before [`initialize`](Self::initialize).
    fn current_best(&self) -> Option<&Solution>;

    /// The current population.
    fn population(&self) -> &[Solution];

    /// Number of candidate evaluations performed so far.
    fn evaluations(&self) -> usize;
}
