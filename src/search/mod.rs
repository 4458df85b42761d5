//! Population search framework shared by ABC, TLBO and GA.
//!
//! # Key Types
//!
//! - [`SearchConfig`]: population size, budget, seed, repair and
//!   initialization strategy
//! - [`PopulationSearch`]: the `initialize` / `step` / `current_best`
//!   capability set every optimizer implements
//! - [`SearchRunner`]: the generational loop (history, stagnation,
//!   cancellation, logging)
//! - [`SearchResult`]: best solution plus run statistics
//! - [`InitStrategy`]: initial population generators
//!
//! # Determinism
//!
//! A run is fully determined by its instance, configuration and seed.
//! Candidates of one phase are built from a snapshot of the population,
//! each on its own random stream drawn from the master generator in member
//! order; results are then applied sequentially. Enabling `parallel`
//! changes the speed of a run, never its outcome.

mod config;
mod init;
mod runner;
pub(crate) mod streams;
mod types;

pub use config::SearchConfig;
pub use init::InitStrategy;
pub use runner::{SearchResult, SearchRunner};
pub use types::PopulationSearch;

pub(crate) use init::initial_population;

use crate::error::MmkpError;
use crate::model::{DataSet, Solution};
use rand::Rng;

/// Replaces `best` with `candidate` if the candidate wins under the
/// competitive order. Returns whether it did.
pub(crate) fn offer(best: &mut Option<Solution>, candidate: &Solution) -> bool {
    let wins = match best {
        Some(current) => candidate.is_better_than(current),
        None => true,
    };
    if wins {
        *best = Some(candidate.clone());
    }
    wins
}

/// Best member of a non-empty population under the competitive order;
/// the first one wins on ties.
pub(crate) fn best_of(population: &[Solution]) -> Option<&Solution> {
    population
        .iter()
        .reduce(|best, sol| if sol.is_better_than(best) { sol } else { best })
}

/// Rejects instances no optimizer can work on.
pub(crate) fn check_instance(data: &DataSet) -> Result<(), MmkpError> {
    if data.class_count() == 0 || data.dimensions() == 0 {
        return Err(MmkpError::EmptyInstance);
    }
    Ok(())
}

/// Uniform index in `0..n` different from `k` (`n >= 2`).
pub(crate) fn other_than<R: Rng>(k: usize, n: usize, rng: &mut R) -> usize {
    let j = rng.random_range(0..n - 1);
    if j >= k {
        j + 1
    } else {
        j
    }
}

/// Roulette wheel over non-negative weights. Falls back to a uniform pick
/// when every weight is zero.
pub(crate) fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }
    let mut spin = rng.random_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        if spin < w {
            return i;
        }
        spin -= w;
    }
    n - 1
}
