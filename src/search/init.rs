//! Initial population generators.

use super::streams::map_members;
use crate::error::MmkpError;
use crate::model::{DataSet, Solution};
use crate::repair::Toolkit;
use rand::Rng;

/// Attempts per member before [`InitStrategy::Distinct`] accepts duplicates.
const DISTINCT_RETRIES: usize = 20;

/// How the initial population is built. Every member is repaired with the
/// search's repair strategy.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitStrategy {
    /// Uniformly random item per class.
    #[default]
    Random,
    /// Random, rejecting selections already in the population. After a
    /// bounded number of attempts duplicates are accepted.
    Distinct,
    /// Randomized greedy: each member scores items on a random subset of
    /// dimensions with a randomly picked rule (profit per use, noisy profit
    /// per use, profit, or random) and takes the best item per class.
    Greedy,
    /// Caller-supplied selection vectors, validated against the instance.
    /// Remaining slots are filled randomly.
    Given(Vec<Vec<usize>>),
}

/// Builds `size` repaired solutions.
pub(crate) fn initial_population<R: Rng>(
    toolkit: &Toolkit<'_>,
    init: &InitStrategy,
    size: usize,
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<Solution>, MmkpError> {
    let data = toolkit.data();
    let population = match init {
        InitStrategy::Random => map_members(rng, size, parallel, |_, r| {
            let mut sol = Solution::random(data, r);
            let _ = toolkit.repair(&mut sol, r);
            sol
        }),
        InitStrategy::Greedy => map_members(rng, size, parallel, |_, r| {
            let mut sol = greedy(data, r);
            let _ = toolkit.repair(&mut sol, r);
            sol
        }),
        InitStrategy::Distinct => {
            let mut population: Vec<Solution> = Vec::with_capacity(size);
            let mut attempts = 0;
            while population.len() < size {
                let mut sol = Solution::random(data, rng);
                let _ = toolkit.repair(&mut sol, rng);
                attempts += 1;
                let duplicate = population
                    .iter()
                    .any(|p| p.selection() == sol.selection());
                if !duplicate || attempts > DISTINCT_RETRIES * size {
                    population.push(sol);
                }
            }
            population
        }
        InitStrategy::Given(selections) => {
            let mut population = Vec::with_capacity(size);
            for selection in selections.iter().take(size) {
                let mut sol = Solution::from_selection(data, selection.clone())?;
                let _ = toolkit.repair(&mut sol, rng);
                population.push(sol);
            }
            while population.len() < size {
                let mut sol = Solution::random(data, rng);
                let _ = toolkit.repair(&mut sol, rng);
                population.push(sol);
            }
            population
        }
    };
    Ok(population)
}

/// One randomized greedy construction.
fn greedy<R: Rng>(data: &DataSet, rng: &mut R) -> Solution {
    let dims = data.dimensions();
    let amount = rng.random_range(1..=dims);
    let subset = rand::seq::index::sample(rng, dims, amount).into_vec();
    let rule = rng.random_range(0..4);

    let selection = (0..data.class_count())
        .map(|c| {
            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (i, item) in data.class(c).iter().enumerate() {
                let use_ = item.mean_use(&subset);
                let score = match rule {
                    0 => per_use(item.profit(), use_),
                    1 => per_use(item.profit() * rng.random::<f64>(), use_),
                    2 => item.profit(),
                    _ => rng.random::<f64>(),
                };
                if score > best_score {
                    best = i;
                    best_score = score;
                }
            }
            best
        })
        .collect();
    Solution::from_valid_selection(data, selection)
}

fn per_use(profit: f64, use_: f64) -> f64 {
    if use_ > 0.0 {
        profit / use_
    } else {
        f64::INFINITY
    }
}
