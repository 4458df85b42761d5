//! Parent selection strategies for the GA.
//!
//! All strategies rank chromosomes under the competitive order: feasible
//! before infeasible, then higher profit.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::model::Solution;
use crate::search::roulette;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_mmkp::ga::Selection;
///
/// // Binary tournament (light pressure)
/// let sel = Selection::Tournament(2);
///
/// // Profit-proportionate
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` chromosomes at random (with replacement), keep the best.
    ///
    /// Higher `k` = stronger selection pressure.
    Tournament(usize),

    /// Profit-proportionate selection. Infeasible chromosomes get weight
    /// 0; if no chromosome is feasible the pick is uniform.
    Roulette,

    /// Linear ranking: the best of `n` chromosomes has weight `n`, the
    /// worst weight 1.
    ///
    /// # Complexity
    /// O(n log n) per selection (sort)
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(2)
    }
}

impl Selection {
    /// Selects a parent index from a non-empty population.
    pub fn select<R: Rng>(&self, population: &[Solution], rng: &mut R) -> usize {
        let n = population.len();
        if n <= 1 {
            return 0;
        }
        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => {
                let weights: Vec<f64> = population
                    .iter()
                    .map(|s| if s.is_feasible() { s.profit() } else { 0.0 })
                    .collect();
                roulette(&weights, rng)
            }
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<R: Rng>(population: &[Solution], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].is_better_than(&population[best]) {
            best = idx;
        }
    }
    best
}

fn rank<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[b].compare(&population[a]));

    // position 0 (best) gets weight n
    let weights: Vec<f64> = (0..n).map(|pos| (n - pos) as f64).collect();
    order[roulette(&weights, rng)]
}
