//! Genetic operators over MMKP selection vectors.
//!
//! A chromosome is the per-class item index vector of a [`Solution`], so
//! every operator keeps exactly one item per class by construction. Genes
//! are class choices; crossover only ever copies a choice from one of the
//! parents.
//!
//! # Crossover Operators
//!
//! - [`Crossover::Uniform`]: every class from a random parent
//! - [`Crossover::SinglePoint`]: prefix from one parent, suffix from the other
//! - [`Crossover::TwoPoint`]: a middle segment from the second parent
//!
//! # Mutation
//!
//! - [`mutate`]: per-class reassignment to a different item
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

use crate::model::{DataSet, Solution};
use rand::Rng;

/// Crossover operator for selection vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Each class inherits from either parent with equal probability.
    #[default]
    Uniform,
    /// Classes before a random cut come from the first parent.
    SinglePoint,
    /// Classes inside a random segment come from the second parent.
    TwoPoint,
}

impl Crossover {
    /// Produces one child selection from two parent selections of equal
    /// length.
    pub fn apply<R: Rng>(&self, first: &[usize], second: &[usize], rng: &mut R) -> Vec<usize> {
        let n = first.len();
        debug_assert_eq!(n, second.len(), "parents must have equal length");
        if n < 2 {
            return first.to_vec();
        }

        match self {
            Crossover::Uniform => first
                .iter()
                .zip(second)
                .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
                .collect(),
            Crossover::SinglePoint => {
                let cut = rng.random_range(1..n);
                first[..cut].iter().chain(&second[cut..]).copied().collect()
            }
            Crossover::TwoPoint => {
                let (start, end) = random_segment(n, rng);
                let mut child = first.to_vec();
                child[start..=end].copy_from_slice(&second[start..=end]);
                child
            }
        }
    }
}

/// Mutation: each class with more than one item is reassigned, with
/// probability `rate`, to a uniformly chosen different item. Profit and
/// usage are updated incrementally. Returns the number of reassigned
/// classes.
///
/// Feasibility is not restored; callers repair afterwards.
pub fn mutate<R: Rng>(data: &DataSet, sol: &mut Solution, rate: f64, rng: &mut R) -> usize {
    let mut changed = 0;
    for c in 0..data.class_count() {
        let items = data.items_in(c);
        if items < 2 || !rng.random_bool(rate) {
            continue;
        }
        let current = sol.selected(c);
        let mut item = rng.random_range(0..items - 1);
        if item >= current {
            item += 1;
        }
        sol.swap(data, c, item);
        changed += 1;
    }
    changed
}

/// Random segment `[start, end]` with `start <= end < n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> DataSet {
        DataSet::from_items(
            vec![
                vec![(1.0, vec![1.0]), (2.0, vec![2.0]), (3.0, vec![3.0])],
                vec![(4.0, vec![1.0])],
                vec![(5.0, vec![2.0]), (6.0, vec![1.0])],
                vec![(7.0, vec![4.0]), (8.0, vec![2.0]), (9.0, vec![0.0])],
            ],
            vec![10.0],
        )
        .unwrap()
    }

    #[test]
    fn test_crossover_inherits_per_class() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = [0, 0, 0, 0];
        let b = [2, 0, 1, 2];
        for op in [Crossover::Uniform, Crossover::SinglePoint, Crossover::TwoPoint] {
            for _ in 0..50 {
                let child = op.apply(&a, &b, &mut rng);
                assert_eq!(child.len(), 4);
                for c in 0..4 {
                    assert!(child[c] == a[c] || child[c] == b[c]);
                }
            }
        }
    }

    #[test]
    fn test_single_point_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = [0, 0, 0, 0];
        let b = [1, 1, 1, 1];
        for _ in 0..50 {
            let child = Crossover::SinglePoint.apply(&a, &b, &mut rng);
            assert_eq!(child[0], 0);
            assert_eq!(child[3], 1);
            assert!(child.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_two_point_segment_is_contiguous() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = [0; 6];
        let b = [1; 6];
        for _ in 0..50 {
            let child = Crossover::TwoPoint.apply(&a, &b, &mut rng);
            let ones: Vec<usize> = (0..6).filter(|&i| child[i] == 1).collect();
            assert!(!ones.is_empty());
            assert_eq!(ones.last().unwrap() - ones[0] + 1, ones.len());
        }
    }

    #[test]
    fn test_identical_parents() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = [2, 0, 1, 1];
        for op in [Crossover::Uniform, Crossover::SinglePoint, Crossover::TwoPoint] {
            assert_eq!(op.apply(&a, &a, &mut rng), a.to_vec());
        }
    }

    #[test]
    fn test_mutate_full_rate_changes_every_free_class() {
        let d = data();
        let mut rng = StdRng::seed_from_u64(4);
        let mut sol = Solution::from_selection(&d, vec![0, 0, 0, 0]).unwrap();
        let changed = mutate(&d, &mut sol, 1.0, &mut rng);
        assert_eq!(changed, 3);
        assert_ne!(sol.selected(0), 0);
        assert_eq!(sol.selected(1), 0);
        assert_eq!(sol.selected(2), 1);
        assert_ne!(sol.selected(3), 0);

        let mut fresh = sol.clone();
        fresh.evaluate(&d);
        assert!((fresh.profit() - sol.profit()).abs() < 1e-9);
        assert_eq!(fresh.usage(), sol.usage());
    }

    #[test]
    fn test_mutate_zero_rate_is_identity() {
        let d = data();
        let mut rng = StdRng::seed_from_u64(5);
        let mut sol = Solution::from_selection(&d, vec![2, 0, 1, 2]).unwrap();
        let before = sol.clone();
        assert_eq!(mutate(&d, &mut sol, 0.0, &mut rng), 0);
        assert_eq!(sol, before);
    }

    #[test]
    fn test_single_item_class_never_mutated() {
        let d = data();
        let mut rng = StdRng::seed_from_u64(6);
        let mut sol = Solution::from_selection(&d, vec![0, 0, 0, 0]).unwrap();
        for _ in 0..100 {
            mutate(&d, &mut sol, 0.8, &mut rng);
            assert_eq!(sol.selected(1), 0);
        }
    }
}
