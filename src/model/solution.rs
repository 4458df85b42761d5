//! Candidate solution: one selected item per class.

use super::DataSet;
use crate::error::MmkpError;
use rand::Rng;
use std::cmp::Ordering;

/// A candidate MMKP solution.
///
/// The selection vector holds exactly one item index per class, so the
/// multiple-choice constraint holds by construction. Profit, per-dimension
/// usage, and the feasibility flag are kept in sync with the selection:
/// [`select`](Self::select) updates them incrementally and
/// [`evaluate`](Self::evaluate) recomputes them from scratch.
///
/// Solutions store only indices; item data always comes from the
/// [`DataSet`] passed to each operation.
///
/// With the `serde` feature a solution serializes, but it does not
/// deserialize: cached profit and usage could disagree with the selection.
/// Rebuild a stored selection with [`from_selection`](Self::from_selection).
///
/// ```compile_fail
/// fn owned<T: serde::de::DeserializeOwned>() {}
/// owned::<u_mmkp::model::Solution>();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    selection: Vec<usize>,
    profit: f64,
    usage: Vec<f64>,
    feasible: bool,
}

impl Solution {
    /// Creates an evaluated solution selecting item 0 of every class.
    pub fn new(data: &DataSet) -> Self {
        let mut sol = Self {
            selection: vec![0; data.class_count()],
            profit: 0.0,
            usage: vec![0.0; data.dimensions()],
            feasible: false,
        };
        sol.evaluate(data);
        sol
    }

    /// Creates an evaluated solution from an explicit selection vector.
    pub fn from_selection(data: &DataSet, selection: Vec<usize>) -> Result<Self, MmkpError> {
        data.check_selection(&selection)?;
        let mut sol = Self {
            selection,
            profit: 0.0,
            usage: vec![0.0; data.dimensions()],
            feasible: false,
        };
        sol.evaluate(data);
        Ok(sol)
    }

    /// Evaluated solution from a selection the caller guarantees is valid.
    pub(crate) fn from_valid_selection(data: &DataSet, selection: Vec<usize>) -> Self {
        debug_assert!(data.check_selection(&selection).is_ok());
        let mut sol = Self {
            selection,
            profit: 0.0,
            usage: vec![0.0; data.dimensions()],
            feasible: false,
        };
        sol.evaluate(data);
        sol
    }

    /// Creates an evaluated solution with a uniformly random item per class.
    pub fn random<R: Rng>(data: &DataSet, rng: &mut R) -> Self {
        let selection = (0..data.class_count())
            .map(|c| rng.random_range(0..data.items_in(c)))
            .collect();
        let mut sol = Self {
            selection,
            profit: 0.0,
            usage: vec![0.0; data.dimensions()],
            feasible: false,
        };
        sol.evaluate(data);
        sol
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Whether the solution covers no classes.
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// The selection vector.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Index of the item selected in class `c`.
    pub fn selected(&self, c: usize) -> usize {
        self.selection[c]
    }

    /// Total profit of the selected items.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Per-dimension usage of the selected items.
    pub fn usage(&self) -> &[f64] {
        &self.usage
    }

    /// Usage along dimension `d`.
    pub fn usage_at(&self, d: usize) -> f64 {
        self.usage[d]
    }

    /// Whether usage is within capacity in every dimension.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Selects `item` in class `c`, updating profit, usage and feasibility.
    ///
    /// Rejects out-of-range class or item indices.
    pub fn select(&mut self, data: &DataSet, c: usize, item: usize) -> Result<(), MmkpError> {
        if c >= self.selection.len() {
            return Err(MmkpError::ClassOutOfRange {
                class: c,
                classes: self.selection.len(),
            });
        }
        if item >= data.items_in(c) {
            return Err(MmkpError::ItemOutOfRange {
                class: c,
                item,
                items: data.items_in(c),
            });
        }
        self.swap(data, c, item);
        Ok(())
    }

    /// Unchecked variant of [`select`](Self::select) for operators that
    /// already hold a valid index.
    pub(crate) fn swap(&mut self, data: &DataSet, c: usize, item: usize) {
        let old = self.selection[c];
        if old == item {
            return;
        }
        let (from, to) = (data.item(c, old), data.item(c, item));
        self.profit += to.profit() - from.profit();
        for (d, u) in self.usage.iter_mut().enumerate() {
            *u += to.cost(d) - from.cost(d);
        }
        self.selection[c] = item;
        self.feasible = within(&self.usage, data.capacities());
    }

    /// Recomputes profit, usage and feasibility in one pass over the
    /// classes.
    pub fn evaluate(&mut self, data: &DataSet) {
        self.usage.clear();
        self.usage.resize(data.dimensions(), 0.0);
        self.profit = 0.0;
        for (c, &i) in self.selection.iter().enumerate() {
            let item = data.item(c, i);
            self.profit += item.profit();
            for (u, &cost) in self.usage.iter_mut().zip(item.costs()) {
                *u += cost;
            }
        }
        self.feasible = within(&self.usage, data.capacities());
    }

    /// Competitive comparison: a feasible solution beats an infeasible one,
    /// otherwise the higher profit wins.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.feasible, other.feasible) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => self
                .profit
                .partial_cmp(&other.profit)
                .unwrap_or(Ordering::Equal),
        }
    }

    /// Whether `self` strictly beats `other` under [`compare`](Self::compare).
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

fn within(usage: &[f64], capacities: &[f64]) -> bool {
    usage.iter().zip(capacities).all(|(u, cap)| u <= cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> DataSet {
        DataSet::from_items(
            vec![
                vec![(3.0, vec![2.0, 1.0]), (7.0, vec![6.0, 2.0])],
                vec![(1.0, vec![1.0, 1.0]), (4.0, vec![3.0, 5.0]), (2.0, vec![0.0, 0.0])],
            ],
            vec![8.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_selects_first_items() {
        let d = data();
        let sol = Solution::new(&d);
        assert_eq!(sol.selection(), &[0, 0]);
        assert_eq!(sol.profit(), 4.0);
        assert_eq!(sol.usage(), &[3.0, 2.0]);
        assert!(sol.is_feasible());
    }

    #[test]
    fn test_select_updates_incrementally() {
        let d = data();
        let mut sol = Solution::new(&d);
        sol.select(&d, 1, 1).unwrap();
        assert_eq!(sol.profit(), 7.0);
        assert_eq!(sol.usage(), &[5.0, 6.0]);
        assert!(!sol.is_feasible());

        let mut fresh = sol.clone();
        fresh.evaluate(&d);
        assert_eq!(fresh, sol);
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let d = data();
        let mut sol = Solution::new(&d);
        assert!(matches!(
            sol.select(&d, 0, 2),
            Err(MmkpError::ItemOutOfRange { class: 0, item: 2, items: 2 })
        ));
        assert!(matches!(
            sol.select(&d, 5, 0),
            Err(MmkpError::ClassOutOfRange { .. })
        ));
        assert_eq!(sol.selection(), &[0, 0]);
    }

    #[test]
    fn test_from_selection_validates() {
        let d = data();
        assert!(Solution::from_selection(&d, vec![1, 2]).is_ok());
        assert!(Solution::from_selection(&d, vec![1]).is_err());
        assert!(Solution::from_selection(&d, vec![0, 3]).is_err());
    }

    #[test]
    fn test_random_in_bounds() {
        let d = data();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sol = Solution::random(&d, &mut rng);
            assert!(d.check_selection(sol.selection()).is_ok());
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let d = data();
        let original = Solution::new(&d);
        let mut copy = original.clone();
        copy.select(&d, 0, 1).unwrap();
        assert_eq!(original.selected(0), 0);
        assert_eq!(copy.selected(0), 1);
    }

    #[test]
    fn test_competitive_compare() {
        let d = data();
        let feasible = Solution::from_selection(&d, vec![0, 2]).unwrap();
        let infeasible = Solution::from_selection(&d, vec![1, 1]).unwrap();
        assert!(infeasible.profit() > feasible.profit());
        assert!(feasible.is_better_than(&infeasible));
        assert!(!infeasible.is_better_than(&feasible));

        let better = Solution::from_selection(&d, vec![1, 2]).unwrap();
        assert!(better.is_feasible());
        assert!(better.is_better_than(&feasible));
        assert_eq!(better.compare(&better.clone()), Ordering::Equal);
    }
}
