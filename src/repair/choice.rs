//! Multiple-choice repair: one item per class from a draft.

use crate::model::{DataSet, Draft, Item, Solution};
use rand::Rng;
use std::cmp::Ordering;

/// Fixed-surrogate choice repair with deterministic tie-breaking.
///
/// - One marked item: kept.
/// - Several marked: the most efficient marked item (`profit /
///   aggregate_use`, then profit, then lowest index).
/// - None marked: the most efficient item of the class.
pub fn fixed_surrogate_choice(data: &DataSet, draft: &Draft) -> Solution {
    let selection = (0..data.class_count())
        .map(|c| {
            let items = data.class(c);
            match draft.marked_count(c) {
                1 => draft.marked(c).next().unwrap_or(0),
                0 => best_by(0..items.len(), |i| efficiency_key(&items[i])).unwrap_or(0),
                _ => best_by(draft.marked(c), |i| efficiency_key(&items[i])).unwrap_or(0),
            }
        })
        .collect();
    Solution::from_valid_selection(data, selection)
}

/// Fixed-surrogate choice repair with randomized tie-breaking.
///
/// - One marked item: kept.
/// - Several marked: the most efficient marked item; equally efficient
///   candidates are chosen between uniformly at random.
/// - None marked: a uniformly random item of the class.
pub fn random_surrogate_choice<R: Rng>(data: &DataSet, draft: &Draft, rng: &mut R) -> Solution {
    let selection = (0..data.class_count())
        .map(|c| match draft.marked_count(c) {
            1 => draft.marked(c).next().unwrap_or(0),
            0 => rng.random_range(0..data.items_in(c)),
            _ => {
                let items = data.class(c);
                let top = draft
                    .marked(c)
                    .map(|i| items[i].efficiency())
                    .fold(f64::NEG_INFINITY, f64::max);
                let ties: Vec<usize> = draft
                    .marked(c)
                    .filter(|&i| items[i].efficiency() == top)
                    .collect();
                ties[rng.random_range(0..ties.len())]
            }
        })
        .collect();
    Solution::from_valid_selection(data, selection)
}

/// Max-profit choice repair.
///
/// Classes with marks keep their most profitable marked item. Empty classes
/// are then filled in class order with the most profitable item that still
/// fits the capacity left by the classes resolved so far; if nothing fits,
/// the item with the smallest aggregate use is taken.
pub fn max_profit_choice(data: &DataSet, draft: &Draft) -> Solution {
    let n = data.class_count();
    let mut selection: Vec<Option<usize>> = (0..n)
        .map(|c| best_by(draft.marked(c), |i| (data.profit(c, i), 0.0)))
        .collect();

    let mut usage = vec![0.0; data.dimensions()];
    for (c, chosen) in selection.iter().enumerate() {
        if let Some(i) = *chosen {
            for (d, u) in usage.iter_mut().enumerate() {
                *u += data.cost(c, i, d);
            }
        }
    }

    for c in 0..n {
        if selection[c].is_some() {
            continue;
        }
        let items = data.class(c);
        let fitting = (0..items.len()).filter(|&i| fits(data, &usage, &items[i]));
        let pick = best_by(fitting, |i| (items[i].profit(), -items[i].aggregate_use()))
            .or_else(|| {
                best_by(0..items.len(), |i| {
                    (-items[i].aggregate_use(), items[i].profit())
                })
            })
            .unwrap_or(0);
        for (d, u) in usage.iter_mut().enumerate() {
            *u += items[pick].cost(d);
        }
        selection[c] = Some(pick);
    }

    Solution::from_valid_selection(data, selection.into_iter().map(|s| s.unwrap_or(0)).collect())
}

/// First marked item per class, item 0 for empty classes.
pub(crate) fn first_marked_choice(data: &DataSet, draft: &Draft) -> Solution {
    let selection = (0..data.class_count())
        .map(|c| draft.marked(c).next().unwrap_or(0))
        .collect();
    Solution::from_valid_selection(data, selection)
}

fn efficiency_key(item: &Item) -> (f64, f64) {
    (item.efficiency(), item.profit())
}

fn fits(data: &DataSet, usage: &[f64], item: &Item) -> bool {
    usage
        .iter()
        .zip(item.costs())
        .zip(data.capacities())
        .all(|((u, c), cap)| u + c <= *cap)
}

/// Index with the largest key; the first one wins on ties.
pub(super) fn best_by<I, F>(indices: I, key: F) -> Option<usize>
where
    I: Iterator<Item = usize>,
    F: Fn(usize) -> (f64, f64),
{
    let mut best: Option<(usize, (f64, f64))> = None;
    for i in indices {
        let k = key(i);
        let better = match best {
            None => true,
            Some((_, bk)) => k.partial_cmp(&bk) == Some(Ordering::Greater),
        };
        if better {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Class 0: item 1 is the most efficient, item 2 the most profitable.
    fn data() -> DataSet {
        DataSet::from_items(
            vec![
                vec![
                    (4.0, vec![4.0, 4.0]),
                    (3.0, vec![1.0, 1.0]),
                    (9.0, vec![8.0, 8.0]),
                ],
                vec![(1.0, vec![1.0, 1.0]), (5.0, vec![4.0, 4.0])],
                vec![(2.0, vec![0.0, 0.0])],
            ],
            vec![10.0, 10.0],
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_surrogate_keeps_single_mark() {
        let d = data();
        let sol = Solution::from_selection(&d, vec![2, 1, 0]).unwrap();
        let out = fixed_surrogate_choice(&d, &Draft::from_solution(&d, &sol));
        assert_eq!(out, sol);
    }

    #[test]
    fn test_fixed_surrogate_resolves_empty_and_multiple() {
        let d = data();
        let mut draft = Draft::empty(&d);
        draft.set(1, 0, true);
        draft.set(1, 1, true);
        let out = fixed_surrogate_choice(&d, &draft);
        // class 0 empty → most efficient (item 1)
        assert_eq!(out.selected(0), 1);
        // class 1: efficiency 10 vs 12.5
        assert_eq!(out.selected(1), 1);
        assert_eq!(out.selected(2), 0);
    }

    #[test]
    fn test_random_surrogate_empty_class_is_random() {
        let d = data();
        let draft = Draft::empty(&d);
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let out = random_surrogate_choice(&d, &draft, &mut rng);
            seen[out.selected(0)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_surrogate_multiple_takes_most_efficient() {
        let d = data();
        let mut draft = Draft::empty(&d);
        draft.set(0, 0, true);
        draft.set(0, 1, true);
        draft.set(1, 0, true);
        draft.set(2, 0, true);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(random_surrogate_choice(&d, &draft, &mut rng).selected(0), 1);
        }
    }

    #[test]
    fn test_max_profit_multiple_marks() {
        let d = data();
        let mut draft = Draft::empty(&d);
        for i in 0..3 {
            draft.set(0, i, true);
        }
        draft.set(1, 0, true);
        draft.set(2, 0, true);
        assert_eq!(max_profit_choice(&d, &draft).selected(0), 2);
    }

    #[test]
    fn test_max_profit_empty_class_respects_capacity() {
        let d = data();
        let mut draft = Draft::empty(&d);
        draft.set(0, 2, true); // uses 8 of 10
        draft.set(2, 0, true);
        let out = max_profit_choice(&d, &draft);
        // item 1 of class 1 (cost 4) would overflow; item 0 fits
        assert_eq!(out.selected(1), 0);
        assert!(out.is_feasible());
    }

    #[test]
    fn test_first_marked_choice() {
        let d = data();
        let mut draft = Draft::empty(&d);
        draft.set(0, 1, true);
        draft.set(0, 2, true);
        let out = first_marked_choice(&d, &draft);
        assert_eq!(out.selection(), &[1, 0, 0]);
    }

    #[test]
    fn test_best_by_prefers_first_on_ties() {
        assert_eq!(best_by([3, 1, 2].into_iter(), |_| (1.0, 1.0)), Some(3));
        assert_eq!(best_by(std::iter::empty(), |_| (1.0, 1.0)), None);
    }
}
