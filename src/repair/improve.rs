//! Local search that polishes feasible solutions with profit-raising swaps.

use crate::model::{DataSet, Solution};

/// Best-improvement local search over single-class swaps.
///
/// Repeatedly applies the swap with the largest profit gain among those
/// that keep usage within capacity, until no improving swap remains.
/// Returns the number of swaps applied. Infeasible solutions are left
/// untouched (0 swaps).
pub fn improve(data: &DataSet, sol: &mut Solution) -> usize {
    if !sol.is_feasible() {
        return 0;
    }
    let mut swaps = 0;
    while let Some((c, i)) = best_gain(data, sol) {
        sol.swap(data, c, i);
        swaps += 1;
    }
    swaps
}

fn best_gain(data: &DataSet, sol: &Solution) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for c in 0..data.class_count() {
        let current = data.item(c, sol.selected(c));
        for (i, item) in data.class(c).iter().enumerate() {
            let gain = item.profit() - current.profit();
            if gain <= 0.0 || best.is_some_and(|(_, _, g)| gain <= g) {
                continue;
            }
            let fits = (0..data.dimensions())
                .all(|d| sol.usage_at(d) - current.cost(d) + item.cost(d) <= data.capacity(d));
            if fits {
                best = Some((c, i, gain));
            }
        }
    }
    best.map(|(c, i, _)| (c, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> DataSet {
        DataSet::from_items(
            vec![
                vec![(1.0, vec![1.0]), (4.0, vec![3.0]), (9.0, vec![9.0])],
                vec![(1.0, vec![1.0]), (3.0, vec![2.0])],
            ],
            vec![6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_climbs_to_local_optimum() {
        let d = data();
        let mut sol = Solution::new(&d);
        let swaps = improve(&d, &mut sol);
        // +3 (class 0 -> item 1), then +2 (class 1 -> item 1); item 2 never fits
        assert_eq!(swaps, 2);
        assert_eq!(sol.selection(), &[1, 1]);
        assert_eq!(sol.profit(), 7.0);
        assert!(sol.is_feasible());
    }

    #[test]
    fn test_infeasible_untouched() {
        let d = data();
        let mut sol = Solution::from_selection(&d, vec![2, 1]).unwrap();
        let before = sol.clone();
        assert_eq!(improve(&d, &mut sol), 0);
        assert_eq!(sol, before);
    }
}
