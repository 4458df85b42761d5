//! Bounded depth-first feasibility search.

use super::RepairStatus;
use crate::model::{DataSet, Solution};

/// Node budget used by [`Toolkit`](super::Toolkit) unless overridden.
pub(crate) const DEFAULT_NODE_BUDGET: usize = 100_000;

/// Searches for any capacity-feasible completion, starting from `sol`.
///
/// Classes are branched in order. Within a class the currently selected
/// item is tried first, then the remaining items by ascending aggregate
/// use. A branch is cut as soon as the usage so far plus the cheapest
/// possible consumption of the remaining classes exceeds a capacity.
///
/// On success `sol` is replaced by the feasible selection found. When the
/// tree is exhausted (the instance is infeasible) or `node_budget` branch
/// attempts are spent, `sol` is left untouched and
/// [`RepairStatus::Infeasible`] is returned.
pub fn search_feasible(data: &DataSet, sol: &mut Solution, node_budget: usize) -> RepairStatus {
    if sol.is_feasible() {
        return RepairStatus::Feasible;
    }
    let n = data.class_count();
    let dims = data.dimensions();
    if n == 0 {
        return RepairStatus::of(sol);
    }

    let order: Vec<Vec<usize>> = (0..n)
        .map(|c| {
            let current = sol.selected(c);
            let items = data.class(c);
            let mut rest: Vec<usize> = (0..items.len()).filter(|&i| i != current).collect();
            rest.sort_by(|&a, &b| items[a].aggregate_use().total_cmp(&items[b].aggregate_use()));
            std::iter::once(current).chain(rest).collect()
        })
        .collect();

    // floor[c][d]: least possible consumption of classes c.. in dimension d
    let mut floor = vec![vec![0.0; dims]; n + 1];
    for c in (0..n).rev() {
        for d in 0..dims {
            let cheapest = data
                .class(c)
                .iter()
                .map(|item| item.cost(d))
                .fold(f64::INFINITY, f64::min);
            floor[c][d] = floor[c + 1][d] + cheapest;
        }
    }
    if floor[0].iter().zip(data.capacities()).any(|(f, cap)| f > cap) {
        return RepairStatus::Infeasible;
    }

    // usage[k] is the consumption of the picks at depths < k
    let mut usage = vec![vec![0.0; dims]; n + 1];
    let mut cursor = vec![0usize; n];
    let mut depth = 0;
    let mut nodes = 0;

    loop {
        if depth == n {
            let selection = (0..n).map(|c| order[c][cursor[c]]).collect();
            let found = Solution::from_valid_selection(data, selection);
            if found.is_feasible() {
                *sol = found;
                return RepairStatus::Feasible;
            }
            // rounding disagreement with the bound; keep searching
            depth -= 1;
            cursor[depth] += 1;
            continue;
        }
        if cursor[depth] == order[depth].len() {
            if depth == 0 {
                return RepairStatus::Infeasible;
            }
            cursor[depth] = 0;
            depth -= 1;
            cursor[depth] += 1;
            continue;
        }

        nodes += 1;
        if nodes > node_budget {
            return RepairStatus::Infeasible;
        }

        let item = data.item(depth, order[depth][cursor[depth]]);
        let fits = (0..dims)
            .all(|d| usage[depth][d] + item.cost(d) + floor[depth + 1][d] <= data.capacity(d));
        if fits {
            let (done, next) = usage.split_at_mut(depth + 1);
            for d in 0..dims {
                next[0][d] = done[depth][d] + item.cost(d);
            }
            depth += 1;
        } else {
            cursor[depth] += 1;
        }
    }
}
