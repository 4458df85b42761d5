//! Multidimensional repair: surrogate-guided item swaps.
//!
//! All strategies share one descent loop, [`descend`]. A strategy is a
//! `(Surrogate, SwapOrder)` pair: the surrogate collapses the capacity
//! dimensions into one consumption score per item, and the swap order
//! decides which single-class swap to apply next.

use super::RepairStatus;
use crate::model::{DataSet, Item, Solution};

/// How the capacity dimensions collapse into a single consumption score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surrogate {
    /// `Σ cost / Σ capacity`, computed once per instance.
    Fixed,
    /// Mean of `cost[d] / capacity[d]` over the dimensions currently over
    /// capacity; recomputed at every step.
    Variable,
}

impl Surrogate {
    fn score(self, item: &Item, offending: &[usize]) -> f64 {
        match self {
            Self::Fixed => item.aggregate_use(),
            Self::Variable => item.mean_use(offending),
        }
    }
}

/// Which swap the descent applies at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapOrder {
    /// Replace, in the class with the largest gap, the selected item by the
    /// class's lowest-scoring item.
    ClassMinimum,
    /// Among swaps that lower the selected item's score, keep the highest
    /// resulting profit. The reverse of the previous swap is tabu.
    MaxProfit,
    /// Take the swap leaving the smallest total relative overflow; it must
    /// strictly reduce the current overflow. Higher profit breaks ties.
    MinOverflow,
}

/// Swap budget for one descent: enough to visit every class a few times.
pub(crate) fn swap_budget(data: &DataSet) -> usize {
    2 * data.class_count() + 3 * data.dimensions()
}

/// Runs surrogate descent until `sol` is feasible, no admissible swap
/// remains, or the swap budget is spent.
///
/// Leaves `sol` evaluated. A solution that is already feasible is returned
/// untouched.
pub(crate) fn descend(
    data: &DataSet,
    sol: &mut Solution,
    surrogate: Surrogate,
    order: SwapOrder,
) -> RepairStatus {
    let budget = swap_budget(data);
    let mut last: Option<(usize, usize)> = None;

    for _ in 0..budget {
        if sol.is_feasible() {
            break;
        }
        let offending = data.offending_dimensions(sol.usage());
        let next = match order {
            SwapOrder::ClassMinimum => class_minimum_swap(data, sol, surrogate, &offending),
            SwapOrder::MaxProfit => max_profit_swap(data, sol, surrogate, &offending, last),
            SwapOrder::MinOverflow => min_overflow_swap(data, sol),
        };
        let Some((c, i)) = next else {
            break;
        };
        last = Some((c, sol.selected(c)));
        sol.swap(data, c, i);
    }

    sol.evaluate(data);
    RepairStatus::of(sol)
}

/// Lowest-scoring item of class `c`; the first one wins on ties.
fn lightest(data: &DataSet, c: usize, surrogate: Surrogate, offending: &[usize]) -> usize {
    let items = data.class(c);
    let mut best = 0;
    for i in 1..items.len() {
        if surrogate.score(&items[i], offending) < surrogate.score(&items[best], offending) {
            best = i;
        }
    }
    best
}

fn class_minimum_swap(
    data: &DataSet,
    sol: &Solution,
    surrogate: Surrogate,
    offending: &[usize],
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for c in 0..data.class_count() {
        let current = sol.selected(c);
        let light = lightest(data, c, surrogate, offending);
        let gap = surrogate.score(data.item(c, current), offending)
            - surrogate.score(data.item(c, light), offending);
        if gap > 0.0 && best.map_or(true, |(_, _, g)| gap > g) {
            best = Some((c, light, gap));
        }
    }
    best.map(|(c, i, _)| (c, i))
}

fn max_profit_swap(
    data: &DataSet,
    sol: &Solution,
    surrogate: Surrogate,
    offending: &[usize],
    last: Option<(usize, usize)>,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64, f64)> = None;
    for c in 0..data.class_count() {
        let current = sol.selected(c);
        let items = data.class(c);
        let current_score = surrogate.score(&items[current], offending);
        for (i, item) in items.iter().enumerate() {
            if i == current || last == Some((c, i)) {
                continue;
            }
            let score = surrogate.score(item, offending);
            if score >= current_score {
                continue;
            }
            let profit = sol.profit() - items[current].profit() + item.profit();
            let better = match best {
                None => true,
                Some((_, _, bp, bs)) => profit > bp || (profit == bp && score < bs),
            };
            if better {
                best = Some((c, i, profit, score));
            }
        }
    }
    best.map(|(c, i, _, _)| (c, i))
}

fn min_overflow_swap(data: &DataSet, sol: &Solution) -> Option<(usize, usize)> {
    let current_overflow = data.overflow(sol.usage());
    let mut usage = sol.usage().to_vec();
    let mut best: Option<(usize, usize, f64, f64)> = None;

    for c in 0..data.class_count() {
        let current = sol.selected(c);
        let items = data.class(c);
        for (i, item) in items.iter().enumerate() {
            if i == current {
                continue;
            }
            for (d, u) in usage.iter_mut().enumerate() {
                *u = sol.usage_at(d) - items[current].cost(d) + item.cost(d);
            }
            let overflow = data.overflow(&usage);
            if overflow >= current_overflow {
                continue;
            }
            let profit = sol.profit() - items[current].profit() + item.profit();
            let better = match best {
                None => true,
                Some((_, _, bo, bp)) => overflow < bo || (overflow == bo && profit > bp),
            };
            if better {
                best = Some((c, i, overflow, profit));
            }
        }
    }
    best.map(|(c, i, _, _)| (c, i))
}
