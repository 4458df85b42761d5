//! Repair toolkit bound to one problem instance.

use super::choice::{
    first_marked_choice, fixed_surrogate_choice, max_profit_choice, random_surrogate_choice,
};
use super::dimension::{descend, Surrogate, SwapOrder};
use super::search::{search_feasible, DEFAULT_NODE_BUDGET};
use super::{ChoiceRepair, DimRepair, RepairStatus, RepairStrategy};
use crate::model::{DataSet, Draft, Solution};
use rand::Rng;
use tracing::trace;

/// Repair and evaluation operations over a shared, read-only instance.
///
/// Every optimizer owns one `Toolkit`; the toolkit holds no mutable state,
/// so the same value can be shared by reference across worker threads.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mmkp::model::{DataSet, Draft};
/// use u_mmkp::repair::Toolkit;
///
/// let data = DataSet::from_items(
///     vec![
///         vec![(3.0, vec![2.0]), (8.0, vec![7.0])],
///         vec![(2.0, vec![1.0]), (6.0, vec![5.0])],
///     ],
///     vec![8.0],
/// )
/// .unwrap();
///
/// let mut draft = Draft::empty(&data);
/// draft.set(0, 1, true);
/// draft.set(1, 1, true);
///
/// let toolkit = Toolkit::new(&data);
/// let mut rng = StdRng::seed_from_u64(1);
/// let (sol, status) = toolkit.make_feasible(&draft, &mut rng);
/// assert!(status.is_feasible());
/// assert!(sol.usage_at(0) <= 8.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Toolkit<'a> {
    data: &'a DataSet,
    strategy: RepairStrategy,
    search_budget: usize,
}

impl<'a> Toolkit<'a> {
    /// Creates a toolkit with the default [`RepairStrategy`].
    pub fn new(data: &'a DataSet) -> Self {
        Self {
            data,
            strategy: RepairStrategy::default(),
            search_budget: DEFAULT_NODE_BUDGET,
        }
    }

    /// Sets the strategy used by [`make_feasible`](Self::make_feasible) and
    /// [`repair`](Self::repair).
    pub fn with_strategy(mut self, strategy: RepairStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the node budget of the exact fallback search (0 disables it).
    pub fn with_search_budget(mut self, budget: usize) -> Self {
        self.search_budget = budget;
        self
    }

    /// The instance this toolkit repairs against.
    pub fn data(&self) -> &'a DataSet {
        self.data
    }

    /// The default strategy.
    pub fn strategy(&self) -> RepairStrategy {
        self.strategy
    }

    /// Full repair with the default strategy: choice repair first, then
    /// dimension repair.
    pub fn make_feasible<R: Rng>(&self, draft: &Draft, rng: &mut R) -> (Solution, RepairStatus) {
        self.make_feasible_with(draft, self.strategy, rng)
    }

    /// Full repair with an explicit strategy.
    ///
    /// `ChoiceRepair::None` skips scoring (first marked item, or item 0) and
    /// `DimRepair::None` skips capacity repair. When dimension repair is
    /// requested and the heuristic descent ends infeasible, a bounded exact
    /// search takes over.
    pub fn make_feasible_with<R: Rng>(
        &self,
        draft: &Draft,
        strategy: RepairStrategy,
        rng: &mut R,
    ) -> (Solution, RepairStatus) {
        let mut sol = self.resolve_choices(draft, strategy.choice, rng);
        let status = self.repair_with(&mut sol, strategy.dimension, rng);
        (sol, status)
    }

    /// Multiple-choice repair with the given strategy.
    pub fn resolve_choices<R: Rng>(
        &self,
        draft: &Draft,
        choice: ChoiceRepair,
        rng: &mut R,
    ) -> Solution {
        match choice {
            ChoiceRepair::FixedSurrogate => self.choice_fixed_surrogate(draft),
            ChoiceRepair::FixedRandomSurrogate => self.choice_fixed_random_surrogate(draft, rng),
            ChoiceRepair::MaxProfit => self.choice_max_profit(draft),
            ChoiceRepair::Mix => {
                if rng.random_bool(0.5) {
                    self.choice_fixed_random_surrogate(draft, rng)
                } else {
                    self.choice_max_profit(draft)
                }
            }
            ChoiceRepair::None => first_marked_choice(self.data, draft),
        }
    }

    /// Dimension repair of a solution with the default strategy.
    pub fn repair<R: Rng>(&self, sol: &mut Solution, rng: &mut R) -> RepairStatus {
        self.repair_with(sol, self.strategy.dimension, rng)
    }

    /// Dimension repair of a solution with an explicit strategy.
    pub fn repair_with<R: Rng>(
        &self,
        sol: &mut Solution,
        dimension: DimRepair,
        rng: &mut R,
    ) -> RepairStatus {
        let plan = match dimension {
            DimRepair::None => return RepairStatus::of(sol),
            DimRepair::Mix => {
                if rng.random_bool(0.5) {
                    DimRepair::VariableSurrogate.plan()
                } else {
                    DimRepair::MaximizeProfit.plan()
                }
            }
            other => other.plan(),
        };
        let Some((surrogate, order)) = plan else {
            return RepairStatus::of(sol);
        };
        self.descend_or_search(sol, surrogate, order)
    }

    /// Fixed-surrogate choice repair, random tie-breaking.
    pub fn choice_fixed_random_surrogate<R: Rng>(&self, draft: &Draft, rng: &mut R) -> Solution {
        random_surrogate_choice(self.data, draft, rng)
    }

    /// Fixed-surrogate choice repair, deterministic tie-breaking.
    pub fn choice_fixed_surrogate(&self, draft: &Draft) -> Solution {
        fixed_surrogate_choice(self.data, draft)
    }

    /// Max-profit choice repair.
    pub fn choice_max_profit(&self, draft: &Draft) -> Solution {
        max_profit_choice(self.data, draft)
    }

    /// Fixed-surrogate dimension repair.
    pub fn dim_fixed_surrogate(&self, sol: &mut Solution) -> RepairStatus {
        self.descend_or_search(sol, Surrogate::Fixed, SwapOrder::ClassMinimum)
    }

    /// Variable-surrogate dimension repair.
    pub fn dim_variable_surrogate(&self, sol: &mut Solution) -> RepairStatus {
        self.descend_or_search(sol, Surrogate::Variable, SwapOrder::ClassMinimum)
    }

    /// Variable-surrogate dimension repair keeping the most profit.
    pub fn dim_max_profit(&self, sol: &mut Solution) -> RepairStatus {
        self.descend_or_search(sol, Surrogate::Variable, SwapOrder::MaxProfit)
    }

    /// Variable-surrogate dimension repair taking the shortest path to
    /// feasibility.
    pub fn dim_min_surrogate(&self, sol: &mut Solution) -> RepairStatus {
        self.descend_or_search(sol, Surrogate::Variable, SwapOrder::MinOverflow)
    }

    /// Best-improvement local search; see [`improve`](super::improve).
    pub fn improve(&self, sol: &mut Solution) -> usize {
        super::improve(self.data, sol)
    }

    fn descend_or_search(
        &self,
        sol: &mut Solution,
        surrogate: Surrogate,
        order: SwapOrder,
    ) -> RepairStatus {
        let status = descend(self.data, sol, surrogate, order);
        if status.is_feasible() || self.search_budget == 0 {
            return status;
        }
        let status = search_feasible(self.data, sol, self.search_budget);
        if !status.is_feasible() {
            trace!(
                profit = sol.profit(),
                overflow = self.data.overflow(sol.usage()),
                "repair ended infeasible"
            );
        }
        status
    }
}
