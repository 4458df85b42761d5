//! Feasibility repair and evaluation toolkit shared by every optimizer.
//!
//! Repair happens in two stages:
//!
//! 1. **Choice repair** turns a [`Draft`](crate::model::Draft) (zero or
//!    several marked items per class) into a [`Solution`](crate::model::Solution)
//!    with exactly one item per class. See [`ChoiceRepair`].
//! 2. **Dimension repair** swaps selected items until usage fits the
//!    capacities, guided by a surrogate relaxation of the constraints.
//!    See [`DimRepair`].
//!
//! [`Toolkit`] bundles both stages with a default [`RepairStrategy`] and a
//! bounded exact fallback ([`search_feasible`]).
//!
//! # Surrogate measures
//!
//! Each item carries `aggregate_use = Σ cost / Σ capacity` (the *fixed*
//! surrogate, computed once per instance) and per-dimension use ratios. The
//! *variable* surrogate averages the use ratios over the dimensions that are
//! currently over capacity, so its weights change at every repair step.
//!
//! # References
//!
//! - Glover (1965), "A Multiphase-Dual Algorithm for the Zero-One Integer
//!   Programming Problem" (surrogate constraints)
//! - Hifi, Michrafy & Sbihi (2004), "Heuristic algorithms for the
//!   multiple-choice multidimensional knapsack problem"
//! - Zyma & Vasko (2015), TLBO and ABC variants for the MMKP

mod choice;
mod dimension;
mod improve;
mod search;
mod toolkit;

pub use choice::{fixed_surrogate_choice, max_profit_choice, random_surrogate_choice};
pub use dimension::{Surrogate, SwapOrder};
pub use improve::improve;
pub use search::search_feasible;
pub use toolkit::Toolkit;

use crate::model::Solution;

/// Outcome of a repair call.
///
/// `Infeasible` means the repair returned its best effort without reaching
/// capacity feasibility. It is not an error: callers inspect it (or the
/// solution's feasibility flag) before trusting the result.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStatus {
    /// Usage is within capacity in every dimension.
    Feasible,
    /// At least one dimension is still over capacity.
    Infeasible,
}

impl RepairStatus {
    /// Status matching the solution's current feasibility flag.
    pub fn of(sol: &Solution) -> Self {
        if sol.is_feasible() {
            Self::Feasible
        } else {
            Self::Infeasible
        }
    }

    /// Whether the repaired solution is feasible.
    pub fn is_feasible(self) -> bool {
        self == Self::Feasible
    }
}

/// Strategy for resolving classes with zero or several marked items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceRepair {
    /// Fixed surrogate, deterministic: keep the most efficient marked item
    /// (`profit / aggregate_use`); an empty class takes its most efficient
    /// item. Ties go to the lowest index.
    FixedSurrogate,
    /// Fixed surrogate, randomized: several marks keep the most efficient
    /// one with ties broken uniformly at random; an empty class takes a
    /// uniformly random item.
    FixedRandomSurrogate,
    /// Several marks keep the most profitable one; an empty class takes the
    /// most profitable item that still fits the remaining capacity.
    #[default]
    MaxProfit,
    /// Per call, pick `FixedRandomSurrogate` or `MaxProfit` with equal odds.
    Mix,
    /// No scoring: keep the first marked item, or item 0 when none is marked.
    None,
}

/// Strategy for bringing usage back within capacity.
///
/// Every variant except `Mix` and `None` maps onto one
/// `(Surrogate, SwapOrder)` pair of the single descent routine; see
/// [`DimRepair::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimRepair {
    /// Fixed surrogate weights; swap the class whose selected item is
    /// farthest above the class's lightest item.
    FixedSurrogate,
    /// Weights recomputed each step from the over-capacity dimensions;
    /// same swap rule as `FixedSurrogate`.
    #[default]
    VariableSurrogate,
    /// Variable weights; among surrogate-reducing swaps take the one that
    /// keeps the highest profit.
    MaximizeProfit,
    /// Take the swap that leaves the least total overflow (fewest steps to
    /// feasibility); profit breaks ties.
    MinSurrogate,
    /// Per call, pick `VariableSurrogate` or `MaximizeProfit` with equal odds.
    Mix,
    /// Leave usage untouched.
    None,
}

impl DimRepair {
    /// The descent parameters for a concrete strategy; `None` for `Mix`
    /// (resolved per call) and `None`.
    pub fn plan(self) -> Option<(Surrogate, SwapOrder)> {
        match self {
            Self::FixedSurrogate => Some((Surrogate::Fixed, SwapOrder::ClassMinimum)),
            Self::VariableSurrogate => Some((Surrogate::Variable, SwapOrder::ClassMinimum)),
            Self::MaximizeProfit => Some((Surrogate::Variable, SwapOrder::MaxProfit)),
            Self::MinSurrogate => Some((Surrogate::Variable, SwapOrder::MinOverflow)),
            Self::Mix | Self::None => None,
        }
    }
}

/// A choice/dimension repair pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairStrategy {
    /// Multiple-choice stage.
    pub choice: ChoiceRepair,
    /// Multidimensional stage.
    pub dimension: DimRepair,
}

impl RepairStrategy {
    /// Creates a strategy from its two stages.
    pub fn new(choice: ChoiceRepair, dimension: DimRepair) -> Self {
        Self { choice, dimension }
    }
}
