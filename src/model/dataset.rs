//! Problem instance: classes of items, per-item consumption, capacities.
//!
//! A [`DataSet`] is immutable. Instances are assembled with a
//! [`DataSetBuilder`], which allocates the class/item layout up front and
//! lets a loader populate items one by one; [`DataSetBuilder::build`]
//! validates that every item was populated and freezes the result.

use crate::error::MmkpError;

/// One item of a class: profit, per-dimension consumption, and the
/// surrogate analytics derived from the instance capacities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    profit: f64,
    costs: Vec<f64>,
    /// `cost[d] / capacity[d]` for each dimension.
    use_ratio: Vec<f64>,
    /// `Σ cost / Σ capacity`.
    aggregate_use: f64,
    /// `profit / aggregate_use`; infinite for items that consume nothing.
    efficiency: f64,
}

impl Item {
    fn new(profit: f64, costs: Vec<f64>, capacities: &[f64]) -> Self {
        let use_ratio = costs
            .iter()
            .zip(capacities)
            .map(|(&c, &cap)| c / cap)
            .collect();
        let cost_sum: f64 = costs.iter().sum();
        let capacity_sum: f64 = capacities.iter().sum();
        let aggregate_use = if capacity_sum > 0.0 {
            cost_sum / capacity_sum
        } else {
            0.0
        };
        let efficiency = if aggregate_use > 0.0 {
            profit / aggregate_use
        } else {
            f64::INFINITY
        };
        Self {
            profit,
            costs,
            use_ratio,
            aggregate_use,
            efficiency,
        }
    }

    /// Profit gained when this item is selected.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Consumption vector, one entry per dimension.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Consumption in dimension `d`.
    pub fn cost(&self, d: usize) -> f64 {
        self.costs[d]
    }

    /// Fraction of capacity `d` this item consumes.
    pub fn use_ratio(&self, d: usize) -> f64 {
        self.use_ratio[d]
    }

    /// Fixed surrogate consumption: total cost over total capacity.
    pub fn aggregate_use(&self) -> f64 {
        self.aggregate_use
    }

    /// Profit per unit of fixed surrogate consumption.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Mean use ratio over the given dimensions (0 for an empty set).
    pub fn mean_use(&self, dims: &[usize]) -> f64 {
        if dims.is_empty() {
            return 0.0;
        }
        dims.iter().map(|&d| self.use_ratio[d]).sum::<f64>() / dims.len() as f64
    }

    /// Weighted surrogate consumption `Σ w[d] * cost[d] / capacity[d]`.
    pub fn weighted_use(&self, weights: &[f64]) -> f64 {
        self.use_ratio
            .iter()
            .zip(weights)
            .map(|(&r, &w)| r * w)
            .sum()
    }
}

/// An immutable MMKP instance.
///
/// `DataSet::default()` is the empty instance (no classes, no dimensions).
///
/// # Examples
///
/// ```
/// use u_mmkp::model::DataSet;
///
/// let data = DataSet::from_items(
///     vec![
///         vec![(5.0, vec![3.0, 1.0]), (8.0, vec![6.0, 4.0])],
///         vec![(2.0, vec![1.0, 1.0])],
///     ],
///     vec![10.0, 10.0],
/// )
/// .unwrap();
///
/// assert_eq!(data.class_count(), 2);
/// assert_eq!(data.items_in(0), 2);
/// assert_eq!(data.dimensions(), 2);
/// assert_eq!(data.item(0, 1).profit(), 8.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataSet {
    classes: Vec<Vec<Item>>,
    capacities: Vec<f64>,
}

impl DataSet {
    /// Builds an instance from `(profit, costs)` pairs grouped by class.
    pub fn from_items(
        classes: Vec<Vec<(f64, Vec<f64>)>>,
        capacities: Vec<f64>,
    ) -> Result<Self, MmkpError> {
        let sizes: Vec<usize> = classes.iter().map(Vec::len).collect();
        let mut builder = DataSetBuilder::new(&sizes, capacities)?;
        for (c, items) in classes.into_iter().enumerate() {
            for (i, (profit, costs)) in items.into_iter().enumerate() {
                builder.set_item(c, i, profit, costs)?;
            }
        }
        builder.build()
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Whether the instance has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of items in class `c`.
    pub fn items_in(&self, c: usize) -> usize {
        self.classes[c].len()
    }

    /// Item count of every class, in class order.
    pub fn items_per_class(&self) -> Vec<usize> {
        self.classes.iter().map(Vec::len).collect()
    }

    /// Total number of items over all classes.
    pub fn total_items(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    /// Number of constraint dimensions.
    pub fn dimensions(&self) -> usize {
        self.capacities.len()
    }

    /// Capacity vector.
    pub fn capacities(&self) -> &[f64] {
        &self.capacities
    }

    /// Capacity of dimension `d`.
    pub fn capacity(&self, d: usize) -> f64 {
        self.capacities[d]
    }

    /// Items of class `c`.
    pub fn class(&self, c: usize) -> &[Item] {
        &self.classes[c]
    }

    /// Item `i` of class `c`.
    pub fn item(&self, c: usize, i: usize) -> &Item {
        &self.classes[c][i]
    }

    /// Profit of item `i` in class `c`.
    pub fn profit(&self, c: usize, i: usize) -> f64 {
        self.classes[c][i].profit
    }

    /// Consumption of item `i` in class `c` along dimension `d`.
    pub fn cost(&self, c: usize, i: usize, d: usize) -> f64 {
        self.classes[c][i].costs[d]
    }

    /// Dimensions whose usage exceeds capacity.
    pub fn offending_dimensions(&self, usage: &[f64]) -> Vec<usize> {
        usage
            .iter()
            .zip(&self.capacities)
            .enumerate()
            .filter(|(_, (&u, &cap))| u > cap)
            .map(|(d, _)| d)
            .collect()
    }

    /// Sum over dimensions of `max(0, usage - capacity) / capacity`.
    pub fn overflow(&self, usage: &[f64]) -> f64 {
        usage
            .iter()
            .zip(&self.capacities)
            .map(|(&u, &cap)| ((u - cap) / cap).max(0.0))
            .sum()
    }

    /// Checks that a selection vector is structurally valid for this
    /// instance: one in-range item index per class.
    pub fn check_selection(&self, selection: &[usize]) -> Result<(), MmkpError> {
        if selection.len() != self.classes.len() {
            return Err(MmkpError::DimensionMismatch {
                expected: self.classes.len(),
                found: selection.len(),
            });
        }
        for (c, &i) in selection.iter().enumerate() {
            if i >= self.classes[c].len() {
                return Err(MmkpError::ItemOutOfRange {
                    class: c,
                    item: i,
                    items: self.classes[c].len(),
                });
            }
        }
        Ok(())
    }
}

/// Sized, write-once construction of a [`DataSet`].
///
/// # Examples
///
/// ```
/// use u_mmkp::model::DataSetBuilder;
///
/// let mut builder = DataSetBuilder::new(&[2, 1], vec![10.0]).unwrap();
/// builder.set_item(0, 0, 4.0, vec![3.0]).unwrap();
/// builder.set_item(0, 1, 9.0, vec![8.0]).unwrap();
/// builder.set_item(1, 0, 1.0, vec![1.0]).unwrap();
/// let data = builder.build().unwrap();
/// assert_eq!(data.total_items(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DataSetBuilder {
    capacities: Vec<f64>,
    slots: Vec<Vec<Option<(f64, Vec<f64>)>>>,
}

impl DataSetBuilder {
    /// Allocates an instance layout with `items_per_class[c]` items in
    /// class `c` and the given capacity vector.
    pub fn new(items_per_class: &[usize], capacities: Vec<f64>) -> Result<Self, MmkpError> {
        if let Some(class) = items_per_class.iter().position(|&n| n == 0) {
            return Err(MmkpError::EmptyClass { class });
        }
        if let Some(d) = capacities.iter().position(|&c| !(c.is_finite() && c > 0.0)) {
            return Err(MmkpError::InvalidValue(format!(
                "capacity {d} must be positive and finite, got {}",
                capacities[d]
            )));
        }
        Ok(Self {
            capacities,
            slots: items_per_class.iter().map(|&n| vec![None; n]).collect(),
        })
    }

    /// Populates item `item` of class `class`.
    ///
    /// Fails if the indices are out of range, the cost vector length differs
    /// from the capacity vector, the item was already populated, or any
    /// value is negative or non-finite.
    pub fn set_item(
        &mut self,
        class: usize,
        item: usize,
        profit: f64,
        costs: Vec<f64>,
    ) -> Result<&mut Self, MmkpError> {
        let classes = self.slots.len();
        let slots = self
            .slots
            .get_mut(class)
            .ok_or(MmkpError::ClassOutOfRange { class, classes })?;
        let items = slots.len();
        let slot = slots
            .get_mut(item)
            .ok_or(MmkpError::ItemOutOfRange { class, item, items })?;

        if slot.is_some() {
            return Err(MmkpError::InvalidConfig(format!(
                "item {item} of class {class} is already populated"
            )));
        }
        if costs.len() != self.capacities.len() {
            return Err(MmkpError::DimensionMismatch {
                expected: self.capacities.len(),
                found: costs.len(),
            });
        }
        if !(profit.is_finite() && profit >= 0.0) {
            return Err(MmkpError::InvalidValue(format!(
                "profit of item {item} in class {class} must be non-negative, got {profit}"
            )));
        }
        if let Some(d) = costs.iter().position(|&c| !(c.is_finite() && c >= 0.0)) {
            return Err(MmkpError::InvalidValue(format!(
                "cost {d} of item {item} in class {class} must be non-negative, got {}",
                costs[d]
            )));
        }

        *slot = Some((profit, costs));
        Ok(self)
    }

    /// Freezes the instance. Every item must have been populated.
    pub fn build(self) -> Result<DataSet, MmkpError> {
        let capacities = self.capacities;
        let mut classes = Vec::with_capacity(self.slots.len());
        for (c, slots) in self.slots.into_iter().enumerate() {
            let mut items = Vec::with_capacity(slots.len());
            for (i, slot) in slots.into_iter().enumerate() {
                let (profit, costs) = slot.ok_or(MmkpError::Unpopulated { class: c, item: i })?;
                items.push(Item::new(profit, costs, &capacities));
            }
            classes.push(items);
        }
        Ok(DataSet {
            classes,
            capacities,
        })
    }
}
