//! MMKP data model.
//!
//! - [`DataSet`]: immutable instance (classes, items, capacities)
//! - [`DataSetBuilder`]: sized, write-once instance construction
//! - [`Solution`]: one selected item per class with derived profit/usage
//! - [`Draft`]: relaxed per-class item marks produced by bitwise moves

mod dataset;
mod draft;
mod solution;

pub use dataset::{DataSet, DataSetBuilder, Item};
pub use draft::Draft;
pub use solution::Solution;
