//! Error types.
//!
//! Every configuration problem surfaces as an [`MmkpError`] at construction
//! or mutation time. Infeasibility of an instance is not an error: repairs
//! report it through [`RepairStatus`](crate::repair::RepairStatus) and
//! results carry a feasibility flag.

use thiserror::Error;

/// Errors raised while building instances, solutions, or optimizers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MmkpError {
    /// A parameter is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vector does not have the length the instance requires.
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A class was declared with no items.
    #[error("class {class} has no items")]
    EmptyClass { class: usize },

    /// A class index is past the last class.
    #[error("class index {class} out of range ({classes} classes)")]
    ClassOutOfRange { class: usize, classes: usize },

    /// An item index is past the last item of its class.
    #[error("item index {item} out of range for class {class} ({items} items)")]
    ItemOutOfRange {
        class: usize,
        item: usize,
        items: usize,
    },

    /// A profit, consumption, or capacity value is negative or not finite.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// `build()` was called before this item was populated.
    #[error("item {item} of class {class} was never populated")]
    Unpopulated { class: usize, item: usize },

    /// An optimizer was constructed over an instance without classes or
    /// dimensions.
    #[error("problem instance has no classes or no dimensions")]
    EmptyInstance,
}
