//! Genetic Algorithm for the MMKP.
//!
//! Chromosomes are selection vectors (one item index per class). Parents
//! are picked by [`Selection`], recombined by [`Crossover`], mutated by
//! [`mutate`], repaired by the toolkit's dimension repair, and merged into
//! the population elitistically.
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters (selection, operators, rates, presets)
//! - [`Ga`]: the optimizer, a [`PopulationSearch`](crate::search::PopulationSearch)
//! - [`GaRunner`]: one-call run entry point
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Khan et al. (2002), "Solving the knapsack problem for adaptive
//!   multimedia systems" (MMKP)

mod config;
mod evolution;
mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use evolution::Ga;
pub use operators::{mutate, Crossover};
pub use runner::GaRunner;
pub use selection::Selection;
