//! Multidimensional Multiple-choice Knapsack Problem (MMKP) optimization.
//!
//! Select exactly one item from every class so that total profit is
//! maximized while the summed consumption stays within the capacity of
//! every resource dimension.
//!
//! - **Model**: an immutable [`DataSet`](model::DataSet) shared by
//!   reference, and index-based [`Solution`](model::Solution)s that keep
//!   profit, usage and feasibility up to date.
//! - **Repair toolkit**: surrogate-relaxation heuristics that restore the
//!   one-per-class constraint and the capacity constraints, plus a bounded
//!   exact fallback and a local-improvement pass.
//! - **Artificial Bee Colony (ABC)**: employed, onlooker and scout phases
//!   over binary neighbor moves.
//! - **Teaching-Learning-Based Optimization (TLBO)**: teacher and learner
//!   phases, with random-teacher and classroom variants.
//! - **Genetic Algorithm (GA)**: selection, crossover and mutation over
//!   selection vectors with elitist survival.
//!
//! # Architecture
//!
//! The optimizers share no implementation by inheritance: each one owns a
//! [`Toolkit`](repair::Toolkit) and implements
//! [`PopulationSearch`](search::PopulationSearch), and
//! [`SearchRunner`](search::SearchRunner) drives the generational loop.
//! All randomness flows from one seeded generator, so a run is
//! reproducible with or without the `parallel` feature.
//!
//! # Example
//!
//! ```
//! use u_mmkp::model::DataSet;
//! use u_mmkp::tlbo::{TlboConfig, TlboRunner};
//!
//! let data = DataSet::from_items(
//!     vec![
//!         vec![(10.0, vec![5.0, 2.0]), (4.0, vec![1.0, 1.0])],
//!         vec![(8.0, vec![4.0, 4.0]), (3.0, vec![2.0, 1.0])],
//!     ],
//!     vec![8.0, 6.0],
//! )?;
//!
//! let config = TlboConfig::default().with_max_generations(10).with_seed(7);
//! let result = TlboRunner::run(&data, &config)?;
//! assert!(result.feasible);
//! assert_eq!(result.best_profit, 13.0);
//! # Ok::<(), u_mmkp::MmkpError>(())
//! ```

pub mod abc;
pub mod error;
pub mod ga;
pub mod model;
pub mod repair;
pub mod search;
pub mod tlbo;

pub use error::MmkpError;
