//! Teaching-Learning-Based Optimization (TLBO) for the MMKP.
//!
//! A parameter-light population method: learners improve from the best
//! learner (teacher phase) and from each other (learner phase). Supports
//! the random-teacher and multi-classroom variants.
//!
//! # Key Types
//!
//! - [`TlboConfig`]: learner count, classroom size, random teacher
//! - [`Tlbo`]: the optimizer
//! - [`TlboRunner`]: one-call run entry point
//!
//! # References
//!
//! - Rao, Savsani & Vakharia (2011), "Teaching-learning-based optimization:
//!   A novel method for constrained mechanical design optimization problems"
//! - Rao & Patel (2013), "An improved teaching-learning-based optimization
//!   algorithm for solving unconstrained optimization problems"

mod classroom;
mod config;
mod runner;

pub use classroom::Tlbo;
pub use config::TlboConfig;
pub use runner::TlboRunner;
