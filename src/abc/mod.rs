//! Artificial Bee Colony (ABC) for the MMKP.
//!
//! Food sources are candidate solutions. Neighbor moves work on the binary
//! item-mark view of a solution (see [`Draft`](crate::model::Draft)) and
//! every neighbor goes through the full repair before it is compared.
//!
//! # Key Types
//!
//! - [`AbcConfig`]: colony parameters (sources, trial limit, flip rate)
//! - [`Abc`]: the colony, a [`PopulationSearch`](crate::search::PopulationSearch)
//! - [`AbcRunner`]: one-call run entry point
//!
//! # References
//!
//! - Karaboga (2005), "An Idea Based on Honey Bee Swarm for Numerical
//!   Optimization"
//! - Kashan, Nahavandi & Kashan (2012), "DisABC: A new artificial bee colony
//!   algorithm for binary optimization"

mod colony;
mod config;
mod runner;

pub use colony::Abc;
pub use config::AbcConfig;
pub use runner::AbcRunner;
