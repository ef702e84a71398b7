//! Ramsey optimal taxation in a linear-quadratic economy.
//!
//! Implements the Lucas-Stokey optimal-taxation problem for a
//! representative household with quadratic preferences, where all
//! exogenous variables are linear functions of a state vector driven
//! either by a first-order VAR or by a finite Markov chain. The crate
//! provides:
//! - [`Economy`]: validated model parameters,
//! - [`compute_paths`]: the equilibrium path solver,
//! - [`scenarios`]: named parameter presets and a runner,
//! - [`figures`]: CSV/JSON export of the simulated series.

pub mod economy;
pub mod errors;
pub mod figures;
pub mod paths;
pub mod scenarios;

pub use economy::{Economy, SpendingProcess};
pub use errors::{LqError, LqResult};
pub use paths::{compute_paths, RamseyPath};
