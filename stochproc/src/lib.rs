//! Building blocks for linear stochastic processes.
//!
//! Three pieces used by model crates:
//! - [`VarProcess`]: a first-order vector autoregression
//!   `x_{t+1} = A x_t + C w_{t+1}` with Gaussian innovations.
//! - [`MarkovChain`]: a finite-state chain sampled by inverse CDF.
//! - Expected discounted sums of quadratic forms of either process
//!   ([`var_quadratic_sum`], [`markov_discounted_sum`]).

pub mod error;
pub mod markov;
pub mod quadsum;
pub mod var;

pub use error::{ProcError, ProcResult};
pub use markov::MarkovChain;
pub use quadsum::{markov_discounted_sum, var_quadratic_sum};
pub use var::VarProcess;
