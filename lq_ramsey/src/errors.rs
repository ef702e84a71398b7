//! Errors for economy construction and the Ramsey path solver.

use std::error::Error;
use std::fmt;

use stochproc::ProcError;

/// Crate-wide result alias.
pub type LqResult<T> = Result<T, LqError>;

#[derive(Debug, Clone, PartialEq)]
pub enum LqError {
    /// A process-level validation or solver failure.
    Process(ProcError),
    /// Discount factor outside (0, 1).
    InvalidDiscount { beta: f64 },
    /// A selector vector does not match the state dimension.
    SelectorLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    /// A selector entry is NaN or infinite.
    NonFiniteSelector { name: &'static str, index: usize },
    /// The Markov state-value matrix has one column per chain state.
    StateValueColumns { expected: usize, found: usize },
    /// The solver needs at least two periods to form return and payoff
    /// series.
    HorizonTooShort { periods: usize },
    /// The multiplier quadratic is degenerate: bliss, endowment and
    /// transfers cancel along the state path, so no tax distortion is
    /// pinned down.
    DegenerateEconomy { a0: f64 },
    /// The multiplier quadratic has no real root: government spending
    /// is too high for a Ramsey equilibrium to exist.
    NoEquilibrium { discriminant: f64 },
    /// The multiplier on the government budget constraint came out with
    /// the wrong sign: government spending is too low.
    NegativeMultiplier { nu: f64 },
    /// A computed series contains a NaN or infinity.
    NonFinitePath { series: &'static str, period: usize },
}

impl fmt::Display for LqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LqError::Process(err) => write!(f, "process error: {err}"),
            LqError::InvalidDiscount { beta } => {
                write!(f, "discount factor must be in (0, 1), got {beta}")
            }
            LqError::SelectorLength {
                name,
                expected,
                found,
            } => write!(
                f,
                "selector {name} must have length {expected}, got {found}"
            ),
            LqError::NonFiniteSelector { name, index } => {
                write!(f, "selector {name} has a non-finite entry at index {index}")
            }
            LqError::StateValueColumns { expected, found } => write!(
                f,
                "state-value matrix must have {expected} columns (one per state), got {found}"
            ),
            LqError::HorizonTooShort { periods } => {
                write!(f, "horizon must be at least 2 periods, got {periods}")
            }
            LqError::DegenerateEconomy { a0 } => write!(
                f,
                "degenerate economy: the multiplier quadratic has leading \
                 coefficient {a0}; bliss, endowment and transfers cancel"
            ),
            LqError::NoEquilibrium { discriminant } => write!(
                f,
                "no Ramsey equilibrium: government spending is too high \
                 (multiplier discriminant {discriminant})"
            ),
            LqError::NegativeMultiplier { nu } => write!(
                f,
                "negative multiplier on the government budget constraint \
                 (nu = {nu}): government spending is too low"
            ),
            LqError::NonFinitePath { series, period } => {
                write!(f, "series {series} is non-finite at period {period}")
            }
        }
    }
}

impl Error for LqError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LqError::Process(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProcError> for LqError {
    fn from(err: ProcError) -> Self {
        LqError::Process(err)
    }
}
