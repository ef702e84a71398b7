//! Error type shared by the process constructors and solvers.

use std::error::Error;
use std::fmt;

/// Crate-wide result alias.
pub type ProcResult<T> = Result<T, ProcError>;

/// Validation and solver failures for stochastic-process primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcError {
    /// A matrix that must be square is not.
    NotSquare { rows: usize, cols: usize },
    /// Two operands disagree on a dimension.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A matrix entry is NaN or infinite.
    NonFiniteEntry { row: usize, col: usize, value: f64 },
    /// A transition-matrix row is negative somewhere or does not sum to 1.
    NotStochastic { row: usize, sum: f64 },
    /// A Markov state index is outside `0..n_states`.
    StateOutOfRange { state: usize, n_states: usize },
    /// `I - A` has no nontrivial null space, or the normalizing
    /// component of the candidate fixed point is zero.
    NoStationaryPoint,
    /// The discount factor must lie strictly inside (0, 1).
    DiscountOutOfRange { beta: f64 },
    /// The quadratic-sum iteration did not converge; the discounted
    /// transition matrix is likely explosive.
    NoConvergence { iterations: usize },
    /// A linear system in the resolvent computation is singular.
    SingularSystem,
}

impl fmt::Display for ProcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcError::NotSquare { rows, cols } => {
                write!(f, "matrix must be square, got {rows}x{cols}")
            }
            ProcError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(f, "{what}: expected dimension {expected}, found {found}"),
            ProcError::NonFiniteEntry { row, col, value } => {
                write!(f, "non-finite entry {value} at ({row}, {col})")
            }
            ProcError::NotStochastic { row, sum } => write!(
                f,
                "row {row} of the transition matrix is not a distribution (sum = {sum})"
            ),
            ProcError::StateOutOfRange { state, n_states } => {
                write!(f, "state {state} out of range for {n_states}-state chain")
            }
            ProcError::NoStationaryPoint => {
                write!(f, "process has no stationary point with unit last component")
            }
            ProcError::DiscountOutOfRange { beta } => {
                write!(f, "discount factor must be in (0, 1), got {beta}")
            }
            ProcError::NoConvergence { iterations } => write!(
                f,
                "discounted quadratic sum did not converge after {iterations} doublings"
            ),
            ProcError::SingularSystem => write!(f, "resolvent system is singular"),
        }
    }
}

impl Error for ProcError {}
