//! Finite-state Markov chain sampling.

use nalgebra::DMatrix;
use rand::Rng;

use crate::error::{ProcError, ProcResult};

/// How far a row sum may drift from 1 before the matrix is rejected.
const ROW_SUM_TOL: f64 = 1e-8;

/// A finite Markov chain described by its transition matrix.
///
/// Row `i` of `P` is the distribution over next states conditional on
/// being in state `i`.
#[derive(Debug, Clone)]
pub struct MarkovChain {
    p: DMatrix<f64>,
}

impl MarkovChain {
    pub fn new(p: DMatrix<f64>) -> ProcResult<Self> {
        if p.nrows() != p.ncols() {
            return Err(ProcError::NotSquare {
                rows: p.nrows(),
                cols: p.ncols(),
            });
        }
        for row in 0..p.nrows() {
            let mut sum = 0.0;
            for col in 0..p.ncols() {
                let value = p[(row, col)];
                if !value.is_finite() {
                    return Err(ProcError::NonFiniteEntry { row, col, value });
                }
                if value < 0.0 {
                    return Err(ProcError::NotStochastic { row, sum: value });
                }
                sum += value;
            }
            if (sum - 1.0).abs() > ROW_SUM_TOL {
                return Err(ProcError::NotStochastic { row, sum });
            }
        }
        Ok(MarkovChain { p })
    }

    pub fn n_states(&self) -> usize {
        self.p.nrows()
    }

    pub fn transition(&self) -> &DMatrix<f64> {
        &self.p
    }

    /// Sample a state-index path of length `periods` starting in
    /// `init`, by inverse-CDF draws on each row.
    pub fn sample_path<R: Rng>(
        &self,
        periods: usize,
        init: usize,
        rng: &mut R,
    ) -> ProcResult<Vec<usize>> {
        let n = self.n_states();
        if init >= n {
            return Err(ProcError::StateOutOfRange {
                state: init,
                n_states: n,
            });
        }
        let mut path = Vec::with_capacity(periods);
        let mut state = init;
        path.push(state);
        for _ in 1..periods {
            let u: f64 = rng.random();
            let mut cdf = 0.0;
            let mut next = n - 1;
            for j in 0..n {
                cdf += self.p[(state, j)];
                if u < cdf {
                    next = j;
                    break;
                }
            }
            state = next;
            path.push(state);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn absorbing_three_state() -> MarkovChain {
        let p = DMatrix::from_row_slice(
            3,
            3,
            &[0.8, 0.2, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 1.0],
        );
        MarkovChain::new(p).unwrap()
    }

    #[test]
    fn rejects_row_not_summing_to_one() {
        let p = DMatrix::from_row_slice(2, 2, &[0.5, 0.4, 0.0, 1.0]);
        assert!(matches!(
            MarkovChain::new(p),
            Err(ProcError::NotStochastic { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_negative_probability() {
        let p = DMatrix::from_row_slice(2, 2, &[1.2, -0.2, 0.0, 1.0]);
        assert!(matches!(
            MarkovChain::new(p),
            Err(ProcError::NotStochastic { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_initial_state() {
        let chain = absorbing_three_state();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            chain.sample_path(10, 3, &mut rng),
            Err(ProcError::StateOutOfRange { state: 3, n_states: 3 })
        ));
    }

    #[test]
    fn path_has_requested_length_and_starts_at_init() {
        let chain = absorbing_three_state();
        let mut rng = StdRng::seed_from_u64(5);
        let path = chain.sample_path(25, 0, &mut rng).unwrap();
        assert_eq!(path.len(), 25);
        assert_eq!(path[0], 0);
        assert!(path.iter().all(|&s| s < 3));
    }

    #[test]
    fn absorbing_state_is_never_left() {
        let chain = absorbing_three_state();
        let mut rng = StdRng::seed_from_u64(11);
        let path = chain.sample_path(200, 0, &mut rng).unwrap();
        if let Some(first) = path.iter().position(|&s| s == 2) {
            assert!(path[first..].iter().all(|&s| s == 2));
        }
    }

    #[test]
    fn sampling_is_reproducible_with_same_seed() {
        let chain = absorbing_three_state();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(
            chain.sample_path(50, 0, &mut rng1).unwrap(),
            chain.sample_path(50, 0, &mut rng2).unwrap()
        );
    }
}
