//! Expected discounted sums over the two process types.
//!
//! For the VAR, `E sum_t beta^t x_t' H x_t` is evaluated by solving the
//! discrete Lyapunov-style equation `Q = H + beta A' Q A` with a
//! doubling iteration, then adding the innovation contribution
//! `beta / (1 - beta) * tr(C' Q C)`.
//!
//! For a Markov chain with a per-state payoff `h`, the per-state
//! discounted value is the resolvent `(I - beta P)^{-1} h`.

use nalgebra::{DMatrix, DVector};

use crate::error::{ProcError, ProcResult};

/// Doublings before the iteration is declared divergent.
const MAX_DOUBLINGS: usize = 100;

/// Convergence tolerance on the increment, relative to the accumulated
/// solution's magnitude.
const CONVERGENCE_TOL: f64 = 1e-13;

fn check_discount(beta: f64) -> ProcResult<()> {
    if !beta.is_finite() || beta <= 0.0 || beta >= 1.0 {
        return Err(ProcError::DiscountOutOfRange { beta });
    }
    Ok(())
}

/// `E sum_{t>=0} beta^t x_t' H x_t` for `x_{t+1} = A x_t + C w_{t+1}`
/// started at `x0`.
///
/// `H` need not be symmetric; the quadratic form only sees its
/// symmetric part. Converges whenever the spectral radius of
/// `sqrt(beta) A` is below 1.
pub fn var_quadratic_sum(
    a: &DMatrix<f64>,
    c: &DMatrix<f64>,
    h: &DMatrix<f64>,
    beta: f64,
    x0: &DVector<f64>,
) -> ProcResult<f64> {
    check_discount(beta)?;
    let n = a.nrows();
    if a.ncols() != n {
        return Err(ProcError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if h.nrows() != n || h.ncols() != n {
        return Err(ProcError::DimensionMismatch {
            what: "quadratic form dimension",
            expected: n,
            found: h.nrows().max(h.ncols()),
        });
    }
    if c.nrows() != n {
        return Err(ProcError::DimensionMismatch {
            what: "noise loading rows",
            expected: n,
            found: c.nrows(),
        });
    }
    if x0.len() != n {
        return Err(ProcError::DimensionMismatch {
            what: "initial state length",
            expected: n,
            found: x0.len(),
        });
    }

    // Doubling on B = sqrt(beta) A:
    //   Q <- Q + B' Q B,  B <- B B
    // accumulates sum_t B'^t H B^t = sum_t beta^t A'^t H A^t.
    let mut q = h.clone();
    let mut b = beta.sqrt() * a;
    let mut converged = false;
    for _ in 0..MAX_DOUBLINGS {
        let increment = b.transpose() * &q * &b;
        let magnitude = increment.amax();
        q += increment;
        b = &b * &b;
        if !magnitude.is_finite() {
            return Err(ProcError::NoConvergence {
                iterations: MAX_DOUBLINGS,
            });
        }
        if magnitude <= CONVERGENCE_TOL * q.amax().max(1.0) {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(ProcError::NoConvergence {
            iterations: MAX_DOUBLINGS,
        });
    }

    let state_term = x0.dot(&(&q * x0));
    let noise_term = beta / (1.0 - beta) * (c.transpose() * &q * c).trace();
    Ok(state_term + noise_term)
}

/// Per-state discounted values `v = (I - beta P)^{-1} h` for a Markov
/// chain with transition matrix `p` and per-state payoff `h`.
pub fn markov_discounted_sum(
    p: &DMatrix<f64>,
    h: &DVector<f64>,
    beta: f64,
) -> ProcResult<DVector<f64>> {
    check_discount(beta)?;
    let n = p.nrows();
    if p.ncols() != n {
        return Err(ProcError::NotSquare {
            rows: p.nrows(),
            cols: p.ncols(),
        });
    }
    if h.len() != n {
        return Err(ProcError::DimensionMismatch {
            what: "per-state payoff length",
            expected: n,
            found: h.len(),
        });
    }
    let m = DMatrix::identity(n, n) - beta * p;
    m.lu().solve(h).ok_or(ProcError::SingularSystem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_geometric_sum_matches_closed_form() {
        // x_{t+1} = a x_t, no noise: sum beta^t a^{2t} x0^2.
        let a = DMatrix::from_row_slice(1, 1, &[0.9]);
        let c = DMatrix::zeros(1, 1);
        let h = DMatrix::from_row_slice(1, 1, &[1.0]);
        let beta = 0.95;
        let x0 = DVector::from_column_slice(&[2.0]);

        let got = var_quadratic_sum(&a, &c, &h, beta, &x0).unwrap();
        let want = 4.0 / (1.0 - beta * 0.81);
        assert_relative_eq!(got, want, epsilon = 1e-9);
    }

    #[test]
    fn pure_noise_contributes_discounted_variance() {
        // x_{t+1} = c w: E x_t^2 = c^2 for t >= 1.
        let a = DMatrix::zeros(1, 1);
        let c = DMatrix::from_row_slice(1, 1, &[0.3]);
        let h = DMatrix::from_row_slice(1, 1, &[1.0]);
        let beta = 0.9;
        let x0 = DVector::from_column_slice(&[1.5]);

        let got = var_quadratic_sum(&a, &c, &h, beta, &x0).unwrap();
        let want = 1.5 * 1.5 + beta / (1.0 - beta) * 0.09;
        assert_relative_eq!(got, want, epsilon = 1e-12);
    }

    #[test]
    fn unit_root_constant_component_still_converges() {
        // AR(1) with a carried constant: eigenvalues {0.7, 1}. The
        // discounting still damps the sum.
        let a = DMatrix::from_row_slice(2, 2, &[0.7, 0.105, 0.0, 1.0]);
        let c = DMatrix::from_row_slice(2, 1, &[0.025, 0.0]);
        let h = DMatrix::identity(2, 2);
        let beta = 1.0 / 1.05;
        let x0 = DVector::from_column_slice(&[0.35, 1.0]);

        let got = var_quadratic_sum(&a, &c, &h, beta, &x0).unwrap();
        assert!(got.is_finite() && got > 0.0);
        // At the stationary point the deterministic part is constant:
        // sum beta^t (0.35^2 + 1) plus a small noise contribution.
        let deterministic = (0.35_f64.powi(2) + 1.0) / (1.0 - beta);
        assert!(got > deterministic);
    }

    #[test]
    fn explosive_process_reports_no_convergence() {
        let a = DMatrix::from_row_slice(1, 1, &[1.2]);
        let c = DMatrix::zeros(1, 1);
        let h = DMatrix::from_row_slice(1, 1, &[1.0]);
        let x0 = DVector::from_column_slice(&[1.0]);

        assert!(matches!(
            var_quadratic_sum(&a, &c, &h, 0.99, &x0),
            Err(ProcError::NoConvergence { .. })
        ));
    }

    #[test]
    fn rejects_discount_outside_unit_interval() {
        let a = DMatrix::zeros(1, 1);
        let c = DMatrix::zeros(1, 1);
        let h = DMatrix::zeros(1, 1);
        let x0 = DVector::zeros(1);
        assert!(matches!(
            var_quadratic_sum(&a, &c, &h, 1.0, &x0),
            Err(ProcError::DiscountOutOfRange { .. })
        ));
    }

    #[test]
    fn single_state_resolvent_is_geometric() {
        let p = DMatrix::from_row_slice(1, 1, &[1.0]);
        let h = DVector::from_column_slice(&[3.0]);
        let v = markov_discounted_sum(&p, &h, 0.95).unwrap();
        assert_relative_eq!(v[0], 3.0 / 0.05, epsilon = 1e-9);
    }

    #[test]
    fn absorbing_chain_resolvent_discounts_transition() {
        // Two states, state 1 absorbing with payoff 0; state 0 pays 1
        // and moves to 1 with probability 1.
        let p = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 1.0]);
        let h = DVector::from_column_slice(&[1.0, 0.0]);
        let v = markov_discounted_sum(&p, &h, 0.9).unwrap();
        assert_relative_eq!(v[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 0.0, epsilon = 1e-12);
    }
}
