//! First-order vector autoregression `x_{t+1} = A x_t + C w_{t+1}`.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{ProcError, ProcResult};

/// Tolerance for treating a singular value as zero, relative to the
/// largest singular value.
const NULLSPACE_TOL: f64 = 1e-10;

/// A first-order VAR with Gaussian innovations.
///
/// The convention used by model crates is that the state carries a
/// constant: the last component of `x` equals 1 and the last row of `A`
/// is the matching unit row. [`VarProcess::stationary_point`] relies on
/// that normalization.
#[derive(Debug, Clone)]
pub struct VarProcess {
    a: DMatrix<f64>,
    c: DMatrix<f64>,
}

impl VarProcess {
    /// Build a process from the transition matrix `A` (n x n) and the
    /// noise loading `C` (n x k).
    pub fn new(a: DMatrix<f64>, c: DMatrix<f64>) -> ProcResult<Self> {
        if a.nrows() != a.ncols() {
            return Err(ProcError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        if c.nrows() != a.nrows() {
            return Err(ProcError::DimensionMismatch {
                what: "noise loading rows",
                expected: a.nrows(),
                found: c.nrows(),
            });
        }
        check_finite(&a)?;
        check_finite(&c)?;
        Ok(VarProcess { a, c })
    }

    /// Dimension of the state vector.
    pub fn state_dim(&self) -> usize {
        self.a.nrows()
    }

    /// Dimension of the innovation vector.
    pub fn noise_dim(&self) -> usize {
        self.c.ncols()
    }

    pub fn transition(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn loading(&self) -> &DMatrix<f64> {
        &self.c
    }

    /// Largest eigenvalue modulus of `A`.
    ///
    /// With the constant-component convention the radius is at least 1;
    /// the transient part of the state is stable when every other
    /// eigenvalue lies strictly inside the unit circle. Discounted sums
    /// over the process converge as long as the radius stays below
    /// `1 / sqrt(beta)`.
    pub fn spectral_radius(&self) -> f64 {
        self.a
            .clone()
            .complex_eigenvalues()
            .iter()
            .map(|z| z.norm())
            .fold(0.0, f64::max)
    }

    /// The deterministic fixed point `x0 = A x0`, normalized so the
    /// last component equals 1.
    ///
    /// Computed as the null space of `I - A` via SVD. Fails when the
    /// null space is trivial or the candidate's last component is zero.
    pub fn stationary_point(&self) -> ProcResult<DVector<f64>> {
        let n = self.state_dim();
        let m = DMatrix::identity(n, n) - &self.a;
        let svd = m.svd(true, true);
        let sigma = &svd.singular_values;
        let v_t = svd.v_t.as_ref().ok_or(ProcError::NoStationaryPoint)?;

        let mut min_idx = 0;
        for i in 1..sigma.len() {
            if sigma[i] < sigma[min_idx] {
                min_idx = i;
            }
        }
        let sigma_max = sigma.iter().cloned().fold(0.0, f64::max);
        if sigma[min_idx] > NULLSPACE_TOL * sigma_max.max(1.0) {
            return Err(ProcError::NoStationaryPoint);
        }

        let v = v_t.row(min_idx).transpose();
        let last = v[n - 1];
        if last.abs() < NULLSPACE_TOL {
            return Err(ProcError::NoStationaryPoint);
        }
        Ok(v / last)
    }

    /// Simulate `periods` states starting from `x0` (included as the
    /// first entry), drawing standard-normal innovations from `rng`.
    pub fn simulate<R: Rng>(
        &self,
        periods: usize,
        x0: &DVector<f64>,
        rng: &mut R,
    ) -> ProcResult<Vec<DVector<f64>>> {
        if x0.len() != self.state_dim() {
            return Err(ProcError::DimensionMismatch {
                what: "initial state length",
                expected: self.state_dim(),
                found: x0.len(),
            });
        }
        let mut path = Vec::with_capacity(periods);
        let mut x = x0.clone();
        path.push(x.clone());
        for _ in 1..periods {
            let w = DVector::from_fn(self.noise_dim(), |_, _| StandardNormal.sample(rng));
            x = &self.a * &x + &self.c * w;
            path.push(x.clone());
        }
        Ok(path)
    }
}

fn check_finite(m: &DMatrix<f64>) -> ProcResult<()> {
    for row in 0..m.nrows() {
        for col in 0..m.ncols() {
            let value = m[(row, col)];
            if !value.is_finite() {
                return Err(ProcError::NonFiniteEntry { row, col, value });
            }
        }
    }
    Ok(())
}
