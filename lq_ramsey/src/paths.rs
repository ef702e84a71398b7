//! The Ramsey path solver.
//!
//! Given an [`Economy`] and a horizon `T`, [`compute_paths`] simulates
//! the exogenous state and solves for the Ramsey-optimal allocation,
//! tax, and debt sequences. The household maximizes
//! `E sum beta^t [-(c_t - b_t)^2 - l_t^2] / 2` subject to feasibility
//! `c_t + g_t = d_t + l_t`, and the government picks the flat labor tax
//! and state-contingent debt that best finance `g` and transfers `s`.
//!
//! The solution reduces to one scalar unknown: the multiplier `nu` on
//! the government's implementability constraint, found as the root of a
//! quadratic whose coefficients are expected discounted sums of
//! quadratic forms of the state. Given `nu`, consumption and labor are
//! linear in the state and every other series follows by arithmetic.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use stochproc::{markov_discounted_sum, var_quadratic_sum, MarkovChain, VarProcess};

use crate::economy::{Economy, SpendingProcess};
use crate::errors::{LqError, LqResult};

/// Simulated equilibrium paths, all series aligned on the same periods.
///
/// Per-period series have length `T`; the transition series `xi`, `pi`
/// and `cum_pi` have length `T - 1`, with entry `t` describing the move
/// from period `t` to `t + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamseyPath {
    /// Government spending.
    pub g: Vec<f64>,
    /// Endowment income.
    pub d: Vec<f64>,
    /// Consumption bliss point.
    pub b: Vec<f64>,
    /// Promised government transfers.
    pub s: Vec<f64>,
    /// Consumption.
    pub c: Vec<f64>,
    /// Labor supply.
    pub l: Vec<f64>,
    /// Marginal utility of consumption, the scaled Arrow-Debreu price.
    pub p: Vec<f64>,
    /// Flat labor tax rate.
    pub tau: Vec<f64>,
    /// Tax revenue `tau * l`.
    pub rvn: Vec<f64>,
    /// Market value of outstanding government debt.
    pub debt: Vec<f64>,
    /// Gross one-period risk-free return.
    pub rate: Vec<f64>,
    /// Realized over expected price ratio `p_{t+1} / E_t p_{t+1}`.
    pub xi: Vec<f64>,
    /// Payoff on state-contingent debt over the transition.
    pub pi: Vec<f64>,
    /// Cumulative adjusted payoff `cumsum(pi * xi)`.
    pub cum_pi: Vec<f64>,
}

impl RamseyPath {
    /// Number of simulated periods.
    pub fn periods(&self) -> usize {
        self.g.len()
    }

    fn check_finite(&self) -> LqResult<()> {
        let series: [(&'static str, &[f64]); 14] = [
            ("g", &self.g),
            ("d", &self.d),
            ("b", &self.b),
            ("s", &self.s),
            ("c", &self.c),
            ("l", &self.l),
            ("p", &self.p),
            ("tau", &self.tau),
            ("rvn", &self.rvn),
            ("debt", &self.debt),
            ("rate", &self.rate),
            ("xi", &self.xi),
            ("pi", &self.pi),
            ("cum_pi", &self.cum_pi),
        ];
        for (name, values) in series {
            if let Some(period) = values.iter().position(|v| !v.is_finite()) {
                return Err(LqError::NonFinitePath {
                    series: name,
                    period,
                });
            }
        }
        Ok(())
    }
}

/// A realized exogenous state path with enough process structure left
/// to take conditional expectations along it.
enum Exogenous<'a> {
    Var {
        proc: &'a VarProcess,
        xs: Vec<DVector<f64>>,
    },
    Markov {
        chain: &'a MarkovChain,
        x_vals: &'a DMatrix<f64>,
        states: Vec<usize>,
        xs: Vec<DVector<f64>>,
    },
}

impl<'a> Exogenous<'a> {
    fn simulate<R: Rng>(
        proc: &'a SpendingProcess,
        periods: usize,
        rng: &mut R,
    ) -> LqResult<Self> {
        match proc {
            SpendingProcess::Var(proc) => {
                let x0 = proc.stationary_point()?;
                let xs = proc.simulate(periods, &x0, rng)?;
                Ok(Exogenous::Var { proc, xs })
            }
            SpendingProcess::Markov { chain, x_vals } => {
                let states = chain.sample_path(periods, 0, rng)?;
                let xs = states
                    .iter()
                    .map(|&s| x_vals.column(s).clone_owned())
                    .collect();
                Ok(Exogenous::Markov {
                    chain,
                    x_vals,
                    states,
                    xs,
                })
            }
        }
    }

    fn states(&self) -> &[DVector<f64>] {
        match self {
            Exogenous::Var { xs, .. } | Exogenous::Markov { xs, .. } => xs,
        }
    }

    /// `E_t sum_{j>=0} beta^j (u . x_{t+j})(v . x_{t+j})` for every
    /// period `t` along the realized path.
    fn discounted_bilinear(
        &self,
        u: &DVector<f64>,
        v: &DVector<f64>,
        beta: f64,
    ) -> LqResult<Vec<f64>> {
        match self {
            Exogenous::Var { proc, xs } => {
                let h = u * v.transpose();
                xs.iter()
                    .map(|x| {
                        var_quadratic_sum(proc.transition(), proc.loading(), &h, beta, x)
                            .map_err(LqError::from)
                    })
                    .collect()
            }
            Exogenous::Markov {
                chain,
                x_vals,
                states,
                ..
            } => {
                let per_state = DVector::from_fn(x_vals.ncols(), |i, _| {
                    let col = x_vals.column(i);
                    u.dot(&col) * v.dot(&col)
                });
                let values = markov_discounted_sum(chain.transition(), &per_state, beta)?;
                Ok(states.iter().map(|&s| values[s]).collect())
            }
        }
    }

    /// `E_t (u . x_{t+1})` for every period `t` along the realized path.
    fn expected_next(&self, u: &DVector<f64>) -> Vec<f64> {
        match self {
            Exogenous::Var { proc, xs } => xs
                .iter()
                .map(|x| u.dot(&(proc.transition() * x)))
                .collect(),
            Exogenous::Markov {
                chain,
                x_vals,
                states,
                ..
            } => {
                let per_state: Vec<f64> = (0..x_vals.ncols())
                    .map(|i| u.dot(&x_vals.column(i)))
                    .collect();
                states
                    .iter()
                    .map(|&s| {
                        per_state
                            .iter()
                            .enumerate()
                            .map(|(j, value)| chain.transition()[(s, j)] * value)
                            .sum()
                    })
                    .collect()
            }
        }
    }
}

/// Root of `a0 nu^2 - a0 nu + b0 = 0` on the admissible branch.
///
/// `a0` is a discounted sum of squares, so anything at or below zero
/// means the quadratic degenerated and no root exists to pick.
fn solve_multiplier(a0: f64, b0: f64) -> LqResult<f64> {
    if a0.is_nan() || a0 <= 0.0 {
        return Err(LqError::DegenerateEconomy { a0 });
    }
    let discriminant = a0 * a0 - 4.0 * a0 * b0;
    if discriminant < 0.0 {
        return Err(LqError::NoEquilibrium { discriminant });
    }
    let nu = 0.5 * (a0 - discriminant.sqrt()) / a0;
    if nu * (0.5 - nu) < 0.0 {
        return Err(LqError::NegativeMultiplier { nu });
    }
    Ok(nu)
}

fn select(sel: &DVector<f64>, xs: &[DVector<f64>]) -> Vec<f64> {
    xs.iter().map(|x| sel.dot(x)).collect()
}

/// Simulate the economy for `periods` periods and solve for the Ramsey
/// equilibrium along the realized path.
pub fn compute_paths<R: Rng>(
    periods: usize,
    econ: &Economy,
    rng: &mut R,
) -> LqResult<RamseyPath> {
    if periods < 2 {
        return Err(LqError::HorizonTooShort { periods });
    }
    let beta = econ.beta();
    let sg = econ.spending_selector();
    let sd = econ.endowment_selector();
    let sb = econ.bliss_selector();
    let ss = econ.transfer_selector();

    let exo = Exogenous::simulate(econ.process(), periods, rng)?;

    // Multiplier on the implementability constraint. The quadratic's
    // coefficients are discounted sums evaluated at the initial state.
    let sm = sb - sd - ss;
    let a0 = 0.5 * exo.discounted_bilinear(&sm, &sm, beta)?[0];
    let b0 = 0.5 * exo.discounted_bilinear(&(sb - sd + sg), &(sg - ss), beta)?[0];
    let nu = solve_multiplier(a0, b0)?;

    // Allocation rules, linear in the state once nu is known.
    let sc = 0.5 * (sb + sd - sg - nu * &sm);
    let sl = 0.5 * (sb - sd + sg - nu * &sm);
    let price_sel = sb - &sc;

    let xs = exo.states();
    let g = select(sg, xs);
    let d = select(sd, xs);
    let b = select(sb, xs);
    let s = select(ss, xs);
    let c = select(&sc, xs);
    let l = select(&sl, xs);
    let p = select(&price_sel, xs);

    let tau: Vec<f64> = (0..periods)
        .map(|t| 1.0 - l[t] / (b[t] - c[t]))
        .collect();
    let rvn: Vec<f64> = (0..periods).map(|t| tau[t] * l[t]).collect();

    // Debt is the discounted value of future primary surpluses at
    // marginal-utility prices: p (rvn - g) = (p . x)((l - g) . x) - l^2
    // as a pair of bilinear forms of the state.
    let surplus_sel = &sl - sg;
    let pv_priced_surplus = exo.discounted_bilinear(&price_sel, &surplus_sel, beta)?;
    let pv_labor_sq = exo.discounted_bilinear(&sl, &sl, beta)?;
    let debt: Vec<f64> = (0..periods)
        .map(|t| (pv_priced_surplus[t] - pv_labor_sq[t]) / p[t])
        .collect();

    let expected_price = exo.expected_next(&price_sel);
    let rate: Vec<f64> = (0..periods)
        .map(|t| p[t] / (beta * expected_price[t]))
        .collect();
    let xi: Vec<f64> = (0..periods - 1)
        .map(|t| p[t + 1] / expected_price[t])
        .collect();
    let pi: Vec<f64> = (0..periods - 1)
        .map(|t| debt[t + 1] - rate[t] * debt[t] - rvn[t] + g[t])
        .collect();
    let cum_pi: Vec<f64> = pi
        .iter()
        .zip(&xi)
        .scan(0.0, |acc, (pi_t, xi_t)| {
            *acc += pi_t * xi_t;
            Some(*acc)
        })
        .collect();

    let path = RamseyPath {
        g,
        d,
        b,
        s,
        c,
        l,
        p,
        tau,
        rvn,
        debt,
        rate,
        xi,
        pi,
        cum_pi,
    };
    path.check_finite()?;
    Ok(path)
}
