//! The economy primitives: preferences, selector vectors, and the
//! exogenous spending process.
//!
//! The household has quadratic preferences over consumption (relative
//! to a bliss point) and labor, and the government finances an
//! exogenous spending stream with a flat labor tax plus state-contingent
//! debt. Everything exogenous is a linear function of a state vector
//! `x_t`: each named series is picked out of the state by a selector
//! applied as a dot product.

use nalgebra::{DMatrix, DVector};
use stochproc::{MarkovChain, VarProcess};

use crate::errors::{LqError, LqResult};

/// The law of motion for the exogenous state.
#[derive(Debug, Clone)]
pub enum SpendingProcess {
    /// Continuous state following a first-order VAR.
    Var(VarProcess),
    /// Discrete state on a finite chain; column `i` of `x_vals` is the
    /// state vector realized in chain state `i`.
    Markov {
        chain: MarkovChain,
        x_vals: DMatrix<f64>,
    },
}

impl SpendingProcess {
    /// Dimension of the state vector the selectors apply to.
    pub fn state_dim(&self) -> usize {
        match self {
            SpendingProcess::Var(proc) => proc.state_dim(),
            SpendingProcess::Markov { x_vals, .. } => x_vals.nrows(),
        }
    }
}

/// A fully parameterized economy, ready for the path solver.
#[derive(Debug, Clone)]
pub struct Economy {
    beta: f64,
    sg: DVector<f64>,
    sd: DVector<f64>,
    sb: DVector<f64>,
    ss: DVector<f64>,
    proc: SpendingProcess,
}

impl Economy {
    /// Assemble and validate an economy.
    ///
    /// `sg`, `sd`, `sb`, `ss` select government spending, the
    /// endowment, the consumption bliss point, and promised transfers
    /// out of the state. Each must match the process state dimension.
    ///
    /// Stationarity of a VAR spending process is deliberately not
    /// enforced here; use [`VarProcess::spectral_radius`] to check it
    /// when it matters.
    pub fn new(
        beta: f64,
        sg: DVector<f64>,
        sd: DVector<f64>,
        sb: DVector<f64>,
        ss: DVector<f64>,
        proc: SpendingProcess,
    ) -> LqResult<Self> {
        if !beta.is_finite() || beta <= 0.0 || beta >= 1.0 {
            return Err(LqError::InvalidDiscount { beta });
        }
        let n = proc.state_dim();
        for (name, sel) in [("Sg", &sg), ("Sd", &sd), ("Sb", &sb), ("Ss", &ss)] {
            if sel.len() != n {
                return Err(LqError::SelectorLength {
                    name,
                    expected: n,
                    found: sel.len(),
                });
            }
            if let Some(index) = sel.iter().position(|v| !v.is_finite()) {
                return Err(LqError::NonFiniteSelector { name, index });
            }
        }
        if let SpendingProcess::Markov { chain, x_vals } = &proc {
            if x_vals.ncols() != chain.n_states() {
                return Err(LqError::StateValueColumns {
                    expected: chain.n_states(),
                    found: x_vals.ncols(),
                });
            }
        }
        Ok(Economy {
            beta,
            sg,
            sd,
            sb,
            ss,
            proc,
        })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn spending_selector(&self) -> &DVector<f64> {
        &self.sg
    }

    pub fn endowment_selector(&self) -> &DVector<f64> {
        &self.sd
    }

    pub fn bliss_selector(&self) -> &DVector<f64> {
        &self.sb
    }

    pub fn transfer_selector(&self) -> &DVector<f64> {
        &self.ss
    }

    pub fn process(&self) -> &SpendingProcess {
        &self.proc
    }
}
