//! Named parameterizations and a runner.
//!
//! Parameter blocks live in preset constructors rather than config
//! files; each preset reproduces a standard experiment for the model.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stochproc::{MarkovChain, VarProcess};

use crate::economy::{Economy, SpendingProcess};
use crate::errors::LqResult;
use crate::figures::summarize;
use crate::paths::{compute_paths, RamseyPath};

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Name of the scenario.
    pub name: String,
    /// The parameterized economy.
    pub economy: Economy,
    /// Number of simulated periods.
    pub periods: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl ScenarioConfig {
    /// AR(1) government spending around a mean of `mg = 0.35` with
    /// persistence `rho = 0.7`, constant bliss point, no endowment or
    /// transfers. The state is `[g, 1]`.
    pub fn ar1_spending(periods: usize, seed: u64) -> Self {
        let beta = 1.0 / 1.05;
        let rho: f64 = 0.7;
        let mg = 0.35;
        let a = DMatrix::from_row_slice(2, 2, &[rho, mg * (1.0 - rho), 0.0, 1.0]);
        let c = DMatrix::from_row_slice(2, 1, &[(1.0 - rho * rho).sqrt() * mg / 10.0, 0.0]);
        let proc =
            SpendingProcess::Var(VarProcess::new(a, c).expect("AR(1) preset process is valid"));
        let economy = Economy::new(
            beta,
            DVector::from_column_slice(&[1.0, 0.0]),
            DVector::from_column_slice(&[0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 2.135]),
            DVector::from_column_slice(&[0.0, 0.0]),
            proc,
        )
        .expect("AR(1) preset economy is valid");
        ScenarioConfig {
            name: "AR(1) government spending".to_string(),
            economy,
            periods,
            seed,
        }
    }

    /// Three-state war/peace chain. Spending starts high; the war ends
    /// each period with probability 0.2, after which spending either
    /// stays elevated or falls permanently to the peacetime level. The
    /// state rows are `[g, d, b, s, 1]`.
    pub fn wartime_markov(periods: usize, seed: u64) -> Self {
        let beta = 1.0 / 1.05;
        let p = DMatrix::from_row_slice(
            3,
            3,
            &[0.8, 0.2, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 1.0],
        );
        let chain = MarkovChain::new(p).expect("wartime preset chain is valid");
        let x_vals = DMatrix::from_row_slice(
            5,
            3,
            &[
                0.5, 0.5, 0.25, // g
                0.0, 0.0, 0.0, // d
                2.2, 2.2, 2.2, // b
                0.0, 0.0, 0.0, // s
                1.0, 1.0, 1.0, // constant
            ],
        );
        let proc = SpendingProcess::Markov { chain, x_vals };
        let economy = Economy::new(
            beta,
            DVector::from_column_slice(&[1.0, 0.0, 0.0, 0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 1.0, 0.0, 0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 0.0, 1.0, 0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 0.0, 0.0, 1.0, 0.0]),
            proc,
        )
        .expect("wartime preset economy is valid");
        ScenarioConfig {
            name: "Wartime Markov spending".to_string(),
            economy,
            periods,
            seed,
        }
    }
}

/// Result of running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub seed: u64,
    pub path: RamseyPath,
}

impl ScenarioResult {
    /// Print a summary of the run.
    pub fn print_summary(&self) {
        let tax = summarize(&self.path.tau);
        let rvn = summarize(&self.path.rvn);
        let spending = summarize(&self.path.g);
        let debt = summarize(&self.path.debt);
        let rate = summarize(&self.path.rate);

        println!("\n=== {} ===", self.name);
        println!(
            "Periods: {}, seed: {}",
            self.path.periods(),
            self.seed
        );
        println!("Tax rate:     mean={:.4}, std={:.4}", tax.mean, tax.std);
        println!("Revenue:      mean={:.4}, std={:.4}", rvn.mean, rvn.std);
        println!(
            "Spending:     mean={:.4}, std={:.4}",
            spending.mean, spending.std
        );
        println!(
            "Debt:         mean={:.4}, final={:.4}",
            debt.mean,
            self.path.debt[self.path.periods() - 1]
        );
        println!(
            "Gross return: mean={:.4}, range=[{:.4}, {:.4}]",
            rate.mean, rate.min, rate.max
        );
    }
}

/// Run a single scenario with its own seeded generator.
pub fn run_scenario(config: &ScenarioConfig) -> LqResult<ScenarioResult> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let path = compute_paths(config.periods, &config.economy, &mut rng)?;
    Ok(ScenarioResult {
        name: config.name.clone(),
        seed: config.seed,
        path,
    })
}
