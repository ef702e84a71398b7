use approx::assert_relative_eq;
use lq_ramsey::figures::FigureData;
use lq_ramsey::scenarios::{run_scenario, ScenarioConfig};
use lq_ramsey::{compute_paths, LqError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn ar1_scenario_end_to_end_fifty_periods() {
    let config = ScenarioConfig::ar1_spending(50, 42);
    let result = run_scenario(&config).expect("AR(1) scenario must have an equilibrium");

    let path = &result.path;
    assert_eq!(path.periods(), 50);
    for series in [
        &path.g, &path.d, &path.b, &path.s, &path.c, &path.l, &path.p, &path.tau, &path.rvn,
        &path.debt, &path.rate,
    ] {
        assert_eq!(series.len(), 50);
        assert!(series.iter().all(|v| v.is_finite()));
    }
    assert_eq!(path.xi.len(), 49);
    assert_eq!(path.pi.len(), 49);
    assert_eq!(path.cum_pi.len(), 49);
}

#[test]
fn ar1_paths_satisfy_model_identities() {
    let config = ScenarioConfig::ar1_spending(50, 42);
    let path = run_scenario(&config).unwrap().path;

    for t in 0..50 {
        // Feasibility: c + g = d + l.
        assert_relative_eq!(
            path.c[t] + path.g[t],
            path.d[t] + path.l[t],
            epsilon = 1e-9
        );
        // Revenue definition: rvn = tau * l.
        assert_relative_eq!(path.rvn[t], path.tau[t] * path.l[t], epsilon = 1e-9);
        // Price is the marginal utility of consumption: b - c.
        assert_relative_eq!(path.p[t], path.b[t] - path.c[t], epsilon = 1e-9);
    }

    // Debt payoff accounting over each transition.
    for t in 0..49 {
        assert_relative_eq!(
            path.pi[t],
            path.debt[t + 1] - path.rate[t] * path.debt[t] - path.rvn[t] + path.g[t],
            epsilon = 1e-9
        );
    }
}

#[test]
fn ar1_runs_are_reproducible_and_seed_sensitive() {
    let a = run_scenario(&ScenarioConfig::ar1_spending(50, 7)).unwrap();
    let b = run_scenario(&ScenarioConfig::ar1_spending(50, 7)).unwrap();
    assert_eq!(a.path.g, b.path.g);
    assert_eq!(a.path.tau, b.path.tau);

    let c = run_scenario(&ScenarioConfig::ar1_spending(50, 8)).unwrap();
    assert_ne!(a.path.g, c.path.g);
}

#[test]
fn wartime_scenario_end_to_end() {
    let config = ScenarioConfig::wartime_markov(15, 42);
    let path = run_scenario(&config).unwrap().path;

    assert_eq!(path.periods(), 15);
    // Spending starts at the wartime level and only ever steps down.
    assert_relative_eq!(path.g[0], 0.5, epsilon = 1e-12);
    for t in 1..15 {
        assert!(path.g[t] <= path.g[t - 1] + 1e-12);
    }
    // The bliss point is constant across chain states.
    for &b in &path.b {
        assert_relative_eq!(b, 2.2, epsilon = 1e-12);
    }
}

#[test]
fn horizon_below_two_periods_is_rejected() {
    let config = ScenarioConfig::ar1_spending(1, 42);
    let mut rng = StdRng::seed_from_u64(config.seed);
    assert!(matches!(
        compute_paths(config.periods, &config.economy, &mut rng),
        Err(LqError::HorizonTooShort { periods: 1 })
    ));
}

#[test]
fn figure_export_covers_every_period() {
    let result = run_scenario(&ScenarioConfig::ar1_spending(50, 42)).unwrap();
    let figure = FigureData::from_path(&result.path, &result.name, result.seed);

    assert_eq!(figure.rows.len(), 50);
    assert_eq!(figure.metadata.periods, 50);
    assert_eq!(figure.metadata.seed, 42);
    // Panel 3 of the standard figure plots rate - 1; the net rate must
    // hover near the discount rate implied by beta = 1/1.05.
    assert!(figure.summary.gross_return.mean > 1.0);
    assert!((figure.summary.gross_return.mean - 1.05).abs() < 0.05);
}
