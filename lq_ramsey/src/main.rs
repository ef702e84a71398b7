use std::process;

use lq_ramsey::figures::FigureData;
use lq_ramsey::scenarios::{run_scenario, ScenarioConfig};

const SEED: u64 = 42;

fn main() {
    println!("========================================");
    println!("LQ Ramsey Optimal Taxation");
    println!("Lucas-Stokey economy, linear-quadratic");
    println!("========================================");

    let runs = [
        (ScenarioConfig::ar1_spending(50, SEED), "out/ar1"),
        (ScenarioConfig::wartime_markov(15, SEED), "out/wartime"),
    ];

    for (config, dir) in runs {
        let result = match run_scenario(&config) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("{}: {err}", config.name);
                process::exit(1);
            }
        };

        result.print_summary();

        let figure = FigureData::from_path(&result.path, &result.name, result.seed);
        if let Err(err) = figure.write_all(dir) {
            eprintln!("failed to write figure data to {dir}: {err}");
            process::exit(1);
        }
        println!("Figure data written to {dir}/");
    }
}
