//! Structured export of simulated paths for figure generation.
//!
//! Results are written as CSV and JSON for plotting in Python (pandas,
//! matplotlib). The standard four-panel figure reads straight off the
//! per-period columns:
//! - panel 1: `rvn`, `g`, `c`
//! - panel 2: `rvn`, `g`, `debt` (from period 1)
//! - panel 3: `rate - 1`
//! - panel 4: `rvn`, `g`, `pi`
//!
//! and the adjustment-factor figure uses `xi` and `cum_pi`.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::paths::RamseyPath;

/// Mean, standard deviation, and range of one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize a series; empty input yields all zeros.
pub fn summarize(values: &[f64]) -> SeriesSummary {
    if values.is_empty() {
        return SeriesSummary {
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    SeriesSummary {
        mean,
        std: variance.sqrt(),
        min: values.iter().cloned().fold(f64::INFINITY, f64::min),
        max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Run provenance for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub scenario: String,
    pub seed: u64,
    pub periods: usize,
    pub timestamp: String,
}

/// One per-period row of the exported series.
///
/// The transition series are attached to the later period of the pair
/// they describe, so `xi`, `pi` and `cum_pi` are absent in period 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRow {
    pub period: usize,
    pub g: f64,
    pub d: f64,
    pub b: f64,
    pub s: f64,
    pub c: f64,
    pub l: f64,
    pub p: f64,
    pub tau: f64,
    pub rvn: f64,
    pub debt: f64,
    pub rate: f64,
    pub xi: Option<f64>,
    pub pi: Option<f64>,
    pub cum_pi: Option<f64>,
}

/// Per-series summary statistics included in the JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSummary {
    pub tax_rate: SeriesSummary,
    pub revenue: SeriesSummary,
    pub spending: SeriesSummary,
    pub debt: SeriesSummary,
    pub gross_return: SeriesSummary,
}

/// Everything needed to reproduce the standard figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureData {
    pub metadata: RunMetadata,
    pub rows: Vec<PathRow>,
    pub summary: PathSummary,
}

impl FigureData {
    /// Flatten a simulated path into export rows plus summaries.
    pub fn from_path(path: &RamseyPath, scenario: &str, seed: u64) -> FigureData {
        let periods = path.periods();
        let rows = (0..periods)
            .map(|t| PathRow {
                period: t,
                g: path.g[t],
                d: path.d[t],
                b: path.b[t],
                s: path.s[t],
                c: path.c[t],
                l: path.l[t],
                p: path.p[t],
                tau: path.tau[t],
                rvn: path.rvn[t],
                debt: path.debt[t],
                rate: path.rate[t],
                xi: (t > 0).then(|| path.xi[t - 1]),
                pi: (t > 0).then(|| path.pi[t - 1]),
                cum_pi: (t > 0).then(|| path.cum_pi[t - 1]),
            })
            .collect();

        FigureData {
            metadata: RunMetadata {
                scenario: scenario.to_string(),
                seed,
                periods,
                timestamp: Utc::now().to_rfc3339(),
            },
            rows,
            summary: PathSummary {
                tax_rate: summarize(&path.tau),
                revenue: summarize(&path.rvn),
                spending: summarize(&path.g),
                debt: summarize(&path.debt),
                gross_return: summarize(&path.rate),
            },
        }
    }

    /// Write the per-period series to CSV.
    pub fn write_series_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "period", "g", "d", "b", "s", "c", "l", "p", "tau", "rvn", "debt", "rate", "xi",
            "pi", "cum_pi",
        ])?;

        let optional = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        for row in &self.rows {
            wtr.write_record(&[
                row.period.to_string(),
                row.g.to_string(),
                row.d.to_string(),
                row.b.to_string(),
                row.s.to_string(),
                row.c.to_string(),
                row.l.to_string(),
                row.p.to_string(),
                row.tau.to_string(),
                row.rvn.to_string(),
                row.debt.to_string(),
                row.rate.to_string(),
                optional(row.xi),
                optional(row.pi),
                optional(row.cum_pi),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write metadata, rows, and summaries as pretty JSON.
    pub fn write_summary_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write all outputs to a directory.
    ///
    /// Creates:
    /// - path_series.csv
    /// - summary.json
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.write_series_csv(dir.join("path_series.csv"))?;
        self.write_summary_json(dir.join("summary.json"))?;
        Ok(())
    }
}
