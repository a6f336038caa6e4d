//! Synthetic seasonal input generator
//!
//! Writes a CSV in the layout the spiral reads (YEAR, JAN-FEB, MAR-MAY,
//! JUN-SEP, OCT-DEC, ANNUAL) with a linear warming trend and a small
//! deterministic wobble. Useful for trying palettes and layout without the
//! real dataset.
//!
//! Usage:
//! ```bash
//! cargo run --bin synthetic_seasons -- --from 1901 --to 2017 --output seasons.csv
//! cargo run --bin climate_spiral -- --input seasons.csv --output spiral.gif
//! ```

use anyhow::Context;
use clap::Parser;
use climate_spiral::climate::Season;
use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

/// Baseline mean per season, in season order
const BASELINES: [f64; 4] = [19.6, 26.4, 27.7, 23.1];

#[derive(Parser, Debug)]
#[command(name = "synthetic_seasons", about = "Generate a synthetic seasonal temperature table")]
struct Args {
    #[arg(long, default_value_t = 1901)]
    from: i32,

    #[arg(long, default_value_t = 2017)]
    to: i32,

    /// Warming per year, in degrees
    #[arg(long, default_value_t = 0.01)]
    trend: f64,

    /// Leave MAR-MAY empty every N years (0 = never)
    #[arg(long, default_value_t = 0)]
    gap_every: u32,

    #[arg(long, default_value = "synthetic_seasonal_mean.csv")]
    output: PathBuf,
}

fn season_value(season_index: usize, offset: i32, trend: f64) -> f64 {
    let wobble = 0.35 * ((offset as f64) * 0.7 + season_index as f64).sin();
    let value = BASELINES[season_index] + trend * offset as f64 + wobble;
    (value * 100.0).round() / 100.0
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();
    let start = Instant::now();

    anyhow::ensure!(args.from <= args.to, "--from must not be after --to");

    let years: Vec<i32> = (args.from..=args.to).collect();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(years.len()); 4];
    let mut annual = Vec::with_capacity(years.len());

    for &year in &years {
        let offset = year - args.from;
        let gap = args.gap_every > 0 && offset > 0 && offset as u32 % args.gap_every == 0;

        let mut sum = 0.0;
        let mut count = 0;
        for (i, column) in columns.iter_mut().enumerate() {
            if gap && Season::ALL[i] == Season::MarMay {
                column.push(None);
                continue;
            }
            let value = season_value(i, offset, args.trend);
            sum += value;
            count += 1;
            column.push(Some(value));
        }
        annual.push(((sum / count as f64) * 100.0).round() / 100.0);
    }

    let [jan_feb, mar_may, jun_sep, oct_dec]: [Vec<Option<f64>>; 4] = columns
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected four season columns"))?;

    let mut df = df!(
        "YEAR" => years,
        Season::JanFeb.label() => jan_feb,
        Season::MarMay.label() => mar_may,
        Season::JunSep.label() => jun_sep,
        Season::OctDec.label() => oct_dec,
        "ANNUAL" => annual,
    )?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

    tracing::info!(
        rows = df.height(),
        path = %args.output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "✓ Synthetic table written"
    );
    Ok(())
}
