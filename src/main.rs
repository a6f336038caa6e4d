//! Climate Spiral - Main entry point
//!
//! Reads a table of seasonal mean temperatures, expands it to a monthly
//! series and writes an animated polar spiral as GIF.
//!
//! Settings resolve in this order: spiral.json defaults, then a JSON
//! overrides file (`--config`), then command-line flags.

use anyhow::Context;
use clap::Parser;
use climate_spiral::config::SpiralConfig;
use climate_spiral::pipeline::{self, PipelineOptions};
use climate_spiral::properties::PropertyReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "climate_spiral", version, about = "Animated climate spiral from seasonal temperatures")]
struct Cli {
    /// Seasonal CSV (YEAR, JAN-FEB, MAR-MAY, JUN-SEP, OCT-DEC)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output GIF path
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file of property overrides, e.g. {"palette": "Viridis"}
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the normalized monthly series to this CSV
    #[arg(long)]
    monthly_csv: Option<PathBuf>,

    /// Stop after the data pass (no GIF)
    #[arg(long)]
    no_render: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    tracing::info!("Climate Spiral v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        eprintln!("\n✗ Failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut props = match &cli.config {
        Some(path) => PropertyReader::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => PropertyReader::defaults(),
    };
    if let Some(input) = &cli.input {
        props.set("input.path", input.display().to_string());
    }
    if let Some(output) = &cli.output {
        props.set("output.path", output.display().to_string());
    }

    let config = SpiralConfig::from_properties(&props);
    tracing::debug!(?config, "Resolved configuration");

    let options = PipelineOptions {
        monthly_csv: cli.monthly_csv,
        render: !cli.no_render,
    };

    let summary = pipeline::run(&config, &options)?;
    if summary.degenerate {
        tracing::warn!("All temperatures are equal; the spiral is a flat circle");
    }
    tracing::info!(
        years = summary.years,
        months = summary.monthly_records,
        "✓ Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "climate_spiral",
            "--input",
            "in.csv",
            "--monthly-csv",
            "monthly.csv",
            "--no-render",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.csv")));
        assert_eq!(cli.monthly_csv, Some(PathBuf::from("monthly.csv")));
        assert!(cli.no_render);
        assert!(cli.output.is_none());
    }
}
