//! Shared spiral generation pipeline
//!
//! The pipeline:
//! 1. Loads the seasonal table
//! 2. Expands seasons into monthly records
//! 3. Normalizes temperatures over the whole series
//! 4. Optionally exports the monthly series as CSV
//! 5. Renders the animated spiral

use crate::climate::{self, NormalizedSeries, TemperatureRange, YearlyRecord};
use crate::config::SpiralConfig;
use crate::memprof;
use crate::render::SpiralRenderer;
use anyhow::Context;
use std::path::PathBuf;
use std::time::Instant;

/// Error type for pipeline operations
pub type PipelineError = anyhow::Error;

/// Steps to run beyond the data pass
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Where to write the monthly series, if anywhere
    pub monthly_csv: Option<PathBuf>,
    /// Render the GIF (false = data pass only)
    pub render: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            monthly_csv: None,
            render: true,
        }
    }
}

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub yearly_rows: usize,
    pub monthly_records: usize,
    pub years: usize,
    pub range: TemperatureRange,
    pub degenerate: bool,
    /// Frames written, None when rendering was skipped
    pub frames: Option<usize>,
}

/// Expand and normalize yearly records
pub fn build_series(records: &[YearlyRecord]) -> climate::Result<NormalizedSeries> {
    let monthly: Vec<_> = climate::expand(records).collect();
    tracing::info!(
        yearly = records.len(),
        monthly = monthly.len(),
        "Expanded seasonal means into monthly records"
    );
    climate::normalize(monthly)
}

/// Run the pipeline end to end
pub fn run(config: &SpiralConfig, options: &PipelineOptions) -> Result<PipelineSummary, PipelineError> {
    let start = Instant::now();
    let m0 = memprof::checkpoint("pipeline START");

    tracing::info!("[1/4] Loading {}", config.input_path.display());
    let records = climate::load_yearly_records(&config.input_path)
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;
    let t1 = memprof::time_delta("After load", start, start);

    tracing::info!("[2/4] Expanding and normalizing...");
    let series = build_series(&records).context("Failed to build monthly series")?;
    let range = series.range();
    tracing::info!(
        min = range.min,
        max = range.max,
        years = series.years().len(),
        "Temperature range"
    );
    let m1 = memprof::delta("After normalize", m0);
    let t2 = memprof::time_delta("After normalize", start, t1);

    if let Some(path) = &options.monthly_csv {
        tracing::info!("[3/4] Exporting monthly series to {}", path.display());
        climate::write_monthly_csv(&series, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        tracing::info!("[3/4] Monthly export not requested");
    }

    let frames = if options.render {
        tracing::info!(
            "[4/4] Rendering {}x{} @ {} fps, palette '{}'...",
            config.width,
            config.height,
            config.fps,
            config.palette
        );
        let renderer = SpiralRenderer::new(config, &series)?;
        let frames = renderer
            .render_gif(&config.output_path)
            .with_context(|| format!("Failed to render {}", config.output_path.display()))?;
        memprof::delta("After render", m1);
        memprof::time_delta("After render", start, t2);
        tracing::info!(
            frames,
            path = %config.output_path.display(),
            "✓ Spiral saved"
        );
        Some(frames)
    } else {
        tracing::info!("[4/4] Rendering skipped");
        None
    };

    Ok(PipelineSummary {
        yearly_rows: records.len(),
        monthly_records: series.len(),
        years: series.years().len(),
        range,
        degenerate: series.is_degenerate(),
        frames,
    })
}
