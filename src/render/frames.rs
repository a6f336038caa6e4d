//! Per-year animation frames
//!
//! Frame `Y` shows every record with `Year <= Y` in series order, so the
//! spiral grows one year at a time.

use crate::climate::{NormalizedMonthlyRecord, NormalizedSeries};
use crate::config::SpiralConfig;

/// Records visible in one animation frame
#[derive(Debug, Clone)]
pub struct YearFrame<'a> {
    pub year: i32,
    pub records: Vec<&'a NormalizedMonthlyRecord>,
}

impl<'a> YearFrame<'a> {
    /// Cumulative frame for `year`
    pub fn new(series: &'a NormalizedSeries, year: i32) -> Self {
        let records = series
            .records()
            .iter()
            .filter(|r| r.year <= year)
            .collect();
        Self { year, records }
    }

    /// Last record drawn in this frame
    pub fn latest(&self) -> Option<&'a NormalizedMonthlyRecord> {
        self.records.last().copied()
    }

    /// Records belonging to the frame's own year
    pub fn current_year(&self) -> impl Iterator<Item = &'a NormalizedMonthlyRecord> + '_ {
        let year = self.year;
        self.records.iter().copied().filter(move |r| r.year == year)
    }

    /// Title lines: configured title, then year and latest temperature
    pub fn title_lines(&self, config: &SpiralConfig) -> [String; 2] {
        let latest = self
            .latest()
            .map(|r| config.format_temperature(r.temperature))
            .unwrap_or_else(|| "n/a".to_string());
        [
            config.title.clone(),
            format!("Year: {} | Latest: {}", self.year, latest),
        ]
    }
}

/// One frame per distinct year, ascending
pub fn year_frames(series: &NormalizedSeries) -> impl Iterator<Item = YearFrame<'_>> + '_ {
    series
        .years()
        .into_iter()
        .map(move |year| YearFrame::new(series, year))
}
