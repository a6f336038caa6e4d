//! Seasonal-to-monthly expansion and global min-max normalization
//!
//! Each yearly row fans out into one monthly record per calendar month of
//! every season whose value is present. Emission order follows input row
//! order, then season order, then month order. Missing seasons are skipped
//! with no substitution or interpolation.
//!
//! Normalization is a second pass over the materialized series: the global
//! temperature range is computed once and every record is scaled into [0, 1].

use super::error::{ClimateError, Result};
use super::records::{MonthlyRecord, NormalizedMonthlyRecord, YearlyRecord};
use super::season::Season;

/// Lazily expand yearly rows into monthly records
pub fn expand(records: &[YearlyRecord]) -> impl Iterator<Item = MonthlyRecord> + '_ {
    records.iter().flat_map(|record| {
        Season::ALL
            .into_iter()
            .filter_map(move |season| record.season(season).map(|t| (season, t)))
            .flat_map(move |(season, temperature)| {
                season.months().iter().map(move |&month| MonthlyRecord {
                    year: record.year,
                    month,
                    temperature,
                })
            })
    })
}

/// Global temperature bounds of a monthly series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// Range of a set of temperatures, None if empty
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { min, max })
    }

    /// Range of the temperatures in a monthly series
    pub fn of(records: &[MonthlyRecord]) -> Option<Self> {
        Self::from_values(records.iter().map(|r| r.temperature))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when every temperature is identical
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Min-max scale a temperature into [0, 1]
    ///
    /// A degenerate range maps everything to 0.0.
    pub fn normalize(&self, temperature: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (temperature - self.min) / self.span()
        }
    }
}

/// Monthly series annotated with normalized temperatures
#[derive(Debug, Clone)]
pub struct NormalizedSeries {
    records: Vec<NormalizedMonthlyRecord>,
    range: TemperatureRange,
}

impl NormalizedSeries {
    pub fn records(&self) -> &[NormalizedMonthlyRecord] {
        &self.records
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Constant temperature across the whole series
    pub fn is_degenerate(&self) -> bool {
        self.range.is_degenerate()
    }

    /// Largest normalized value (1.0 unless degenerate)
    pub fn max_norm(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.temp_anomaly_norm)
            .fold(0.0, f64::max)
    }

    /// Distinct years, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

/// Annotate a materialized monthly series with `Temp_Anomaly_Norm`
///
/// # Errors
/// Returns `EmptySeries` when there is nothing to normalize.
pub fn normalize(monthly: Vec<MonthlyRecord>) -> Result<NormalizedSeries> {
    let range = TemperatureRange::of(&monthly).ok_or(ClimateError::EmptySeries)?;

    if range.is_degenerate() {
        tracing::warn!(
            temperature = range.min,
            "All monthly temperatures are identical; normalized values set to 0"
        );
    }

    let records = monthly
        .into_iter()
        .map(|r| NormalizedMonthlyRecord {
            year: r.year,
            month: r.month,
            temperature: r.temperature,
            temp_anomaly_norm: range.normalize(r.temperature),
        })
        .collect();

    Ok(NormalizedSeries { records, range })
}
