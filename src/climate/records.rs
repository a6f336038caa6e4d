//! Record types flowing through the reshape pass

use super::season::Season;

/// One input row: a year and its four seasonal mean temperatures
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyRecord {
    pub year: i32,
    /// Seasonal means indexed by `Season::index()`; None = missing
    pub seasons: [Option<f64>; 4],
}

impl YearlyRecord {
    pub fn new(year: i32, seasons: [Option<f64>; 4]) -> Self {
        Self { year, seasons }
    }

    /// Mean temperature reported for a season, if present
    pub fn season(&self, season: Season) -> Option<f64> {
        self.seasons[season.index()]
    }
}

/// One (year, month) temperature derived from a seasonal mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRecord {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    pub temperature: f64,
}

/// Monthly record annotated with its min-max normalized temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMonthlyRecord {
    pub year: i32,
    pub month: u32,
    pub temperature: f64,
    /// Temperature scaled into [0, 1] across the whole series
    pub temp_anomaly_norm: f64,
}

impl NormalizedMonthlyRecord {
    /// Radial distance used by the polar plot
    pub fn radius(&self) -> f64 {
        self.temp_anomaly_norm + 1.0
    }
}
