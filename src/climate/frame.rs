//! Monthly series to polars DataFrame conversion
//!
//! Produces the month-wise table (`Year`, `Month`, `Temperature`,
//! `Temp_Anomaly_Norm`) and writes it out as CSV when requested.

use super::error::{ClimateError, Result};
use super::expand::NormalizedSeries;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Convert a normalized series into a DataFrame, one row per record
pub fn series_to_dataframe(series: &NormalizedSeries) -> Result<DataFrame> {
    let records = series.records();

    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let months: Vec<i32> = records.iter().map(|r| r.month as i32).collect();
    let temperatures: Vec<f64> = records.iter().map(|r| r.temperature).collect();
    let norms: Vec<f64> = records.iter().map(|r| r.temp_anomaly_norm).collect();

    let df = df! {
        "Year" => years,
        "Month" => months,
        "Temperature" => temperatures,
        "Temp_Anomaly_Norm" => norms
    }?;
    Ok(df)
}

/// Write the monthly series as CSV (with header)
pub fn write_monthly_csv(series: &NormalizedSeries, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = series_to_dataframe(series)?;
    let mut file = File::create(path).map_err(|e| ClimateError::io(path, e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    tracing::info!(path = %path.display(), rows = df.height(), "Wrote monthly series");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::expand::{expand, normalize};
    use crate::climate::records::YearlyRecord;

    fn sample_series() -> NormalizedSeries {
        let rows = vec![
            YearlyRecord::new(2000, [Some(10.0), None, Some(30.0), Some(20.0)]),
            YearlyRecord::new(2001, [Some(15.0), None, None, None]),
        ];
        normalize(expand(&rows).collect()).unwrap()
    }

    #[test]
    fn test_series_to_dataframe_shape() {
        let df = series_to_dataframe(&sample_series()).unwrap();

        assert_eq!(df.height(), 11);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Year", "Month", "Temperature", "Temp_Anomaly_Norm"]);
        assert_eq!(df.column("Year").unwrap().dtype(), &DataType::Int32);
        assert_eq!(df.column("Temp_Anomaly_Norm").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_series_to_dataframe_values() {
        let df = series_to_dataframe(&sample_series()).unwrap();

        let months: Vec<Option<i32>> = df
            .column("Month")
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(&months[..3], &[Some(1), Some(2), Some(6)]);

        let norms: Vec<Option<f64>> = df
            .column("Temp_Anomaly_Norm")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(norms[0], Some(0.0));
        assert_eq!(norms[2], Some(1.0));
        assert_eq!(norms[10], Some(0.25));
    }

    #[test]
    fn test_write_monthly_csv() {
        let path = std::env::temp_dir().join(format!(
            "climate_spiral_monthly_{}.csv",
            std::process::id()
        ));
        write_monthly_csv(&sample_series(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("Year,Month,Temperature,Temp_Anomaly_Norm"));
        assert_eq!(lines.count(), 11);
    }
}
