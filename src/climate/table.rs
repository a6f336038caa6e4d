//! Seasonal input table loading
//!
//! Reads the CSV with every column as text and converts the cells we need
//! ourselves, so coercion rules stay explicit:
//! - Year: missing/NA drops the row, numbers are truncated to integers,
//!   anything else is a fatal `InvalidYear`
//! - Seasons: anything that is not a number becomes missing
//!
//! Columns other than `YEAR` and the four season labels are ignored.

use super::error::{ClimateError, Result};
use super::records::YearlyRecord;
use super::season::Season;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Header of the year column
pub const YEAR_COLUMN: &str = "YEAR";

/// Cell values treated as missing (same set a pandas reader treats as NA)
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load yearly records from a CSV file
pub fn load_yearly_records(path: impl AsRef<Path>) -> Result<Vec<YearlyRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ClimateError::io(path, e))?;
    let df = read_table(file)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded input table"
    );

    yearly_records_from_frame(&df)
}

/// Load yearly records from any CSV byte source
pub fn load_yearly_records_from_reader<R: MmapBytesReader>(reader: R) -> Result<Vec<YearlyRecord>> {
    let df = read_table(reader)?;
    yearly_records_from_frame(&df)
}

fn read_table<R: MmapBytesReader>(reader: R) -> Result<DataFrame> {
    // Schema inference off: every column arrives as String
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(reader)
        .finish()?;
    Ok(df)
}

/// Convert a loaded table into yearly records
///
/// Works on any column types; cells are cast to text before parsing.
pub fn yearly_records_from_frame(df: &DataFrame) -> Result<Vec<YearlyRecord>> {
    let years = text_column(df, YEAR_COLUMN)?;

    let mut seasons: Vec<Vec<Option<f64>>> = Vec::with_capacity(Season::ALL.len());
    for season in Season::ALL {
        let values = text_column(df, season.label())?
            .iter()
            .map(|cell| cell.as_deref().and_then(parse_temperature))
            .collect();
        seasons.push(values);
    }

    let mut records = Vec::with_capacity(years.len());
    let mut dropped = 0usize;

    for (row, cell) in years.iter().enumerate() {
        let Some(year) = parse_year(cell.as_deref(), row + 1)? else {
            dropped += 1;
            continue;
        };

        let mut values = [None; 4];
        for (slot, column) in values.iter_mut().zip(&seasons) {
            *slot = column[row];
        }
        records.push(YearlyRecord::new(year, values));
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Dropped rows with missing year");
    }

    Ok(records)
}

/// Fetch a column by header (trimmed, ASCII case-insensitive) as text cells
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .get_columns()
        .iter()
        .find(|c| c.name().trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ClimateError::MissingColumn(name.to_string()))?;

    let series = column.as_materialized_series().cast(&DataType::String)?;
    let cells = series
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect();
    Ok(cells)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Parse a Year cell; Ok(None) means the row is dropped
fn parse_year(cell: Option<&str>, row: usize) -> Result<Option<i32>> {
    let Some(cell) = cell.map(str::trim) else {
        return Ok(None);
    };
    if is_missing(cell) {
        return Ok(None);
    }
    if let Ok(year) = cell.parse::<i32>() {
        return Ok(Some(year));
    }

    match cell.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) if (i32::MIN as f64..=i32::MAX as f64).contains(&value.trunc()) => {
            Ok(Some(value.trunc() as i32))
        }
        _ => Err(ClimateError::InvalidYear {
            row,
            value: cell.to_string(),
        }),
    }
}

/// Coerce a seasonal cell to a temperature; non-numeric or non-finite becomes missing
fn parse_temperature(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if is_missing(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(csv: &str) -> Result<Vec<YearlyRecord>> {
        load_yearly_records_from_reader(Cursor::new(csv.as_bytes().to_vec()))
    }

    #[test]
    fn test_load_basic_table() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC,ANNUAL\n\
                   1901,19.95,27.28,28.12,23.86,25.42\n\
                   1902,20.21,27.51,28.03,23.52,25.48\n";
        let records = load(csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 1901);
        assert_eq!(
            records[0].seasons,
            [Some(19.95), Some(27.28), Some(28.12), Some(23.86)]
        );
        assert_eq!(records[1].season(Season::OctDec), Some(23.52));
    }

    #[test]
    fn test_missing_year_rows_dropped() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1901,19.9,27.2,28.1,23.8\n\
                   ,20.0,27.0,28.0,23.0\n\
                   NaN,20.0,27.0,28.0,23.0\n\
                   1903,20.1,27.3,28.2,23.9\n";
        let records = load(csv).unwrap();

        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1901, 1903]);
    }

    #[test]
    fn test_non_numeric_season_is_missing() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   2000,10.0,abc,30.0, 20.0 \n";
        let records = load(csv).unwrap();

        assert_eq!(
            records[0].seasons,
            [Some(10.0), None, Some(30.0), Some(20.0)]
        );
    }

    #[test]
    fn test_nan_season_is_missing() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   2000,NaN,,30.0,NA\n";
        let records = load(csv).unwrap();
        assert_eq!(records[0].seasons, [None, None, Some(30.0), None]);
    }

    #[test]
    fn test_float_year_truncated() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1901.0,1,2,3,4\n";
        let records = load(csv).unwrap();
        assert_eq!(records[0].year, 1901);
    }

    #[test]
    fn test_invalid_year_is_fatal() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1901,1,2,3,4\n\
                   year?,1,2,3,4\n";
        match load(csv) {
            Err(ClimateError::InvalidYear { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "year?");
            }
            other => panic!("expected InvalidYear, got {:?}", other),
        }
    }

    #[test]
    fn test_spreadsheet_na_years_dropped() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1901,1,2,3,4\n\
                   #NA,1,1,1,1\n\
                   -1.#IND,1,1,1,1\n\
                   #N/A N/A,1,1,1,1\n";
        let records = load(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 1901);
    }

    #[test]
    fn test_year_out_of_range_is_fatal() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1e12,1,2,3,4\n";
        match load(csv) {
            Err(ClimateError::InvalidYear { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "1e12");
            }
            other => panic!("expected InvalidYear, got {:?}", other),
        }
    }

    #[test]
    fn test_infinite_season_is_missing() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,JUN-SEP,OCT-DEC\n\
                   1901,inf,2,-inf,4\n";
        let records = load(csv).unwrap();
        assert_eq!(records[0].seasons, [None, Some(2.0), None, Some(4.0)]);
    }

    #[test]
    fn test_missing_season_column() {
        let csv = "YEAR,JAN-FEB,MAR-MAY,OCT-DEC\n1901,1,2,4\n";
        match load(csv) {
            Err(ClimateError::MissingColumn(name)) => assert_eq!(name, "JUN-SEP"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_header_case_and_whitespace() {
        let csv = "Year, jan-feb ,MAR-MAY,JUN-SEP,OCT-DEC\n1950,1,2,3,4\n";
        let records = load(csv).unwrap();
        assert_eq!(records[0].year, 1950);
        assert_eq!(records[0].season(Season::JanFeb), Some(1.0));
    }

    #[test]
    fn test_typed_frame() {
        let df = df! {
            "YEAR" => [Some(1990.0), None],
            "JAN-FEB" => [Some(18.5), Some(19.0)],
            "MAR-MAY" => [None::<f64>, Some(26.0)],
            "JUN-SEP" => [Some(28.0), Some(28.5)],
            "OCT-DEC" => [Some(22.0), Some(22.5)]
        }
        .unwrap();

        let records = yearly_records_from_frame(&df).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 1990);
        assert_eq!(records[0].seasons, [Some(18.5), None, Some(28.0), Some(22.0)]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_yearly_records("/nonexistent/annual_seasonal_mean.csv");
        assert!(matches!(result, Err(ClimateError::Io { .. })));
    }
}
