//! Climate data module
//!
//! Structure:
//! - `season.rs`: Season labels and the season-to-months map
//! - `records.rs`: Yearly, monthly and normalized record types
//! - `table.rs`: CSV loading and numeric coercion
//! - `expand.rs`: Seasonal-to-monthly expansion and normalization
//! - `frame.rs`: Monthly series to DataFrame / CSV
//! - `palettes.rs`, `colors.rs`: Palettes and the temperature color scale
//! - `error.rs`: Error types

pub mod colors;
pub mod error;
pub mod expand;
pub mod frame;
pub mod palettes;
pub mod records;
pub mod season;
pub mod table;

// Re-exports for convenience
pub use colors::{ColorScale, ColorStop};
pub use error::{ClimateError, Result};
pub use expand::{expand, normalize, NormalizedSeries, TemperatureRange};
pub use frame::{series_to_dataframe, write_monthly_csv};
pub use palettes::{palette_registry, PaletteDefinition};
pub use records::{MonthlyRecord, NormalizedMonthlyRecord, YearlyRecord};
pub use season::Season;
pub use table::{load_yearly_records, load_yearly_records_from_reader, yearly_records_from_frame};
