use thiserror::Error;

/// Errors that can occur while loading, reshaping, or rendering climate data
#[derive(Debug, Error)]
pub enum ClimateError {
    /// File system error (input table, output image, config file)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Tabular read/write error from polars
    #[error("Table error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from the input table
    #[error("Missing column '{0}' in input table")]
    MissingColumn(String),

    /// The Year cell holds a value that is neither missing nor numeric
    #[error("Invalid year '{value}' at row {row}")]
    InvalidYear { row: usize, value: String },

    /// No monthly records survived expansion
    #[error("No monthly temperature records to process")]
    EmptySeries,

    /// Palette name not present in the registry
    #[error("Unknown palette '{0}'")]
    UnknownPalette(String),

    /// Configuration error (unreadable or malformed overrides)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing or GIF encoding failure
    #[error("Render error: {0}")]
    Render(String),
}

impl ClimateError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ClimateError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Type alias for Results using ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
