//! Core error type
//!
//! Raised by range construction, table assembly and settings loading.
//! Subdivision lookups never fail and have no variant here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Years {start}..={end} outside supported window {min}..={max}")]
    YearOutOfBounds { start: i32, end: i32, min: i32, max: i32 },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row count mismatch: expected {expected}, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("Non-contiguous years: expected {expected}, found {found}")]
    YearGap { expected: i32, found: i32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
