//! Errors raised while loading tables or scoring configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// Opening or reading a CSV table failed.
    #[error("failed to read CSV table at {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// Writing a CSV table failed.
    #[error("failed to write CSV output")]
    Write {
        #[source]
        source: csv::Error,
    },
    /// A column the scorer needs is absent from the header row.
    #[error("required column `{column}` is missing")]
    MissingColumn { column: &'static str },
    /// A cell that must hold a number could not be parsed.
    #[error("row {row}: column `{column}` holds `{value}`, expected a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("failed to read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Parameters that would make scoring meaningless.
    #[error("invalid scoring parameters: {reason}")]
    InvalidConfig { reason: String },
}
