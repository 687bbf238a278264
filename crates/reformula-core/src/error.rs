//! Error types for Reformula core.

use thiserror::Error;

/// Errors that can occur while loading, transforming or saving a sheet
#[derive(Error, Debug)]
pub enum ReformulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No file path set")]
    NoFilePath,

    #[error("CSV file is empty")]
    EmptyCsv,
}

pub type Result<T> = std::result::Result<T, ReformulaError>;
