//! Error types for the cellgraph command line

use thiserror::Error;

/// Errors in the command line itself (before any sheet is built)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Invalid number for {option}: {value}")]
    InvalidNumber { option: String, value: String },

    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),

    #[error("Expected CELL=FORMULA, got: {0}")]
    InvalidAssignment(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
