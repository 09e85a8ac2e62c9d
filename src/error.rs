use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read benchmark export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to render chart to {path}: {message}")]
    Draw { path: PathBuf, message: String },
}

/// Why a single data row was dropped. Never fatal.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("invalid integer for {column}: {value:?} ({source})")]
    InvalidInteger {
        column: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float for {column}: {value:?} ({source})")]
    InvalidFloat {
        column: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("undecodable row: {0}")]
    Undecodable(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
