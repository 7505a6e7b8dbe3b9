//! Error types of the report pipeline.
//!
//! Library code returns these typed errors; the command layer wraps them in
//! `anyhow` and hands them to the message system for display.

use super::interval::ProjectId;
use crate::api::FetchError;
use chrono::NaiveDate;
use thiserror::Error;

/// A required setting is missing or malformed. Raised before any request
/// is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API token is missing: set API_TOKEN or run `worklog init`")]
    MissingToken,

    #[error("a date range is required for per-project reports (use --month or --from/--to)")]
    MissingRange,

    #[error("rounding interval must be a positive number of minutes, got {0}")]
    InvalidRoundingInterval(i64),

    #[error("minutes conversion factor must be positive, got {0}")]
    InvalidConversionFactor(f64),

    #[error("date range ends before it starts: {from} > {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("date {0} has no unambiguous local midnight")]
    AmbiguousMidnight(NaiveDate),

    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: String, value: String },
}

/// Everything that can stop a report from being produced.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("project {0} was not among the fetched projects")]
    UnresolvedProject(ProjectId),

    #[error("failed to render report: {0}")]
    Csv(#[from] csv::Error),

    #[error("rendered report is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
