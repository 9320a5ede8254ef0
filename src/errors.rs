// errors.rs
use std::fmt;

/// Errors originating from report generation itself
/// (config, output) or downstream layers (DB).
#[derive(Debug)]
pub enum ReportError {
    ConfigError(String),
    DbError(String),
    IoError(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::ConfigError(msg) => write!(f, "Config Error: {msg}"),
            ReportError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ReportError::IoError(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::IoError(e.to_string())
    }
}
