// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for EdgeRouter Exporter application

use thiserror::Error;

/// Structural error raised by a report parser
///
/// Every variant carries the raw line that broke the grammar so the failure
/// can be diagnosed from the logs alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A mandatory field never appeared in the report
    #[error("expected {field}, found nothing")]
    MissingField { field: &'static str },

    /// A table row did not split into the expected number of columns
    #[error("unexpected number of fields, expecting {expected} fields: {line}")]
    FieldCountMismatch { expected: usize, line: String },

    /// The neighbor column of a BGP row is not an IP address
    #[error("failed to parse BGP neighbor {value:?}: {line}")]
    AddressParse { value: String, line: String },

    /// A line appeared where the report grammar does not allow it
    #[error("unexpected token, expecting {expected}: {line}")]
    UnexpectedToken { expected: &'static str, line: String },

    /// A JSON report could not be decoded
    #[error("invalid {report} JSON: {message}")]
    Json {
        report: &'static str,
        message: String,
    },
}

impl ParseError {
    /// Raw report line that caused the error, if any
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::MissingField { .. } | Self::Json { .. } => None,
            Self::FieldCountMismatch { line, .. }
            | Self::AddressParse { line, .. }
            | Self::UnexpectedToken { line, .. } => Some(line),
        }
    }
}

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// External CLI tool could not be run or exited abnormally
    #[error("Execution error: `{command}`: {message}")]
    Execution { command: String, message: String },

    /// Command was abandoned because the scrape was cancelled
    #[error("Execution cancelled: `{command}`")]
    Cancelled { command: String },

    /// strongSwan could not be queried over vici
    #[error("IPsec error: {0}")]
    Ipsec(String),

    /// CLI output did not match the report grammar
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl From<std::fmt::Error> for AppError {
    fn from(error: std::fmt::Error) -> Self {
        Self::Metrics(error.to_string())
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
