//! Error types for document parsing and assertion chains.

use thiserror::Error;

/// The upstream parser could not turn source text into a document tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {format} document: {message}")]
pub struct ParseError {
    /// Source format that was being parsed ("xml", "yaml", "json").
    pub format: &'static str,
    pub message: String,
}

impl ParseError {
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

/// Terminal failure raised by `validate()` when a chain recorded mismatches.
///
/// The message is the accumulated, human-readable report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{report}")]
pub struct ValidationFailure {
    report: String,
}

impl ValidationFailure {
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
        }
    }

    /// Returns the full report text.
    pub fn report(&self) -> &str {
        &self.report
    }
}

/// Errors surfaced by assertion chains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A required predicate argument was blank.
    #[error("invalid argument: '{name}' must not be blank")]
    InvalidArgument { name: &'static str },
    /// `validate()` found recorded mismatches.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl CheckError {
    /// Returns the validation failure if this is one.
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            CheckError::Validation(failure) => Some(failure),
            CheckError::InvalidArgument { .. } => None,
        }
    }
}

/// Rejects blank arguments before any document inspection.
pub(crate) fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, CheckError> {
    if value.trim().is_empty() {
        return Err(CheckError::InvalidArgument { name });
    }
    Ok(value)
}
