//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only fatal, deterministic failures live here. Soft corrections made while
/// normalizing input are counted in reports instead of being raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input schema lacks one or more mandatory columns.
    #[error("validation failed: missing mandatory column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The caller selected an unrecognized or unsupported configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns(columns.into_iter().map(Into::into).collect())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// True for errors raised while validating the input schema or values.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingColumns(_) | Self::Validation(_))
    }
}
