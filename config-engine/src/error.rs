use thiserror::Error;

use crate::field::FieldType;
use crate::phase::Phase;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value lies outside its declared range, or a cross-field invariant
    /// does not hold. The message names the offending field(s) and value(s).
    #[error("Configuration value out of range: {0}")]
    OutOfRange(String),

    #[error("Parameter '{field}' is required for {phase} but was not provided")]
    MissingRequired { field: String, phase: Phase },

    #[error("Parameter '{field}' expects {expected} but got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: FieldType,
    },

    #[error("Unknown configuration parameter: {0}")]
    UnknownField(String),

    #[error("Schema serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl ConfigError {
    /// Whether this error came from a range or cross-field check.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ConfigError::OutOfRange(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
