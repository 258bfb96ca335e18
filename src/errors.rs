//! Error types for provider operations

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{DateTimeError, ObjectPathError, ValidationError, ValueError};
use crate::state_machine::TransitionError;

/// CIM status codes surfaced to the CIMOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum CimStatusCode {
    Failed = 1,
    AccessDenied = 2,
    InvalidNamespace = 3,
    InvalidParameter = 4,
    InvalidClass = 5,
    NotFound = 6,
    NotSupported = 7,
    AlreadyExists = 11,
    TypeMismatch = 13,
}

impl CimStatusCode {
    /// Numeric code
    pub fn code(self) -> u16 {
        self as u16
    }

    /// DMTF symbolic name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failed => "CIM_ERR_FAILED",
            Self::AccessDenied => "CIM_ERR_ACCESS_DENIED",
            Self::InvalidNamespace => "CIM_ERR_INVALID_NAMESPACE",
            Self::InvalidParameter => "CIM_ERR_INVALID_PARAMETER",
            Self::InvalidClass => "CIM_ERR_INVALID_CLASS",
            Self::NotFound => "CIM_ERR_NOT_FOUND",
            Self::NotSupported => "CIM_ERR_NOT_SUPPORTED",
            Self::AlreadyExists => "CIM_ERR_ALREADY_EXISTS",
            Self::TypeMismatch => "CIM_ERR_TYPE_MISMATCH",
        }
    }
}

impl fmt::Display for CimStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

/// Errors that can occur in provider operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Path namespace differs from the provider namespace
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    /// Class is not served by this provider; carries the class name or message
    #[error("Invalid class: {0}")]
    InvalidClass(String),

    /// Malformed input
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Value type differs from the declared type
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Unsigned value out of range
    #[error("Range error: {0}")]
    Range(String),

    /// Host value has no CIM mapping
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Value cannot be converted to the requested host form
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Operation intentionally unimplemented or disabled
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// No instance with the given path
    #[error("Not found: {0}")]
    NotFound(String),

    /// Instance with the given path already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Provider called outside its initialized state
    #[error("Provider not initialized: {0}")]
    NotInitialized(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic provider failure
    #[error("Provider failure: {0}")]
    Failed(String),
}

impl ProviderError {
    /// CIM status code this error is surfaced as
    pub fn status_code(&self) -> CimStatusCode {
        match self {
            Self::InvalidNamespace(_) => CimStatusCode::InvalidNamespace,
            Self::InvalidClass(_) => CimStatusCode::InvalidClass,
            Self::InvalidParameter(_) | Self::Range(_) => CimStatusCode::InvalidParameter,
            Self::TypeMismatch(_) => CimStatusCode::TypeMismatch,
            Self::NotSupported(_) => CimStatusCode::NotSupported,
            Self::NotFound(_) => CimStatusCode::NotFound,
            Self::AlreadyExists(_) => CimStatusCode::AlreadyExists,
            Self::UnsupportedType(_)
            | Self::Conversion(_)
            | Self::NotInitialized(_)
            | Self::Configuration(_)
            | Self::Failed(_) => CimStatusCode::Failed,
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ValueError> for ProviderError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::Range { .. } => ProviderError::Range(err.to_string()),
            ValueError::UnsupportedType(_) => ProviderError::UnsupportedType(err.to_string()),
            ValueError::TypeMismatch { .. } => ProviderError::TypeMismatch(err.to_string()),
            ValueError::InvalidParameter(_) | ValueError::DateTime(_) => {
                ProviderError::InvalidParameter(err.to_string())
            }
            ValueError::Conversion(_) => ProviderError::Conversion(err.to_string()),
        }
    }
}

impl From<DateTimeError> for ProviderError {
    fn from(err: DateTimeError) -> Self {
        ProviderError::InvalidParameter(err.to_string())
    }
}

impl From<ObjectPathError> for ProviderError {
    fn from(err: ObjectPathError) -> Self {
        ProviderError::InvalidParameter(err.to_string())
    }
}

impl From<ValidationError> for ProviderError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::ClassMismatch { .. } | ValidationError::NotAnAssociation(_) => {
                ProviderError::InvalidClass(err.to_string())
            }
            ValidationError::PropertyTypeMismatch { .. } => {
                ProviderError::TypeMismatch(err.to_string())
            }
            _ => ProviderError::InvalidParameter(err.to_string()),
        }
    }
}

impl From<TransitionError> for ProviderError {
    fn from(err: TransitionError) -> Self {
        ProviderError::NotInitialized(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CimType;

    #[test]
    fn test_status_codes() {
        assert_eq!(ProviderError::InvalidNamespace("x".into()).status_code().code(), 3);
        assert_eq!(ProviderError::InvalidClass("x".into()).status_code().code(), 5);
        assert_eq!(ProviderError::NotSupported("x".into()).status_code().code(), 7);
        assert_eq!(ProviderError::AlreadyExists("x".into()).status_code().code(), 11);
        assert_eq!(ProviderError::NotInitialized("x".into()).status_code().code(), 1);
        assert_eq!(
            CimStatusCode::TypeMismatch.to_string(),
            "CIM_ERR_TYPE_MISMATCH (13)"
        );
    }

    #[test]
    fn test_value_errors_keep_their_kind() {
        let range = ValueError::Range {
            cim_type: CimType::UInt8,
            value: "256".to_string(),
        };
        assert_eq!(
            ProviderError::from(range).status_code(),
            CimStatusCode::InvalidParameter
        );
        assert!(matches!(
            ProviderError::from(ValueError::UnsupportedType("Map".into())),
            ProviderError::UnsupportedType(_)
        ));
    }
}
