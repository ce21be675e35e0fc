//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
///
/// These are the only errors the reflection core raises itself; they surface at
/// the request boundary when a caller hands in malformed data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_field_name() {
        let err = ValidationError::empty_field("topic");
        assert_eq!(err.to_string(), "Field 'topic' cannot be empty");
        assert_eq!(err.field(), "topic");
    }

    #[test]
    fn out_of_range_displays_bounds() {
        let err = ValidationError::out_of_range("excitement", 0, 10, 11);
        assert_eq!(
            err.to_string(),
            "Field 'excitement' must be between 0 and 10, got 11"
        );
    }

    #[test]
    fn invalid_format_keeps_reason() {
        let err = ValidationError::invalid_format("scenario_id", "contains whitespace");
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert_eq!(err.field(), "scenario_id");
    }
}
