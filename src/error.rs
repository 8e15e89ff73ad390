//! Error types for the routine store and its storage backends.

use std::fmt;

use thiserror::Error;

use crate::store::ExerciseSelector;

/// Errors raised by a [`crate::storage::KeyValueStore`] backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Keys end up in file names, so only a small alphabet is allowed
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// The user-editable field an input error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    Name,
    Sets,
    Reps,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputField::Name => "name",
            InputField::Sets => "sets",
            InputField::Reps => "reps",
        })
    }
}

/// Main error type for routine operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown routine: '{0}'")]
    UnknownRoutine(String),

    #[error("Routine '{routine}' has no exercise {selector}")]
    UnknownExercise {
        routine: String,
        selector: ExerciseSelector,
    },

    /// Rejected user input. State is left untouched.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: InputField, reason: String },

    #[error("Duplicate routine id: '{0}'")]
    DuplicateRoutine(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn invalid(field: InputField, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, for input errors.
    pub fn field(&self) -> Option<InputField> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::invalid(InputField::Name, "must not be empty");
        assert_eq!(err.to_string(), "Invalid name: must not be empty");

        let err = StoreError::UnknownExercise {
            routine: "rings".into(),
            selector: ExerciseSelector::Index(7),
        };
        assert_eq!(err.to_string(), "Routine 'rings' has no exercise at position 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StoreError = StorageError::from(io_err).into();
        assert!(matches!(err, StoreError::Storage(StorageError::Io(_))));
        assert_eq!(err.field(), None);
    }
}
