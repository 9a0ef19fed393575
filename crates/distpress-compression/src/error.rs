// distpress - Pre-compressed static build output
// Copyright (C) 2025 distpress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Compression error types

use thiserror::Error;

/// Result type alias for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;

/// Kind of failure signalled by a compression routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineErrorKind {
    /// An argument had the wrong type (e.g. a payload that is neither text nor binary)
    InvalidArgType,
    /// A numeric option was outside the range accepted by the routine
    OutOfRange,
    /// The routine failed while encoding
    Failed,
}

/// Failure reported by a compression routine through its completion callback.
///
/// The message is preserved verbatim all the way up to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RoutineError {
    kind: RoutineErrorKind,
    message: String,
}

impl RoutineError {
    /// Create a routine error of the given kind
    pub fn new<S: Into<String>>(kind: RoutineErrorKind, message: S) -> Self {
        RoutineError {
            kind,
            message: message.into(),
        }
    }

    /// An argument had the wrong type
    ///
    /// `received` describes the offending value, e.g. `type number (123)`.
    pub fn invalid_arg_type(argument: &str, expected: &str, received: &str) -> Self {
        RoutineError::new(
            RoutineErrorKind::InvalidArgType,
            format!(
                "The \"{}\" argument must be {}. Received {}",
                argument, expected, received
            ),
        )
    }

    /// A numeric option was outside `min..=max`
    pub fn out_of_range(field: &str, min: i64, max: i64, received: &str) -> Self {
        RoutineError::new(
            RoutineErrorKind::OutOfRange,
            format!(
                "The value of \"{}\" is out of range. It must be >= {} and <= {}. Received {}",
                field, min, max, received
            ),
        )
    }

    /// The routine failed while encoding
    pub fn failed<S: Into<String>>(message: S) -> Self {
        RoutineError::new(RoutineErrorKind::Failed, message)
    }

    /// Kind of this failure
    pub fn kind(&self) -> RoutineErrorKind {
        self.kind
    }

    /// Message as supplied by the routine
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while resolving or running a compression routine
#[derive(Error, Debug)]
pub enum CompressionError {
    /// Symbolic algorithm name outside the built-in table
    #[error("unknown algorithm: {0} (expected one of gzip, brotliCompress, deflate, deflateRaw)")]
    UnknownAlgorithm(String),

    /// Failure signalled by the routine itself
    #[error(transparent)]
    Routine(#[from] RoutineError),

    /// The routine dropped its completion callback without ever calling it
    #[error("compression routine '{0}' finished without signalling completion")]
    Abandoned(String),

    /// Decompression of a produced artifact failed
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),
}

impl CompressionError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm<S: Into<String>>(name: S) -> Self {
        CompressionError::UnknownAlgorithm(name.into())
    }

    /// Create an abandoned-completion error for the named routine
    pub fn abandoned<S: Into<String>>(routine: S) -> Self {
        CompressionError::Abandoned(routine.into())
    }

    /// Create a decompression failed error
    pub fn decompression_failed<S: Into<String>>(msg: S) -> Self {
        CompressionError::DecompressionFailed(msg.into())
    }

    /// Check if this is an unknown algorithm error
    pub fn is_unknown_algorithm(&self) -> bool {
        matches!(self, CompressionError::UnknownAlgorithm(_))
    }

    /// The routine failure, if this error came from one
    pub fn routine_error(&self) -> Option<&RoutineError> {
        match self {
            CompressionError::Routine(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm_error() {
        let err = CompressionError::unknown_algorithm("zstd");
        assert!(err.is_unknown_algorithm());
        assert!(err.to_string().starts_with("unknown algorithm: zstd"));
    }

    #[test]
    fn test_routine_error_is_transparent() {
        let routine = RoutineError::failed("stream ended early");
        let err = CompressionError::from(routine.clone());
        assert_eq!(err.to_string(), "stream ended early");
        assert_eq!(err.routine_error(), Some(&routine));
    }

    #[test]
    fn test_invalid_arg_type_message() {
        let err =
            RoutineError::invalid_arg_type("chunk", "text or binary data", "type number (123)");
        assert_eq!(err.kind(), RoutineErrorKind::InvalidArgType);
        assert_eq!(
            err.message(),
            "The \"chunk\" argument must be text or binary data. Received type number (123)"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = RoutineError::out_of_range("options.level", -1, 9, "10");
        assert_eq!(err.kind(), RoutineErrorKind::OutOfRange);
        assert!(err.message().contains(">= -1 and <= 9"));
        assert!(err.message().ends_with("Received 10"));
    }
}
