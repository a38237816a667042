// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every rtmeta operation.
//!
//! Errors fall into five categories (see [`ErrorCategory`]). None of them are
//! transient: the same inputs always produce the same error, so callers fix
//! the inputs instead of retrying.

use std::fmt;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Empty value, missing instance, sealed registry.
    State,
    /// Requested type and stored/declared type disagree.
    TypeMismatch,
    /// Mutable access through a const-qualified value.
    Const,
    /// Programmer error in call shape or metadata (arity, defaults, hierarchy).
    Shape,
    /// The operation is not available for this type.
    Capability,
}

/// rtmeta error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // State Errors
    // ========================================================================
    /// The value is empty, an instance is missing, or the registry is sealed.
    InvalidState(String),

    // ========================================================================
    // Type Errors
    // ========================================================================
    /// Exact-type recovery or instance check failed.
    TypeMismatch {
        /// Name of the type that was required.
        expected: String,
        /// Name of the type that was found.
        actual: String,
    },
    /// A dynamic argument does not match its declared parameter type.
    ArgumentType {
        /// Zero-based argument position.
        index: usize,
        /// Declared parameter type name.
        expected: String,
        /// Supplied argument type name.
        actual: String,
    },
    /// Mutable access requested on a const-qualified instance.
    ConstViolation(String),

    // ========================================================================
    // Shape Errors
    // ========================================================================
    /// Wrong number of arguments for a dynamic call.
    ParameterCount {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },
    /// A trailing argument was omitted and its parameter has no default.
    MissingArgument {
        /// Zero-based parameter position.
        index: usize,
        /// Parameter name (empty when unnamed).
        name: String,
    },
    /// The declared base-offset table is inconsistent.
    MalformedHierarchy(String),
    /// Metadata rejected while building or registering a class.
    InvalidRegistration(String),

    // ========================================================================
    // Capability Errors
    // ========================================================================
    /// Operation not supported for the stored/declared type.
    Unsupported {
        /// Operation that was attempted (e.g. "to_string").
        operation: &'static str,
        /// Type it was attempted on.
        type_name: String,
    },
}

impl Error {
    /// Build a [`Error::TypeMismatch`] from anything printable.
    pub(crate) fn mismatch(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Build a [`Error::Unsupported`].
    pub(crate) fn unsupported(operation: &'static str, type_name: impl fmt::Display) -> Self {
        Error::Unsupported {
            operation,
            type_name: type_name.to_string(),
        }
    }

    /// Error raised by every accessor on an empty value.
    pub(crate) fn empty_value(operation: &str) -> Self {
        Error::InvalidState(format!("{} on empty value", operation))
    }

    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidState(_) => ErrorCategory::State,
            Error::TypeMismatch { .. } | Error::ArgumentType { .. } => ErrorCategory::TypeMismatch,
            Error::ConstViolation(_) => ErrorCategory::Const,
            Error::ParameterCount { .. }
            | Error::MissingArgument { .. }
            | Error::MalformedHierarchy(_)
            | Error::InvalidRegistration(_) => ErrorCategory::Shape,
            Error::Unsupported { .. } => ErrorCategory::Capability,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            Error::ArgumentType {
                index,
                expected,
                actual,
            } => write!(
                f,
                "Invalid type for arg {}: expected {}, got {}",
                index, expected, actual
            ),
            Error::ConstViolation(msg) => write!(f, "Const violation: {}", msg),
            Error::ParameterCount { expected, actual } => write!(
                f,
                "Wrong parameter count: expected {}, got {}",
                expected, actual
            ),
            Error::MissingArgument { index, name } if name.is_empty() => write!(
                f,
                "Missing argument {} and no default value",
                index
            ),
            Error::MissingArgument { index, name } => write!(
                f,
                "Missing argument {} ({}) and no default value",
                index, name
            ),
            Error::MalformedHierarchy(msg) => write!(f, "Malformed base hierarchy: {}", msg),
            Error::InvalidRegistration(msg) => write!(f, "Invalid registration: {}", msg),
            Error::Unsupported {
                operation,
                type_name,
            } => write!(f, "{} is not supported for {}", operation, type_name),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for results using the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
