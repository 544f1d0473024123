//! Error taxonomy shared by every clone strategy
//!
//! All variants are fatal for the call that produced them. Nothing in the
//! crate retries; the harness lets an error end the strategy's run.

use std::fmt;

/// Result type for clone operations
pub type CloneResult<T> = Result<T, CloneError>;

/// Errors that can occur while duplicating a node graph
#[derive(Debug, Clone, PartialEq)]
pub enum CloneError {
    /// The kind has no no-argument construction path
    NotConstructible { kind: String },
    /// A round-trip codec was given a kind without the eligibility marker
    NotEligibleForEncoding { kind: String },
    /// The synthesized clone routine failed to build
    CompilationError(String),
    /// A field's declared type cannot be introspected (live handle, resource)
    NotSupportedKind {
        kind: String,
        field: String,
        type_name: String,
    },
    /// A reflective write named an unknown field or carried the wrong shape
    FieldMismatch { kind: String, field: String },
    /// A node of one kind was presented where another was expected
    KindMismatch { expected: String, found: String },
    /// A round-trip blob could not be decoded
    Decode(String),
}

impl fmt::Display for CloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneError::NotConstructible { kind } => {
                write!(f, "Kind '{}' has no default construction path", kind)
            }
            CloneError::NotEligibleForEncoding { kind } => {
                write!(f, "Kind '{}' is not marked eligible for encoding", kind)
            }
            CloneError::CompilationError(msg) => write!(f, "Compilation error: {}", msg),
            CloneError::NotSupportedKind { kind, field, type_name } => write!(
                f,
                "Field '{}.{}' has unsupported type '{}'",
                kind, field, type_name
            ),
            CloneError::FieldMismatch { kind, field } => {
                write!(f, "Field '{}.{}' does not accept this value", kind, field)
            }
            CloneError::KindMismatch { expected, found } => {
                write!(f, "Expected a '{}' node, found '{}'", expected, found)
            }
            CloneError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for CloneError {}

impl From<serde_json::Error> for CloneError {
    fn from(err: serde_json::Error) -> Self {
        CloneError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for CloneError {
    fn from(err: std::io::Error) -> Self {
        CloneError::Decode(err.to_string())
    }
}

impl From<crate::parser::ParseError> for CloneError {
    fn from(err: crate::parser::ParseError) -> Self {
        CloneError::CompilationError(err.to_string())
    }
}

impl From<cranelift_module::ModuleError> for CloneError {
    fn from(err: cranelift_module::ModuleError) -> Self {
        CloneError::CompilationError(err.to_string())
    }
}
