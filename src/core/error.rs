// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for dapcodec.
//!
//! Provides error types for DAP response generation:
//! - Constraint and slice parsing
//! - Type registry lookups
//! - XDR encoding
//! - Structural tree invariants

use std::fmt;

/// Errors that can occur while building a DAP response.
#[derive(Debug, Clone)]
pub enum DapError {
    /// Malformed projection list in a constraint expression
    BadConstraint {
        /// The offending constraint expression
        expr: String,
        /// Why it was rejected
        reason: String,
    },

    /// Malformed or non-monotone slice token
    BadSlice {
        /// The offending bracket body
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// Platform type has no DAP mapping
    UnsupportedType {
        /// Native type name that could not be mapped
        native: String,
    },

    /// Buffer elements cannot be coerced to the declared DAP type
    EncodingMismatch {
        /// Declared DAP type label
        declared: String,
        /// Native element type of the buffer
        native: String,
        /// Why the coercion is rejected
        reason: String,
    },

    /// A sequence instance does not satisfy its schema
    SchemaViolation {
        /// Name of the sequence being appended to
        sequence: String,
        /// Validation failure message
        reason: String,
    },

    /// Structural invariant violated; non-recoverable
    InternalInvariant {
        /// Description of the invariant that was violated
        invariant: String,
    },
}

impl DapError {
    /// Create a malformed-constraint error.
    pub fn bad_constraint(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        DapError::BadConstraint {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-slice error.
    pub fn bad_slice(token: impl Into<String>, reason: impl Into<String>) -> Self {
        DapError::BadSlice {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-type error.
    pub fn unsupported_type(native: impl Into<String>) -> Self {
        DapError::UnsupportedType {
            native: native.into(),
        }
    }

    /// Create an encoding-mismatch error.
    pub fn encoding_mismatch(
        declared: impl Into<String>,
        native: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DapError::EncodingMismatch {
            declared: declared.into(),
            native: native.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema-violation error.
    pub fn schema_violation(sequence: impl Into<String>, reason: impl Into<String>) -> Self {
        DapError::SchemaViolation {
            sequence: sequence.into(),
            reason: reason.into(),
        }
    }

    /// Create an invariant-violation error.
    pub fn invariant_violation(invariant: impl Into<String>) -> Self {
        DapError::InternalInvariant {
            invariant: invariant.into(),
        }
    }

    /// Whether this error was caused by the client's request.
    ///
    /// Client-caused errors map to a 4xx status at the HTTP boundary,
    /// everything else to a 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DapError::BadConstraint { .. } | DapError::BadSlice { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DapError::BadConstraint { expr, reason } => {
                vec![("expr", expr.clone()), ("reason", reason.clone())]
            }
            DapError::BadSlice { token, reason } => {
                vec![("token", token.clone()), ("reason", reason.clone())]
            }
            DapError::UnsupportedType { native } => vec![("native", native.clone())],
            DapError::EncodingMismatch {
                declared,
                native,
                reason,
            } => vec![
                ("declared", declared.clone()),
                ("native", native.clone()),
                ("reason", reason.clone()),
            ],
            DapError::SchemaViolation { sequence, reason } => {
                vec![("sequence", sequence.clone()), ("reason", reason.clone())]
            }
            DapError::InternalInvariant { invariant } => {
                vec![("invariant", invariant.clone())]
            }
        }
    }
}

impl fmt::Display for DapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DapError::BadConstraint { expr, reason } => {
                write!(f, "Bad constraint expression '{expr}': {reason}")
            }
            DapError::BadSlice { token, reason } => {
                write!(f, "Bad slice '{token}': {reason}")
            }
            DapError::UnsupportedType { native } => {
                write!(f, "No DAP type for native type '{native}'")
            }
            DapError::EncodingMismatch {
                declared,
                native,
                reason,
            } => write!(
                f,
                "Cannot encode {native} buffer as {declared}: {reason}"
            ),
            DapError::SchemaViolation { sequence, reason } => {
                write!(f, "Instance rejected by schema of sequence '{sequence}': {reason}")
            }
            DapError::InternalInvariant { invariant } => {
                write!(f, "Invariant violation: {invariant}")
            }
        }
    }
}

impl std::error::Error for DapError {}

impl From<std::io::Error> for DapError {
    fn from(err: std::io::Error) -> Self {
        DapError::InternalInvariant {
            invariant: format!("buffer write failed: {err}"),
        }
    }
}

/// Result type for dapcodec operations.
pub type Result<T> = std::result::Result<T, DapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DapError::bad_constraint("a..b", "empty segment").is_client_error());
        assert!(DapError::bad_slice("4:1", "descending range").is_client_error());
        assert!(!DapError::unsupported_type("bool").is_client_error());
        assert!(!DapError::invariant_violation("dims mismatch").is_client_error());
    }

    #[test]
    fn test_display_contains_context() {
        let err = DapError::bad_slice("x", "not an index or range");
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("not an index or range"));
    }

    #[test]
    fn test_log_fields() {
        let err = DapError::encoding_mismatch("Byte", "i32", "octet target too narrow");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("declared", "Byte".to_string()));
    }
}
