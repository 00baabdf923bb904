//! # Error Types
//!
//! Domain-specific error types for ardoise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ardoise-core errors (this file)                                       │
//! │  ├── CoreError        - Document-level failures                        │
//! │  └── ValidationError  - Line item validation failures                  │
//! │                                                                         │
//! │  ardoise-layout errors (separate crate)                                │
//! │  ├── RenderError      - Pipeline and renderer failures                 │
//! │  └── ConfigError      - Profile file failures                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RenderError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Appearance problems are deliberately absent from this hierarchy: a bad
//! override degrades the output, it never aborts generation.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Document-level errors raised before any layout work starts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document is structurally inconsistent.
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Line item validation errors.
///
/// Positions are 1-indexed, as shown to the person editing the document.
/// Validation stops at the first offending entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document has no billable `line` entry at all.
    #[error("Document must contain at least one billable line")]
    NoBillableLines,

    /// The entry's `type` tag is not one of the recognized kinds.
    #[error("Line {line}: unknown line kind")]
    UnknownLineKind { line: usize },

    /// A billable line has an empty or blank designation.
    #[error("Line {line}: designation is required")]
    MissingDesignation { line: usize },

    /// Quantity is not a finite number greater than zero.
    #[error("Line {line}: quantity must be a number greater than 0")]
    InvalidQuantity { line: usize },

    /// Unit price is not a finite number, or is negative.
    #[error("Line {line}: unit price must be a number greater than or equal to 0")]
    InvalidUnitPrice { line: usize },
}

impl ValidationError {
    /// Returns the 1-indexed position of the offending entry, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationError::NoBillableLines => None,
            ValidationError::UnknownLineKind { line }
            | ValidationError::MissingDesignation { line }
            | ValidationError::InvalidQuantity { line }
            | ValidationError::InvalidUnitPrice { line } => Some(*line),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidQuantity { line: 3 };
        assert_eq!(
            err.to_string(),
            "Line 3: quantity must be a number greater than 0"
        );

        let err = ValidationError::MissingDesignation { line: 1 };
        assert_eq!(err.to_string(), "Line 1: designation is required");
    }

    #[test]
    fn test_line_position() {
        assert_eq!(ValidationError::NoBillableLines.line(), None);
        assert_eq!(ValidationError::UnknownLineKind { line: 7 }.line(), Some(7));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoBillableLines.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: Document must contain at least one billable line"
        );
    }
}
