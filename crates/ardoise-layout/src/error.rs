//! # Render Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Render Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Validation    │  │  Serialization  │  │      Backend            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  CoreError from │  │  layout tree    │  │  renderer failure,      │ │
//! │  │  ardoise-core   │  │  to bytes       │  │  propagated unchanged   │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Appearance problems never show up here; they degrade the layout instead.

use ardoise_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The document was rejected before any layout work.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The layout description could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The renderer backend reported a failure.
    #[error("Renderer failed: {0}")]
    Backend(String),
}

impl RenderError {
    /// The validation error behind this failure, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            RenderError::Validation(CoreError::Validation(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RenderError {
    fn from(err: ValidationError) -> Self {
        RenderError::Validation(CoreError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passthrough() {
        let err: RenderError = ValidationError::InvalidQuantity { line: 2 }.into();
        assert_eq!(
            err.to_string(),
            "Validation error: Line 2: quantity must be a number greater than 0"
        );
        assert_eq!(err.validation(), Some(&ValidationError::InvalidQuantity { line: 2 }));
    }

    #[test]
    fn test_backend_message() {
        let err = RenderError::Backend("font not found".into());
        assert_eq!(err.to_string(), "Renderer failed: font not found");
        assert!(err.validation().is_none());
    }
}
