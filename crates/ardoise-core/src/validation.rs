//! # Validation Module
//!
//! Line item validation, run before any totals or layout work.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Order                                   │
//! │                                                                         │
//! │  1. Any billable line at all?          ── no ──► NoBillableLines        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. For each entry, in order:                                           │
//! │     ├── unknown kind?                  ──► UnknownLineKind { n }       │
//! │     └── billable line:                                                  │
//! │         ├── blank designation?         ──► MissingDesignation { n }    │
//! │         ├── quantity not finite / ≤ 0? ──► InvalidQuantity { n }       │
//! │         └── price not finite / < 0?    ──► InvalidUnitPrice { n }      │
//! │                                                                         │
//! │  The FIRST offending entry is reported; errors are not collected.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ardoise_core::types::{BillableLine, LineItem};
//! use ardoise_core::validation::validate_line_items;
//!
//! let items = vec![LineItem::from(BillableLine::new("Pose", 1.0, 0.0))];
//! assert!(validate_line_items(&items).is_ok()); // free services are valid
//! ```

use crate::error::ValidationError;
use crate::types::{BillableLine, LineItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a document body.
///
/// Display-only kinds (section, text, header, subtotal marker) are accepted
/// as-is; only their tag is checked.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if !items.iter().any(LineItem::is_billable) {
        return Err(ValidationError::NoBillableLines);
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        match item {
            LineItem::Unknown => {
                return Err(ValidationError::UnknownLineKind { line: position });
            }
            LineItem::Line(line) => validate_billable_line(line, position)?,
            LineItem::Section { .. }
            | LineItem::Text { .. }
            | LineItem::Header { .. }
            | LineItem::SubtotalMarker { .. } => {}
        }
    }

    Ok(())
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates one billable line at 1-indexed `position`.
///
/// ## Rules
/// - Designation must not be blank
/// - Quantity must be finite and strictly positive
/// - Unit price must be finite and non-negative (zero models free services)
pub fn validate_billable_line(line: &BillableLine, position: usize) -> ValidationResult<()> {
    if line.designation.trim().is_empty() {
        return Err(ValidationError::MissingDesignation { line: position });
    }

    if !line.quantity.is_finite() || line.quantity <= 0.0 {
        return Err(ValidationError::InvalidQuantity { line: position });
    }

    if !line.unit_price_excl_tax.is_finite() || line.unit_price_excl_tax < 0.0 {
        return Err(ValidationError::InvalidUnitPrice { line: position });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(designation: &str, quantity: f64, price: f64) -> LineItem {
        LineItem::from(BillableLine::new(designation, quantity, price))
    }

    #[test]
    fn test_no_billable_lines() {
        assert_eq!(
            validate_line_items(&[]),
            Err(ValidationError::NoBillableLines)
        );

        let only_display = vec![
            LineItem::section("A"),
            LineItem::Text { label: "note".into() },
            LineItem::SubtotalMarker { label: None },
        ];
        assert_eq!(
            validate_line_items(&only_display),
            Err(ValidationError::NoBillableLines)
        );
    }

    #[test]
    fn test_unknown_kind_reports_position() {
        let items = vec![line("Pose", 1.0, 10.0), LineItem::section("B"), LineItem::Unknown];
        assert_eq!(
            validate_line_items(&items),
            Err(ValidationError::UnknownLineKind { line: 3 })
        );
    }

    #[test]
    fn test_designation_required() {
        let items = vec![line("Pose", 1.0, 10.0), line("   ", 1.0, 10.0)];
        assert_eq!(
            validate_line_items(&items),
            Err(ValidationError::MissingDesignation { line: 2 })
        );
    }

    #[test]
    fn test_quantity_rules() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                validate_line_items(&[line("Pose", bad, 10.0)]),
                Err(ValidationError::InvalidQuantity { line: 1 })
            );
        }
        assert!(validate_line_items(&[line("Pose", 0.5, 10.0)]).is_ok());
    }

    #[test]
    fn test_unit_price_rules() {
        assert!(validate_line_items(&[line("Offert", 1.0, 0.0)]).is_ok());
        assert_eq!(
            validate_line_items(&[line("Pose", 1.0, -0.01)]),
            Err(ValidationError::InvalidUnitPrice { line: 1 })
        );
        assert_eq!(
            validate_line_items(&[line("Pose", 1.0, f64::NAN)]),
            Err(ValidationError::InvalidUnitPrice { line: 1 })
        );
    }

    #[test]
    fn test_first_error_wins() {
        let items = vec![
            line("Pose", 1.0, 10.0),
            line("", 0.0, -5.0),
            line("Dépose", -3.0, 10.0),
        ];
        assert_eq!(
            validate_line_items(&items),
            Err(ValidationError::MissingDesignation { line: 2 })
        );
    }
}
