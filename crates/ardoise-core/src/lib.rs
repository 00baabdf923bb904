//! # ardoise-core: Pure Document Logic for Ardoise
//!
//! Everything that decides *what* a quote, invoice or credit note says:
//! amounts, numbering, effective appearance. Nothing here decides *where*
//! things go on the page; that is `ardoise-layout`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ardoise Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             HTTP / storage layer (TypeScript)                   │   │
//! │  │      document record + appearance overrides (JSON)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ardoise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │accounting │  │ numbering │  │appearance │  │   color   │  │   │
//! │  │   │  totals   │  │  1 / 1.2  │  │  resolve  │  │  lighten  │  │   │
//! │  │   │ validate  │  │ subtotals │  │  merging  │  │   tints   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ardoise-layout (Layout Synthesizer)             │   │
//! │  │        layout description tree ──► external renderer            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Document, line items, totals, parties
//! - [`money`] - Money in integer cents with cent rounding
//! - [`accounting`] - Line and document totals
//! - [`validation`] - Line item validation
//! - [`numbering`] - Hierarchical numbers and section subtotals
//! - [`appearance`] - Effective appearance resolution
//! - [`color`] - Tint derivation
//! - [`format`] - fr-FR display helpers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ardoise_core::accounting::compute_totals;
//! use ardoise_core::types::{BillableLine, LineItem};
//!
//! let items = vec![LineItem::from(
//!     BillableLine::new("Pose parquet", 2.0, 100.0).with_tax_rate(20.0),
//! )];
//! let totals = compute_totals(&items, None, true);
//!
//! assert_eq!(totals.total_excl_tax.to_string(), "200,00 €");
//! assert_eq!(totals.total_incl_tax.cents(), 24000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounting;
pub mod appearance;
pub mod color;
pub mod error;
pub mod format;
pub mod lenient;
pub mod money;
pub mod numbering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use appearance::{AppearanceConfig, AppearanceOverrides};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Characters per wrapped designation line in the row height estimate.
pub const DESIGNATION_WRAP: usize = 45;

/// Characters per wrapped description line in the row height estimate.
pub const DESCRIPTION_WRAP: usize = 60;
