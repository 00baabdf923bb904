//! # Domain Types
//!
//! The commercial document as received from the HTTP/storage layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Document     │   │    LineItem     │   │     Totals      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind, number   │──►│  Line           │   │  totalExclTax   │       │
//! │  │  dates, object  │   │  Section        │   │  totalTax       │       │
//! │  │  client/issuer  │   │  Text / Header  │   │  totalInclTax   │       │
//! │  │  appearance     │   │  SubtotalMarker │   │  totalDiscount  │       │
//! │  └─────────────────┘   └─────────────────┘   │  netPayable     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `ClientSnapshot` and `CompanySnapshot` freeze party data at issue time;
//! the document never points back at mutable records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::appearance::AppearanceOverrides;
use crate::lenient;
use crate::money::Money;

// =============================================================================
// Document Kind
// =============================================================================

/// The three commercial document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Pre-sale estimate.
    #[serde(alias = "devis")]
    Quote,
    /// Post-sale billing document.
    #[serde(alias = "facture")]
    Invoice,
    /// Reverses or partially refunds a prior invoice.
    #[serde(alias = "avoir")]
    CreditNote,
}

impl DocumentKind {
    /// The printed label. Localization is fixed to French.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "Devis",
            DocumentKind::Invoice => "Facture",
            DocumentKind::CreditNote => "Avoir",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Quote => write!(f, "quote"),
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::CreditNote => write!(f, "credit_note"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quote" | "devis" => Ok(DocumentKind::Quote),
            "invoice" | "facture" => Ok(DocumentKind::Invoice),
            "credit_note" | "credit-note" | "avoir" => Ok(DocumentKind::CreditNote),
            other => Err(format!(
                "Unknown document kind: '{}'. Valid options: quote, invoice, credit_note",
                other
            )),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the base amount.
    #[serde(alias = "pourcentage")]
    Percent,
    /// `value` is a fixed amount off the base.
    #[serde(alias = "montant")]
    Amount,
}

/// A line-level or document-level discount.
///
/// Discounts are not clamped: a percentage above 100 or an amount larger
/// than the base yields a negative net amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub kind: DiscountKind,
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
}

impl Discount {
    /// Creates a percentage discount.
    pub fn percent(value: f64) -> Self {
        Discount {
            kind: DiscountKind::Percent,
            value,
        }
    }

    /// Creates a fixed-amount discount.
    pub fn amount(value: f64) -> Self {
        Discount {
            kind: DiscountKind::Amount,
            value,
        }
    }

    /// The unrounded discount on `base`. Non-finite values discount nothing.
    pub fn amount_on(&self, base: f64) -> f64 {
        if !self.value.is_finite() {
            return 0.0;
        }
        match self.kind {
            DiscountKind::Percent => base * self.value / 100.0,
            DiscountKind::Amount => self.value,
        }
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A billable line: the only line item kind that carries money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillableLine {
    #[serde(default)]
    pub designation: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Quantity; validated finite and strictly positive.
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub quantity: f64,

    /// Display unit ("h", "jour", "m²"...).
    #[serde(default)]
    pub unit: Option<String>,

    /// Unit price excluding tax; validated finite and non-negative.
    #[serde(default = "lenient::nan", deserialize_with = "lenient::number")]
    pub unit_price_excl_tax: f64,

    #[serde(default)]
    pub discount: Option<Discount>,

    /// VAT rate in percent (20.0 = 20 %).
    #[serde(default, deserialize_with = "lenient::number")]
    pub tax_rate: f64,

    /// Section the line was attached to by the editor. The numbering
    /// resolver recomputes the tag from position; this value is informative.
    #[serde(default)]
    pub section_id: Option<String>,
}

impl BillableLine {
    /// Creates a line with no description, unit, discount or tax.
    pub fn new(designation: impl Into<String>, quantity: f64, unit_price_excl_tax: f64) -> Self {
        BillableLine {
            designation: designation.into(),
            description: None,
            quantity,
            unit: None,
            unit_price_excl_tax,
            discount: None,
            tax_rate: 0.0,
            section_id: None,
        }
    }

    /// Sets the VAT rate (builder style).
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Sets the line discount (builder style).
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `quantity × unit price`, unrounded.
    pub fn gross_amount(&self) -> f64 {
        self.quantity * self.unit_price_excl_tax
    }

    /// The unrounded line discount.
    pub fn discount_amount(&self) -> f64 {
        self.discount
            .map(|d| d.amount_on(self.gross_amount()))
            .unwrap_or(0.0)
    }
}

/// One entry of a document body.
///
/// Only `Line` carries money; every other kind is display-only.
/// Unrecognized `type` tags land in `Unknown` so that validation can name
/// the offending position instead of the whole document failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineItem {
    /// A billable line.
    #[serde(alias = "ligne")]
    Line(BillableLine),

    /// Opens a numbering / subtotal group.
    Section {
        #[serde(default)]
        label: String,
        #[serde(default)]
        id: Option<String>,
    },

    /// Free-form annotation row.
    #[serde(alias = "texte")]
    Text {
        #[serde(default)]
        label: String,
    },

    /// Cosmetic heading row.
    #[serde(alias = "entete")]
    Header {
        #[serde(default)]
        label: String,
    },

    /// Requests an inline running-subtotal row.
    #[serde(alias = "sous_total")]
    SubtotalMarker {
        #[serde(default)]
        label: Option<String>,
    },

    /// Any unrecognized kind.
    #[serde(other)]
    #[ts(skip)]
    Unknown,
}

impl LineItem {
    /// Shorthand for a section without explicit id.
    pub fn section(label: impl Into<String>) -> Self {
        LineItem::Section {
            label: label.into(),
            id: None,
        }
    }

    /// Checks if this entry contributes to totals.
    pub fn is_billable(&self) -> bool {
        matches!(self, LineItem::Line(_))
    }
}

impl From<BillableLine> for LineItem {
    fn from(line: BillableLine) -> Self {
        LineItem::Line(line)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Document totals. Every field is already rounded to the cent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Totals {
    /// Excluding tax, after line and global discounts.
    #[ts(type = "number")]
    pub total_excl_tax: Money,
    #[ts(type = "number")]
    pub total_tax: Money,
    #[ts(type = "number")]
    pub total_incl_tax: Money,
    /// Line discounts plus the global discount.
    #[ts(type = "number")]
    pub total_discount: Money,
    /// Inclusive total minus retention.
    #[ts(type = "number")]
    pub net_payable: Money,
}

// =============================================================================
// Payment Method
// =============================================================================

/// Accepted payment means, printed in the payment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(alias = "virement")]
    BankTransfer,
    #[serde(alias = "cheque")]
    Check,
    #[serde(alias = "especes")]
    Cash,
    #[serde(alias = "carte")]
    Card,
    #[serde(alias = "prelevement")]
    DirectDebit,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// The printed label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Virement bancaire",
            PaymentMethod::Check => "Chèque",
            PaymentMethod::Cash => "Espèces",
            PaymentMethod::Card => "Carte bancaire",
            PaymentMethod::DirectDebit => "Prélèvement",
            PaymentMethod::Other => "Autre",
        }
    }
}

// =============================================================================
// Parties
// =============================================================================

/// The customer, frozen at issue time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSnapshot {
    pub name: String,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub siret: Option<String>,
    pub vat_number: Option<String>,
}

impl ClientSnapshot {
    /// "75011 Paris", or whichever half is present.
    pub fn locality(&self) -> Option<String> {
        join_locality(self.postal_code.as_deref(), self.city.as_deref())
    }
}

/// The issuing company, frozen at issue time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySnapshot {
    pub name: String,
    pub legal_form: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub siret: Option<String>,
    pub vat_number: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
}

impl CompanySnapshot {
    /// "75011 Paris", or whichever half is present.
    pub fn locality(&self) -> Option<String> {
        join_locality(self.postal_code.as_deref(), self.city.as_deref())
    }
}

fn join_locality(postal_code: Option<&str>, city: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [postal_code, city]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

// =============================================================================
// Document
// =============================================================================

fn default_true() -> bool {
    true
}

/// A quote, invoice or credit note as submitted for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub kind: DocumentKind,

    pub number: String,

    #[ts(as = "String")]
    pub issue_date: NaiveDate,

    /// Quotes: last day the offer stands.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub validity_date: Option<NaiveDate>,

    /// Invoices: payment due date.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    /// One-line subject ("Rénovation cuisine").
    #[serde(default)]
    pub object: String,

    pub line_items: Vec<LineItem>,

    #[serde(default = "default_true")]
    pub tax_applicable: bool,

    /// Legal mention printed when tax does not apply
    /// ("TVA non applicable, art. 293 B du CGI").
    #[serde(default)]
    pub tax_exemption_note: Option<String>,

    #[serde(default)]
    pub global_discount: Option<Discount>,

    /// Stored totals. Recomputed by the preview pipeline when
    /// `total_excl_tax` is zero.
    #[serde(default)]
    pub totals: Totals,

    #[serde(default)]
    pub payment_terms: Option<String>,

    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,

    #[serde(default)]
    pub client_notes: Option<String>,

    /// Retenue de garantie: withheld from the payable amount.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub retention_amount: Option<Money>,

    pub client: ClientSnapshot,

    #[serde(default)]
    pub issuer: CompanySnapshot,

    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub appearance: AppearanceOverrides,
}

impl Document {
    /// Creates an empty document of `kind` (used by tests and tooling).
    pub fn new(kind: DocumentKind, number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Document {
            kind,
            number: number.into(),
            issue_date,
            validity_date: None,
            due_date: None,
            object: String::new(),
            line_items: Vec::new(),
            tax_applicable: true,
            tax_exemption_note: None,
            global_discount: None,
            totals: Totals::default(),
            payment_terms: None,
            payment_methods: Vec::new(),
            client_notes: None,
            retention_amount: None,
            client: ClientSnapshot::default(),
            issuer: CompanySnapshot::default(),
            appearance: AppearanceOverrides::default(),
        }
    }

    /// Checks if at least one billable line exists.
    pub fn has_billable_lines(&self) -> bool {
        self.line_items.iter().any(LineItem::is_billable)
    }

    /// Retention, treating absent as zero.
    pub fn retention(&self) -> Money {
        self.retention_amount.unwrap_or_default()
    }

    /// The printed title, e.g. "Facture FA-2024-001".
    pub fn title(&self) -> String {
        format!("{} {}", self.kind.label(), self.number)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(DocumentKind::Quote.label(), "Devis");
        assert_eq!(DocumentKind::Invoice.label(), "Facture");
        assert_eq!(DocumentKind::CreditNote.label(), "Avoir");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("facture".parse::<DocumentKind>().unwrap(), DocumentKind::Invoice);
        assert_eq!("credit-note".parse::<DocumentKind>().unwrap(), DocumentKind::CreditNote);
        assert!("receipt".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_line_item_tags() {
        let items: Vec<LineItem> = serde_json::from_str(
            r#"[
                {"type": "section", "label": "Gros œuvre"},
                {"type": "line", "designation": "Dalle", "quantity": 2, "unitPriceExclTax": 100, "taxRate": 20},
                {"type": "texte", "label": "Livraison incluse"},
                {"type": "subtotal_marker"},
                {"type": "banner", "label": "?"}
            ]"#,
        )
        .unwrap();

        assert!(matches!(items[0], LineItem::Section { .. }));
        let LineItem::Line(line) = &items[1] else {
            panic!("second entry is a line");
        };
        assert_eq!(line.gross_amount(), 200.0);
        assert!(matches!(items[2], LineItem::Text { .. }));
        assert!(matches!(items[3], LineItem::SubtotalMarker { label: None }));
        assert_eq!(items[4], LineItem::Unknown);
    }

    #[test]
    fn test_lenient_quantity() {
        let item: LineItem = serde_json::from_str(
            r#"{"type": "line", "designation": "x", "quantity": "abc", "unitPriceExclTax": "12,5"}"#,
        )
        .unwrap();
        let LineItem::Line(line) = item else {
            panic!("expected a line");
        };
        assert!(line.quantity.is_nan());
        assert_eq!(line.unit_price_excl_tax, 12.5);
    }

    #[test]
    fn test_discount_amounts() {
        assert_eq!(Discount::percent(10.0).amount_on(200.0), 20.0);
        assert_eq!(Discount::amount(15.0).amount_on(200.0), 15.0);
        assert_eq!(Discount::percent(f64::NAN).amount_on(200.0), 0.0);
    }

    #[test]
    fn test_document_defaults() {
        let doc: Document = serde_json::from_str(
            r#"{
                "kind": "invoice",
                "number": "FA-001",
                "issueDate": "2024-03-01",
                "lineItems": [],
                "client": {"name": "ACME"}
            }"#,
        )
        .unwrap();
        assert!(doc.tax_applicable);
        assert!(doc.totals.total_excl_tax.is_zero());
        assert_eq!(doc.title(), "Facture FA-001");
        assert!(!doc.has_billable_lines());
    }

    #[test]
    fn test_incomplete_entries_reach_validation() {
        let doc: Document = serde_json::from_str(
            r#"{
                "kind": "quote",
                "number": "D-001",
                "issueDate": "2024-03-01",
                "lineItems": [
                    {"type": "section"},
                    {"type": "line", "designation": "Pose", "unitPriceExclTax": 10},
                    {"type": "line", "designation": "Dépose", "quantity": 1}
                ],
                "client": {"name": "ACME"},
                "appearance": null
            }"#,
        )
        .unwrap();

        assert_eq!(doc.line_items[0], LineItem::section(""));
        assert_eq!(doc.appearance, AppearanceOverrides::default());
        assert_eq!(
            crate::validation::validate_line_items(&doc.line_items),
            Err(crate::ValidationError::InvalidQuantity { line: 2 })
        );
        assert_eq!(
            crate::validation::validate_line_items(&doc.line_items[2..]),
            Err(crate::ValidationError::InvalidUnitPrice { line: 1 })
        );
    }

    #[test]
    fn test_malformed_appearance_degrades() {
        let doc: Document = serde_json::from_str(
            r##"{
                "kind": "invoice",
                "number": "FA-001",
                "issueDate": "2024-03-01",
                "lineItems": [],
                "client": {"name": "ACME"},
                "appearance": {"columns": null, "hide": "none", "primaryColor": "#123456"}
            }"##,
        )
        .unwrap();
        assert_eq!(doc.appearance.primary_color.as_deref(), Some("#123456"));
        assert_eq!(doc.appearance.columns, Default::default());

        let doc: Document = serde_json::from_str(
            r#"{"kind": "invoice", "number": "FA-002", "issueDate": "2024-03-01",
                "lineItems": [], "client": {"name": "ACME"}, "appearance": "dark"}"#,
        )
        .unwrap();
        assert_eq!(doc.appearance, AppearanceOverrides::default());
    }

    #[test]
    fn test_locality() {
        let client = ClientSnapshot {
            postal_code: Some("75011".into()),
            city: Some("Paris".into()),
            ..Default::default()
        };
        assert_eq!(client.locality().as_deref(), Some("75011 Paris"));
        assert_eq!(ClientSnapshot::default().locality(), None);
    }
}
