//! # Appearance Resolver
//!
//! Merges built-in defaults, the per-document-kind table and caller
//! overrides into one effective `AppearanceConfig`.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Appearance Priority                                  │
//! │                                                                         │
//! │  1. Caller overrides (highest priority)                                │
//! │     document.appearance, optionally layered over a profile file        │
//! │                                                                         │
//! │  2. Document kind table                                                │
//! │     quote / invoice / credit note colors and radius;                   │
//! │     invoices also turn section subtotals on                            │
//! │                                                                         │
//! │  3. Base defaults (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `columns` and `hide` are merged key by key: overriding `showUnite` keeps
//! every other column flag from the lower layer.
//!
//! Nothing here validates. A `NaN` font size or an unknown header style
//! flows through; numeric options are coerced with [`to_number`] where they
//! are consumed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::lenient;
use crate::types::DocumentKind;

// =============================================================================
// Style Enumerations
// =============================================================================

/// Header geometry strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    #[default]
    Classic,
    Modern,
    Minimal,
    Ultra,
}

impl fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderStyle::Classic => write!(f, "classic"),
            HeaderStyle::Modern => write!(f, "modern"),
            HeaderStyle::Minimal => write!(f, "minimal"),
            HeaderStyle::Ultra => write!(f, "ultra"),
        }
    }
}

impl FromStr for HeaderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(HeaderStyle::Classic),
            "modern" => Ok(HeaderStyle::Modern),
            "minimal" => Ok(HeaderStyle::Minimal),
            "ultra" => Ok(HeaderStyle::Ultra),
            other => Err(format!(
                "Unknown header style: '{}'. Valid options: classic, modern, minimal, ultra",
                other
            )),
        }
    }
}

/// Side of the header where the client block sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ClientPosition {
    Left,
    #[default]
    Right,
}

impl FromStr for ClientPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "gauche" => Ok(ClientPosition::Left),
            "right" | "droite" => Ok(ClientPosition::Right),
            other => Err(format!("Unknown client position: '{}'", other)),
        }
    }
}

/// Border/fill strategy of the native line item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum TableStyle {
    #[default]
    Striped,
    Bordered,
    Horizontal,
    Minimal,
}

impl fmt::Display for TableStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStyle::Striped => write!(f, "striped"),
            TableStyle::Bordered => write!(f, "bordered"),
            TableStyle::Horizontal => write!(f, "horizontal"),
            TableStyle::Minimal => write!(f, "minimal"),
        }
    }
}

impl FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "striped" => Ok(TableStyle::Striped),
            "bordered" => Ok(TableStyle::Bordered),
            "horizontal" => Ok(TableStyle::Horizontal),
            "minimal" => Ok(TableStyle::Minimal),
            other => Err(format!(
                "Unknown table style: '{}'. Valid options: striped, bordered, horizontal, minimal",
                other
            )),
        }
    }
}

/// Composition of the cards below the line item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    #[default]
    PremiumSplit,
    PremiumGrid,
    CenteredStack,
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutPreset::PremiumSplit => write!(f, "premium-split"),
            LayoutPreset::PremiumGrid => write!(f, "premium-grid"),
            LayoutPreset::CenteredStack => write!(f, "centered-stack"),
        }
    }
}

impl FromStr for LayoutPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "premium-split" => Ok(LayoutPreset::PremiumSplit),
            "premium-grid" => Ok(LayoutPreset::PremiumGrid),
            "centered-stack" => Ok(LayoutPreset::CenteredStack),
            other => Err(format!(
                "Unknown layout preset: '{}'. Valid options: premium-split, premium-grid, centered-stack",
                other
            )),
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Which optional table columns are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnVisibility {
    pub show_numero: bool,
    pub show_quantite: bool,
    pub show_unite: bool,
    pub show_prix_unitaire: bool,
    pub show_tva: bool,
}

/// Which company fields are hidden from header and footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenFields {
    pub address: bool,
    pub email: bool,
    pub phone: bool,
    pub website: bool,
    pub siret: bool,
    pub vat_number: bool,
    pub bank_details: bool,
    pub legal_form: bool,
}

/// The effective appearance of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub font: String,
    pub base_font_size: f64,
    pub line_height: f64,
    pub header_style: HeaderStyle,
    pub client_position: ClientPosition,
    pub table_style: TableStyle,
    pub border_width: f64,
    pub border_radius: f64,
    pub cell_padding: f64,
    pub page_margin: f64,
    pub section_spacing: f64,
    pub columns: ColumnVisibility,
    pub hide: HiddenFields,
    pub show_signature_box: bool,
    pub show_payment_methods: bool,
    pub show_conditions: bool,
    pub show_footer: bool,
    pub show_page_numbers: bool,
    pub show_draft_watermark: bool,
    pub show_document_border: bool,
    pub compact_mode: bool,
    pub show_section_subtotals: bool,
    pub rounded_row_borders: bool,
    pub layout_preset: LayoutPreset,
}

impl Default for AppearanceConfig {
    /// Base defaults, before any kind or caller layer.
    fn default() -> Self {
        AppearanceConfig {
            primary_color: "#1f2937".to_string(),
            secondary_color: "#e5e7eb".to_string(),
            font: "Helvetica".to_string(),
            base_font_size: 10.0,
            line_height: 1.3,
            header_style: HeaderStyle::Classic,
            client_position: ClientPosition::Right,
            table_style: TableStyle::Striped,
            border_width: 0.5,
            border_radius: 4.0,
            cell_padding: 5.0,
            page_margin: 40.0,
            section_spacing: 16.0,
            columns: ColumnVisibility {
                show_numero: true,
                show_quantite: true,
                show_unite: false,
                show_prix_unitaire: true,
                show_tva: true,
            },
            hide: HiddenFields::default(),
            show_signature_box: true,
            show_payment_methods: true,
            show_conditions: true,
            show_footer: true,
            show_page_numbers: true,
            show_draft_watermark: false,
            show_document_border: false,
            compact_mode: false,
            show_section_subtotals: false,
            rounded_row_borders: false,
            layout_preset: LayoutPreset::PremiumSplit,
        }
    }
}

// =============================================================================
// Overrides
// =============================================================================

/// Partial `columns` override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOverrides {
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_numero: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_quantite: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_unite: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_prix_unitaire: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_tva: Option<bool>,
}

impl ColumnOverrides {
    /// Key-by-key merge onto resolved column flags.
    pub fn apply(&self, base: ColumnVisibility) -> ColumnVisibility {
        ColumnVisibility {
            show_numero: self.show_numero.unwrap_or(base.show_numero),
            show_quantite: self.show_quantite.unwrap_or(base.show_quantite),
            show_unite: self.show_unite.unwrap_or(base.show_unite),
            show_prix_unitaire: self.show_prix_unitaire.unwrap_or(base.show_prix_unitaire),
            show_tva: self.show_tva.unwrap_or(base.show_tva),
        }
    }

    /// Stacks `self` over a lower override layer, key by key.
    pub fn layered_over(&self, lower: &ColumnOverrides) -> ColumnOverrides {
        ColumnOverrides {
            show_numero: self.show_numero.or(lower.show_numero),
            show_quantite: self.show_quantite.or(lower.show_quantite),
            show_unite: self.show_unite.or(lower.show_unite),
            show_prix_unitaire: self.show_prix_unitaire.or(lower.show_prix_unitaire),
            show_tva: self.show_tva.or(lower.show_tva),
        }
    }
}

/// Partial `hide` override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HideOverrides {
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub address: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub email: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub phone: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub website: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub siret: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub vat_number: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub bank_details: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub legal_form: Option<bool>,
}

impl HideOverrides {
    /// Key-by-key merge onto resolved hidden-field flags.
    pub fn apply(&self, base: HiddenFields) -> HiddenFields {
        HiddenFields {
            address: self.address.unwrap_or(base.address),
            email: self.email.unwrap_or(base.email),
            phone: self.phone.unwrap_or(base.phone),
            website: self.website.unwrap_or(base.website),
            siret: self.siret.unwrap_or(base.siret),
            vat_number: self.vat_number.unwrap_or(base.vat_number),
            bank_details: self.bank_details.unwrap_or(base.bank_details),
            legal_form: self.legal_form.unwrap_or(base.legal_form),
        }
    }

    /// Stacks `self` over a lower override layer, key by key.
    pub fn layered_over(&self, lower: &HideOverrides) -> HideOverrides {
        HideOverrides {
            address: self.address.or(lower.address),
            email: self.email.or(lower.email),
            phone: self.phone.or(lower.phone),
            website: self.website.or(lower.website),
            siret: self.siret.or(lower.siret),
            vat_number: self.vat_number.or(lower.vat_number),
            bank_details: self.bank_details.or(lower.bank_details),
            legal_form: self.legal_form.or(lower.legal_form),
        }
    }
}

/// A partial appearance: every key optional, every value lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceOverrides {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub secondary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub font: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub base_font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub line_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_from_str")]
    pub header_style: Option<HeaderStyle>,
    #[serde(default, deserialize_with = "lenient::option_from_str")]
    pub client_position: Option<ClientPosition>,
    #[serde(default, deserialize_with = "lenient::option_from_str")]
    pub table_style: Option<TableStyle>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub border_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub border_radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub cell_padding: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub page_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_number")]
    pub section_spacing: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub columns: ColumnOverrides,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub hide: HideOverrides,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_signature_box: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_payment_methods: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_conditions: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_footer: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_page_numbers: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_draft_watermark: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_document_border: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub compact_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub show_section_subtotals: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub rounded_row_borders: Option<bool>,
    #[serde(default, deserialize_with = "lenient::option_from_str")]
    pub layout_preset: Option<LayoutPreset>,
}

impl AppearanceOverrides {
    /// Shallow merge onto `base`, with the two nested maps merged key by key.
    pub fn apply(&self, base: AppearanceConfig) -> AppearanceConfig {
        AppearanceConfig {
            primary_color: self.primary_color.clone().unwrap_or(base.primary_color),
            secondary_color: self.secondary_color.clone().unwrap_or(base.secondary_color),
            font: self.font.clone().unwrap_or(base.font),
            base_font_size: self.base_font_size.unwrap_or(base.base_font_size),
            line_height: self.line_height.unwrap_or(base.line_height),
            header_style: self.header_style.unwrap_or(base.header_style),
            client_position: self.client_position.unwrap_or(base.client_position),
            table_style: self.table_style.unwrap_or(base.table_style),
            border_width: self.border_width.unwrap_or(base.border_width),
            border_radius: self.border_radius.unwrap_or(base.border_radius),
            cell_padding: self.cell_padding.unwrap_or(base.cell_padding),
            page_margin: self.page_margin.unwrap_or(base.page_margin),
            section_spacing: self.section_spacing.unwrap_or(base.section_spacing),
            columns: self.columns.apply(base.columns),
            hide: self.hide.apply(base.hide),
            show_signature_box: self.show_signature_box.unwrap_or(base.show_signature_box),
            show_payment_methods: self.show_payment_methods.unwrap_or(base.show_payment_methods),
            show_conditions: self.show_conditions.unwrap_or(base.show_conditions),
            show_footer: self.show_footer.unwrap_or(base.show_footer),
            show_page_numbers: self.show_page_numbers.unwrap_or(base.show_page_numbers),
            show_draft_watermark: self.show_draft_watermark.unwrap_or(base.show_draft_watermark),
            show_document_border: self.show_document_border.unwrap_or(base.show_document_border),
            compact_mode: self.compact_mode.unwrap_or(base.compact_mode),
            show_section_subtotals: self
                .show_section_subtotals
                .unwrap_or(base.show_section_subtotals),
            rounded_row_borders: self.rounded_row_borders.unwrap_or(base.rounded_row_borders),
            layout_preset: self.layout_preset.unwrap_or(base.layout_preset),
        }
    }

    /// Stacks `self` over a lower override layer.
    ///
    /// Used to put a document's own overrides on top of a profile file:
    /// keys set in `self` win, nested maps merge key by key.
    pub fn layered_over(&self, lower: &AppearanceOverrides) -> AppearanceOverrides {
        AppearanceOverrides {
            primary_color: self.primary_color.clone().or_else(|| lower.primary_color.clone()),
            secondary_color: self
                .secondary_color
                .clone()
                .or_else(|| lower.secondary_color.clone()),
            font: self.font.clone().or_else(|| lower.font.clone()),
            base_font_size: self.base_font_size.or(lower.base_font_size),
            line_height: self.line_height.or(lower.line_height),
            header_style: self.header_style.or(lower.header_style),
            client_position: self.client_position.or(lower.client_position),
            table_style: self.table_style.or(lower.table_style),
            border_width: self.border_width.or(lower.border_width),
            border_radius: self.border_radius.or(lower.border_radius),
            cell_padding: self.cell_padding.or(lower.cell_padding),
            page_margin: self.page_margin.or(lower.page_margin),
            section_spacing: self.section_spacing.or(lower.section_spacing),
            columns: self.columns.layered_over(&lower.columns),
            hide: self.hide.layered_over(&lower.hide),
            show_signature_box: self.show_signature_box.or(lower.show_signature_box),
            show_payment_methods: self.show_payment_methods.or(lower.show_payment_methods),
            show_conditions: self.show_conditions.or(lower.show_conditions),
            show_footer: self.show_footer.or(lower.show_footer),
            show_page_numbers: self.show_page_numbers.or(lower.show_page_numbers),
            show_draft_watermark: self.show_draft_watermark.or(lower.show_draft_watermark),
            show_document_border: self.show_document_border.or(lower.show_document_border),
            compact_mode: self.compact_mode.or(lower.compact_mode),
            show_section_subtotals: self.show_section_subtotals.or(lower.show_section_subtotals),
            rounded_row_borders: self.rounded_row_borders.or(lower.rounded_row_borders),
            layout_preset: self.layout_preset.or(lower.layout_preset),
        }
    }
}

// =============================================================================
// Kind Table
// =============================================================================

/// Per-document-kind defaults layered over the base defaults.
pub fn kind_overrides(kind: DocumentKind) -> AppearanceOverrides {
    match kind {
        DocumentKind::Quote => AppearanceOverrides {
            primary_color: Some("#1d4ed8".to_string()),
            secondary_color: Some("#dbeafe".to_string()),
            border_radius: Some(6.0),
            ..Default::default()
        },
        DocumentKind::Invoice => AppearanceOverrides {
            primary_color: Some("#0f766e".to_string()),
            secondary_color: Some("#ccfbf1".to_string()),
            border_radius: Some(4.0),
            show_section_subtotals: Some(true),
            ..Default::default()
        },
        DocumentKind::CreditNote => AppearanceOverrides {
            primary_color: Some("#b45309".to_string()),
            secondary_color: Some("#fef3c7".to_string()),
            border_radius: Some(2.0),
            ..Default::default()
        },
    }
}

/// Resolves the effective appearance: base → kind table → `overrides`.
///
/// ## Example
/// ```rust
/// use ardoise_core::appearance::{resolve, AppearanceOverrides};
/// use ardoise_core::types::DocumentKind;
///
/// let config = resolve(DocumentKind::Invoice, &AppearanceOverrides::default());
/// assert!(config.show_section_subtotals);
/// ```
pub fn resolve(kind: DocumentKind, overrides: &AppearanceOverrides) -> AppearanceConfig {
    let with_kind = kind_overrides(kind).apply(AppearanceConfig::default());
    overrides.apply(with_kind)
}

/// Returns `value` when finite, `fallback` otherwise.
#[inline]
pub fn to_number(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
