//! # Layout Synthesizer
//!
//! Assembles header, line item table, bottom cards, decorations and footer
//! into one [`LayoutDocument`].
//!
//! ```text
//! ┌──────────────────────────── A4 page ────────────────────────────┐
//! │ background: page border                                         │
//! │   ┌──────────────────── content ──────────────────────────┐     │
//! │   │ header (style builder)                                │     │
//! │   │ line item table (native | cards)                      │     │
//! │   │ bottom section (preset)                               │     │
//! │   └───────────────────────────────────────────────────────┘     │
//! │ watermark: DRAFT                                                │
//! │ footer: identity · Page {current} / {total}    (bottom reserve) │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Synthesis never fails: malformed appearance values were already coerced
//! into `Metrics`, an undecodable color falls back to the neutral palette.

use ardoise_core::appearance::AppearanceConfig;
use ardoise_core::color::is_valid_hex;
use ardoise_core::types::Document;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cards::build_bottom;
use crate::decorations::{page_border, watermark, Watermark};
use crate::footer::{footer, FooterTemplate};
use crate::header::build_header;
use crate::node::{Margin, Node, TextStyle};
use crate::style::{Metrics, Palette, FOOTER_RESERVE, PAGE_HEIGHT, PAGE_WIDTH, TEXT_COLOR};
use crate::table::build_table;

// =============================================================================
// Context
// =============================================================================

/// Everything a visual builder reads.
#[derive(Debug, Clone)]
pub struct LayoutContext<'a> {
    pub document: &'a Document,
    pub config: &'a AppearanceConfig,
    pub metrics: Metrics,
    pub palette: Palette,
}

impl<'a> LayoutContext<'a> {
    pub fn new(document: &'a Document, config: &'a AppearanceConfig) -> Self {
        if !is_valid_hex(&config.primary_color) {
            warn!(
                color = %config.primary_color,
                "Undecodable primary color, falling back to the neutral palette"
            );
        }
        LayoutContext {
            document,
            config,
            metrics: Metrics::from_config(config),
            palette: Palette::derive(config),
        }
    }
}

// =============================================================================
// Layout Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSetup {
    pub size: String,
    pub width: f64,
    pub height: f64,
    pub margins: Margin,
    /// Part of the bottom margin kept for the footer.
    pub footer_reserve: f64,
}

/// Metadata embedded in the rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
}

/// The complete description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub info: DocumentInfo,
    pub page: PageSetup,
    pub default_style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Watermark>,
    pub content: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterTemplate>,
}

// =============================================================================
// Synthesis
// =============================================================================

/// Builds the layout description of `document` with the resolved `config`.
///
/// The document is expected to be validated, with final totals.
pub fn synthesize_layout(document: &Document, config: &AppearanceConfig) -> LayoutDocument {
    let ctx = LayoutContext::new(document, config);
    let m = ctx.metrics;

    debug!(
        kind = %document.kind,
        header = %config.header_style,
        preset = %config.layout_preset,
        items = document.line_items.len(),
        "Synthesizing layout"
    );

    let header = build_header(&ctx).into_node();
    let table = build_table(&ctx);
    let bottom = build_bottom(&ctx);

    let footer = footer(&ctx);
    let reserve = if footer.is_some() { FOOTER_RESERVE } else { 0.0 };

    LayoutDocument {
        info: DocumentInfo {
            title: document.title(),
            author: document.issuer.name.clone(),
            subject: document.object.clone(),
        },
        page: PageSetup {
            size: "A4".to_string(),
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margins: Margin::new(m.page_margin, m.page_margin, m.page_margin, m.page_margin + reserve),
            footer_reserve: reserve,
        },
        default_style: TextStyle {
            font: Some(config.font.clone()),
            font_size: Some(m.font_size),
            line_height: Some(m.line_height),
            color: Some(TEXT_COLOR.to_string()),
            ..TextStyle::default()
        },
        background: page_border(&ctx),
        watermark: watermark(&ctx),
        content: vec![header, table, bottom],
        footer,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
