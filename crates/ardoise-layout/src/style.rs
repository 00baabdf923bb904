//! Coerced metrics and derived color tints.
//!
//! The appearance resolver never validates, so this is where malformed
//! numbers meet their fallbacks. Every visual builder reads `Metrics` and
//! `Palette`, never `AppearanceConfig` numbers directly.

use ardoise_core::appearance::{to_number, AppearanceConfig};
use ardoise_core::color::{is_valid_hex, lighten};

/// A4 portrait, in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// Extra bottom margin kept free for the footer.
pub const FOOTER_RESERVE: f64 = 30.0;

pub const TEXT_COLOR: &str = "#111827";
pub const MUTED_COLOR: &str = "#6b7280";
pub const WHITE: &str = "#ffffff";

/// Numeric appearance options after coercion and compact-mode scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub font_size: f64,
    pub line_height: f64,
    pub border_width: f64,
    pub border_radius: f64,
    pub cell_padding: f64,
    pub page_margin: f64,
    pub section_spacing: f64,
    /// Minimum estimated height of a table row.
    pub base_row_height: f64,
}

impl Metrics {
    pub fn from_config(config: &AppearanceConfig) -> Self {
        let font_size = positive(config.base_font_size, 10.0);
        let mut metrics = Metrics {
            font_size,
            line_height: positive(config.line_height, 1.3),
            border_width: non_negative(config.border_width, 0.5),
            border_radius: non_negative(config.border_radius, 4.0),
            cell_padding: non_negative(config.cell_padding, 5.0),
            page_margin: non_negative(config.page_margin, 40.0),
            section_spacing: non_negative(config.section_spacing, 16.0),
            base_row_height: font_size + 12.0,
        };

        if config.compact_mode {
            metrics.cell_padding *= 0.6;
            metrics.section_spacing *= 0.5;
            metrics.base_row_height = font_size + 7.0;
        }

        // a margin eating half the page leaves nothing to lay out
        metrics.page_margin = metrics.page_margin.min(PAGE_WIDTH / 4.0);
        metrics
    }

    /// Usable width between the left and right page margins.
    pub fn content_width(&self) -> f64 {
        PAGE_WIDTH - 2.0 * self.page_margin
    }

    /// Vertical advance of one text line at `font_size`.
    pub fn line_step(&self, font_size: f64) -> f64 {
        font_size * self.line_height
    }

    pub fn small(&self) -> f64 {
        (self.font_size - 1.5).max(6.0)
    }

    pub fn large(&self) -> f64 {
        self.font_size * 2.2
    }
}

fn positive(value: f64, fallback: f64) -> f64 {
    let value = to_number(value, fallback);
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

fn non_negative(value: f64, fallback: f64) -> f64 {
    to_number(value, fallback).max(0.0)
}

/// Every tint used by the layout, derived from the primary color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    /// Header band text and secondary accents.
    pub accent: String,
    /// Section rows and card backgrounds.
    pub soft: String,
    /// Alternate body rows.
    pub stripe: String,
    /// Rounded row cards.
    pub card: String,
    /// Table and card borders.
    pub rule: String,
}

impl Palette {
    /// Derives the palette; an undecodable primary falls back to the
    /// neutral base color so that derived tints stay valid.
    pub fn derive(config: &AppearanceConfig) -> Self {
        let primary = if is_valid_hex(&config.primary_color) {
            config.primary_color.clone()
        } else {
            AppearanceConfig::default().primary_color
        };
        let secondary = if is_valid_hex(&config.secondary_color) {
            config.secondary_color.clone()
        } else {
            lighten(&primary, 0.85)
        };

        Palette {
            accent: lighten(&primary, 0.25),
            soft: lighten(&primary, 0.90),
            stripe: lighten(&primary, 0.96),
            card: lighten(&primary, 0.94),
            rule: lighten(&primary, 0.75),
            primary,
            secondary,
        }
    }
}
