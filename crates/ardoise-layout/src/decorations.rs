//! Page-level decorations drawn outside the body flow.
//!
//! The renderer repeats them on every page: the watermark above the
//! content, the border below it.

use serde::Serialize;

use crate::node::{Node, Shape};
use crate::style::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::synthesizer::LayoutContext;

pub const WATERMARK_TEXT: &str = "DRAFT";

/// Diagonal text stamped over every page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Watermark {
    pub text: String,
    pub color: String,
    pub opacity: f64,
    pub angle: f64,
    pub font_size: f64,
    pub bold: bool,
}

/// The draft watermark, when enabled.
pub fn watermark(ctx: &LayoutContext<'_>) -> Option<Watermark> {
    if !ctx.config.show_draft_watermark {
        return None;
    }
    Some(Watermark {
        text: WATERMARK_TEXT.to_string(),
        color: ctx.palette.primary.clone(),
        opacity: 0.08,
        angle: -45.0,
        font_size: 110.0,
        bold: true,
    })
}

/// Full-page border inset by half the page margin, when enabled.
pub fn page_border(ctx: &LayoutContext<'_>) -> Option<Node> {
    if !ctx.config.show_document_border {
        return None;
    }
    let m = &ctx.metrics;
    let inset = m.page_margin / 2.0;
    Some(Node::canvas(vec![Shape::Rect {
        x: inset,
        y: inset,
        w: PAGE_WIDTH - 2.0 * inset,
        h: PAGE_HEIGHT - 2.0 * inset,
        r: m.border_radius,
        color: None,
        line_color: Some(ctx.palette.primary.clone()),
        line_width: (m.border_width * 2.0).max(0.5),
    }]))
}
