//! # Bottom Section
//!
//! Note, payment, totals and signature cards below the line item table,
//! composed by one of three presets.
//!
//! ```text
//!  premium-split          premium-grid            centered-stack
//!  ┌──────────┬───────┐   ┌─────────┬─────────┐        ┌─────────┐ totals  0.60
//!  │ note     │totals │   │ note    │ payment │      ┌─┴─────────┴─┐ payment 0.80
//!  │ payment  │signat.│   ├─────────┼─────────┤      │   note      │ note    0.80
//!  └──────────┴───────┘   │ signat. │ totals  │      └─┬─────────┬─┘
//!     0.55       0.45     └─────────┴─────────┘        └─signat.─┘ signature 0.50
//! ```
//!
//! Empty cards are omitted; the totals card is always present. The
//! signature card exists only on quotes.

use ardoise_core::accounting::tax_breakdown;
use ardoise_core::appearance::LayoutPreset;
use ardoise_core::format::format_percent;
use ardoise_core::types::DocumentKind;
use ardoise_core::Money;

use crate::node::{Align, Cell, Column, Margin, Node, Rule, Shape, Table, TableLayout, Text, Width};
use crate::style::{MUTED_COLOR, WHITE};
use crate::synthesizer::LayoutContext;

/// The four cards; `None` when a card has nothing to show.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomCards {
    pub note: Option<Node>,
    pub payment: Option<Node>,
    pub totals: Node,
    pub signature: Option<Node>,
}

/// Builds every card the document has content for.
pub fn collect_cards(ctx: &LayoutContext<'_>) -> BottomCards {
    BottomCards {
        note: note_card(ctx),
        payment: payment_card(ctx),
        totals: totals_card(ctx),
        signature: signature_card(ctx),
    }
}

/// Lays the cards out with the configured preset.
pub fn build_bottom(ctx: &LayoutContext<'_>) -> Node {
    let cards = collect_cards(ctx);
    tracing::debug!(
        preset = %ctx.config.layout_preset,
        note = cards.note.is_some(),
        payment = cards.payment.is_some(),
        signature = cards.signature.is_some(),
        "Composing bottom section"
    );
    match ctx.config.layout_preset {
        LayoutPreset::PremiumSplit => premium_split(ctx, cards),
        LayoutPreset::PremiumGrid => premium_grid(ctx, cards),
        LayoutPreset::CenteredStack => centered_stack(ctx, cards),
    }
}

// =============================================================================
// Presets
// =============================================================================

fn share(ctx: &LayoutContext<'_>, ratio: f64) -> Width {
    let gap = ctx.metrics.section_spacing;
    Width::Fixed(ctx.metrics.content_width() * ratio - gap / 2.0)
}

/// Stacks cards vertically; a single card is returned unwrapped.
fn column_of(mut cards: Vec<Node>, gap: f64) -> Node {
    match cards.len() {
        0 => return Node::empty(),
        1 => return cards.remove(0),
        _ => {}
    }
    let last = cards.len() - 1;
    Node::stack(
        cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| if i < last { card.with_margin(Margin::bottom(gap)) } else { card })
            .collect(),
    )
}

/// Note and payment left (0.55), totals and signature right (0.45).
pub fn premium_split(ctx: &LayoutContext<'_>, cards: BottomCards) -> Node {
    let gap = ctx.metrics.section_spacing;
    let left: Vec<Node> = [cards.note, cards.payment].into_iter().flatten().collect();
    let right: Vec<Node> = std::iter::once(cards.totals).chain(cards.signature).collect();

    Node::columns(
        vec![
            Column { width: share(ctx, 0.55), content: column_of(left, gap) },
            Column { width: share(ctx, 0.45), content: column_of(right, gap) },
        ],
        gap,
    )
}

/// Two rows of two half-width cards; a row with no card is dropped.
pub fn premium_grid(ctx: &LayoutContext<'_>, cards: BottomCards) -> Node {
    let gap = ctx.metrics.section_spacing;
    let rows = [
        (cards.note, cards.payment),
        (cards.signature, Some(cards.totals)),
    ];

    let rows: Vec<Node> = rows
        .into_iter()
        .filter(|(a, b)| a.is_some() || b.is_some())
        .map(|(a, b)| {
            Node::columns(
                vec![
                    Column { width: share(ctx, 0.5), content: a.unwrap_or_else(Node::empty) },
                    Column { width: share(ctx, 0.5), content: b.unwrap_or_else(Node::empty) },
                ],
                gap,
            )
        })
        .collect();

    column_of(rows, gap)
}

/// Cards stacked and centered, each with its own width ratio.
pub fn centered_stack(ctx: &LayoutContext<'_>, cards: BottomCards) -> Node {
    let gap = ctx.metrics.section_spacing;
    let width = ctx.metrics.content_width();
    let ordered = [
        (Some(cards.totals), 0.60),
        (cards.payment, 0.80),
        (cards.note, 0.80),
        (cards.signature, 0.50),
    ];

    let rows: Vec<Node> = ordered
        .into_iter()
        .filter_map(|(card, ratio)| card.map(|c| (c, ratio)))
        .map(|(card, ratio)| {
            Node::columns(
                vec![
                    Column { width: Width::Star, content: Node::empty() },
                    Column { width: Width::Fixed(width * ratio), content: card },
                    Column { width: Width::Star, content: Node::empty() },
                ],
                0.0,
            )
        })
        .collect();

    column_of(rows, gap)
}

// =============================================================================
// Cards
// =============================================================================

/// A titled single-cell table on a soft background.
fn card(ctx: &LayoutContext<'_>, title: &str, body: Vec<Node>) -> Node {
    let m = &ctx.metrics;
    let mut content: Vec<Node> = vec![Text::new(title)
        .bold()
        .size(m.small())
        .color(&ctx.palette.primary)
        .margin(Margin::bottom(m.cell_padding * 0.6))
        .into()];
    content.extend(body);

    let mut layout = TableLayout::borderless(1, 1, m.cell_padding * 2.0, m.cell_padding * 1.5);
    let rule = Rule::new(m.border_width, &ctx.palette.rule);
    for i in 0..=1 {
        layout.set_h_line(i, rule.clone());
        layout.set_v_line(i, rule.clone());
    }
    layout.set_fill(0, Some(ctx.palette.soft.clone()));

    Node::Table(Table {
        widths: vec![Width::Star],
        header_rows: 0,
        body: vec![vec![Cell::new(Node::stack(content))]],
        layout,
        dont_break_rows: true,
        margin: Margin::ZERO,
    })
    .unbreakable()
}

fn small_text(ctx: &LayoutContext<'_>, text: impl Into<String>) -> Node {
    Text::new(text).size(ctx.metrics.small()).into()
}

pub fn note_card(ctx: &LayoutContext<'_>) -> Option<Node> {
    let notes = ctx.document.client_notes.as_deref()?.trim();
    if notes.is_empty() {
        return None;
    }
    Some(card(ctx, "Notes", vec![small_text(ctx, notes)]))
}

pub fn payment_card(ctx: &LayoutContext<'_>) -> Option<Node> {
    let document = ctx.document;
    let config = ctx.config;
    let mut body = Vec::new();

    if config.show_conditions {
        if let Some(terms) = document.payment_terms.as_deref().filter(|t| !t.trim().is_empty()) {
            body.push(small_text(ctx, format!("Conditions : {}", terms.trim())));
        }
    }

    if config.show_payment_methods && !document.payment_methods.is_empty() {
        let labels: Vec<&str> = document.payment_methods.iter().map(|p| p.label()).collect();
        body.push(small_text(ctx, format!("Moyens de paiement : {}", labels.join(", "))));
    }

    if !config.hide.bank_details {
        if let Some(iban) = document.issuer.iban.as_deref().filter(|v| !v.trim().is_empty()) {
            body.push(small_text(ctx, format!("IBAN : {}", iban)));
        }
        if let Some(bic) = document.issuer.bic.as_deref().filter(|v| !v.trim().is_empty()) {
            body.push(small_text(ctx, format!("BIC : {}", bic)));
        }
    }

    if body.is_empty() {
        None
    } else {
        Some(card(ctx, "Paiement", body))
    }
}

pub fn signature_card(ctx: &LayoutContext<'_>) -> Option<Node> {
    if ctx.document.kind != DocumentKind::Quote || !ctx.config.show_signature_box {
        return None;
    }
    let m = &ctx.metrics;
    let area = Node::canvas(vec![Shape::Rect {
        x: 0.0,
        y: 0.0,
        w: m.content_width() * 0.35,
        h: 60.0,
        r: m.border_radius,
        color: Some(WHITE.to_string()),
        line_color: Some(ctx.palette.rule.clone()),
        line_width: m.border_width,
    }])
    .with_margin(Margin::top(m.cell_padding));

    Some(card(
        ctx,
        "Bon pour accord",
        vec![
            Text::new("Date et signature précédées de la mention « Bon pour accord »")
                .size(m.small())
                .color(MUTED_COLOR)
                .into(),
            area,
        ],
    ))
}

/// One label/amount row of the totals card.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsLine {
    pub label: String,
    pub amount: Money,
    pub emphasis: bool,
}

impl TotalsLine {
    fn new(label: impl Into<String>, amount: Money) -> Self {
        TotalsLine {
            label: label.into(),
            amount,
            emphasis: false,
        }
    }

    fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

/// The totals rows, in print order. The last row is always the net payable.
pub fn totals_lines(ctx: &LayoutContext<'_>) -> Vec<TotalsLine> {
    let document = ctx.document;
    let totals = &document.totals;
    let mut lines = Vec::new();

    if !totals.total_discount.is_zero() {
        lines.push(TotalsLine::new("Remises", -totals.total_discount));
    }
    lines.push(TotalsLine::new("Total HT", totals.total_excl_tax));

    if document.tax_applicable {
        // per-rate rows only when they add up to the stored tax total
        let breakdown = tax_breakdown(&document.line_items, true);
        let breakdown_tax: Money = breakdown.iter().map(|(_, _, tax)| *tax).sum();
        if breakdown.len() > 1 && breakdown_tax == totals.total_tax {
            lines.extend(
                breakdown
                    .into_iter()
                    .map(|(rate, _, tax)| TotalsLine::new(format!("TVA {}", format_percent(rate)), tax)),
            );
        } else {
            lines.push(TotalsLine::new("TVA", totals.total_tax));
        }
        lines.push(TotalsLine::new("Total TTC", totals.total_incl_tax).emphasized());
    }

    let retention = document.retention();
    if !retention.is_zero() {
        lines.push(TotalsLine::new("Retenue de garantie", -retention));
    }

    lines.push(TotalsLine::new("Net à payer", totals.net_payable).emphasized());
    lines
}

pub fn totals_card(ctx: &LayoutContext<'_>) -> Node {
    let m = &ctx.metrics;
    let lines = totals_lines(ctx);
    let last = lines.len() - 1;

    let mut layout = TableLayout::borderless(lines.len(), 2, m.cell_padding * 1.5, m.cell_padding * 0.6);
    let body: Vec<Vec<Cell>> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut label = Text::new(line.label);
            let mut amount = Text::new(line.amount.to_string()).align(Align::Right);
            if line.emphasis {
                label = label.bold();
                amount = amount.bold();
            }
            if i == last {
                label = label.color(WHITE);
                amount = amount.color(WHITE);
                layout.set_fill(i, Some(ctx.palette.primary.clone()));
            } else {
                layout.set_fill(i, Some(ctx.palette.soft.clone()));
            }
            vec![Cell::new(label), Cell::new(amount)]
        })
        .collect();
    layout.set_h_line(last, Rule::new(m.border_width, &ctx.palette.rule));

    let table = Node::Table(Table {
        widths: vec![Width::Star, Width::Auto],
        header_rows: 0,
        body,
        layout,
        dont_break_rows: true,
        margin: Margin::ZERO,
    });

    let note = if ctx.document.tax_applicable {
        None
    } else {
        let text = ctx
            .document
            .tax_exemption_note
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("TVA non applicable, art. 293 B du CGI");
        Some(
            Text::new(text)
                .size(m.small())
                .italics()
                .color(MUTED_COLOR)
                .margin(Margin::top(m.cell_padding))
                .into(),
        )
    };

    Node::stack(std::iter::once(table).chain(note).collect()).unbreakable()
}

// =============================================================================
// Unit Tests
// =============================================================================
