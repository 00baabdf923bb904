//! # Header Builders
//!
//! One pure builder per header style. Each returns a [`Block`]: the optional
//! backdrop shape, the content drawn over it, and the backdrop dimensions.
//!
//! ```text
//!  classic   issuer ............................ DEVIS / number / dates
//!            ───────────────────────────────────────────────────────── rule
//!                                                 client
//!
//!  modern    ████ Devis ████████████████████████████ N° / date ████ band
//!            issuer                               client
//!
//!  minimal   issuer (small) ..................... Devis n° / date
//!            ─────────────────────────────────────────────────── hairline
//!
//!  ultra     issuer                    ╭──────────────────────────╮
//!                                      │ DEVIS                    │ card
//!                                      │ one line per metadata    │
//!                                      ╰──────────────────────────╯
//!            client
//! ```

use ardoise_core::appearance::{ClientPosition, HeaderStyle};
use ardoise_core::format::format_date;
use ardoise_core::types::{Document, DocumentKind};

use crate::node::{Align, Block, Column, Margin, Node, Shape, Text, Width};
use crate::style::{MUTED_COLOR, WHITE};
use crate::synthesizer::LayoutContext;

/// Share of the content width given to the client block and the ultra card.
const SIDE_RATIO: f64 = 0.45;

/// Builds the header for the configured style.
pub fn build_header(ctx: &LayoutContext<'_>) -> Block {
    match ctx.config.header_style {
        HeaderStyle::Classic => classic(ctx),
        HeaderStyle::Modern => modern(ctx),
        HeaderStyle::Minimal => minimal(ctx),
        HeaderStyle::Ultra => ultra(ctx),
    }
}

// =============================================================================
// Styles
// =============================================================================

/// Issuer left, title right, primary rule underneath.
pub fn classic(ctx: &LayoutContext<'_>) -> Block {
    let m = &ctx.metrics;
    let width = m.content_width();

    let mut title = vec![Text::new(ctx.document.kind.label().to_uppercase())
        .size(m.large())
        .bold()
        .color(&ctx.palette.primary)
        .align(Align::Right)
        .into()];
    title.extend(
        metadata_lines(ctx.document)
            .into_iter()
            .map(|(label, value)| meta_text(ctx, label, value).align(Align::Right).into()),
    );

    let top = Node::columns(
        vec![
            Column { width: Width::Star, content: Node::stack(issuer_lines(ctx)) },
            Column { width: Width::Auto, content: Node::stack(title) },
        ],
        m.section_spacing,
    );
    let rule = Node::canvas(vec![Shape::h_rule(width, m.border_width * 3.0, &ctx.palette.primary)])
        .with_margin(Margin::new(0.0, m.cell_padding, 0.0, m.section_spacing));

    let content = Node::stack(vec![top, rule, client_row(ctx)]);
    Block::plain(content, width, 0.0)
}

/// Full-width colored band carrying the title.
pub fn modern(ctx: &LayoutContext<'_>) -> Block {
    let m = &ctx.metrics;
    let width = m.content_width();
    let padding = m.cell_padding * 2.0;
    let band_height = 2.0 * padding + m.line_step(m.large());

    let date = format!("{} · {}", ctx.document.number, format_date(ctx.document.issue_date));
    let band = Node::columns(
        vec![
            Column {
                width: Width::Star,
                content: Text::new(ctx.document.kind.label())
                    .size(m.large())
                    .bold()
                    .color(WHITE)
                    .into(),
            },
            Column {
                width: Width::Auto,
                content: Text::new(date).color(WHITE).align(Align::Right).into(),
            },
        ],
        m.section_spacing,
    )
    .with_margin(Margin::new(padding, padding, padding, padding + m.section_spacing));

    let mut details: Vec<Node> = metadata_lines(ctx.document)
        .into_iter()
        .skip(2)
        .map(|(label, value)| meta_text(ctx, label, value).into())
        .collect();
    details.insert(0, Node::stack(issuer_lines(ctx)));

    let below = side_by_side(ctx, Node::stack(details), client_block(ctx));

    let shape = Node::canvas(vec![Shape::filled_rect(
        width,
        band_height,
        m.border_radius,
        &ctx.palette.primary,
    )]);

    Block {
        shape: Some(shape),
        content: Node::stack(vec![band, below]),
        width,
        height: band_height,
    }
}

/// Compact text header with a hairline.
pub fn minimal(ctx: &LayoutContext<'_>) -> Block {
    let m = &ctx.metrics;
    let width = m.content_width();

    let heading = format!("{} n° {}", ctx.document.kind.label(), ctx.document.number);
    let mut title = vec![Text::new(heading)
        .size(m.font_size + 4.0)
        .bold()
        .align(Align::Right)
        .into()];
    title.extend(
        metadata_lines(ctx.document)
            .into_iter()
            .skip(1)
            .map(|(label, value)| meta_text(ctx, label, value).align(Align::Right).into()),
    );

    let top = Node::columns(
        vec![
            Column { width: Width::Star, content: Node::stack(issuer_lines(ctx)) },
            Column { width: Width::Auto, content: Node::stack(title) },
        ],
        m.section_spacing,
    );
    let hairline = Node::canvas(vec![Shape::h_rule(width, m.border_width, &ctx.palette.rule)])
        .with_margin(Margin::new(0.0, m.cell_padding, 0.0, m.section_spacing));

    Block::plain(Node::stack(vec![top, hairline, client_row(ctx)]), width, 0.0)
}

/// Solid rounded info card on the right; its height follows the number of
/// metadata lines actually present.
pub fn ultra(ctx: &LayoutContext<'_>) -> Block {
    let m = &ctx.metrics;
    let width = m.content_width();
    let card_width = width * SIDE_RATIO;
    let padding = m.cell_padding * 2.0;

    let lines = metadata_lines(ctx.document);
    let card_height = ultra_card_height(ctx, lines.len());

    let mut card = vec![Text::new(ctx.document.kind.label().to_uppercase())
        .size(m.large())
        .bold()
        .color(WHITE)
        .into()];
    card.extend(lines.into_iter().map(|(label, value)| {
        Text::new(format!("{} : {}", label, value))
            .color(WHITE)
            .into()
    }));
    let card = Node::stack(card).with_margin(Margin::all(padding));

    let top = Node::columns(
        vec![
            Column { width: Width::Star, content: Node::stack(issuer_lines(ctx)) },
            Column { width: Width::Fixed(card_width), content: card },
        ],
        m.section_spacing,
    );

    let shape = Node::canvas(vec![Shape::Rect {
        x: width - card_width,
        y: 0.0,
        w: card_width,
        h: card_height,
        r: m.border_radius * 2.0,
        color: Some(ctx.palette.primary.clone()),
        line_color: None,
        line_width: 0.0,
    }]);

    let spacer = Node::empty().with_margin(Margin::bottom(m.section_spacing));
    Block {
        shape: Some(shape),
        content: Node::stack(vec![top, spacer, client_row(ctx)]),
        width: card_width,
        height: card_height,
    }
}

/// Height of the ultra card for `lines` metadata lines.
pub fn ultra_card_height(ctx: &LayoutContext<'_>, lines: usize) -> f64 {
    let m = &ctx.metrics;
    let padding = m.cell_padding * 2.0;
    2.0 * padding + m.line_step(m.large()) + lines as f64 * m.line_step(m.font_size)
}

// =============================================================================
// Shared Pieces
// =============================================================================

/// `(label, value)` pairs describing the document, in print order.
pub fn metadata_lines(document: &Document) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("N°", document.number.clone()),
        ("Date", format_date(document.issue_date)),
    ];

    match document.kind {
        DocumentKind::Quote => {
            if let Some(date) = document.validity_date {
                lines.push(("Valable jusqu'au", format_date(date)));
            }
        }
        DocumentKind::Invoice | DocumentKind::CreditNote => {
            if let Some(date) = document.due_date {
                lines.push(("Échéance", format_date(date)));
            }
        }
    }

    if !document.object.trim().is_empty() {
        lines.push(("Objet", document.object.trim().to_string()));
    }
    lines
}

fn meta_text(ctx: &LayoutContext<'_>, label: &str, value: String) -> Text {
    Text::new(format!("{} : {}", label, value)).size(ctx.metrics.small())
}

/// Issuer identity, respecting the `hide` flags.
fn issuer_lines(ctx: &LayoutContext<'_>) -> Vec<Node> {
    let issuer = &ctx.document.issuer;
    let hide = &ctx.config.hide;
    let small = ctx.metrics.small();

    let mut lines: Vec<Node> = vec![Text::new(&issuer.name)
        .size(ctx.metrics.font_size + 3.0)
        .bold()
        .color(&ctx.palette.primary)
        .into()];

    let mut push = |value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            lines.push(Text::new(value).size(small).color(MUTED_COLOR).into());
        }
    };

    if !hide.legal_form {
        push(issuer.legal_form.clone());
    }
    if !hide.address {
        push(issuer.address.clone());
        push(issuer.locality());
    }
    if !hide.email {
        push(issuer.email.clone());
    }
    if !hide.phone {
        push(issuer.phone.clone());
    }
    if !hide.website {
        push(issuer.website.clone());
    }
    if !hide.siret {
        push(issuer.siret.as_ref().map(|s| format!("SIRET : {}", s)));
    }
    if !hide.vat_number {
        push(issuer.vat_number.as_ref().map(|s| format!("TVA intra. : {}", s)));
    }

    lines
}

/// The addressee block.
fn client_block(ctx: &LayoutContext<'_>) -> Node {
    let client = &ctx.document.client;
    let small = ctx.metrics.small();

    let mut lines: Vec<Node> = vec![Text::new("Client")
        .size(small)
        .bold()
        .color(&ctx.palette.primary)
        .into()];

    match client.company_name.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(company) => {
            lines.push(Text::new(company).bold().into());
            if !client.name.trim().is_empty() {
                lines.push(Text::new(&client.name).into());
            }
        }
        None => lines.push(Text::new(&client.name).bold().into()),
    }

    let extra = [
        client.address.clone(),
        client.locality(),
        client.email.clone(),
        client.phone.clone(),
        client.siret.as_ref().map(|s| format!("SIRET : {}", s)),
        client.vat_number.as_ref().map(|s| format!("TVA intra. : {}", s)),
    ];
    lines.extend(
        extra
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .map(|v| Text::new(v).size(small).into()),
    );

    Node::stack(lines)
}

/// Places the client block on its configured side, the other side empty.
fn client_row(ctx: &LayoutContext<'_>) -> Node {
    side_by_side(ctx, Node::empty(), client_block(ctx))
        .with_margin(Margin::bottom(ctx.metrics.section_spacing))
}

/// `other` and the client block, ordered by `clientPosition`.
fn side_by_side(ctx: &LayoutContext<'_>, other: Node, client: Node) -> Node {
    let m = &ctx.metrics;
    let client = Column {
        width: Width::Fixed(m.content_width() * SIDE_RATIO),
        content: client,
    };
    let other = Column { width: Width::Star, content: other };

    let columns = match ctx.config.client_position {
        ClientPosition::Left => vec![client, other],
        ClientPosition::Right => vec![other, client],
    };
    Node::columns(columns, m.section_spacing).with_margin(Margin::top(m.section_spacing))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::tests::{context_for, sample_document};
    use ardoise_core::appearance::AppearanceOverrides;
    use chrono::NaiveDate;

    fn header_for(style: HeaderStyle, document: &Document) -> Block {
        let overrides = AppearanceOverrides {
            header_style: Some(style),
            ..Default::default()
        };
        let config = ardoise_core::appearance::resolve(document.kind, &overrides);
        let ctx = context_for(document, &config);
        build_header(&ctx)
    }

    #[test]
    fn test_metadata_lines_follow_kind() {
        let mut quote = sample_document(DocumentKind::Quote);
        quote.validity_date = NaiveDate::from_ymd_opt(2024, 4, 30);
        quote.due_date = NaiveDate::from_ymd_opt(2024, 5, 30);
        let labels: Vec<&str> = metadata_lines(&quote).iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["N°", "Date", "Valable jusqu'au", "Objet"]);

        let mut invoice = sample_document(DocumentKind::Invoice);
        invoice.due_date = NaiveDate::from_ymd_opt(2024, 5, 30);
        invoice.object = "  ".into();
        let lines = metadata_lines(&invoice);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], ("Échéance", "30/05/2024".to_string()));
    }

    #[test]
    fn test_only_backdrop_styles_have_shapes() {
        let document = sample_document(DocumentKind::Quote);
        assert!(header_for(HeaderStyle::Classic, &document).shape.is_none());
        assert!(header_for(HeaderStyle::Minimal, &document).shape.is_none());
        assert!(header_for(HeaderStyle::Modern, &document).shape.is_some());
        assert!(header_for(HeaderStyle::Ultra, &document).shape.is_some());
    }

    #[test]
    fn test_ultra_card_grows_with_metadata() {
        let mut short = sample_document(DocumentKind::Quote);
        short.object = String::new();
        let mut long = sample_document(DocumentKind::Quote);
        long.validity_date = NaiveDate::from_ymd_opt(2024, 4, 30);

        let short_block = header_for(HeaderStyle::Ultra, &short);
        let long_block = header_for(HeaderStyle::Ultra, &long);
        assert!(long_block.height > short_block.height);

        let config = ardoise_core::appearance::resolve(DocumentKind::Quote, &Default::default());
        let ctx = context_for(&long, &config);
        let step = ctx.metrics.line_step(ctx.metrics.font_size);
        assert!((long_block.height - short_block.height - 2.0 * step).abs() < 1e-9);
    }

    #[test]
    fn test_hidden_fields_are_not_printed() {
        let mut document = sample_document(DocumentKind::Invoice);
        document.issuer.siret = Some("123 456 789 00012".into());
        document.issuer.email = Some("contact@atelier.fr".into());

        let visible = header_for(HeaderStyle::Classic, &document).into_node().plain_text();
        assert!(visible.contains("SIRET : 123 456 789 00012"));
        assert!(visible.contains("contact@atelier.fr"));

        let overrides: AppearanceOverrides =
            serde_json::from_str(r#"{"hide": {"siret": true, "email": true}}"#).unwrap();
        let config = ardoise_core::appearance::resolve(document.kind, &overrides);
        let ctx = context_for(&document, &config);
        let hidden = build_header(&ctx).into_node().plain_text();
        assert!(!hidden.contains("SIRET"));
        assert!(!hidden.contains("contact@atelier.fr"));
    }

    #[test]
    fn test_client_position() {
        let document = sample_document(DocumentKind::Quote);
        for (position, client_index) in [(ClientPosition::Left, 0), (ClientPosition::Right, 1)] {
            let overrides = AppearanceOverrides {
                client_position: Some(position),
                ..Default::default()
            };
            let config = ardoise_core::appearance::resolve(document.kind, &overrides);
            let ctx = context_for(&document, &config);
            let Node::Columns(row) = client_row(&ctx) else {
                panic!("client row must be columns");
            };
            assert!(row.columns[client_index].content.plain_text().contains("Client"));
        }
    }
}
