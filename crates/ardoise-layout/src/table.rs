//! # Line Item Table
//!
//! The document body becomes one ordered sequence of [`TableRow`] records
//! (cells, kind, estimated height). The sequence is then drawn in one of
//! two modes:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  native (roundedRowBorders = false)                                     │
//! │    one table, rules and fills looked up by row index per tableStyle     │
//! │      striped     header fill, every second body row tinted,             │
//! │                  rules under header and at the bottom only              │
//! │      bordered    full grid                                              │
//! │      horizontal  row separators only                                    │
//! │      minimal     header-bottom and table-bottom rules                   │
//! │                                                                         │
//! │  cards (roundedRowBorders = true)                                       │
//! │    header table, then per line row:                                     │
//! │      ╭──────────────────────────────╮  canvas rect, estimated height    │
//! │      │ row table, top margin = -h   │  content pulled over the rect     │
//! │      ╰──────────────────────────────╯                                   │
//! │    annotation rows stay zero-border single-row tables                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row heights are estimated, not measured: a designation wraps every
//! [`DESIGNATION_WRAP`] characters, a description every
//! [`DESCRIPTION_WRAP`]. Long words or narrow columns can make a card
//! shorter than its content.

use ardoise_core::accounting::line_total;
use ardoise_core::appearance::TableStyle;
use ardoise_core::format::{format_percent, format_quantity};
use ardoise_core::numbering::{number_items, section_rollups, subtotal_before_index};
use ardoise_core::types::{BillableLine, DiscountKind, LineItem};
use ardoise_core::{Money, DESCRIPTION_WRAP, DESIGNATION_WRAP};
use serde::Serialize;

use crate::node::{Align, Block, Cell, Margin, Node, Rule, Shape, Table, TableLayout, Text, Width};
use crate::style::{Metrics, MUTED_COLOR, WHITE};
use crate::synthesizer::LayoutContext;

// =============================================================================
// Columns
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Numero,
    Designation,
    Quantite,
    Unite,
    PrixUnitaire,
    Tva,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableColumn {
    pub key: ColumnKey,
    pub label: &'static str,
    pub width: Width,
    pub align: Align,
}

/// Visible columns, in print order. Designation and total are always shown.
pub fn table_columns(ctx: &LayoutContext<'_>) -> Vec<TableColumn> {
    let flags = &ctx.config.columns;
    let candidates = [
        (flags.show_numero, ColumnKey::Numero, "N°", Width::Fixed(30.0), Align::Left),
        (true, ColumnKey::Designation, "Désignation", Width::Star, Align::Left),
        (flags.show_quantite, ColumnKey::Quantite, "Qté", Width::Fixed(40.0), Align::Right),
        (flags.show_unite, ColumnKey::Unite, "Unité", Width::Fixed(40.0), Align::Left),
        (flags.show_prix_unitaire, ColumnKey::PrixUnitaire, "P.U. HT", Width::Fixed(70.0), Align::Right),
        (flags.show_tva, ColumnKey::Tva, "TVA", Width::Fixed(42.0), Align::Right),
        (true, ColumnKey::Total, "Total HT", Width::Fixed(75.0), Align::Right),
    ];

    candidates
        .into_iter()
        .filter(|(shown, ..)| *shown)
        .map(|(_, key, label, width, align)| TableColumn { key, label, width, align })
        .collect()
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Header,
    Line,
    Section,
    SectionTotal,
    Entete,
    Texte,
    SousTotal,
}

impl RowKind {
    /// Rows drawn as rounded cards in card mode.
    pub fn is_card(&self) -> bool {
        matches!(self, RowKind::Line)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    pub kind: RowKind,
    pub estimated_height: f64,
}

/// Estimated rendered height of a row.
///
/// `max(base, lines × (fontSize + 3) + padding)` with
/// `lines = ⌈designation / 45⌉ + ⌈description / 60⌉`.
pub fn estimate_row_height(designation: &str, description: Option<&str>, metrics: &Metrics) -> f64 {
    let wrapped = |text: &str, per_line: usize| text.chars().count().div_ceil(per_line);
    let lines = wrapped(designation, DESIGNATION_WRAP)
        + description.map(|d| wrapped(d, DESCRIPTION_WRAP)).unwrap_or(0);
    let content = lines as f64 * (metrics.font_size + 3.0) + 2.0 * metrics.cell_padding;
    content.max(metrics.base_row_height)
}

/// Builds the header row followed by one row per body entry, with
/// section rollups inserted after each section's last line.
pub fn build_rows(ctx: &LayoutContext<'_>) -> Vec<TableRow> {
    let columns = table_columns(ctx);
    let numbered = number_items(&ctx.document.line_items);
    let rollups = section_rollups(&numbered, ctx.config.show_section_subtotals);

    let mut rows = vec![header_row(ctx, &columns)];

    for (index, entry) in numbered.iter().enumerate() {
        let row = match entry.item {
            LineItem::Line(line) => Some(line_row(ctx, &columns, &entry.number, line, entry.item)),
            LineItem::Section { label, .. } => Some(annotation_row(
                ctx,
                &columns,
                RowKind::Section,
                Some(entry.number.clone()),
                Text::new(label).bold().color(&ctx.palette.primary),
                None,
            )),
            LineItem::Header { label } => Some(annotation_row(
                ctx,
                &columns,
                RowKind::Entete,
                None,
                Text::new(label).bold().size(ctx.metrics.font_size + 1.0),
                None,
            )),
            LineItem::Text { label } => Some(annotation_row(
                ctx,
                &columns,
                RowKind::Texte,
                None,
                Text::new(label).italics().color(MUTED_COLOR),
                None,
            )),
            LineItem::SubtotalMarker { label } => {
                let label = label
                    .as_deref()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or("Sous-total");
                let amount = subtotal_before_index(&numbered, index);
                Some(annotation_row(
                    ctx,
                    &columns,
                    RowKind::SousTotal,
                    None,
                    Text::new(label).italics().align(Align::Right),
                    Some(amount),
                ))
            }
            LineItem::Unknown => None,
        };
        rows.extend(row);

        for rollup in rollups.iter().filter(|r| r.after_index == index) {
            rows.push(annotation_row(
                ctx,
                &columns,
                RowKind::SectionTotal,
                None,
                Text::new(format!("Sous-total {}", rollup.label))
                    .bold()
                    .align(Align::Right),
                Some(rollup.amount),
            ));
        }
    }

    rows
}

fn header_row(ctx: &LayoutContext<'_>, columns: &[TableColumn]) -> TableRow {
    let color = if header_filled(ctx.config.table_style) {
        WHITE
    } else {
        ctx.palette.primary.as_str()
    };
    let cells = columns
        .iter()
        .map(|c| {
            Cell::new(
                Text::new(c.label)
                    .bold()
                    .size(ctx.metrics.small())
                    .color(color)
                    .align(c.align),
            )
        })
        .collect();

    TableRow {
        cells,
        kind: RowKind::Header,
        estimated_height: ctx.metrics.base_row_height,
    }
}

fn line_row(
    ctx: &LayoutContext<'_>,
    columns: &[TableColumn],
    number: &str,
    line: &BillableLine,
    item: &LineItem,
) -> TableRow {
    let m = &ctx.metrics;
    let cells = columns
        .iter()
        .map(|column| {
            let node: Node = match column.key {
                ColumnKey::Numero => Text::new(number).size(m.small()).color(MUTED_COLOR).into(),
                ColumnKey::Designation => designation_cell(ctx, line),
                ColumnKey::Quantite => Text::new(format_quantity(line.quantity)).into(),
                ColumnKey::Unite => Text::new(line.unit.clone().unwrap_or_default()).into(),
                ColumnKey::PrixUnitaire => {
                    Text::new(Money::round2(line.unit_price_excl_tax).to_string()).into()
                }
                ColumnKey::Tva => {
                    let rate = if ctx.document.tax_applicable {
                        format_percent(line.tax_rate)
                    } else {
                        "-".to_string()
                    };
                    Text::new(rate).into()
                }
                ColumnKey::Total => Text::new(line_total(item).to_string()).bold().into(),
            };
            Cell::new(align_node(node, column.align))
        })
        .collect();

    TableRow {
        cells,
        kind: RowKind::Line,
        estimated_height: estimate_row_height(&line.designation, line.description.as_deref(), m),
    }
}

fn designation_cell(ctx: &LayoutContext<'_>, line: &BillableLine) -> Node {
    let small = ctx.metrics.small();
    let mut parts: Vec<Node> = vec![Text::new(&line.designation).bold().into()];

    if let Some(description) = line.description.as_deref().filter(|d| !d.trim().is_empty()) {
        parts.push(Text::new(description).size(small).color(MUTED_COLOR).into());
    }

    if let Some(discount) = line.discount.filter(|d| d.value.is_finite() && d.value != 0.0) {
        let label = match discount.kind {
            DiscountKind::Percent => format!("Remise {}", format_percent(discount.value)),
            DiscountKind::Amount => format!("Remise {}", Money::round2(discount.value)),
        };
        parts.push(Text::new(label).size(small).italics().color(&ctx.palette.accent).into());
    }

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        Node::stack(parts)
    }
}

/// A row whose label spans the middle columns.
///
/// Layout: `[number?] [label ........ span] [amount?]`.
fn annotation_row(
    ctx: &LayoutContext<'_>,
    columns: &[TableColumn],
    kind: RowKind,
    number: Option<String>,
    label: Text,
    amount: Option<Money>,
) -> TableRow {
    let has_numero = columns.first().map(|c| c.key == ColumnKey::Numero).unwrap_or(false);
    let mut cells = Vec::with_capacity(3);
    let mut span = columns.len();

    if has_numero {
        let text = Text::new(number.unwrap_or_default())
            .bold()
            .color(&ctx.palette.primary);
        cells.push(Cell::new(text));
        span -= 1;
    }

    let trailing = amount.map(|a| Cell::new(Text::new(a.to_string()).bold().align(Align::Right)));
    if trailing.is_some() {
        span -= 1;
    }

    let estimated_height = estimate_row_height(&label.text, None, &ctx.metrics);
    cells.push(Cell::spanning(label, span));
    cells.extend(trailing);

    TableRow {
        cells,
        kind,
        estimated_height,
    }
}

fn align_node(node: Node, align: Align) -> Node {
    match node {
        Node::Text(text) if text.style.alignment.is_none() => text.align(align).into(),
        other => other,
    }
}

// =============================================================================
// Native Mode
// =============================================================================

fn header_filled(style: TableStyle) -> bool {
    matches!(style, TableStyle::Striped | TableStyle::Bordered)
}

/// Fill of an annotation row, independent of striping.
fn kind_fill(ctx: &LayoutContext<'_>, kind: RowKind) -> Option<String> {
    if ctx.config.table_style == TableStyle::Minimal {
        return None;
    }
    match kind {
        RowKind::Section => Some(ctx.palette.soft.clone()),
        RowKind::SectionTotal | RowKind::SousTotal => Some(ctx.palette.card.clone()),
        _ => None,
    }
}

/// Rules and fills of the native table, per `tableStyle`.
pub fn native_layout(ctx: &LayoutContext<'_>, rows: &[TableRow], columns: usize) -> TableLayout {
    let m = &ctx.metrics;
    let style = ctx.config.table_style;
    let count = rows.len();
    let mut layout = TableLayout::borderless(count, columns, m.cell_padding, m.cell_padding * 0.6);

    let strong = Rule::new(m.border_width * 2.0, &ctx.palette.primary);
    let light = Rule::new(m.border_width, &ctx.palette.rule);

    match style {
        TableStyle::Striped | TableStyle::Minimal => {
            layout.set_h_line(1, strong.clone());
            layout.set_h_line(count, strong);
        }
        TableStyle::Bordered => {
            for i in 0..=count {
                layout.set_h_line(i, light.clone());
            }
            for j in 0..=columns {
                layout.set_v_line(j, light.clone());
            }
        }
        TableStyle::Horizontal => {
            for i in 1..=count {
                layout.set_h_line(i, light.clone());
            }
            layout.set_h_line(1, strong);
        }
    }

    for (i, row) in rows.iter().enumerate() {
        let fill = match row.kind {
            RowKind::Header if header_filled(style) => Some(ctx.palette.primary.clone()),
            RowKind::Header => None,
            RowKind::Line if style == TableStyle::Striped && i % 2 == 0 => {
                Some(ctx.palette.stripe.clone())
            }
            kind => kind_fill(ctx, kind),
        };
        layout.set_fill(i, fill);
    }

    layout
}

/// All rows as a single table.
pub fn native_table(ctx: &LayoutContext<'_>, rows: Vec<TableRow>) -> Table {
    let columns = table_columns(ctx);
    let layout = native_layout(ctx, &rows, columns.len());
    Table {
        widths: columns.iter().map(|c| c.width).collect(),
        header_rows: 1,
        body: rows.into_iter().map(|r| r.cells).collect(),
        layout,
        dont_break_rows: true,
        margin: Margin::bottom(ctx.metrics.section_spacing),
    }
}

// =============================================================================
// Card Mode
// =============================================================================

fn single_row_table(widths: &[Width], row: TableRow, layout: TableLayout) -> Table {
    Table {
        widths: widths.to_vec(),
        header_rows: 0,
        body: vec![row.cells],
        layout,
        dont_break_rows: true,
        margin: Margin::ZERO,
    }
}

/// Header table followed by one rounded card per line row.
pub fn card_rows(ctx: &LayoutContext<'_>, rows: Vec<TableRow>) -> Node {
    let m = &ctx.metrics;
    let columns = table_columns(ctx);
    let widths: Vec<Width> = columns.iter().map(|c| c.width).collect();
    let width = m.content_width();
    let gap = (m.cell_padding * 0.6).max(2.0);

    let mut children = Vec::with_capacity(rows.len());
    let mut line_index = 0usize;

    for row in rows {
        let mut layout =
            TableLayout::borderless(1, widths.len(), m.cell_padding, m.cell_padding * 0.6);

        if row.kind.is_card() {
            let height = row.estimated_height;
            let fill = if line_index % 2 == 1 {
                ctx.palette.stripe.clone()
            } else {
                ctx.palette.card.clone()
            };
            line_index += 1;

            let shape = Node::canvas(vec![Shape::Rect {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
                r: m.border_radius,
                color: Some(fill),
                line_color: Some(ctx.palette.rule.clone()),
                line_width: m.border_width,
            }]);
            let content = Node::Table(single_row_table(&widths, row, layout));
            let block = Block {
                shape: Some(shape),
                content,
                width,
                height,
            };
            children.push(block.into_node().unbreakable().with_margin(Margin::bottom(gap)));
        } else {
            let fill = match row.kind {
                RowKind::Header if header_filled(ctx.config.table_style) => {
                    Some(ctx.palette.primary.clone())
                }
                kind => kind_fill(ctx, kind),
            };
            layout.set_fill(0, fill);
            if row.kind == RowKind::Header {
                layout.set_h_line(1, Rule::new(m.border_width * 2.0, &ctx.palette.primary));
            }
            let table = single_row_table(&widths, row, layout);
            children.push(Node::Table(table).with_margin(Margin::bottom(gap)));
        }
    }

    Node::stack(children).with_margin(Margin::bottom(m.section_spacing))
}

/// The body table in the configured mode.
pub fn build_table(ctx: &LayoutContext<'_>) -> Node {
    let rows = build_rows(ctx);
    tracing::debug!(
        rows = rows.len(),
        cards = ctx.config.rounded_row_borders,
        style = %ctx.config.table_style,
        "Building line item table"
    );
    if ctx.config.rounded_row_borders {
        card_rows(ctx, rows)
    } else {
        Node::Table(native_table(ctx, rows))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::tests::{context_for, sample_document};
    use ardoise_core::appearance::{resolve, AppearanceConfig, AppearanceOverrides};
    use ardoise_core::types::{Discount, Document, DocumentKind};

    fn line(designation: &str, price: f64) -> LineItem {
        LineItem::from(BillableLine::new(designation, 1.0, price).with_tax_rate(20.0))
    }

    fn two_sections(kind: DocumentKind) -> Document {
        let mut document = sample_document(kind);
        document.line_items = vec![
            LineItem::section("A"),
            line("Dalle", 100.0),
            LineItem::section("B"),
            line("Peinture", 50.0),
        ];
        document
    }

    fn kinds(rows: &[TableRow]) -> Vec<RowKind> {
        rows.iter().map(|r| r.kind).collect()
    }

    fn config(kind: DocumentKind, json: &str) -> AppearanceConfig {
        let overrides: AppearanceOverrides = serde_json::from_str(json).unwrap();
        resolve(kind, &overrides)
    }

    #[test]
    fn test_section_rollups_follow_last_line() {
        let document = two_sections(DocumentKind::Invoice);
        let config = config(document.kind, "{}");
        let rows = build_rows(&context_for(&document, &config));

        assert_eq!(
            kinds(&rows),
            vec![
                RowKind::Header,
                RowKind::Section,
                RowKind::Line,
                RowKind::SectionTotal,
                RowKind::Section,
                RowKind::Line,
                RowKind::SectionTotal,
            ]
        );
        let last = |row: &TableRow| row.cells.last().unwrap().content.plain_text();
        assert_eq!(last(&rows[3]), "100,00 €");
        assert_eq!(last(&rows[6]), "50,00 €");
    }

    #[test]
    fn test_quotes_skip_rollups_by_default() {
        let document = two_sections(DocumentKind::Quote);
        let config = config(document.kind, "{}");
        let rows = build_rows(&context_for(&document, &config));
        assert!(!kinds(&rows).contains(&RowKind::SectionTotal));
    }

    #[test]
    fn test_subtotal_marker_row() {
        let mut document = sample_document(DocumentKind::Quote);
        document.line_items = vec![
            line("Dépose", 40.0),
            line("Pose", 60.0),
            LineItem::SubtotalMarker { label: Some("Total lot 1".into()) },
            LineItem::Text { label: "Hors fournitures".into() },
        ];
        let config = config(document.kind, "{}");
        let rows = build_rows(&context_for(&document, &config));

        assert_eq!(rows[3].kind, RowKind::SousTotal);
        assert_eq!(rows[3].cells.last().unwrap().content.plain_text(), "100,00 €");
        assert!(rows[3].cells.iter().any(|c| c.content.plain_text() == "Total lot 1"));
        assert_eq!(rows[4].kind, RowKind::Texte);
    }

    #[test]
    fn test_line_row_contents() {
        let mut document = sample_document(DocumentKind::Invoice);
        document.line_items = vec![LineItem::from(
            BillableLine::new("Carrelage", 1.5, 40.0)
                .with_tax_rate(10.0)
                .with_discount(Discount::percent(10.0)),
        )];
        let config = config(document.kind, "{}");
        let rows = build_rows(&context_for(&document, &config));
        let text = rows[1].cells.iter().map(|c| c.content.plain_text()).collect::<Vec<_>>();

        assert_eq!(text[0], "1");
        assert_eq!(text[1], "Carrelage Remise 10 %");
        assert_eq!(text[2], "1,5");
        assert_eq!(text[3], "40,00 €");
        assert_eq!(text[4], "10 %");
        assert_eq!(text[5], "54,00 €");
    }

    #[test]
    fn test_column_visibility() {
        let document = sample_document(DocumentKind::Quote);
        let config = config(
            document.kind,
            r#"{"columns": {"showUnite": true, "showTva": false, "showNumero": false}}"#,
        );
        let ctx = context_for(&document, &config);
        let labels: Vec<&str> = table_columns(&ctx).iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Désignation", "Qté", "Unité", "P.U. HT", "Total HT"]);
    }

    #[test]
    fn test_rows_cover_every_column() {
        for json in [r#"{}"#, r#"{"columns": {"showNumero": false}}"#] {
            let mut document = two_sections(DocumentKind::Invoice);
            document.line_items.push(LineItem::SubtotalMarker { label: None });
            document.line_items.push(LineItem::Header { label: "Options".into() });
            let config = config(document.kind, json);
            let ctx = context_for(&document, &config);
            let table = native_table(&ctx, build_rows(&ctx));
            assert!(table.is_rectangular());
        }
    }

    #[test]
    fn test_row_height_estimate() {
        let metrics = Metrics::from_config(&AppearanceConfig::default());
        assert_eq!(estimate_row_height("Pose", None, &metrics), metrics.base_row_height);

        let designation = "x".repeat(90);
        let description = "y".repeat(61);
        // 2 + 2 lines × (10 + 3) + 2 × 5 padding
        assert_eq!(estimate_row_height(&designation, Some(&description), &metrics), 62.0);
    }

    #[test]
    fn test_striped_layout() {
        let mut document = sample_document(DocumentKind::Quote);
        document.line_items = vec![line("a", 1.0), line("b", 1.0), line("c", 1.0)];
        let config = config(document.kind, r#"{"tableStyle": "striped"}"#);
        let ctx = context_for(&document, &config);
        let table = native_table(&ctx, build_rows(&ctx));
        let layout = &table.layout;

        assert_eq!(layout.fill_color(0), Some(ctx.palette.primary.as_str()));
        assert_eq!(layout.fill_color(1), None);
        assert_eq!(layout.fill_color(2), Some(ctx.palette.stripe.as_str()));
        assert_eq!(layout.fill_color(3), None);
        let drawn: Vec<usize> = (0..=4).filter(|i| layout.h_line_width(*i) > 0.0).collect();
        assert_eq!(drawn, vec![1, 4]);
        assert!((0..=table.widths.len()).all(|j| layout.v_line_width(j) == 0.0));
    }

    #[test]
    fn test_bordered_and_minimal_layouts() {
        let mut document = sample_document(DocumentKind::Quote);
        document.line_items = vec![line("a", 1.0), line("b", 1.0)];

        let bordered = config(document.kind, r#"{"tableStyle": "bordered"}"#);
        let ctx = context_for(&document, &bordered);
        let table = native_table(&ctx, build_rows(&ctx));
        assert!((0..=3).all(|i| table.layout.h_line_width(i) > 0.0));
        assert!((0..=table.widths.len()).all(|j| table.layout.v_line_width(j) > 0.0));

        let minimal = config(document.kind, r#"{"tableStyle": "minimal"}"#);
        let ctx = context_for(&document, &minimal);
        let table = native_table(&ctx, build_rows(&ctx));
        let drawn: Vec<usize> = (0..=3).filter(|i| table.layout.h_line_width(*i) > 0.0).collect();
        assert_eq!(drawn, vec![1, 3]);
        assert!(table.layout.fills.iter().all(Option::is_none));

        let horizontal = config(document.kind, r#"{"tableStyle": "horizontal"}"#);
        let ctx = context_for(&document, &horizontal);
        let table = native_table(&ctx, build_rows(&ctx));
        let drawn: Vec<usize> = (0..=3).filter(|i| table.layout.h_line_width(*i) > 0.0).collect();
        assert_eq!(drawn, vec![1, 2, 3]);
    }

    #[test]
    fn test_card_mode_overlays_rows() {
        let mut document = two_sections(DocumentKind::Invoice);
        document.line_items[1] = LineItem::from(
            BillableLine::new("x".repeat(100), 1.0, 100.0).with_tax_rate(20.0),
        );
        let config = config(document.kind, r#"{"roundedRowBorders": true}"#);
        let ctx = context_for(&document, &config);
        let rows = build_rows(&ctx);
        let expected_height = rows[2].estimated_height;

        let Node::Table(_) = &ctx_node_child(card_rows(&ctx, rows.clone()), 0) else {
            panic!("header stays a table");
        };
        let Node::Stack(card) = ctx_node_child(card_rows(&ctx, rows.clone()), 2) else {
            panic!("line rows become cards");
        };
        assert!(card.unbreakable);
        let Node::Canvas(canvas) = &card.stack[0] else {
            panic!("backdrop first");
        };
        let Shape::Rect { h, r, .. } = &canvas.canvas[0] else {
            panic!("rounded rect");
        };
        assert_eq!(*h, expected_height);
        assert_eq!(*r, ctx.metrics.border_radius);
        assert_eq!(card.stack[1].margin().top, -expected_height);

        // section rows stay zero-border tables
        let Node::Table(section) = ctx_node_child(card_rows(&ctx, rows), 1) else {
            panic!("annotation rows stay tables");
        };
        assert!(section.layout.h_lines.iter().all(|r| !r.is_visible()));
    }

    fn ctx_node_child(node: Node, index: usize) -> Node {
        match node {
            Node::Stack(stack) => stack.stack[index].clone(),
            other => panic!("expected stack, got {:?}", other),
        }
    }
}
