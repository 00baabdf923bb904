//! # Layout Nodes
//!
//! The renderer-agnostic description tree. A backend walks it once and
//! decides pagination, line breaking and glyph placement on its own.
//!
//! ## Node Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stack     vertical flow of children                                    │
//! │  Columns   horizontal split, each column Fixed(pt) | Star | Auto        │
//! │  Table     fixed column widths, header row count, per-row rules/fills  │
//! │  Canvas    absolutely positioned rect/line shapes (optional radius)     │
//! │  Text      one styled run                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every node carries a `margin`; a negative top margin pulls the node over
//! the previous sibling, which is how rounded backdrops are layered under
//! content (the target primitive has no per-row corner radius).

use serde::{Serialize, Serializer};

// =============================================================================
// Geometry
// =============================================================================

/// Four-sided margin in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Margin {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn all(value: f64) -> Self {
        Margin::new(value, value, value, value)
    }

    pub const fn top(value: f64) -> Self {
        Margin::new(0.0, value, 0.0, 0.0)
    }

    pub const fn bottom(value: f64) -> Self {
        Margin::new(0.0, 0.0, 0.0, value)
    }

    pub fn is_zero(&self) -> bool {
        *self == Margin::ZERO
    }
}

/// A column or table column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    /// Points.
    Fixed(f64),
    /// Takes a share of the remaining space.
    Star,
    /// Sized to content.
    Auto,
}

/// Serialized as `120.0`, `"*"` or `"auto"`.
impl Serialize for Width {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Width::Fixed(w) => serializer.serialize_f64(*w),
            Width::Star => serializer.serialize_str("*"),
            Width::Auto => serializer.serialize_str("auto"),
        }
    }
}

// =============================================================================
// Text
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Styling of a text run; unset fields inherit from the document default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italics: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Align>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Margin::is_zero")]
    pub margin: Margin,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            style: TextStyle::default(),
            margin: Margin::ZERO,
        }
    }

    pub fn size(mut self, font_size: f64) -> Self {
        self.style.font_size = Some(font_size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn italics(mut self) -> Self {
        self.style.italics = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    pub fn align(mut self, alignment: Align) -> Self {
        self.style.alignment = Some(alignment);
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }
}

// =============================================================================
// Containers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub stack: Vec<Node>,
    #[serde(skip_serializing_if = "Margin::is_zero")]
    pub margin: Margin,
    /// Keep the whole stack on one page.
    #[serde(skip_serializing_if = "is_false")]
    pub unbreakable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub width: Width,
    pub content: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    pub columns: Vec<Column>,
    pub column_gap: f64,
    #[serde(skip_serializing_if = "Margin::is_zero")]
    pub margin: Margin,
}

// =============================================================================
// Tables
// =============================================================================

/// One border segment; width zero draws nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub width: f64,
    pub color: String,
}

impl Rule {
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Rule {
            width,
            color: color.into(),
        }
    }

    pub fn none() -> Self {
        Rule {
            width: 0.0,
            color: String::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

/// Per-row and per-column border and fill lookups.
///
/// `h_lines[i]` is the rule above row `i` (`h_lines[rows]` closes the
/// table); `v_lines[j]` is the rule left of column `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout {
    pub h_lines: Vec<Rule>,
    pub v_lines: Vec<Rule>,
    pub fills: Vec<Option<String>>,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl TableLayout {
    /// A layout without any rule or fill.
    pub fn borderless(rows: usize, columns: usize, padding_x: f64, padding_y: f64) -> Self {
        TableLayout {
            h_lines: vec![Rule::none(); rows + 1],
            v_lines: vec![Rule::none(); columns + 1],
            fills: vec![None; rows],
            padding_x,
            padding_y,
        }
    }

    /// Width of the horizontal rule above row `index`, zero when absent.
    pub fn h_line_width(&self, index: usize) -> f64 {
        self.h_lines.get(index).map(|r| r.width).unwrap_or(0.0)
    }

    /// Width of the vertical rule left of column `index`, zero when absent.
    pub fn v_line_width(&self, index: usize) -> f64 {
        self.v_lines.get(index).map(|r| r.width).unwrap_or(0.0)
    }

    /// Fill of row `index`.
    pub fn fill_color(&self, index: usize) -> Option<&str> {
        self.fills.get(index).and_then(|f| f.as_deref())
    }

    /// Sets the rule above row `index` (ignored when out of range).
    pub fn set_h_line(&mut self, index: usize, rule: Rule) {
        if let Some(slot) = self.h_lines.get_mut(index) {
            *slot = rule;
        }
    }

    /// Sets the rule left of column `index` (ignored when out of range).
    pub fn set_v_line(&mut self, index: usize, rule: Rule) {
        if let Some(slot) = self.v_lines.get_mut(index) {
            *slot = rule;
        }
    }

    /// Sets the fill of row `index` (ignored when out of range).
    pub fn set_fill(&mut self, index: usize, fill: Option<String>) {
        if let Some(slot) = self.fills.get_mut(index) {
            *slot = fill;
        }
    }
}

fn is_one(value: &usize) -> bool {
    *value == 1
}

/// A table cell; spanning cells cover `col_span` columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub content: Node,
    #[serde(skip_serializing_if = "is_one")]
    pub col_span: usize,
}

impl Cell {
    pub fn new(content: impl Into<Node>) -> Self {
        Cell {
            content: content.into(),
            col_span: 1,
        }
    }

    pub fn spanning(content: impl Into<Node>, col_span: usize) -> Self {
        Cell {
            content: content.into(),
            col_span: col_span.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub widths: Vec<Width>,
    pub header_rows: usize,
    pub body: Vec<Vec<Cell>>,
    pub layout: TableLayout,
    #[serde(skip_serializing_if = "is_false")]
    pub dont_break_rows: bool,
    #[serde(skip_serializing_if = "Margin::is_zero")]
    pub margin: Margin,
}

impl Table {
    /// Checks that every row covers exactly the declared columns.
    pub fn is_rectangular(&self) -> bool {
        self.body
            .iter()
            .all(|row| row.iter().map(|c| c.col_span).sum::<usize>() == self.widths.len())
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// An absolutely positioned shape, relative to the canvas origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        /// Corner radius.
        r: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        line_color: Option<String>,
        line_width: f64,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        line_width: f64,
        line_color: String,
    },
}

impl Shape {
    /// A filled rectangle without outline.
    pub fn filled_rect(w: f64, h: f64, r: f64, color: impl Into<String>) -> Self {
        Shape::Rect {
            x: 0.0,
            y: 0.0,
            w,
            h,
            r,
            color: Some(color.into()),
            line_color: None,
            line_width: 0.0,
        }
    }

    /// A horizontal rule starting at the origin.
    pub fn h_rule(length: f64, line_width: f64, color: impl Into<String>) -> Self {
        Shape::Line {
            x1: 0.0,
            y1: 0.0,
            x2: length,
            y2: 0.0,
            line_width,
            line_color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    pub canvas: Vec<Shape>,
    #[serde(skip_serializing_if = "Margin::is_zero")]
    pub margin: Margin,
}

// =============================================================================
// Node
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Stack(Stack),
    Columns(Columns),
    Table(Table),
    Canvas(Canvas),
    Text(Text),
}

impl Node {
    pub fn stack(children: Vec<Node>) -> Node {
        Node::Stack(Stack {
            stack: children,
            margin: Margin::ZERO,
            unbreakable: false,
        })
    }

    pub fn columns(columns: Vec<Column>, column_gap: f64) -> Node {
        Node::Columns(Columns {
            columns,
            column_gap,
            margin: Margin::ZERO,
        })
    }

    pub fn canvas(shapes: Vec<Shape>) -> Node {
        Node::Canvas(Canvas {
            canvas: shapes,
            margin: Margin::ZERO,
        })
    }

    /// An empty text run, used as a column spacer.
    pub fn empty() -> Node {
        Node::Text(Text::new(""))
    }

    /// Replaces this node's margin.
    pub fn with_margin(mut self, margin: Margin) -> Node {
        *self.margin_mut() = margin;
        self
    }

    /// Marks a stack unbreakable; other nodes are wrapped first.
    pub fn unbreakable(self) -> Node {
        match self {
            Node::Stack(mut stack) => {
                stack.unbreakable = true;
                Node::Stack(stack)
            }
            other => Node::Stack(Stack {
                stack: vec![other],
                margin: Margin::ZERO,
                unbreakable: true,
            }),
        }
    }

    pub fn margin(&self) -> Margin {
        match self {
            Node::Stack(n) => n.margin,
            Node::Columns(n) => n.margin,
            Node::Table(n) => n.margin,
            Node::Canvas(n) => n.margin,
            Node::Text(n) => n.margin,
        }
    }

    fn margin_mut(&mut self) -> &mut Margin {
        match self {
            Node::Stack(n) => &mut n.margin,
            Node::Columns(n) => &mut n.margin,
            Node::Table(n) => &mut n.margin,
            Node::Canvas(n) => &mut n.margin,
            Node::Text(n) => &mut n.margin,
        }
    }

    /// Concatenates every text run below this node, space separated.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text(t) if !t.text.is_empty() => out.push(&t.text),
            Node::Text(_) | Node::Canvas(_) => {}
            Node::Stack(s) => s.stack.iter().for_each(|n| n.collect_text(out)),
            Node::Columns(c) => c.columns.iter().for_each(|col| col.content.collect_text(out)),
            Node::Table(t) => t
                .body
                .iter()
                .flatten()
                .for_each(|cell| cell.content.collect_text(out)),
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// A visual builder's output: optional backdrop shape, content, and the
/// dimensions the backdrop was drawn for.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub shape: Option<Node>,
    pub content: Node,
    pub width: f64,
    pub height: f64,
}

impl Block {
    /// Content only, no backdrop.
    pub fn plain(content: Node, width: f64, height: f64) -> Self {
        Block {
            shape: None,
            content,
            width,
            height,
        }
    }

    /// Layers the content over the backdrop with a negative top margin.
    pub fn into_node(self) -> Node {
        match self.shape {
            None => self.content,
            Some(shape) => {
                let margin = self.content.margin();
                let content = self.content.with_margin(Margin {
                    top: margin.top - self.height,
                    ..margin
                });
                Node::stack(vec![shape, content])
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_width_serialization() {
        let widths = vec![Width::Fixed(40.0), Width::Star, Width::Auto];
        assert_eq!(serde_json::to_value(&widths).unwrap(), json!([40.0, "*", "auto"]));
    }

    #[test]
    fn test_text_serialization_skips_defaults() {
        let node = Node::from(Text::new("Total").bold().align(Align::Right));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"node": "text", "text": "Total", "bold": true, "alignment": "right"})
        );
    }

    #[test]
    fn test_shape_serialization() {
        let shape = Shape::filled_rect(100.0, 20.0, 4.0, "#ffffff");
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["type"], "rect");
        assert_eq!(value["r"], 4.0);
        assert_eq!(value["lineWidth"], 0.0);
        assert!(value.get("lineColor").is_none());
    }

    #[test]
    fn test_layout_lookups_by_index() {
        let mut layout = TableLayout::borderless(3, 2, 5.0, 4.0);
        layout.set_h_line(1, Rule::new(1.0, "#000000"));
        layout.set_fill(2, Some("#eeeeee".into()));
        layout.set_fill(9, Some("#ignored".into()));

        assert_eq!(layout.h_lines.len(), 4);
        assert_eq!(layout.v_lines.len(), 3);
        assert_eq!(layout.h_line_width(1), 1.0);
        assert_eq!(layout.h_line_width(0), 0.0);
        assert_eq!(layout.h_line_width(42), 0.0);
        assert_eq!(layout.fill_color(2), Some("#eeeeee"));
        assert_eq!(layout.fill_color(0), None);
    }

    #[test]
    fn test_block_overlay_uses_negative_margin() {
        let block = Block {
            shape: Some(Node::canvas(vec![Shape::filled_rect(200.0, 60.0, 6.0, "#1d4ed8")])),
            content: Node::from(Text::new("Devis").margin(Margin::new(10.0, 8.0, 0.0, 0.0))),
            width: 200.0,
            height: 60.0,
        };
        let Node::Stack(stack) = block.into_node() else {
            panic!("expected a stack");
        };
        assert_eq!(stack.stack.len(), 2);
        assert_eq!(stack.stack[1].margin(), Margin::new(10.0, -52.0, 0.0, 0.0));
    }

    #[test]
    fn test_plain_text_walks_tree() {
        let node = Node::stack(vec![
            Text::new("A").into(),
            Node::columns(
                vec![
                    Column { width: Width::Star, content: Text::new("B").into() },
                    Column { width: Width::Auto, content: Node::empty() },
                ],
                10.0,
            ),
        ]);
        assert_eq!(node.plain_text(), "A B");
    }

    #[test]
    fn test_rectangular_table() {
        let table = Table {
            widths: vec![Width::Star, Width::Fixed(50.0)],
            header_rows: 0,
            body: vec![
                vec![Cell::new(Text::new("a")), Cell::new(Text::new("b"))],
                vec![Cell::spanning(Text::new("wide"), 2)],
            ],
            layout: TableLayout::borderless(2, 2, 0.0, 0.0),
            dont_break_rows: false,
            margin: Margin::ZERO,
        };
        assert!(table.is_rectangular());
    }
}
