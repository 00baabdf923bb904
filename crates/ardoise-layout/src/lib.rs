//! # ardoise-layout: Layout Synthesis for Ardoise
//!
//! Turns a prepared document into a renderer-agnostic layout description
//! and hands it to a [`Renderer`].
//!
//! ## Module Structure
//! ```text
//! ardoise-layout/
//! ├── node.rs         ← Layout tree primitives (stack, columns, table, canvas)
//! ├── style.rs        ← Metrics and palette derived from AppearanceConfig
//! ├── header.rs       ← Classic / modern / minimal / ultra headers
//! ├── table.rs        ← Line item table, native or card rows
//! ├── cards.rs        ← Totals, payment, notes, signature; preset placement
//! ├── decorations.rs  ← Watermark and page border
//! ├── footer.rs       ← Per-page identity line and page numbers
//! ├── synthesizer.rs  ← Assembles the LayoutDocument
//! ├── pipeline.rs     ← prepare → synthesize → render
//! ├── renderer.rs     ← Async renderer boundary, JSON backend
//! ├── config.rs       ← Profile file and environment overrides
//! └── error.rs        ← RenderError
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use ardoise_layout::{render_document, JsonRenderer, RenderConfig};
//!
//! let config = RenderConfig::load_or_default(None);
//! let renderer = JsonRenderer::new(config.output.pretty);
//! let bytes = render_document(document, &config.appearance, &renderer).await?;
//! ```

pub mod cards;
pub mod config;
pub mod decorations;
pub mod error;
pub mod footer;
pub mod header;
pub mod node;
pub mod pipeline;
pub mod renderer;
pub mod style;
pub mod synthesizer;
pub mod table;

pub use config::{ConfigError, ConfigResult, OutputSettings, RenderConfig};
pub use error::{RenderError, RenderResult};
pub use node::Node;
pub use pipeline::{prepare, render_document, synthesize, PreparedDocument};
pub use renderer::{JsonRenderer, Renderer};
pub use synthesizer::{synthesize_layout, LayoutContext, LayoutDocument};
