//! # Renderer Boundary
//!
//! The only asynchronous seam of the engine: submit a layout description,
//! await bytes or a failure. Backends own pagination and font handling.
//!
//! ```text
//!   LayoutDocument ──► Renderer::render ──► Vec<u8> (PDF, JSON, ...)
//!                              │
//!                              └──► RenderError::Backend (not retried)
//! ```

use async_trait::async_trait;

use crate::error::RenderResult;
use crate::synthesizer::LayoutDocument;

/// A rendering backend.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders one document. Cancellation belongs to the caller.
    async fn render(&self, layout: &LayoutDocument) -> RenderResult<Vec<u8>>;

    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;
}

/// Emits the layout description itself as JSON.
///
/// Used as the reference backend by the CLI and by tests; a PDF service can
/// consume this output directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        JsonRenderer { pretty }
    }
}

#[async_trait]
impl Renderer for JsonRenderer {
    async fn render(&self, layout: &LayoutDocument) -> RenderResult<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(layout)?
        } else {
            serde_json::to_vec(layout)?
        };
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::synthesize_layout;
    use crate::synthesizer::tests::sample_document;
    use ardoise_core::appearance::{resolve, AppearanceOverrides};
    use ardoise_core::types::DocumentKind;

    #[tokio::test]
    async fn test_json_renderer_output() {
        let document = sample_document(DocumentKind::Invoice);
        let config = resolve(document.kind, &AppearanceOverrides::default());
        let layout = synthesize_layout(&document, &config);

        let compact = JsonRenderer::new(false).render(&layout).await.unwrap();
        let pretty = JsonRenderer::new(true).render(&layout).await.unwrap();
        assert!(pretty.len() > compact.len());

        let value: serde_json::Value = serde_json::from_slice(&compact).unwrap();
        assert_eq!(value["info"]["title"], "Facture D-2024-001");
        assert_eq!(JsonRenderer::default().content_type(), "application/json");
    }
}
