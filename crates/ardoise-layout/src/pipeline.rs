//! # Render Pipeline
//!
//! Preview entry point: one document in, rendered bytes out.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          render_document                                │
//! │                                                                         │
//! │  Document ──► prepare ──────────────► synthesize ──► Renderer::render   │
//! │               │ validate line items     (pure)        (only await)      │
//! │               │ recompute totals                                        │
//! │               │ resolve appearance                                      │
//! │               ▼                                                         │
//! │          CoreError (stops here, renderer never called)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every invocation runs inside its own `render` span carrying a fresh
//! request id, so concurrent renders can be told apart in the logs.

use ardoise_core::accounting::{apply_retention, compute_totals};
use ardoise_core::appearance::{resolve, AppearanceConfig, AppearanceOverrides};
use ardoise_core::types::Document;
use ardoise_core::validation::validate_line_items;
use ardoise_core::{CoreError, CoreResult};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::error::RenderResult;
use crate::renderer::Renderer;
use crate::synthesizer::{synthesize_layout, LayoutDocument};

/// A validated document with final totals and its resolved appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDocument {
    pub document: Document,
    pub appearance: AppearanceConfig,
}

/// Validates `document`, settles its totals and resolves its appearance.
///
/// `profile` is the installation-wide override layer; the document's own
/// `appearance` sits on top of it. Stored totals are trusted unless
/// `total_excl_tax` is zero, in which case they are recomputed from the
/// line items (retention included).
pub fn prepare(mut document: Document, profile: &AppearanceOverrides) -> CoreResult<PreparedDocument> {
    validate_line_items(&document.line_items)?;

    let retention = document.retention();
    if retention.is_negative() {
        return Err(CoreError::InvalidDocument {
            reason: format!("retention amount cannot be negative ({})", retention),
        });
    }

    if document.totals.total_excl_tax.is_zero() && !document.line_items.is_empty() {
        let totals = compute_totals(
            &document.line_items,
            document.global_discount.as_ref(),
            document.tax_applicable,
        );
        document.totals = apply_retention(totals, retention);
        debug!(
            total_excl_tax = %document.totals.total_excl_tax,
            net_payable = %document.totals.net_payable,
            "Recomputed totals"
        );
    }

    let appearance = resolve(document.kind, &document.appearance.layered_over(profile));
    Ok(PreparedDocument {
        document,
        appearance,
    })
}

/// Builds the layout description of a prepared document.
pub fn synthesize(prepared: &PreparedDocument) -> LayoutDocument {
    synthesize_layout(&prepared.document, &prepared.appearance)
}

/// Runs the whole pipeline and hands the layout to `renderer`.
///
/// Renderer failures are returned unchanged; nothing is retried.
pub async fn render_document<R>(
    document: Document,
    profile: &AppearanceOverrides,
    renderer: &R,
) -> RenderResult<Vec<u8>>
where
    R: Renderer + ?Sized,
{
    let request_id = Uuid::new_v4();
    let span = info_span!("render", request_id = %request_id);

    async move {
        info!(kind = %document.kind, number = %document.number, "Render started");

        let prepared = prepare(document, profile)?;
        let layout = synthesize(&prepared);
        let bytes = renderer.render(&layout).await?;

        info!(
            bytes = bytes.len(),
            content_type = renderer.content_type(),
            "Render finished"
        );
        Ok(bytes)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::renderer::JsonRenderer;
    use crate::synthesizer::tests::sample_document;
    use ardoise_core::appearance::LayoutPreset;
    use ardoise_core::money::Money;
    use ardoise_core::types::{DocumentKind, LineItem};
    use ardoise_core::ValidationError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and always fails.
    #[derive(Default)]
    struct FailingRenderer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Renderer for FailingRenderer {
        async fn render(&self, _layout: &LayoutDocument) -> RenderResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RenderError::Backend("printer on fire".into()))
        }

        fn content_type(&self) -> &'static str {
            "application/pdf"
        }
    }

    #[test]
    fn test_prepare_recomputes_zero_totals() {
        let mut document = sample_document(DocumentKind::Invoice);
        document.retention_amount = Some(Money::from_cents(1500));

        let prepared = prepare(document, &AppearanceOverrides::default()).unwrap();
        let totals = prepared.document.totals;
        assert_eq!(totals.total_excl_tax, Money::from_cents(25000));
        assert_eq!(totals.total_tax, Money::from_cents(5000));
        assert_eq!(totals.total_incl_tax, Money::from_cents(30000));
        assert_eq!(totals.net_payable, Money::from_cents(28500));
    }

    #[test]
    fn test_prepare_keeps_stored_totals() {
        let mut document = sample_document(DocumentKind::Invoice);
        document.totals.total_excl_tax = Money::from_cents(99);
        document.totals.net_payable = Money::from_cents(42);

        let prepared = prepare(document, &AppearanceOverrides::default()).unwrap();
        assert_eq!(prepared.document.totals.total_excl_tax, Money::from_cents(99));
        assert_eq!(prepared.document.totals.net_payable, Money::from_cents(42));
    }

    #[test]
    fn test_prepare_rejects_invalid_lines() {
        let mut document = sample_document(DocumentKind::Quote);
        document.line_items = vec![LineItem::section("Lot 1")];

        let err = prepare(document, &AppearanceOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NoBillableLines)
        ));
    }

    #[test]
    fn test_prepare_rejects_negative_retention() {
        let mut document = sample_document(DocumentKind::Invoice);
        document.retention_amount = Some(Money::from_cents(-100));

        let err = prepare(document, &AppearanceOverrides::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDocument { .. }));
    }

    #[test]
    fn test_document_layer_beats_profile() {
        let mut document = sample_document(DocumentKind::Quote);
        document.appearance.primary_color = Some("#123456".into());

        let profile = AppearanceOverrides {
            primary_color: Some("#abcdef".into()),
            layout_preset: Some(LayoutPreset::CenteredStack),
            ..Default::default()
        };
        let prepared = prepare(document, &profile).unwrap();
        assert_eq!(prepared.appearance.primary_color, "#123456");
        assert_eq!(prepared.appearance.layout_preset, LayoutPreset::CenteredStack);
        // kind table still applies below the profile
        assert_eq!(prepared.appearance.border_radius, 6.0);
    }

    #[tokio::test]
    async fn test_render_document_json() {
        let document = sample_document(DocumentKind::CreditNote);
        let bytes = render_document(document, &AppearanceOverrides::default(), &JsonRenderer::default())
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["page"]["size"], "A4");
        assert_eq!(value["content"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let renderer = FailingRenderer::default();
        let document = sample_document(DocumentKind::Invoice);

        let err = render_document(document, &AppearanceOverrides::default(), &renderer)
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Backend(ref msg) if msg == "printer on fire"));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_renderer() {
        let renderer = FailingRenderer::default();
        let mut document = sample_document(DocumentKind::Invoice);
        document.line_items.push(LineItem::Unknown);

        let err = render_document(document, &AppearanceOverrides::default(), &renderer)
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::UnknownLineKind { line: 3 }));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }
}
