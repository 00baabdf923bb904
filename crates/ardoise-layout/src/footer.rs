//! Per-page footer template.
//!
//! The renderer draws the footer once per page and substitutes
//! `{current}` and `{total}` in the page number template.

use serde::Serialize;

use crate::style::MUTED_COLOR;
use crate::synthesizer::LayoutContext;

pub const PAGE_NUMBER_TEMPLATE: &str = "Page {current} / {total}";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterTemplate {
    /// Company identity, centered; absent when the footer is hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Right-aligned page counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_numbers: Option<String>,
    pub font_size: f64,
    pub color: String,
}

impl FooterTemplate {
    /// Resolves the page number text for one page.
    pub fn page_label(&self, current: usize, total: usize) -> Option<String> {
        self.page_numbers.as_ref().map(|t| {
            t.replace("{current}", &current.to_string())
                .replace("{total}", &total.to_string())
        })
    }
}

/// `name · legal form · address · SIRET · VAT · email · phone · website`,
/// skipping hidden and empty fields.
pub fn identity_line(ctx: &LayoutContext<'_>) -> String {
    let issuer = &ctx.document.issuer;
    let hide = &ctx.config.hide;

    let mut parts: Vec<String> = vec![issuer.name.clone()];
    if !hide.legal_form {
        parts.extend(issuer.legal_form.clone());
    }
    if !hide.address {
        let address = [issuer.address.clone(), issuer.locality()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(address);
    }
    if !hide.siret {
        parts.extend(issuer.siret.as_ref().map(|s| format!("SIRET {}", s)));
    }
    if !hide.vat_number {
        parts.extend(issuer.vat_number.as_ref().map(|s| format!("TVA {}", s)));
    }
    if !hide.email {
        parts.extend(issuer.email.clone());
    }
    if !hide.phone {
        parts.extend(issuer.phone.clone());
    }
    if !hide.website {
        parts.extend(issuer.website.clone());
    }

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

/// The footer, or `None` when neither identity nor page numbers are shown.
pub fn footer(ctx: &LayoutContext<'_>) -> Option<FooterTemplate> {
    let identity = if ctx.config.show_footer {
        Some(identity_line(ctx)).filter(|s| !s.is_empty())
    } else {
        None
    };
    let page_numbers = ctx
        .config
        .show_page_numbers
        .then(|| PAGE_NUMBER_TEMPLATE.to_string());

    if identity.is_none() && page_numbers.is_none() {
        return None;
    }

    Some(FooterTemplate {
        identity,
        page_numbers,
        font_size: (ctx.metrics.font_size - 2.5).max(6.0),
        color: MUTED_COLOR.to_string(),
    })
}
