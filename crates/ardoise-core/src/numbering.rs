//! # Numbering & Subtotal Resolver
//!
//! Assigns hierarchical display numbers and section tags in a single
//! left-to-right walk, and computes running section subtotals.
//!
//! ## Numbering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Entry               Number    Section tag    Counters                  │
//! │  ─────────────────   ───────   ────────────   ────────────────────────  │
//! │  Line                "1"       none           line = 1                  │
//! │  Line                "2"       none           line = 2                  │
//! │  Section "Gros œuvre" "1"      section-1      section = 1, line = 0     │
//! │  Line                "1.1"     section-1      line = 1                  │
//! │  Text                ""        section-1      (unchanged)               │
//! │  Line                "1.2"     section-1      line = 2                  │
//! │  Section "Finitions"  "2"      section-2      section = 2, line = 0     │
//! │  Line                "2.1"     section-2      line = 1                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sections never close: once a section is open, every following line
//! belongs to some section.

use crate::accounting::line_total;
use crate::money::Money;
use crate::types::LineItem;

/// A line item annotated with its display number and section tag.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedItem<'a> {
    pub item: &'a LineItem,
    /// Display number; empty for display-only kinds.
    pub number: String,
    /// Tag of the enclosing section (for sections: their own tag).
    pub section: Option<String>,
}

/// An end-of-section subtotal to insert after `after_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRollup {
    /// Index (in the original item list) of the section's last billable line.
    pub after_index: usize,
    pub section: String,
    pub label: String,
    pub amount: Money,
}

/// Walks the body once and annotates every entry.
pub fn number_items(items: &[LineItem]) -> Vec<NumberedItem<'_>> {
    let mut section_counter = 0usize;
    let mut line_counter = 0usize;
    let mut current_section: Option<String> = None;

    items
        .iter()
        .map(|item| match item {
            LineItem::Section { id, .. } => {
                section_counter += 1;
                line_counter = 0;
                let tag = id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("section-{}", section_counter));
                current_section = Some(tag);
                NumberedItem {
                    item,
                    number: section_counter.to_string(),
                    section: current_section.clone(),
                }
            }
            LineItem::Line(_) => {
                line_counter += 1;
                let number = if current_section.is_some() {
                    format!("{}.{}", section_counter, line_counter)
                } else {
                    line_counter.to_string()
                };
                NumberedItem {
                    item,
                    number,
                    section: current_section.clone(),
                }
            }
            LineItem::Text { .. }
            | LineItem::Header { .. }
            | LineItem::SubtotalMarker { .. }
            | LineItem::Unknown => NumberedItem {
                item,
                number: String::new(),
                section: current_section.clone(),
            },
        })
        .collect()
}

/// Sums `line_total` over billable entries strictly before `index` that
/// share the section tag of the entry at `index`.
///
/// An out-of-range index sums nothing.
pub fn subtotal_before_index(numbered: &[NumberedItem<'_>], index: usize) -> Money {
    let Some(target) = numbered.get(index) else {
        return Money::zero();
    };

    numbered[..index]
        .iter()
        .filter(|n| n.item.is_billable() && n.section == target.section)
        .map(|n| line_total(n.item))
        .sum()
}

/// End-of-section rollups, one per section whose sum is strictly positive.
///
/// Returns nothing when `enabled` is false. Each rollup is anchored on the
/// section's last billable line.
pub fn section_rollups(numbered: &[NumberedItem<'_>], enabled: bool) -> Vec<SectionRollup> {
    if !enabled {
        return Vec::new();
    }

    let mut rollups = Vec::new();
    for (index, entry) in numbered.iter().enumerate() {
        let LineItem::Section { label, .. } = entry.item else {
            continue;
        };
        let Some(tag) = entry.section.as_ref() else {
            continue;
        };

        let last_line = numbered
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(|(_, n)| n.item.is_billable() && n.section.as_ref() == Some(tag))
            .map(|(i, _)| i)
            .last();

        let Some(last_line) = last_line else {
            continue;
        };

        let amount = subtotal_before_index(numbered, last_line) + line_total(numbered[last_line].item);
        if amount.is_positive() {
            rollups.push(SectionRollup {
                after_index: last_line,
                section: tag.clone(),
                label: label.clone(),
                amount,
            });
        }
    }

    rollups
}

// =============================================================================
// Unit Tests
// =============================================================================
