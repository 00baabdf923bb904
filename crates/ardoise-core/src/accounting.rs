//! # Accounting Engine
//!
//! Per-line and per-document monetary computation.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each billable line, in order:                                      │
//! │     net      = round2(qty × price − line discount)                      │
//! │     subtotal = subtotal + net                                           │
//! │     tax      = tax + round2(net × rate / 100)     (0 if not applicable) │
//! │     disc     = disc + round2(line discount)                             │
//! │                                                                         │
//! │  global  = round2(subtotal × v / 100)  or  round2(v)                    │
//! │  excl    = subtotal − global                                            │
//! │  incl    = excl + tax                                                   │
//! │  discount= disc + global                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is computed on each line net of its own discount but before the
//! global discount. Rounding is never deferred: fixtures agree to the cent
//! only if every rounding point above is reproduced.

use crate::money::Money;
use crate::types::{Discount, LineItem, Totals};

/// Net amount of one entry (`round2(base − discount)`).
///
/// Non-billable kinds return zero. Discounts are not clamped, so a 120 %
/// discount yields a negative amount.
///
/// ## Example
/// ```rust
/// use ardoise_core::accounting::line_total;
/// use ardoise_core::types::{BillableLine, LineItem};
///
/// let item = LineItem::from(BillableLine::new("Heure", 3.0, 33.33));
/// assert_eq!(line_total(&item).cents(), 9999);
/// ```
pub fn line_total(item: &LineItem) -> Money {
    match item {
        LineItem::Line(line) => Money::round2(line.gross_amount() - line.discount_amount()),
        _ => Money::zero(),
    }
}

/// Computes document totals from its body.
///
/// `net_payable` equals the inclusive total; retention is applied by
/// [`apply_retention`].
pub fn compute_totals(
    items: &[LineItem],
    global_discount: Option<&Discount>,
    tax_applicable: bool,
) -> Totals {
    let mut subtotal = Money::zero();
    let mut tax = Money::zero();
    let mut line_discounts = Money::zero();

    for item in items {
        let LineItem::Line(line) = item else {
            continue;
        };

        let net = line_total(item);
        subtotal += net;
        if tax_applicable {
            tax += net.percent(line.tax_rate);
        }
        line_discounts += Money::round2(line.discount_amount());
    }

    let global = global_discount
        .map(|d| Money::round2(d.amount_on(subtotal.amount())))
        .unwrap_or_default();

    let total_excl_tax = subtotal - global;
    let total_incl_tax = total_excl_tax + tax;

    Totals {
        total_excl_tax,
        total_tax: tax,
        total_incl_tax,
        total_discount: line_discounts + global,
        net_payable: total_incl_tax,
    }
}

/// Withholds `retention` (retenue de garantie) from the payable amount.
pub fn apply_retention(totals: Totals, retention: Money) -> Totals {
    Totals {
        net_payable: totals.total_incl_tax - retention,
        ..totals
    }
}

/// Sums the tax-exclusive net of each VAT rate, for the tax breakdown.
///
/// Rates are returned in ascending order; lines without tax are grouped
/// under `0.0`.
pub fn tax_breakdown(items: &[LineItem], tax_applicable: bool) -> Vec<(f64, Money, Money)> {
    let mut groups: Vec<(f64, Money, Money)> = Vec::new();
    if !tax_applicable {
        return groups;
    }

    for item in items {
        let LineItem::Line(line) = item else {
            continue;
        };
        let rate = if line.tax_rate.is_finite() { line.tax_rate } else { 0.0 };
        let net = line_total(item);
        let tax = net.percent(rate);
        match groups.iter_mut().find(|(r, _, _)| *r == rate) {
            Some((_, base, amount)) => {
                *base += net;
                *amount += tax;
            }
            None => groups.push((rate, net, tax)),
        }
    }

    groups.sort_by(|a, b| a.0.total_cmp(&b.0));
    groups
}

// =============================================================================
// Unit Tests
// =============================================================================
