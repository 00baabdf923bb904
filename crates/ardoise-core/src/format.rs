//! fr-FR display helpers.
//!
//! Grouping uses plain spaces rather than the narrow no-break space of the
//! platform locale: the text ends up in PDF fonts that lack that glyph.

use chrono::NaiveDate;

use crate::money::Money;

/// Groups digits by thousands: `1234567` → `"1 234 567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// `1 234,56 €`.
pub fn format_money(amount: Money) -> String {
    amount.to_string()
}

/// `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats a decimal with at most `max_decimals` digits, trailing zeros
/// dropped, comma separator: `1.5` → `"1,5"`, `1234.0` → `"1 234"`.
///
/// Non-finite values print as an empty string.
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = int_part
        .parse::<u64>()
        .map(group_thousands)
        .unwrap_or_else(|_| int_part.to_string());
    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

/// Quantity column: up to three decimals.
pub fn format_quantity(quantity: f64) -> String {
    format_decimal(quantity, 3)
}

/// Rate column: `20 %`, `5,5 %`.
pub fn format_percent(rate: f64) -> String {
    if !rate.is_finite() {
        return String::new();
    }
    format!("{} %", format_decimal(rate, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(1234567), "1 234 567");
    }

    #[test]
    fn test_format_money_and_date() {
        assert_eq!(format_money(Money::from_cents(123456)), "1 234,56 €");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.5), "1,5");
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1250.0), "1 250");
        assert_eq!(format_quantity(0.125), "0,125");
        assert_eq!(format_quantity(-3.0), "-3");
        assert_eq!(format_quantity(f64::NAN), "");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(20.0), "20 %");
        assert_eq!(format_percent(5.5), "5,5 %");
        assert_eq!(format_percent(0.0), "0 %");
    }
}
