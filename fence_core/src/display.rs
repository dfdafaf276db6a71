//! Display formatting for costs.
//!
//! Costs are kept unrounded everywhere else; these helpers round to two
//! decimals for on-screen text and exported cells.

/// Format an amount as `#,##0.00`, e.g. `12345.678` → `"12,345.68"`.
///
/// Non-finite values are rendered as-is (`inf`, `NaN`).
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Format an amount with a currency suffix, e.g. `"12,000.00 руб."`
pub fn format_money(value: f64, currency: &str) -> String {
    if currency.is_empty() {
        format_amount(value)
    } else {
        format!("{} {}", format_amount(value), currency)
    }
}

/// "Yes"/"No" for option flags
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(12000.0), "12,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-4500.5), "-4,500.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_amount_non_finite() {
        assert_eq!(format_amount(f64::INFINITY), "inf");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_amount(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_money_suffix() {
        assert_eq!(format_money(9000.0, "руб."), "9,000.00 руб.");
        assert_eq!(format_money(9000.0, ""), "9,000.00");
    }
}
