//! Utility functions for formatting and common operations
//!
//! This module provides centralized formatting utilities for consistent
//! display of currency, quantity, and rate values throughout the
//! application.

use rust_decimal::Decimal;

/// Core currency formatting function with full control over output.
///
/// Formats a Decimal value using US locale conventions:
/// - Thousands separator: `,` (comma)
/// - Decimal separator: `.` (period)
/// - Sub-cent precision: rounded to whole cents (banker's rounding)
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
///
/// # Examples
/// ```
/// use capgains::utils::format_usd_with_width;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_usd_with_width(dec!(1234.56), 0), "$1,234.56");
/// assert_eq!(format_usd_with_width(dec!(1234), 15), "      $1,234.00");
/// ```
pub fn format_usd_with_width(value: Decimal, width: usize) -> String {
    // Display precision truncates rather than rounds, so round first
    let value = value.round_dp(2);
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    // Add thousands separators (,) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let result = format!("${}{}.{}", sign, with_separators, decimal_part);

    // Apply width padding (right-align)
    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as US dollars with symbol: "$1,234.56"
///
/// # Examples
/// ```
/// use capgains::utils::format_usd;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_usd(dec!(1234.56)), "$1,234.56");
/// assert_eq!(format_usd(dec!(-500)), "$-500.00");
/// ```
pub fn format_usd(value: Decimal) -> String {
    format_usd_with_width(value, 0)
}

/// Format an asset quantity, capped at 8 decimal places with trailing
/// zeros stripped.
///
/// # Examples
/// ```
/// use capgains::utils::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1.50000000)), "1.5");
/// assert_eq!(format_amount(dec!(0.123456789)), "0.12345679");
/// ```
pub fn format_amount(value: Decimal) -> String {
    value.round_dp(8).normalize().to_string()
}

/// Format a fractional tax rate as a percentage: 0.24 becomes "24%".
///
/// # Examples
/// ```
/// use capgains::utils::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(0.24)), "24%");
/// assert_eq!(format_percent(dec!(0.155)), "15.5%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
