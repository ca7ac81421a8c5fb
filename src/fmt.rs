use crate::error::{ExpenseError, Result};

pub const CURRENCY_SYMBOL: &str = "R$";

/// Longest amount, in significant digits of cents, the amount field accepts.
pub const MAX_AMOUNT_DIGITS: usize = 15;

/// Format an amount in cents as Brazilian reais: R$ 1.234,56
pub fn format_currency(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let int_part = (abs / 100).to_string();
    let dec_part = abs % 100;

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{CURRENCY_SYMBOL} {grouped},{dec_part:02}")
    } else {
        format!("{CURRENCY_SYMBOL} {grouped},{dec_part:02}")
    }
}

/// Read raw field text as a count of cents, ignoring every non-digit.
/// Text without digits, or too long to fit, counts as zero.
pub fn cents_from_input(raw: &str) -> i64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Reformat raw amount field text as currency. `"1500"` becomes `R$ 15,00`.
pub fn format_input(raw: &str) -> String {
    format_currency(cents_from_input(raw))
}

/// Number of digits in `raw` once leading zeros are dropped.
pub fn significant_digits(raw: &str) -> usize {
    raw.chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .count()
}

/// Parse a displayed amount back into a number: keep digits and the decimal
/// comma, turn the comma into a dot, parse as a float.
pub fn parse_display_amount(text: &str) -> Result<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| ExpenseError::Aggregation(format!("not an amount: {text:?}")))
}

/// Same as [`parse_display_amount`], rounded to whole cents.
pub fn display_to_cents(text: &str) -> Result<i64> {
    let value = parse_display_amount(text)?;
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents >= i64::MAX as f64 {
        return Err(ExpenseError::Aggregation(format!(
            "amount out of range: {text:?}"
        )));
    }
    Ok(cents as i64)
}

/// Split a formatted amount into its currency symbol (sign included) and the
/// numeric text, so the two can be styled apart.
pub fn split_currency(display: &str) -> Option<(&str, &str)> {
    let idx = display.find(CURRENCY_SYMBOL)?;
    let (symbol, rest) = display.split_at(idx + CURRENCY_SYMBOL.len());
    let number = rest.trim_start();
    if number.is_empty() {
        return None;
    }
    Some((symbol, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(123456), "R$ 1.234,56");
        assert_eq!(format_currency(-500), "-R$ 5,00");
        assert_eq!(format_currency(0), "R$ 0,00");
        assert_eq!(format_currency(100000099), "R$ 1.000.000,99");
        assert_eq!(format_currency(4210), "R$ 42,10");
        assert_eq!(format_currency(7), "R$ 0,07");
    }

    #[test]
    fn test_format_extremes() {
        assert_eq!(format_currency(i64::MAX), "R$ 92.233.720.368.547.758,07");
        assert_eq!(format_currency(i64::MIN), "-R$ 92.233.720.368.547.758,08");
    }

    #[test]
    fn test_format_input_reads_cents() {
        assert_eq!(format_input("1500"), "R$ 15,00");
        assert_eq!(format_input("1"), "R$ 0,01");
        assert_eq!(format_input("123456789"), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_input_matches_currency_for_digit_strings() {
        for digits in ["0", "5", "42", "999", "100000", "31415926"] {
            let cents: i64 = digits.parse().unwrap();
            assert_eq!(format_input(digits), format_currency(cents));
        }
    }

    #[test]
    fn test_format_input_strips_non_digits() {
        assert_eq!(format_input("R$ 1,500"), "R$ 15,00");
        assert_eq!(format_input("12a3"), "R$ 1,23");
        assert_eq!(format_input("-250"), "R$ 2,50");
    }

    #[test]
    fn test_empty_input_formats_as_zero() {
        assert_eq!(format_input(""), "R$ 0,00");
        assert_eq!(format_input("abc"), "R$ 0,00");
    }

    #[test]
    fn test_oversized_input_degrades_to_zero() {
        assert_eq!(cents_from_input("99999999999999999999999"), 0);
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant_digits("R$ 0,01"), 1);
        assert_eq!(significant_digits("R$ 15,000"), 5);
        assert_eq!(significant_digits(""), 0);
    }

    #[test]
    fn test_parse_display_amount() {
        assert_eq!(parse_display_amount("R$ 15,00").unwrap(), 15.0);
        assert_eq!(parse_display_amount("R$ 5,50").unwrap(), 5.5);
        assert_eq!(parse_display_amount("R$ 1.234,56").unwrap(), 1234.56);
    }

    #[test]
    fn test_parse_display_amount_rejects_garbage() {
        assert!(matches!(
            parse_display_amount("R$ abc"),
            Err(ExpenseError::Aggregation(_))
        ));
        assert!(parse_display_amount("1,2,3").is_err());
        assert!(parse_display_amount("").is_err());
    }

    #[test]
    fn test_display_to_cents_rounds() {
        assert_eq!(display_to_cents("R$ 20,50").unwrap(), 2050);
        assert_eq!(display_to_cents("R$ 0,07").unwrap(), 7);
        assert!(display_to_cents("R$ 999999999999999999999,00").is_err());
    }

    #[test]
    fn test_split_currency() {
        assert_eq!(split_currency("R$ 15,00"), Some(("R$", "15,00")));
        assert_eq!(split_currency("-R$ 5,00"), Some(("-R$", "5,00")));
        assert_eq!(split_currency("15,00"), None);
        assert_eq!(split_currency("R$ "), None);
    }
}
