//! 數值顯示格式

use rust_decimal::Decimal;

/// 金額取整到整數單位並加上千分位，例如 `Rp4,800,000`
pub fn format_currency(value: f64, symbol: &str) -> String {
    let rounded = match Decimal::try_from(value) {
        Ok(decimal) => decimal.round_dp(0),
        Err(_) => return format!("{}{}", symbol, value),
    };

    let text = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}{}", sign, symbol, group_thousands(&text))
}

/// 數量顯示到一位小數，整數不顯示小數
pub fn format_quantity(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value.round())
    } else {
        format!("{:.1}", value)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4_800_000.0, "Rp4,800,000")]
    #[case(1_466_666.666_666_7, "Rp1,466,667")]
    #[case(999.4, "Rp999")]
    #[case(0.0, "Rp0")]
    #[case(-1234.0, "-Rp1,234")]
    fn test_format_currency(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_currency(value, "Rp"), expected);
    }

    #[test]
    fn test_non_finite_currency() {
        assert_eq!(format_currency(f64::INFINITY, "Rp"), "Rpinf");
    }

    #[rstest]
    #[case(30.0, "30")]
    #[case(13.333_333, "13.3")]
    #[case(15.000_000_000_01, "15")]
    fn test_format_quantity(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_quantity(value), expected);
    }
}
