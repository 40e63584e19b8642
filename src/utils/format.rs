//! Display formatting helpers
//!
//! Decimal values are rounded here, at the presentation boundary, and
//! nowhere else.

use bigdecimal::BigDecimal;
use num_bigint::Sign;
use num_traits::{FromPrimitive, ToPrimitive};

/// Format with a fixed number of decimal places and `,` thousands separators.
pub fn format_decimal(value: &BigDecimal, places: u32) -> String {
    let scale = i64::from(places);
    let rounded = value.round(scale).with_scale(scale);
    let (digits, _) = rounded.as_bigint_and_exponent();

    let negative = digits.sign() == Sign::Minus;
    let mut magnitude = digits.magnitude().to_string();
    let places = places as usize;
    if magnitude.len() <= places {
        magnitude = format!("{}{}", "0".repeat(places + 1 - magnitude.len()), magnitude);
    }

    let (int_part, frac_part) = magnitude.split_at(magnitude.len() - places);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if places > 0 {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `$1,234.5678` style price (4 places)
pub fn format_price(price: f64) -> String {
    match BigDecimal::from_f64(price) {
        Some(value) => format!("${}", format_decimal(&value, 4)),
        None => "$n/a".to_string(),
    }
}

/// `(1.5 billion SYM tokens)` / `(2.0 million SYM tokens)` / `(12,345 SYM tokens)`
pub fn supply_words(human_supply: &BigDecimal, symbol: &str) -> String {
    let approx = human_supply.to_f64().unwrap_or(0.0);
    if approx >= 1e9 {
        format!("({:.1} billion {} tokens)", approx / 1e9, symbol)
    } else if approx >= 1e6 {
        format!("({:.1} million {} tokens)", approx / 1e6, symbol)
    } else {
        format!("({} {} tokens)", format_decimal(human_supply, 0), symbol)
    }
}

/// `0x1234…abcd`; short strings are returned unchanged
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Distribution bar colour for a percent-of-supply value
pub fn bar_color(pct: f64) -> &'static str {
    if pct > 70.0 {
        "#FF6B6B"
    } else if pct > 50.0 {
        "#FFD166"
    } else {
        "#4CAF50"
    }
}

/// Fixed-width text bar, clamped to [0, 100] for drawing only
pub fn text_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
