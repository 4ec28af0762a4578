//! Display formatting for amounts, percentages and dates.
//!
//! Pure functions, en-US conventions: comma thousands separators, dot decimals,
//! symbol before the number, minus sign before the symbol. Złoty is the
//! exception: its symbol follows the number (`1,500.00 zł`).

use chrono::NaiveDate;

/// Symbol for common currency codes. Unknown codes render as a code prefix.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.trim().to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "PLN" => Some("zł"),
        _ => None,
    }
}

/// Whether the symbol is written after the number rather than before it.
fn symbol_follows_amount(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case("PLN")
}

/// Format an amount with two decimals: `1234.5` → `$1,234.50`, `-87.43` → `-$87.43`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    format_with_decimals(amount, currency, 2)
}

/// Format an amount rounded to whole units: `60.4` → `$60`.
pub fn format_currency_whole(amount: f64, currency: &str) -> String {
    format_with_decimals(amount, currency, 0)
}

/// Format a transaction amount with an explicit direction sign:
/// `5420.0` → `+$5,420.00`, `-87.43` → `-$87.43`, `0.0` → `$0.00`.
pub fn format_signed_amount(amount: f64, currency: &str) -> String {
    let formatted = format_currency(amount, currency);
    if amount > 0.0 && has_nonzero_digit(&formatted) {
        format!("+{formatted}")
    } else {
        formatted
    }
}

/// Format a percentage: `(61.7647, 1)` → `61.8%`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    let rounded = format!("{:.*}", decimals, value);
    // "-0.0" after rounding a tiny negative value
    let rounded = match rounded.strip_prefix('-') {
        Some(rest) if !has_nonzero_digit(rest) => rest.to_string(),
        _ => rounded,
    };
    format!("{rounded}%")
}

/// Short table date: `2025-01-05` → `Jan 5`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn format_with_decimals(amount: f64, currency: &str, decimals: usize) -> String {
    let rounded = format!("{:.*}", decimals, amount.abs());
    let negative = amount < 0.0 && has_nonzero_digit(&rounded);

    let number = match rounded.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&rounded),
    };

    let sign = if negative { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) if symbol_follows_amount(currency) => format!("{sign}{number} {symbol}"),
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{} {number}", currency.trim().to_uppercase()),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn has_nonzero_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit() && c != '0')
}

