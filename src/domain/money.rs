use thiserror::Error;

/// Money is kept as integer cents so sums and comparisons stay exact.
/// "12.34" is stored as 1234.
pub type Cents = i64;

/// Format cents with two decimals.
/// Example: 285000 -> "2850.00", -150 -> "-1.50"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a decimal amount into cents.
///
/// Accepts an optional leading `-`, whole units and up to two meaningful decimals
/// (extra decimals are truncated): "50" -> 5000, "12.5" -> 1250, "-1" -> -100.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let trimmed = input.trim();
    let invalid = || ParseCentsError::InvalidFormat(input.to_string());

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if digits.is_empty() {
        return Err(invalid());
    }

    let (units_str, decimals_str) = digits.split_once('.').unwrap_or((digits, ""));
    if units_str.is_empty() && decimals_str.is_empty() {
        return Err(invalid());
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimals_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| invalid())?
    };

    // Pad "5" to "50", cut "999" to "99"
    let fraction: i64 = match decimals_str.len() {
        0 => 0,
        1 => decimals_str.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => decimals_str[..2].parse().map_err(|_| invalid())?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    #[error("invalid money format: '{0}'")]
    InvalidFormat(String),
}
