//! Boolean-like literal parsing
//!
//! The debug switch is read as a literal expression rather than a loose
//! "1/true/yes" toggle. Accepted forms:
//! - `True`, `False`, `None`
//! - integers: `0`, `1`, `-3`, `1_000`, `0x1f`, `0o7`, `0b10`
//! - floats: `0.0`, `1.5`, `.5`, `1e3`
//!
//! Numbers are truthy when non-zero. Everything else is a configuration error.

use crate::error::{ResolveError, Result};

/// Parse a raw flag value into its truthiness.
///
/// # Errors
///
/// Returns [`ResolveError::ConfigParseError`] naming `raw` when it is not a
/// recognized literal.
pub fn parse_flag(raw: &str) -> Result<bool> {
    literal_truth(raw.trim()).ok_or_else(|| ResolveError::ConfigParseError {
        value: raw.to_string(),
    })
}

fn literal_truth(literal: &str) -> Option<bool> {
    match literal {
        "True" => Some(true),
        "False" | "None" => Some(false),
        _ => {
            let unsigned = literal.strip_prefix(['+', '-']).unwrap_or(literal);
            integer_truth(unsigned).or_else(|| float_truth(unsigned))
        }
    }
}

fn integer_truth(unsigned: &str) -> Option<bool> {
    let (body, radix) = match unsigned.get(..2) {
        Some("0x" | "0X") => (unsigned.get(2..)?, 16),
        Some("0o" | "0O") => (unsigned.get(2..)?, 8),
        Some("0b" | "0B") => (unsigned.get(2..)?, 2),
        _ => (unsigned, 10),
    };
    let digits = if radix == 10 {
        body
    } else {
        body.strip_prefix('_').unwrap_or(body)
    };

    if digits.is_empty() || !underscores_between_digits(digits, radix) {
        return None;
    }
    if !digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
        return None;
    }

    let nonzero = digits.chars().any(|c| c != '0' && c != '_');

    // "007" is not a literal, but "000" is
    if radix == 10 && nonzero && digits.starts_with('0') {
        return None;
    }

    Some(nonzero)
}

fn float_truth(unsigned: &str) -> Option<bool> {
    let has_digit = unsigned.chars().any(|c| c.is_ascii_digit());
    let has_marker = unsigned.contains(['.', 'e', 'E']);
    let allowed = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-' | '_'));

    if !has_digit || !has_marker || !allowed || !underscores_between_digits(unsigned, 10) {
        return None;
    }

    // A sign is only valid directly after the exponent marker
    let mut prev = None;
    for c in unsigned.chars() {
        if matches!(c, '+' | '-') && !matches!(prev, Some('e' | 'E')) {
            return None;
        }
        prev = Some(c);
    }

    let value: f64 = unsigned.replace('_', "").parse().ok()?;
    Some(value != 0.0)
}

/// Each `_` must sit between two digits (`1_000`, not `_1`, `1_` or `1__0`)
fn underscores_between_digits(text: &str, radix: u32) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().all(|(i, &c)| {
        c != '_'
            || (i > 0
                && chars.get(i - 1).is_some_and(|p| p.is_digit(radix))
                && chars.get(i + 1).is_some_and(|n| n.is_digit(radix)))
    })
}
