//! Duration literals in the `1m30s` / `1500ms` / `2.5s` style.
//!
//! Grammar: an optional sign, then one or more `<number><unit>` pairs where
//! the number may carry a decimal fraction and the unit is one of
//! `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.

use std::time::Duration;

use thiserror::Error;

/// Largest representable magnitude, in nanoseconds (`i64::MAX`).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Fraction digits beyond this precision can't affect a nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

/// A parsed duration literal, which may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    pub negative: bool,
    pub magnitude: Duration,
}

impl SignedDuration {
    /// The duration if it is strictly positive.
    pub fn positive(self) -> Option<Duration> {
        if self.negative || self.magnitude.is_zero() {
            None
        } else {
            Some(self.magnitude)
        }
    }
}

/// Why a literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("time: invalid duration {0:?}")]
    Invalid(String),

    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

/// Parse a duration literal such as `"5s"` or `"1h15m"`.
pub fn parse_duration(input: &str) -> Result<SignedDuration, DurationParseError> {
    let invalid = || DurationParseError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(SignedDuration {
            negative,
            magnitude: Duration::ZERO,
        });
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = leading_digits(rest);
        let (int_part, after) = rest.split_at(int_len);
        rest = after;

        let mut fraction = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = leading_digits(after_dot);
            fraction = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        } else if int_part.is_empty() {
            return Err(invalid());
        }
        if int_part.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let (unit, after) = rest.split_at(unit_len);
        rest = after;

        let scale = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            let denominator = 10u128.pow(digits.len() as u32);
            value += numerator * scale / denominator;
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_NANOS {
            return Err(invalid());
        }
    }

    Ok(SignedDuration {
        negative,
        magnitude: Duration::from_nanos(total as u64),
    })
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}
