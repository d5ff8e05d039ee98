//! Kanji numeral parsing (漢数字 → integer).
//!
//! Mirrors how a grouped numeral is read aloud: large-scale units
//! (万 億 兆) split the sequence into groups, most significant first, and
//! within a group the small-scale units (十 百 千) multiply the digit in
//! front of them. A sequence with no units at all is read positionally
//! (二〇二三 → 2023). Malformed sequences are rejected rather than
//! parsed best-effort.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumeralError {
    /// Structurally malformed sequence.
    #[error("malformed numeral: {0}")]
    Invalid(String),
    /// Value past the supported ceiling.
    #[error("numeral exceeds the supported maximum of 10^16")]
    Overflow,
}

/// Largest value the parser will produce.
pub const MAX_VALUE: u64 = 10_u64.pow(16);

/// Digit character → 0–9. ASCII digits are accepted alongside kanji.
fn digit_value(c: char) -> Option<u64> {
    match c {
        '零' | '〇' => Some(0),
        '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        '0'..='9' => Some(u64::from(c) - u64::from('0')),
        _ => None,
    }
}

/// Small-scale multiplier applied to the preceding digit.
fn small_unit(c: char) -> Option<u64> {
    match c {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1000),
        _ => None,
    }
}

/// Large-scale unit closing a group.
fn large_unit(c: char) -> Option<u64> {
    match c {
        '万' => Some(10_u64.pow(4)),
        '億' => Some(10_u64.pow(8)),
        '兆' => Some(10_u64.pow(12)),
        _ => None,
    }
}

/// Parse a kanji numeral into an integer.
pub fn parse(input: &str) -> Result<u64, NumeralError> {
    if input.is_empty() {
        return Err(NumeralError::Invalid("empty input".to_string()));
    }
    let has_units = input
        .chars()
        .any(|c| small_unit(c).is_some() || large_unit(c).is_some());
    if has_units {
        parse_grouped(input)
    } else {
        parse_positional(input)
    }
}

/// Positional reading for unit-less sequences: each character is one
/// decimal digit (二〇二三 → 2023).
fn parse_positional(input: &str) -> Result<u64, NumeralError> {
    let mut value: u64 = 0;
    for c in input.chars() {
        let d = digit_value(c)
            .ok_or_else(|| NumeralError::Invalid(format!("unexpected character '{c}'")))?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .ok_or(NumeralError::Overflow)?;
        if value > MAX_VALUE {
            return Err(NumeralError::Overflow);
        }
    }
    Ok(value)
}

/// Grouped reading for sequences containing units.
///
/// Within a group, units must strictly descend (千 before 百 before 十)
/// and a bare digit is only valid as the final term. Large units must
/// strictly descend across groups; the same tier twice is malformed.
fn parse_grouped(input: &str) -> Result<u64, NumeralError> {
    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut pending: Option<u64> = None;
    let mut last_small: Option<u64> = None;
    let mut last_large: Option<u64> = None;

    for c in input.chars() {
        if let Some(d) = digit_value(c) {
            if pending.is_some() {
                return Err(NumeralError::Invalid(format!(
                    "consecutive digits at '{c}'"
                )));
            }
            pending = Some(d);
        } else if let Some(unit) = small_unit(c) {
            if last_small.is_some_and(|prev| unit >= prev) {
                return Err(NumeralError::Invalid(format!(
                    "unit '{c}' out of descending order"
                )));
            }
            let d = match pending.take() {
                // Implicit leading 1: 十 = 10, 百二十 = 120
                None => 1,
                Some(0) => {
                    return Err(NumeralError::Invalid(format!("zero multiplier before '{c}'")));
                }
                Some(d) => d,
            };
            group += d * unit;
            last_small = Some(unit);
        } else if let Some(unit) = large_unit(c) {
            if last_large.is_some_and(|prev| unit >= prev) {
                return Err(NumeralError::Invalid(format!(
                    "large unit '{c}' repeated or out of order"
                )));
            }
            if let Some(d) = pending.take() {
                group += d;
            }
            // A lone large unit is an implicit-1 group: 万 = 10000
            let group_value = if group == 0 { 1 } else { group };
            total = group_value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or(NumeralError::Overflow)?;
            if total > MAX_VALUE {
                return Err(NumeralError::Overflow);
            }
            group = 0;
            last_small = None;
            last_large = Some(unit);
        } else {
            return Err(NumeralError::Invalid(format!("unexpected character '{c}'")));
        }
    }

    if let Some(d) = pending {
        group += d;
    }
    let value = total.checked_add(group).ok_or(NumeralError::Overflow)?;
    if value > MAX_VALUE {
        return Err(NumeralError::Overflow);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── small-scale sequences ────────────────────────────────────────

    #[test]
    fn test_parse_single_digits() {
        assert_eq!(parse("一"), Ok(1));
        assert_eq!(parse("九"), Ok(9));
        assert_eq!(parse("〇"), Ok(0));
        assert_eq!(parse("零"), Ok(0));
    }

    #[test]
    fn test_parse_small_units() {
        assert_eq!(parse("三千五百"), Ok(3500));
        assert_eq!(parse("百二十"), Ok(120));
        assert_eq!(parse("四十二"), Ok(42));
        assert_eq!(parse("千九百八十四"), Ok(1984));
    }

    #[test]
    fn test_parse_implicit_leading_one() {
        assert_eq!(parse("十"), Ok(10));
        assert_eq!(parse("百"), Ok(100));
        assert_eq!(parse("千"), Ok(1000));
        assert_eq!(parse("十五"), Ok(15));
    }

    #[test]
    fn test_parse_bare_digit_as_final_term() {
        assert_eq!(parse("一千五"), Ok(1005));
        assert_eq!(parse("一万五"), Ok(10005));
    }

    // ── large-scale grouping ─────────────────────────────────────────

    #[test]
    fn test_parse_large_groups() {
        assert_eq!(parse("一万二千三百四十五"), Ok(12345));
        assert_eq!(parse("一億二千三百四十五万六千七百八十九"), Ok(123_456_789));
        assert_eq!(parse("二兆"), Ok(2_000_000_000_000));
    }

    #[test]
    fn test_parse_lone_large_unit() {
        assert_eq!(parse("万"), Ok(10_000));
        assert_eq!(parse("十万"), Ok(100_000));
    }

    // ── positional fallback ──────────────────────────────────────────

    #[test]
    fn test_parse_positional() {
        assert_eq!(parse("二〇二三"), Ok(2023));
        assert_eq!(parse("2023"), Ok(2023));
        assert_eq!(parse("二0二三"), Ok(2023));
    }

    // ── malformed sequences ──────────────────────────────────────────

    #[test]
    fn test_parse_empty_fails() {
        assert!(matches!(parse(""), Err(NumeralError::Invalid(_))));
    }

    #[test]
    fn test_parse_unknown_character_fails() {
        assert!(matches!(parse("あ"), Err(NumeralError::Invalid(_))));
        assert!(matches!(parse("三千x"), Err(NumeralError::Invalid(_))));
    }

    #[test]
    fn test_parse_consecutive_digits_fail() {
        assert!(matches!(parse("一二十"), Err(NumeralError::Invalid(_))));
        assert!(matches!(parse("一万二三"), Err(NumeralError::Invalid(_))));
    }

    #[test]
    fn test_parse_unit_order_violations_fail() {
        assert!(matches!(parse("十十"), Err(NumeralError::Invalid(_))));
        assert!(matches!(parse("五百百"), Err(NumeralError::Invalid(_))));
        assert!(matches!(parse("十百"), Err(NumeralError::Invalid(_))));
    }

    #[test]
    fn test_parse_large_tier_violations_fail() {
        assert!(matches!(parse("一万二万"), Err(NumeralError::Invalid(_))));
        assert!(matches!(parse("一万二億"), Err(NumeralError::Invalid(_))));
    }

    #[test]
    fn test_parse_zero_multiplier_fails() {
        assert!(matches!(parse("零十"), Err(NumeralError::Invalid(_))));
    }

    // ── overflow ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_overflow_past_ceiling() {
        // 17 digits read positionally exceed 10^16
        assert_eq!(parse("99999999999999999"), Err(NumeralError::Overflow));
    }

    #[test]
    fn test_parse_ceiling_is_inclusive() {
        assert_eq!(parse("10000000000000000"), Ok(MAX_VALUE));
    }

    #[test]
    fn test_parse_largest_grouped_value() {
        assert_eq!(
            parse("九千九百九十九兆九千九百九十九億九千九百九十九万九千九百九十九"),
            Ok(9_999_999_999_999_999)
        );
    }
}
