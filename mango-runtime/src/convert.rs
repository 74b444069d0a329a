//! Integer/string conversion in radices 2 through 36.
//!
//! Digits above 9 are the letters `a`-`z`. Parsing accepts either case.
//! Only radix 10 carries a sign when formatting; other radices format the
//! two's-complement bit pattern of negative values, and parsing mirrors that so
//! `string_to_int(&int_to_string(n, r)?, r)? == n` for every accepted `(n, r)`.

use tracing::trace;

use crate::constants::{MAX_INT_DIGITS, MAX_RADIX, MINUS, MIN_RADIX};
use crate::error::{Result, RuntimeError};
use crate::string::{CharCode, MangoString};
use crate::Int;

fn check_radix(radix: Int) -> Result<u32> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        u32::try_from(radix).map_err(|_| RuntimeError::InvalidRadix { radix })
    } else {
        Err(RuntimeError::InvalidRadix { radix })
    }
}

/// Character for a digit value below 36.
fn digit_char(value: u32) -> CharCode {
    let code = if value < 10 {
        u32::from(b'0') + value
    } else {
        u32::from(b'a') + value - 10
    };
    CharCode::try_from(code).unwrap_or(CharCode::from(b'?'))
}

/// Value of `code` as a digit in `radix`, if it is one.
pub fn digit_value(code: CharCode, radix: u32) -> Option<u32> {
    let value = match u8::try_from(code).ok()? {
        c @ b'0'..=b'9' => c - b'0',
        c @ b'a'..=b'z' => c - b'a' + 10,
        c @ b'A'..=b'Z' => c - b'A' + 10,
        _ => return None,
    };
    let value = u32::from(value);
    (value < radix).then_some(value)
}

/// Format `value` in `radix`, most significant digit first.
///
/// Zero is the single character `0`. No other result has a leading zero. In
/// radix 10 a negative value gets a leading `-`; `Int::MIN` cannot be negated
/// and fails with [`RuntimeError::Overflow`].
pub fn int_to_string(value: Int, radix: Int) -> Result<MangoString> {
    let base = check_radix(radix)?;
    let mut out = MangoString::with_capacity(MAX_INT_DIGITS + 1)?;

    if value == 0 {
        out.push(CharCode::from(b'0'))?;
        return Ok(out);
    }

    let negative = radix == 10 && value < 0;
    let mut magnitude = if negative {
        value.checked_neg().ok_or(RuntimeError::Overflow)?.unsigned_abs()
    } else {
        // Bit pattern for negatives in non-decimal radices.
        u32::from_ne_bytes(value.to_ne_bytes())
    };

    // Least significant digit first, then flip.
    while magnitude != 0 {
        out.push(digit_char(magnitude % base))?;
        magnitude /= base;
    }
    if negative {
        out.push(MINUS)?;
    }
    out.reverse();

    trace!(value, radix, length = out.len(), "formatted int");
    Ok(out)
}

/// Parse `string` as an `Int` in `radix`.
///
/// See [`parse_codes`] for the accepted grammar.
pub fn string_to_int(string: &MangoString, radix: Int) -> Result<Int> {
    parse_codes(string.as_codes(), radix)
}

/// Parse raw character codes as an `Int` in `radix`.
///
/// The input is an optional leading `-` followed by at least one digit. The
/// leftmost invalid character is reported. Digits are accumulated from the
/// least significant end; leading zeros never overflow.
pub fn parse_codes(codes: &[CharCode], radix: Int) -> Result<Int> {
    let base = check_radix(radix)?;

    let (negative, digits, offset) = match codes.split_first() {
        Some((&MINUS, rest)) => (true, rest, 1),
        _ => (false, codes, 0),
    };
    if digits.is_empty() {
        return Err(RuntimeError::InvalidDigit {
            index: codes.len(),
            radix: base,
        });
    }
    // Scanning leftwards, the last invalid index seen is the leftmost one.
    let mut invalid = None;
    let mut magnitude: Option<u32> = Some(0);
    let mut place: Option<u32> = Some(1);
    for (pos, &code) in digits.iter().enumerate().rev() {
        match digit_value(code, base) {
            None => invalid = Some(offset + pos),
            Some(0) => {}
            Some(digit) => {
                magnitude = magnitude.and_then(|m| {
                    place
                        .and_then(|p| p.checked_mul(digit))
                        .and_then(|term| m.checked_add(term))
                });
            }
        }
        place = place.and_then(|p| p.checked_mul(base));
    }
    if let Some(index) = invalid {
        return Err(RuntimeError::InvalidDigit { index, radix: base });
    }
    let magnitude = magnitude.ok_or(RuntimeError::Overflow)?;

    let value = if negative {
        Int::try_from(-i64::from(magnitude)).map_err(|_| RuntimeError::Overflow)?
    } else if base == 10 {
        Int::try_from(magnitude).map_err(|_| RuntimeError::Overflow)?
    } else {
        Int::from_ne_bytes(magnitude.to_ne_bytes())
    };

    trace!(radix, value, "parsed int");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: Int, radix: Int) -> String {
        int_to_string(value, radix).unwrap().to_string()
    }

    fn parse(digits: &str, radix: Int) -> Result<Int> {
        string_to_int(&MangoString::from(digits), radix)
    }

    #[test]
    fn test_known_renderings() {
        assert_eq!(fmt(-42, 10), "-42");
        assert_eq!(fmt(255, 16), "ff");
        assert_eq!(fmt(5, 2), "101");
        assert_eq!(fmt(35, 36), "z");
        assert_eq!(fmt(Int::MAX, 10), "2147483647");
        assert_eq!(fmt(Int::MIN + 1, 10), "-2147483647");
    }

    #[test]
    fn test_zero_in_every_radix() {
        for radix in MIN_RADIX..=MAX_RADIX {
            let s = int_to_string(0, radix).unwrap();
            assert_eq!(s.len(), 1);
            assert_eq!(s, MangoString::from("0"));
        }
    }

    #[test]
    fn test_negative_non_decimal_uses_bit_pattern() {
        assert_eq!(fmt(-1, 16), "ffffffff");
        assert_eq!(fmt(-1, 2), "1".repeat(32));
        assert_eq!(fmt(Int::MIN, 16), "80000000");
        assert_eq!(parse("ffffffff", 16).unwrap(), -1);
        assert_eq!(parse("80000000", 16).unwrap(), Int::MIN);
    }

    #[test]
    fn test_min_int_decimal_overflows() {
        let err = int_to_string(Int::MIN, 10).unwrap_err();
        assert!(matches!(err, RuntimeError::Overflow));
        // Parsing the same text is still fine.
        assert_eq!(parse("-2147483648", 10).unwrap(), Int::MIN);
    }

    #[test]
    fn test_invalid_radix() {
        for radix in [-10, 0, 1, 37, 100] {
            assert!(matches!(
                int_to_string(7, radix),
                Err(RuntimeError::InvalidRadix { radix: r }) if r == radix
            ));
            assert!(matches!(
                parse("7", radix),
                Err(RuntimeError::InvalidRadix { .. })
            ));
        }
    }

    #[test]
    fn test_digit_validation_follows_radix() {
        assert!(matches!(
            parse("1g", 16),
            Err(RuntimeError::InvalidDigit { index: 1, radix: 16 })
        ));
        assert_eq!(parse("1g", 17).unwrap(), 33);
        assert_eq!(parse("1G", 17).unwrap(), 33);
        assert_eq!(parse("FF", 16).unwrap(), 255);
        assert!(matches!(
            parse("12x4", 10),
            Err(RuntimeError::InvalidDigit { index: 2, .. })
        ));
        assert!(matches!(
            parse("102", 2),
            Err(RuntimeError::InvalidDigit { index: 2, radix: 2 })
        ));
    }

    #[test]
    fn test_invalid_digit_beats_overflow() {
        // The digits overflow before the scan reaches the bad character.
        assert!(matches!(
            parse("x99999999999", 10),
            Err(RuntimeError::InvalidDigit { index: 0, radix: 10 })
        ));
        assert!(matches!(
            parse("1x2y", 10),
            Err(RuntimeError::InvalidDigit { index: 1, .. })
        ));
        assert!(matches!(
            parse("-z1", 10),
            Err(RuntimeError::InvalidDigit { index: 1, .. })
        ));
    }

    #[test]
    fn test_sign_handling() {
        assert_eq!(parse("-42", 10).unwrap(), -42);
        assert_eq!(parse("-ff", 16).unwrap(), -255);
        assert!(matches!(
            parse("4-2", 10),
            Err(RuntimeError::InvalidDigit { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_and_lone_sign() {
        assert!(matches!(
            parse("", 10),
            Err(RuntimeError::InvalidDigit { index: 0, .. })
        ));
        assert!(matches!(
            parse("-", 10),
            Err(RuntimeError::InvalidDigit { index: 1, .. })
        ));
    }

    #[test]
    fn test_overflow_on_accumulation() {
        assert!(matches!(parse("2147483648", 10), Err(RuntimeError::Overflow)));
        assert!(matches!(parse("-2147483649", 10), Err(RuntimeError::Overflow)));
        assert!(matches!(parse("100000000", 16), Err(RuntimeError::Overflow)));
        assert!(matches!(parse("99999999999", 10), Err(RuntimeError::Overflow)));
    }

    #[test]
    fn test_leading_zeros_accepted() {
        assert_eq!(parse("0000000000000000000000000000000000000101", 2).unwrap(), 5);
        assert_eq!(parse("-007", 10).unwrap(), -7);
    }
}
