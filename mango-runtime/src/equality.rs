//! Structural string equality (`String$equals`).

use crate::string::{CharCode, MangoString};

/// Compare two strings character by character.
///
/// Strings of different lengths are unequal without scanning. Otherwise only
/// indices `[0, length)` are read.
pub fn equals(a: &MangoString, b: &MangoString) -> bool {
    codes_equal(a.as_codes(), b.as_codes())
}

pub(crate) fn codes_equal(a: &[CharCode], b: &[CharCode]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).all(|(x, y)| x == y)
}
