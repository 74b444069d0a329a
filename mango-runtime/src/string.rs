//! The mango `String`: an owned, length-prefixed buffer of character codes.
//!
//! Length is authoritative. There is no terminator, and the spare capacity of
//! the buffer is never observable through the public API.

use core::fmt;

use crate::equality;
use crate::error::{Result, RuntimeError};

/// One character unit of a mango string. No multi-byte or grapheme semantics.
pub type CharCode = u16;

/// Growth floor for an empty buffer
const MIN_GROWTH: usize = 8;

/// Owned, growable sequence of character codes.
///
/// A string optionally carries a hard length limit. Appending past the limit,
/// or past what the allocator can provide, fails with
/// [`RuntimeError::CapacityExceeded`] and leaves the contents untouched.
#[derive(Clone, Default)]
pub struct MangoString {
    chars: Vec<CharCode>,
    limit: Option<usize>,
}

impl MangoString {
    /// Create an empty string without reserving storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty string with room for `capacity` characters.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut chars = Vec::new();
        chars
            .try_reserve_exact(capacity)
            .map_err(|_| RuntimeError::CapacityExceeded {
                requested: capacity,
            })?;
        Ok(Self { chars, limit: None })
    }

    /// Cap the string at `limit` characters.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build a string from raw character codes.
    pub fn from_codes(codes: &[CharCode]) -> Self {
        Self {
            chars: codes.to_vec(),
            limit: None,
        }
    }

    /// Number of characters in use. O(1).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when the string holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.chars.capacity()
    }

    /// Hard length limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append one character code, growing the buffer when full.
    pub fn push(&mut self, code: CharCode) -> Result<()> {
        let requested = self.chars.len() + 1;
        if self.limit.is_some_and(|limit| requested > limit) {
            return Err(RuntimeError::CapacityExceeded { requested });
        }
        if self.chars.len() == self.chars.capacity() {
            let mut additional = self.chars.capacity().max(MIN_GROWTH);
            if let Some(limit) = self.limit {
                additional = additional.min(limit - self.chars.len());
            }
            self.chars
                .try_reserve(additional)
                .map_err(|_| RuntimeError::CapacityExceeded { requested })?;
        }
        self.chars.push(code);
        Ok(())
    }

    /// Remove and return the last character.
    pub fn pop(&mut self) -> Option<CharCode> {
        self.chars.pop()
    }

    /// Character at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<CharCode> {
        self.chars.get(index).copied()
    }

    /// Last character, if any.
    pub fn last(&self) -> Option<CharCode> {
        self.chars.last().copied()
    }

    /// Exchange the characters at `a` and `b`.
    ///
    /// Returns false and leaves the string unchanged if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.len() || b >= self.len() {
            return false;
        }
        self.chars.swap(a, b);
        true
    }

    /// Reverse the string in place.
    ///
    /// Two cursors walk in from both ends and swap while `left < right`, so an
    /// odd-length string keeps its middle character where it is.
    pub fn reverse(&mut self) {
        if self.chars.is_empty() {
            return;
        }
        let mut left = 0;
        let mut right = self.chars.len() - 1;
        while left < right {
            self.chars.swap(left, right);
            left += 1;
            right -= 1;
        }
    }

    /// The characters in use.
    pub fn as_codes(&self) -> &[CharCode] {
        &self.chars
    }

    /// Consume the string and return its characters.
    pub fn into_codes(self) -> Vec<CharCode> {
        self.chars
    }

    /// Iterate over the characters in order.
    pub fn iter(&self) -> impl Iterator<Item = CharCode> + '_ {
        self.chars.iter().copied()
    }
}

/// Literal construction: each byte of `literal` becomes one character code.
impl From<&str> for MangoString {
    fn from(literal: &str) -> Self {
        Self {
            chars: literal.bytes().map(CharCode::from).collect(),
            limit: None,
        }
    }
}

impl From<Vec<CharCode>> for MangoString {
    fn from(chars: Vec<CharCode>) -> Self {
        Self { chars, limit: None }
    }
}

impl PartialEq for MangoString {
    fn eq(&self, other: &Self) -> bool {
        equality::equals(self, other)
    }
}

impl Eq for MangoString {}

impl fmt::Display for MangoString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.iter() {
            let ch = char::from_u32(u32::from(code)).unwrap_or(char::REPLACEMENT_CHARACTER);
            fmt::Write::write_char(f, ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MangoString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MangoString({:?}, len: {})", self.to_string(), self.len())
    }
}
