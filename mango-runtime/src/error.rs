//! Error surface of the runtime primitives.

use thiserror::Error;

use crate::Int;

/// Failures reported by the runtime primitives.
///
/// All of these are recoverable at the Rust API. At the C ABI they become
/// runtime traps, see [`crate::ffi`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Radix outside `[2, 36]`.
    #[error("invalid radix {radix}: expected a value between 2 and 36")]
    InvalidRadix {
        /// The rejected radix.
        radix: Int,
    },
    /// A character that is not a digit of the requested radix, or a missing digit.
    #[error("expected a base-{radix} digit at index {index}")]
    InvalidDigit {
        /// Position of the offending character in the string.
        index: usize,
        /// Radix the string was parsed in.
        radix: u32,
    },
    /// The value does not fit the 32-bit `Int` range.
    #[error("integer overflow: value does not fit a 32-bit Int")]
    Overflow,
    /// The character buffer could not grow to the requested length.
    #[error("string capacity exceeded: cannot hold {requested} characters")]
    CapacityExceeded {
        /// Length the buffer needed to reach.
        requested: usize,
    },
    /// The underlying stream failed.
    #[error("console i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = core::result::Result<T, RuntimeError>;
