#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![doc = r#"
Runtime support library for the mango language.

Every program compiled by the mango toolchain links this crate. It owns the
language's string representation and the handful of primitives the compiler
emits calls to: console input/output, integer/string conversion in any radix
from 2 to 36, and string equality.

```rust
use mango_runtime::{int_to_string, string_to_int, MangoString};

let digits = int_to_string(255, 16).unwrap();
assert_eq!(digits, MangoString::from("ff"));
assert_eq!(string_to_int(&digits, 16).unwrap(), 255);
```
"#]

pub mod config;
pub mod console;
pub mod convert;
pub mod equality;
pub mod error;
#[cfg(feature = "abi")]
pub mod ffi;
pub mod string;

pub use config::RuntimeConfig;
pub use console::{ByteSink, ByteSource, Console};
pub use convert::{int_to_string, string_to_int};
pub use equality::equals;
pub use error::{Result, RuntimeError};
pub use string::{CharCode, MangoString};

/// The mango `Int` type. Compiled programs use a 32-bit signed integer.
pub type Int = i32;

/// Runtime-wide constants
pub mod constants {
    use crate::{CharCode, Int};

    /// Smallest radix accepted by the conversion primitives
    pub const MIN_RADIX: Int = 2;

    /// Largest radix accepted by the conversion primitives
    pub const MAX_RADIX: Int = 36;

    /// Line terminator consumed by `readLine` and emitted by `writeLine`
    pub const LINE_TERMINATOR: u8 = b'\n';

    /// Sign character for negative decimal numbers
    pub const MINUS: CharCode = b'-' as CharCode;

    /// Initial reservation for a line read from the console
    pub const DEFAULT_LINE_CAPACITY: usize = 256;

    /// Longest possible `Int` rendering: 32 binary digits
    pub const MAX_INT_DIGITS: usize = 32;
}

/// Prelude for compiled-program support code
pub mod prelude {
    pub use super::constants::*;
    pub use super::{
        equals, int_to_string, string_to_int, ByteSink, ByteSource, CharCode, Console, Int,
        MangoString, Result, RuntimeConfig, RuntimeError,
    };
}
