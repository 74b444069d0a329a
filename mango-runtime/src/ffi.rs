//! C ABI linked by compiled mango programs.
//!
//! The string layout is `struct String { U32 length; I16* chars; }`. Strings
//! handed out by the runtime are owned by the caller and released with
//! [`mango_string_free`] or [`mango_string_release`]. Null string pointers
//! read as the empty string.
//!
//! The ABI has no error channel, so any [`RuntimeError`] raised here is a
//! runtime trap: it is reported on stderr and the process aborts.
#![allow(unsafe_code)]

use std::io::{self, StdinLock, StdoutLock};
use std::{ptr, slice};

use tracing::error;

use crate::console::{ByteSink, ByteSource, Console};
use crate::convert::{int_to_string, parse_codes};
use crate::equality::codes_equal;
use crate::error::{Result, RuntimeError};
use crate::string::{CharCode, MangoString};
use crate::{Int, RuntimeConfig};

/// A mango string as seen by compiled code.
#[repr(C)]
#[derive(Debug)]
pub struct RawString {
    /// Number of characters.
    pub length: u32,
    /// Heap buffer of `length` character codes.
    pub chars: *mut CharCode,
}

impl RawString {
    /// The empty string.
    pub const EMPTY: RawString = RawString {
        length: 0,
        chars: ptr::null_mut(),
    };

    /// Hand the characters of `string` over to a C-owned buffer.
    pub fn from_string(string: MangoString) -> Result<Self> {
        let codes = string.into_codes().into_boxed_slice();
        let length = u32::try_from(codes.len()).map_err(|_| RuntimeError::CapacityExceeded {
            requested: codes.len(),
        })?;
        let chars = Box::into_raw(codes).cast::<CharCode>();
        Ok(Self { length, chars })
    }

    unsafe fn codes<'a>(raw: *const RawString) -> &'a [CharCode] {
        match unsafe { raw.as_ref() } {
            Some(raw) if !raw.chars.is_null() && raw.length > 0 => unsafe {
                slice::from_raw_parts(raw.chars, raw.length as usize)
            },
            _ => &[],
        }
    }

    unsafe fn release(self) {
        if !self.chars.is_null() {
            let codes = ptr::slice_from_raw_parts_mut(self.chars, self.length as usize);
            drop(unsafe { Box::from_raw(codes) });
        }
    }
}

fn trap(err: RuntimeError) -> ! {
    error!(%err, "mango runtime trap");
    eprintln!("mango runtime error: {err}");
    std::process::abort()
}

fn or_trap<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| trap(err))
}

fn with_stdout<T>(op: impl FnOnce(&mut Console<io::Empty, StdoutLock<'static>>) -> Result<T>) -> T {
    let mut console = Console::new(io::empty(), io::stdout().lock(), RuntimeConfig::default());
    or_trap(op(&mut console))
}

fn with_stdin<T>(op: impl FnOnce(&mut Console<StdinLock<'static>, io::Sink>) -> Result<T>) -> T {
    let mut console = Console::new(io::stdin().lock(), io::sink(), RuntimeConfig::default());
    or_trap(op(&mut console))
}

fn read_raw_line<I: ByteSource, O: ByteSink>(console: &mut Console<I, O>) -> Result<RawString> {
    console.read_line().and_then(RawString::from_string)
}

fn write_raw<I: ByteSource, O: ByteSink>(
    console: &mut Console<I, O>,
    codes: &[CharCode],
    terminate: bool,
) -> Result<()> {
    if terminate {
        console.write_line_codes(codes)
    } else {
        console.write_codes(codes)
    }
}

/// Write `string` to standard output.
///
/// # Safety
///
/// `string` must be null or point to a valid `RawString`.
#[no_mangle]
pub unsafe extern "C" fn print(string: *const RawString) {
    let codes = unsafe { RawString::codes(string) };
    with_stdout(|console| write_raw(console, codes, false));
}

/// Write `string` and a line terminator to standard output.
///
/// # Safety
///
/// `string` must be null or point to a valid `RawString`.
#[no_mangle]
pub unsafe extern "C" fn println(string: *const RawString) {
    let codes = unsafe { RawString::codes(string) };
    with_stdout(|console| write_raw(console, codes, true));
}

/// Read one line from standard input.
#[no_mangle]
pub extern "C" fn readln() -> RawString {
    with_stdin(read_raw_line)
}

/// Flush standard output.
#[export_name = "flushPrint"]
pub extern "C" fn flush_print() {
    with_stdout(|console| console.flush());
}

/// Format `num` in `radix` into a newly allocated string.
#[export_name = "intToString"]
pub extern "C" fn int_to_string_raw(num: Int, radix: Int) -> *mut RawString {
    let string = or_trap(int_to_string(num, radix).and_then(RawString::from_string));
    Box::into_raw(Box::new(string))
}

/// Parse `string` as an `Int` in `radix`.
///
/// # Safety
///
/// `string` must be null or point to a valid `RawString`.
#[export_name = "stringToInt"]
pub unsafe extern "C" fn string_to_int_raw(string: *const RawString, radix: Int) -> Int {
    or_trap(parse_codes(unsafe { RawString::codes(string) }, radix))
}

/// Structural equality of two strings.
///
/// # Safety
///
/// Both pointers must be null or point to valid `RawString`s.
#[export_name = "String$equals"]
pub unsafe extern "C" fn string_equals_raw(a: *const RawString, b: *const RawString) -> bool {
    unsafe { codes_equal(RawString::codes(a), RawString::codes(b)) }
}

/// Free a string returned by pointer, such as the result of `intToString`.
///
/// # Safety
///
/// `string` must be null or come from this runtime and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn mango_string_free(string: *mut RawString) {
    if !string.is_null() {
        let raw = unsafe { *Box::from_raw(string) };
        unsafe { raw.release() };
    }
}

/// Free a string returned by value, such as the result of `readln`.
///
/// # Safety
///
/// `string` must come from this runtime and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn mango_string_release(string: RawString) {
    unsafe { string.release() };
}
