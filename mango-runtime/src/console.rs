//! Console I/O adapter.
//!
//! The adapter talks to the outside world only through [`ByteSource`] and
//! [`ByteSink`], so tests can swap the process streams for in-memory buffers.

use std::io::{self, BufRead, StdinLock, StdoutLock, Write};

use tracing::{debug, trace};

use crate::config::RuntimeConfig;
use crate::constants::LINE_TERMINATOR;
use crate::error::Result;
use crate::string::{CharCode, MangoString};

const CARRIAGE_RETURN: CharCode = b'\r' as CharCode;

/// Pulls one input unit at a time.
pub trait ByteSource {
    /// Next byte, or `None` at end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Pushes one output unit at a time.
pub trait ByteSink {
    /// Write a single byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Deliver anything buffered.
    fn flush(&mut self) -> io::Result<()>;
}

/// Reads through the reader's buffer, so nothing past the returned byte is consumed.
impl<R: BufRead> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if byte.is_some() {
                self.consume(1);
            }
            return Ok(byte);
        }
    }
}

impl<W: Write> ByteSink for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(self)
    }
}

/// A pair of console streams plus the runtime configuration.
pub struct Console<I, O> {
    input: I,
    output: O,
    config: RuntimeConfig,
}

impl Console<StdinLock<'static>, StdoutLock<'static>> {
    /// Bind the process's standard input and output.
    pub fn stdio(config: RuntimeConfig) -> Self {
        Self::new(io::stdin().lock(), io::stdout().lock(), config)
    }
}

impl<I: ByteSource, O: ByteSink> Console<I, O> {
    /// Wrap explicit streams.
    pub fn new(input: I, output: O, config: RuntimeConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Read one line; end of stream yields the empty string.
    ///
    /// The terminator is consumed but not included. Blocks until a full line
    /// or end of stream is available.
    pub fn read_line(&mut self) -> Result<MangoString> {
        Ok(self.next_line()?.unwrap_or_default())
    }

    /// Read one line, or `None` if the stream was already exhausted.
    ///
    /// Unlike [`Console::read_line`] this tells an empty line apart from end of stream.
    pub fn next_line(&mut self) -> Result<Option<MangoString>> {
        let mut line = self.line_buffer()?;
        let mut saw_input = false;
        // A carriage return is held back until we know it is not the last character.
        let mut pending_cr = false;

        while let Some(byte) = self.input.read_byte()? {
            saw_input = true;
            if byte == LINE_TERMINATOR {
                break;
            }
            if pending_cr {
                pending_cr = false;
                self.push_or_skip(&mut line, CARRIAGE_RETURN)?;
            }
            if self.config.trim_carriage_return && CharCode::from(byte) == CARRIAGE_RETURN {
                pending_cr = true;
                continue;
            }
            self.push_or_skip(&mut line, CharCode::from(byte))?;
        }

        if !saw_input {
            trace!("console input exhausted");
            return Ok(None);
        }
        debug!(length = line.len(), "read line");
        Ok(Some(line))
    }

    /// Write every character of `s` in order.
    pub fn write_string(&mut self, s: &MangoString) -> Result<()> {
        self.write_codes(s.as_codes())
    }

    /// Write `s` followed by a line terminator.
    pub fn write_line(&mut self, s: &MangoString) -> Result<()> {
        self.write_line_codes(s.as_codes())
    }

    /// Force buffered output out to the stream.
    pub fn flush(&mut self) -> Result<()> {
        ByteSink::flush(&mut self.output)?;
        Ok(())
    }

    /// Release the underlying streams.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }

    // Each character emits its low byte, as C putchar does.
    pub(crate) fn write_codes(&mut self, codes: &[CharCode]) -> Result<()> {
        for &code in codes {
            let [low, _] = code.to_le_bytes();
            self.output.write_byte(low)?;
        }
        Ok(())
    }

    pub(crate) fn write_line_codes(&mut self, codes: &[CharCode]) -> Result<()> {
        self.write_codes(codes)?;
        self.output.write_byte(LINE_TERMINATOR)?;
        Ok(())
    }

    /// Append to `line`. On failure the rest of the line is discarded so the
    /// next read starts at the following line.
    fn push_or_skip(&mut self, line: &mut MangoString, code: CharCode) -> Result<()> {
        if let Err(err) = line.push(code) {
            self.skip_line()?;
            return Err(err);
        }
        Ok(())
    }

    fn skip_line(&mut self) -> Result<()> {
        let mut skipped = 0usize;
        while let Some(byte) = self.input.read_byte()? {
            if byte == LINE_TERMINATOR {
                break;
            }
            skipped += 1;
        }
        debug!(skipped, "discarded rest of over-long line");
        Ok(())
    }

    fn line_buffer(&self) -> Result<MangoString> {
        let capacity = match self.config.max_line_length {
            Some(limit) => self.config.line_capacity.min(limit),
            None => self.config.line_capacity,
        };
        let line = MangoString::with_capacity(capacity)?;
        Ok(match self.config.max_line_length {
            Some(limit) => line.with_limit(limit),
            None => line,
        })
    }
}
