//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <command>(<token>,<token>,...)\n
//! ```
//!
//! ### Response
//! ```text
//! <payload>\n        success
//! Fail<message>\n    server-side error
//! ```
//!
//! The transport gives no framing beyond the newline, so responses are
//! accumulated in a `LineBuffer` across reads.

use std::borrow::Cow;
use std::io::{ErrorKind, Read, Write};

use bytes::BytesMut;

use crate::config::{DelimiterPolicy, DEFAULT_MAX_LINE_LEN};
use crate::error::{McError, Result};

use super::{Request, Response, Token};

/// Argument separator inside a request
pub const ARG_SEPARATOR: u8 = b',';

/// Record separator inside compound payloads
pub const RECORD_SEPARATOR: char = '|';

/// Characters a string argument must not carry verbatim
pub const RESERVED: &[char] = &[',', '(', ')', '|', '\n', '\r'];

/// Bytes requested from the socket per read
const READ_CHUNK: usize = 4096;

// =============================================================================
// Request Encoding
// =============================================================================

/// Check a command name before it is framed
pub fn validate_command(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(McError::Protocol("empty command name".to_string()));
    }
    if let Some(c) = name.chars().find(|c| RESERVED.contains(c)) {
        return Err(McError::Protocol(format!(
            "command name {:?} contains reserved character {:?}",
            name, c
        )));
    }
    Ok(())
}

/// Apply the delimiter policy to one string token
pub fn escape_str(s: &str, policy: DelimiterPolicy) -> Result<Cow<'_, str>> {
    if !s.contains(RESERVED) {
        return Ok(Cow::Borrowed(s));
    }

    match policy {
        DelimiterPolicy::Reject => {
            let c = s.chars().find(|c| RESERVED.contains(c)).unwrap_or(',');
            Err(McError::Argument(format!(
                "string argument {:?} contains reserved character {:?}",
                s, c
            )))
        }
        DelimiterPolicy::Substitute => Ok(Cow::Owned(
            s.chars()
                .map(|c| match c {
                    ',' => ';',
                    '(' => '[',
                    ')' => ']',
                    '|' => '/',
                    '\n' | '\r' => ' ',
                    other => other,
                })
                .collect(),
        )),
    }
}

/// Encode a request to one newline-terminated line
///
/// Format: `command(tok,tok,...)\n`
pub fn encode_request(request: &Request, policy: DelimiterPolicy) -> Result<Vec<u8>> {
    validate_command(request.command())?;

    let mut line = Vec::with_capacity(request.command().len() + 3 + request.tokens().len() * 4);
    line.extend_from_slice(request.command().as_bytes());
    line.push(b'(');

    for (i, token) in request.tokens().iter().enumerate() {
        if i > 0 {
            line.push(ARG_SEPARATOR);
        }
        match token {
            Token::Str(s) => line.extend_from_slice(escape_str(s, policy)?.as_bytes()),
            other => line.extend_from_slice(other.to_string().as_bytes()),
        }
    }

    line.push(b')');
    line.push(b'\n');
    Ok(line)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request, policy: DelimiterPolicy) -> Result<()> {
    let bytes = encode_request(request, policy)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode one response line (terminator already removed)
///
/// A trailing `\r` is dropped as well. Invalid UTF-8 is replaced with
/// U+FFFD rather than failing the call.
pub fn decode_response(line: &[u8]) -> Response {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Response::from_line(String::from_utf8_lossy(line).into_owned())
}

/// Read one complete response from a stream through `buffer`
///
/// Blocks until a full line is received or an error occurs
pub fn read_response<R: Read>(reader: &mut R, buffer: &mut LineBuffer) -> Result<Response> {
    let line = buffer.read_line(reader)?;
    Ok(decode_response(&line))
}

// =============================================================================
// Line Buffer
// =============================================================================

/// Accumulates incoming bytes and hands out complete lines.
///
/// Only the bytes up to the first `\n` are consumed per line; anything
/// after it stays buffered for the next call.
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,

    /// Bytes already known to contain no newline
    scanned: usize,

    max_line_len: usize,
}

impl LineBuffer {
    pub fn new(max_line_len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(READ_CHUNK),
            scanned: 0,
            max_line_len,
        }
    }

    /// Append raw bytes received from the transport
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Split off the next complete line, without its `\n`
    pub fn next_line(&mut self) -> Option<BytesMut> {
        match self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let end = self.scanned + offset;
                let mut line = self.buf.split_to(end + 1);
                line.truncate(end);
                self.scanned = 0;
                Some(line)
            }
            None => {
                self.scanned = self.buf.len();
                None
            }
        }
    }

    /// Return the next line, reading from `reader` as often as needed
    pub fn read_line<R: Read>(&mut self, reader: &mut R) -> Result<BytesMut> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.next_line() {
                return Ok(line);
            }

            if self.buf.len() > self.max_line_len {
                return Err(McError::Protocol(format!(
                    "response line exceeds {} bytes",
                    self.max_line_len
                )));
            }

            let n = match reader.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                return Err(McError::Network("connection closed by server".to_string()));
            }

            self.extend(&chunk[..n]);
        }
    }

    /// Bytes received but not yet returned as a line
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop everything buffered
    pub fn clear(&mut self) {
        self.buf.clear();
        self.scanned = 0;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LEN)
    }
}
