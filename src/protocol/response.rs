//! Response definitions
//!
//! Represents one decoded response line.

use crate::error::{McError, Result};

/// Marker the server puts at the start of an error line
pub const FAIL_MARKER: &str = "Fail";

/// A decoded response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Payload string, still unparsed
    Ok(String),

    /// The whole `Fail...` line, kept as diagnostic text
    Fail(String),
}

impl Response {
    /// Classify a line that already had its terminator removed
    pub fn from_line(line: String) -> Self {
        if line.starts_with(FAIL_MARKER) {
            Response::Fail(line)
        } else {
            Response::Ok(line)
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Response::Fail(_))
    }

    /// Payload, or `McError::ServerFail` carrying the server's text
    pub fn into_result(self) -> Result<String> {
        match self {
            Response::Ok(payload) => Ok(payload),
            Response::Fail(message) => Err(McError::ServerFail(message)),
        }
    }
}
