//! Request definitions
//!
//! A command name plus its flattened argument tokens.

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::Result;

use super::value::{flatten_all, Arg, Token};

/// One outgoing command, built per call
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Namespaced command name, e.g. `world.setBlock`
    command: String,

    /// Arguments in wire order
    tokens: Vec<Token>,
}

impl Request {
    /// Flatten `args` (in order) into a request
    pub fn new(command: impl Into<String>, args: &[Arg]) -> Result<Self> {
        Self::with_depth(command, args, DEFAULT_MAX_DEPTH)
    }

    /// Same as `new` with an explicit nesting limit
    pub fn with_depth(command: impl Into<String>, args: &[Arg], max_depth: usize) -> Result<Self> {
        Ok(Self {
            command: command.into(),
            tokens: flatten_all(args, max_depth)?,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
