//! Configuration for mcremote
//!
//! Centralized configuration with sensible defaults. There is no
//! process-wide default server: every connection is opened from an
//! explicit `Config`.

use std::time::Duration;

use crate::error::{McError, Result};

/// Default port of the remote-control mod
pub const DEFAULT_PORT: u16 = 4711;

/// Longest response line accepted (16 MB)
pub const DEFAULT_MAX_LINE_LEN: usize = 16 * 1024 * 1024;

/// Default nesting limit for argument flattening
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Main configuration for a client connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Server host name or IP address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout per resolved address (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds, 0 = block until a line arrives)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds, 0 = block)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Protocol Limits
    // -------------------------------------------------------------------------
    /// Longest response line accepted before the connection is dropped
    pub max_line_len: usize,

    /// Deepest argument nesting accepted by the flattener
    pub max_depth: usize,

    /// How reserved characters inside string arguments are handled
    pub delimiter_policy: DelimiterPolicy,
}

/// Treatment of reserved characters (`,` `(` `)` `|` and line breaks)
/// found inside string arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterPolicy {
    /// Replace them: `,`→`;` `(`→`[` `)`→`]` `|`→`/`, line breaks → space
    #[default]
    Substitute,

    /// Fail the call before anything is written
    Reject,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 5000,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            delimiter_policy: DelimiterPolicy::Substitute,
        }
    }
}

impl Config {
    /// Config for the given endpoint, everything else default
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form used for address resolution
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the endpoint and limits
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(McError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(McError::Config("port must not be 0".to_string()));
        }
        if self.max_line_len == 0 {
            return Err(McError::Config("max_line_len must be positive".to_string()));
        }
        Ok(())
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub(crate) fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub(crate) fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the longest accepted response line (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    /// Set the argument nesting limit
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the delimiter policy for string arguments
    pub fn delimiter_policy(mut self, policy: DelimiterPolicy) -> Self {
        self.config.delimiter_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
