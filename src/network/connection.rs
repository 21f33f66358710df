//! Connection
//!
//! Owns the socket and the incoming line buffer, and exposes the two
//! protocol primitives: `send` and `send_receive`.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{McError, Result};
use crate::protocol::{read_response, write_request, Arg, LineBuffer, Request};

/// Byte stream a connection can run over
pub trait Stream: Read + Write {
    /// Best-effort close of both directions
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for TcpStream {
    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Socket live, buffer may hold unread bytes
    Open,

    /// Terminal; every operation fails with `ConnectionClosed`
    Closed,
}

/// A client connection to the server mod
///
/// Strictly one request in flight: `send_receive` writes one line and reads
/// exactly one line back. Not thread-safe; see `SharedConnection`.
pub struct Connection<S: Stream = TcpStream> {
    stream: S,

    /// Bytes read past the end of the last response
    buffer: LineBuffer,

    state: ConnectionState,

    config: Config,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection<TcpStream> {
    /// Connect to the configured endpoint
    ///
    /// Fails fast if no resolved address accepts the connection.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        let addrs = addr
            .to_socket_addrs()
            .map_err(|e| McError::Network(format!("cannot resolve {}: {}", addr, e)))?;

        let mut last_err = None;
        let mut stream = None;
        for candidate in addrs {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&candidate, timeout),
                None => TcpStream::connect(candidate),
            };
            match attempt {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", candidate, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = stream.ok_or_else(|| {
            McError::Network(match last_err {
                Some(e) => format!("cannot connect to {}: {}", addr, e),
                None => format!("{} resolved to no addresses", addr),
            })
        })?;

        stream.set_nodelay(config.nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self::with_peer(stream, config, peer_addr))
    }
}

impl<S: Stream> Connection<S> {
    /// Wrap an already connected stream
    pub fn from_stream(stream: S, config: &Config) -> Self {
        Self::with_peer(stream, config, config.addr())
    }

    fn with_peer(stream: S, config: &Config, peer_addr: String) -> Self {
        Self {
            stream,
            buffer: LineBuffer::new(config.max_line_len),
            state: ConnectionState::Open,
            config: config.clone(),
            peer_addr,
        }
    }

    /// Send a one-way command; no response is read
    pub fn send(&mut self, command: &str, args: &[Arg]) -> Result<()> {
        self.ensure_open()?;

        let request = Request::with_depth(command, args, self.config.max_depth)?;
        self.write(&request)
    }

    /// Send a command and read its single response line
    ///
    /// Returns the payload, or `McError::ServerFail` when the line starts
    /// with `Fail` (the connection stays open in that case).
    pub fn send_receive(&mut self, command: &str, args: &[Arg]) -> Result<String> {
        self.ensure_open()?;

        let request = Request::with_depth(command, args, self.config.max_depth)?;
        self.write(&request)?;

        let response = match read_response(&mut self.stream, &mut self.buffer) {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e)),
        };

        tracing::trace!("Received from {}: {:?}", self.peer_addr, response);

        response.into_result()
    }

    /// Close the connection (idempotent)
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;
        self.buffer.clear();
        if let Err(e) = self.stream.shutdown() {
            tracing::debug!("Shutdown of {} failed: {}", self.peer_addr, e);
        }
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bytes received but not yet consumed by a response
    pub fn pending_bytes(&self) -> usize {
        self.buffer.pending()
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            ConnectionState::Open => Ok(()),
            ConnectionState::Closed => Err(McError::ConnectionClosed),
        }
    }

    fn write(&mut self, request: &Request) -> Result<()> {
        tracing::debug!("Sending to {}: {}({} args)", self.peer_addr, request.command(), request.tokens().len());

        match write_request(&mut self.stream, request, self.config.delimiter_policy) {
            Ok(()) => Ok(()),
            // Rejected before any byte was written
            Err(e @ (McError::Argument(_) | McError::Protocol(_))) => Err(e),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Transport and framing failures leave the stream position unknown:
    /// close, then hand the error back.
    fn fail(&mut self, e: McError) -> McError {
        match &e {
            McError::Io(io_err)
                if matches!(io_err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                tracing::warn!("Read from {} timed out, closing connection", self.peer_addr);
            }
            _ => tracing::warn!("Connection to {} failed: {}", self.peer_addr, e),
        }
        self.close();
        e
    }
}

impl<S: Stream> Drop for Connection<S> {
    fn drop(&mut self) {
        self.close();
    }
}

// =============================================================================
// Shared Connection
// =============================================================================

/// Cloneable handle serializing access to one connection across threads
///
/// Each call holds the lock for its whole write/read pair, so responses can
/// never be attributed to another thread's request.
pub struct SharedConnection<S: Stream = TcpStream> {
    inner: Arc<Mutex<Connection<S>>>,
}

impl<S: Stream> SharedConnection<S> {
    pub fn new(connection: Connection<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    pub fn send(&self, command: &str, args: &[Arg]) -> Result<()> {
        self.inner.lock().send(command, args)
    }

    pub fn send_receive(&self, command: &str, args: &[Arg]) -> Result<String> {
        self.inner.lock().send_receive(command, args)
    }

    /// Run several calls under one lock
    pub fn with<T>(&self, f: impl FnOnce(&mut Connection<S>) -> T) -> T {
        f(&mut self.inner.lock())
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open()
    }

    pub fn close(&self) {
        self.inner.lock().close();
    }
}

impl<S: Stream> Clone for SharedConnection<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
