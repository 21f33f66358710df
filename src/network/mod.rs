//! Network Module
//!
//! TCP client connection to the server mod.
//!
//! ## Model
//! - One blocking socket per `Connection`
//! - Half-duplex: one request line out, at most one response line back
//! - No reconnect; a Closed connection is replaced by opening a new one

mod connection;

pub use connection::{Connection, ConnectionState, SharedConnection, Stream};
