//! # mcremote
//!
//! A blocking client for the line-oriented remote-control protocol spoken
//! by Minecraft server mods (RaspberryJuice / MCPythonMod style):
//! - Argument flattening (scalars, strings, `Vec3`, nested lists)
//! - Newline-framed request/response codec with `Fail` detection
//! - Persistent TCP connection with buffered partial reads
//! - Thin typed facade for world, entity, player and event commands
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Command Facade                              │
//! │     (World / EntityHandle / Events, Parsed<T> | Raw)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ send / send_receive
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Connection                                │
//! │          (TcpStream + LineBuffer, Open → Closed)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │◄─────────│  Flattener  │
//!   │ (one line)  │          │ (Arg→Token) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use mcremote::{args, Config, Connection, Vec3};
//!
//! let mut conn = Connection::open(&Config::new("localhost", 4711))?;
//! conn.send("world.setBlock", &args![Vec3::new(0.0, 64.0, 0.0), "STONE"])?;
//! let pos = conn.send_receive("player.getPos", &[])?;
//! println!("{}", pos);
//! # Ok::<(), mcremote::McError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod vec3;

pub mod protocol;
pub mod network;
pub mod facade;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{McError, Result};
pub use config::{Config, DelimiterPolicy};
pub use vec3::Vec3;
pub use protocol::{flatten, Arg, Token};
pub use network::{Connection, ConnectionState, SharedConnection};
pub use facade::{Minecraft, Parsed, PlayerRef};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mcremote
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
