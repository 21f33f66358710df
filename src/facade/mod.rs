//! Command Facade
//!
//! Typed, named operations over `Connection::send` / `send_receive`.
//! Each method only picks a command name and shapes its arguments;
//! responses that don't parse come back as `Parsed::Raw`.

mod entity;
mod events;
mod parse;
mod world;

pub use entity::{EntityHandle, PlayerRef, Target};
pub use events::{BlockHit, ChatPost, Events, ProjectileHit};
pub use parse::{
    parse_block_hits, parse_bool, parse_chat_posts, parse_csv, parse_entities, parse_f64,
    parse_int, parse_int_list, parse_projectile_hits, parse_tile, parse_vec3, EntityInfo, Parsed,
};
pub use world::World;

use std::net::TcpStream;

use crate::config::Config;
use crate::error::Result;
use crate::network::{Connection, Stream};

/// Pitch and yaw values in degrees
pub struct Dir;

impl Dir {
    pub const UP: f64 = -90.0;
    pub const FORWARD: f64 = 0.0;
    pub const DOWN: f64 = 90.0;

    pub const NORTH: f64 = 0.0;
    pub const NORTHEAST: f64 = 45.0;
    pub const EAST: f64 = 90.0;
    pub const SOUTHEAST: f64 = 135.0;
    pub const SOUTH: f64 = 180.0;
    pub const SOUTHWEST: f64 = 225.0;
    pub const WEST: f64 = 270.0;
    pub const NORTHWEST: f64 = 315.0;
}

/// Entry point owning one connection
pub struct Minecraft<S: Stream = TcpStream> {
    conn: Connection<S>,
}

impl Minecraft<TcpStream> {
    /// Open a connection to the configured server
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::from_connection(Connection::open(config)?))
    }
}

impl<S: Stream> Minecraft<S> {
    pub fn from_connection(conn: Connection<S>) -> Self {
        Self { conn }
    }

    pub fn connection(&mut self) -> &mut Connection<S> {
        &mut self.conn
    }

    pub fn into_connection(self) -> Connection<S> {
        self.conn
    }

    pub fn world(&mut self) -> World<'_, S> {
        World::new(&mut self.conn)
    }

    pub fn events(&mut self) -> Events<'_, S> {
        Events::new(&mut self.conn)
    }

    pub fn entity(&mut self, id: i64) -> EntityHandle<'_, S> {
        EntityHandle::entity(&mut self.conn, id)
    }

    /// Player handle; a gamertag is resolved to its id here, once
    pub fn player(&mut self, who: &PlayerRef) -> Result<EntityHandle<'_, S>> {
        EntityHandle::player(&mut self.conn, who)
    }
}
