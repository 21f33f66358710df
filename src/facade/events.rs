//! Event queues
//!
//! The server buffers block hits, chat posts and projectile hits until a
//! client polls them. Polling drains the queue.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::{Connection, Stream};
use crate::protocol::Arg;
use crate::vec3::Vec3;

use super::parse::{parse_block_hits, parse_chat_posts, parse_projectile_hits, Parsed};

/// A block struck with a sword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHit {
    /// Block coordinates
    pub pos: Vec3,
    /// Face that was hit
    pub face: i64,
    /// Entity that hit it
    pub entity_id: i64,
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPost {
    pub entity_id: i64,
    pub message: String,
}

/// A projectile landing on a block or an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileHit {
    pub pos: Vec3,
    /// Name of the shooter
    pub origin_name: String,
    /// Entity struck, 0 when only a block was hit
    pub target_id: i64,
    pub target_type: String,
}

/// Server-wide event queues (`events.*`)
pub struct Events<'a, S: Stream> {
    conn: &'a mut Connection<S>,
}

impl<'a, S: Stream> Events<'a, S> {
    pub fn new(conn: &'a mut Connection<S>) -> Self {
        Self { conn }
    }

    /// Drop all buffered events
    pub fn clear_all(&mut self) -> Result<()> {
        self.conn.send("events.clear", &[])
    }

    pub fn poll_block_hits(&mut self) -> Result<Parsed<Vec<BlockHit>>> {
        poll(self.conn, "events", &Arg::none(), "block.hits", parse_block_hits)
    }

    pub fn poll_chat_posts(&mut self) -> Result<Parsed<Vec<ChatPost>>> {
        poll(self.conn, "events", &Arg::none(), "chat.posts", parse_chat_posts)
    }

    pub fn poll_projectile_hits(&mut self) -> Result<Parsed<Vec<ProjectileHit>>> {
        poll(self.conn, "events", &Arg::none(), "projectile.hits", parse_projectile_hits)
    }
}

/// `<prefix>.events.<queue>(target)` for entity queues, `events.<queue>()`
/// for the global ones
pub(crate) fn poll<S: Stream, T>(
    conn: &mut Connection<S>,
    prefix: &str,
    target: &Arg,
    queue: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Parsed<T>> {
    let command = if prefix == "events" {
        format!("events.{}", queue)
    } else {
        format!("{}.events.{}", prefix, queue)
    };
    let payload = conn.send_receive(&command, std::slice::from_ref(target))?;
    Ok(Parsed::from_payload(payload, parse))
}
