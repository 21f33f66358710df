//! World commands
//!
//! Blocks, players, entities, checkpoints and chat (`world.*`, `chat.*`).

use crate::config::DelimiterPolicy;
use crate::error::Result;
use crate::network::{Connection, Stream};
use crate::protocol::{escape_str, Arg};
use crate::vec3::Vec3;

use super::parse::{parse_bool, parse_csv, parse_entities, parse_int, parse_int_list, EntityInfo, Parsed};

/// Operations on the world as a whole
pub struct World<'a, S: Stream> {
    conn: &'a mut Connection<S>,
}

impl<'a, S: Stream> World<'a, S> {
    pub fn new(conn: &'a mut Connection<S>) -> Self {
        Self { conn }
    }

    // -------------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------------

    /// Material name of the block at `pos`
    pub fn get_block(&mut self, pos: Vec3) -> Result<String> {
        self.conn.send_receive("world.getBlock", &[Arg::tile(pos)])
    }

    pub fn get_block_with_data(&mut self, pos: Vec3) -> Result<String> {
        self.conn.send_receive("world.getBlockWithData", &[Arg::tile(pos)])
    }

    /// Materials of every block in the cuboid spanned by `a` and `b`
    pub fn get_blocks(&mut self, a: Vec3, b: Vec3) -> Result<Vec<String>> {
        let payload = self.conn.send_receive("world.getBlocks", &[Arg::tile(a), Arg::tile(b)])?;
        Ok(parse_csv(&payload))
    }

    pub fn set_block(&mut self, pos: Vec3, material: &str) -> Result<()> {
        self.conn.send("world.setBlock", &[Arg::tile(pos), material.into()])
    }

    /// `set_block` with trailing block data arguments
    pub fn set_block_with(&mut self, pos: Vec3, material: &str, extra: Vec<Arg>) -> Result<()> {
        self.conn.send("world.setBlock", &[Arg::tile(pos), material.into(), Arg::List(extra)])
    }

    /// Fill the cuboid spanned by `a` and `b`
    pub fn set_blocks(&mut self, a: Vec3, b: Vec3, material: &str) -> Result<()> {
        self.conn.send("world.setBlocks", &[Arg::tile(a), Arg::tile(b), material.into()])
    }

    /// Place a sign. Line text always has separators substituted, whatever
    /// the connection's delimiter policy.
    pub fn set_sign(&mut self, pos: Vec3, material: &str, facing: &str, lines: &[&str]) -> Result<()> {
        let lines = lines
            .iter()
            .map(|line| escape_str(line, DelimiterPolicy::Substitute).map(|s| Arg::Str(s.into_owned())))
            .collect::<Result<Vec<_>>>()?;
        self.conn.send(
            "world.setSign",
            &[Arg::tile(pos), material.into(), facing.into(), Arg::List(lines)],
        )
    }

    /// Y of the highest non-air block at column (x, z)
    pub fn get_height(&mut self, x: f64, z: f64) -> Result<Parsed<i64>> {
        let column = [x.floor() as i64, z.floor() as i64];
        let payload = self.conn.send_receive("world.getHeight", &[column.into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    // -------------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------------

    /// Entity ids of every connected player
    pub fn get_player_entity_ids(&mut self) -> Result<Parsed<Vec<i64>>> {
        let payload = self.conn.send_receive("world.getPlayerIds", &[])?;
        Ok(Parsed::from_payload(payload, parse_int_list))
    }

    pub fn get_player_entity_id(&mut self, name: &str) -> Result<Parsed<i64>> {
        let payload = self.conn.send_receive("world.getPlayerId", &[name.into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    // -------------------------------------------------------------------------
    // World State
    // -------------------------------------------------------------------------

    pub fn save_checkpoint(&mut self) -> Result<()> {
        self.conn.send("world.checkpoint.save", &[])
    }

    pub fn restore_checkpoint(&mut self) -> Result<()> {
        self.conn.send("world.checkpoint.restore", &[])
    }

    pub fn post_to_chat(&mut self, message: &str) -> Result<()> {
        self.conn.send("chat.post", &[message.into()])
    }

    /// World setting, e.g. `world_immutable` or `nametags_visible`
    pub fn setting(&mut self, key: &str, enabled: bool) -> Result<()> {
        self.conn.send("world.setting", &[key.into(), Arg::Int(enabled as i64)])
    }

    // -------------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------------

    /// Names of all entity types the server knows
    pub fn get_entity_types(&mut self) -> Result<Vec<String>> {
        let payload = self.conn.send_receive("world.getEntityTypes", &[])?;
        Ok(parse_csv(&payload))
    }

    /// All loaded entities, optionally of one type
    pub fn get_entities(&mut self, type_id: Option<&str>) -> Result<Parsed<Vec<EntityInfo>>> {
        let payload = self
            .conn
            .send_receive("world.getEntities", &[type_id.unwrap_or("").into()])?;
        Ok(Parsed::from_payload(payload, parse_entities))
    }

    /// Number of entities removed
    pub fn remove_entity(&mut self, id: i64) -> Result<Parsed<i64>> {
        let payload = self.conn.send_receive("world.removeEntity", &[id.into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    pub fn remove_entities(&mut self, type_id: &str) -> Result<Parsed<i64>> {
        let payload = self.conn.send_receive("world.removeEntities", &[type_id.into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    pub fn set_entity_name(&mut self, id: i64, name: &str) -> Result<Parsed<bool>> {
        let payload = self
            .conn
            .send_receive("world.setEntityName", &[id.into(), name.into()])?;
        Ok(Parsed::from_payload(payload, parse_bool))
    }

    /// Spawn an entity and return its id
    pub fn spawn_entity(&mut self, pos: Vec3, type_id: &str, baby: bool) -> Result<Parsed<i64>> {
        let age = if baby { "BABY" } else { "" };
        let payload = self
            .conn
            .send_receive("world.spawnEntity", &[pos.into(), type_id.into(), age.into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }
}
