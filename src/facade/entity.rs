//! Entity and player handles
//!
//! Positioner, entity and event operations addressed to one target.

use crate::error::{McError, Result};
use crate::network::{Connection, Stream};
use crate::protocol::Arg;
use crate::vec3::Vec3;

use super::events::{self, BlockHit, ChatPost, ProjectileHit};
use super::parse::{
    parse_block_hits, parse_bool, parse_chat_posts, parse_entities, parse_f64, parse_int,
    parse_projectile_hits, parse_tile, parse_vec3, EntityInfo, Parsed,
};

/// Who a player handle refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    ById(i64),
    ByName(String),
    /// Let the server pick its default (oldest) player
    Unspecified,
}

impl PlayerRef {
    /// Numeric text is an id, empty text is `Unspecified`, anything else a gamertag
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            PlayerRef::Unspecified
        } else if let Ok(id) = s.parse() {
            PlayerRef::ById(id)
        } else {
            PlayerRef::ByName(s.to_string())
        }
    }

    /// Look the reference up once; gamertags cost one `world.getPlayerId`
    pub fn resolve<S: Stream>(&self, conn: &mut Connection<S>) -> Result<Target> {
        match self {
            PlayerRef::ById(id) => Ok(Target::Id(*id)),
            PlayerRef::Unspecified => Ok(Target::Default),
            PlayerRef::ByName(name) => {
                let payload = conn.send_receive("world.getPlayerId", &[Arg::from(name)])?;
                parse_int(&payload)
                    .map(Target::Id)
                    .ok_or_else(|| McError::PlayerNotFound(name.clone()))
            }
        }
    }
}

impl From<i64> for PlayerRef {
    fn from(id: i64) -> Self {
        PlayerRef::ById(id)
    }
}

impl From<&str> for PlayerRef {
    fn from(name: &str) -> Self {
        PlayerRef::ByName(name.to_string())
    }
}

/// A resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Id(i64),
    /// Server-chosen player; the id argument is omitted
    Default,
}

impl Target {
    fn arg(self) -> Arg {
        match self {
            Target::Id(id) => Arg::Int(id),
            Target::Default => Arg::none(),
        }
    }
}

/// Operations on one entity or player
///
/// The command package follows the target: `entity` for entities,
/// `multiplayer` for a specific player, `player` for the server's default.
pub struct EntityHandle<'a, S: Stream> {
    conn: &'a mut Connection<S>,
    pkg: &'static str,
    target: Target,
}

impl<'a, S: Stream> EntityHandle<'a, S> {
    pub fn entity(conn: &'a mut Connection<S>, id: i64) -> Self {
        Self {
            conn,
            pkg: "entity",
            target: Target::Id(id),
        }
    }

    /// Resolve `who` and build a player handle
    pub fn player(conn: &'a mut Connection<S>, who: &PlayerRef) -> Result<Self> {
        let target = who.resolve(conn)?;
        let pkg = match target {
            Target::Id(_) => "multiplayer",
            Target::Default => "player",
        };
        Ok(Self { conn, pkg, target })
    }

    pub fn package(&self) -> &'static str {
        self.pkg
    }

    pub fn target(&self) -> Target {
        self.target
    }

    // -------------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------------

    fn cmd(&self, verb: &str) -> String {
        format!("{}.{}", self.pkg, verb)
    }

    fn send(&mut self, verb: &str, args: Vec<Arg>) -> Result<()> {
        let command = self.cmd(verb);
        let mut all = vec![self.target.arg()];
        all.extend(args);
        self.conn.send(&command, &all)
    }

    fn query(&mut self, verb: &str, args: Vec<Arg>) -> Result<String> {
        let command = self.cmd(verb);
        let mut all = vec![self.target.arg()];
        all.extend(args);
        self.conn.send_receive(&command, &all)
    }

    /// `entity.*` commands always carry an explicit id
    fn entity_query(&mut self, verb: &str, args: Vec<Arg>) -> Result<String> {
        let id = match self.target {
            Target::Id(id) => id,
            Target::Default => {
                return Err(McError::Argument(format!(
                    "entity.{} needs an explicit entity id",
                    verb
                )))
            }
        };
        let mut all = vec![Arg::Int(id)];
        all.extend(args);
        self.conn.send_receive(&format!("entity.{}", verb), &all)
    }

    // -------------------------------------------------------------------------
    // Positioner
    // -------------------------------------------------------------------------

    /// Entity type, e.g. `SKELETON`
    pub fn get_type(&mut self) -> Result<String> {
        self.query("getType", vec![])
    }

    pub fn get_pos(&mut self) -> Result<Parsed<Vec3>> {
        let payload = self.query("getPos", vec![])?;
        Ok(Parsed::from_payload(payload, parse_vec3))
    }

    pub fn set_pos(&mut self, pos: Vec3) -> Result<()> {
        self.send("setPos", vec![pos.into()])
    }

    pub fn get_tile_pos(&mut self) -> Result<Parsed<Vec3>> {
        let payload = self.query("getTile", vec![])?;
        Ok(Parsed::from_payload(payload, parse_tile))
    }

    /// Move to the block containing `pos`
    pub fn set_tile_pos(&mut self, pos: Vec3) -> Result<()> {
        self.send("setTile", vec![Arg::tile(pos)])
    }

    /// Unit vector the target is looking along
    pub fn get_direction(&mut self) -> Result<Parsed<Vec3>> {
        let payload = self.query("getDirection", vec![])?;
        Ok(Parsed::from_payload(payload, parse_vec3))
    }

    pub fn set_direction(&mut self, dir: Vec3) -> Result<()> {
        self.send("setDirection", vec![dir.into()])
    }

    /// Yaw in degrees
    pub fn get_rotation(&mut self) -> Result<Parsed<f64>> {
        let payload = self.query("getRotation", vec![])?;
        Ok(Parsed::from_payload(payload, parse_f64))
    }

    pub fn set_rotation(&mut self, yaw: f64) -> Result<()> {
        self.send("setRotation", vec![yaw.into()])
    }

    pub fn get_pitch(&mut self) -> Result<Parsed<f64>> {
        let payload = self.query("getPitch", vec![])?;
        Ok(Parsed::from_payload(payload, parse_f64))
    }

    pub fn set_pitch(&mut self, pitch: f64) -> Result<()> {
        self.send("setPitch", vec![pitch.into()])
    }

    /// Per-package setting, e.g. `autojump`. Not addressed to the target.
    pub fn setting(&mut self, key: &str, enabled: bool) -> Result<()> {
        let command = self.cmd("setting");
        self.conn.send(&command, &[key.into(), Arg::Int(enabled as i64)])
    }

    // -------------------------------------------------------------------------
    // Entity
    // -------------------------------------------------------------------------

    pub fn get_name(&mut self) -> Result<String> {
        self.entity_query("getName", vec![])
    }

    /// Entities within `distance` of the target, optionally of one type
    pub fn get_entities(&mut self, distance: u32, type_id: Option<&str>) -> Result<Parsed<Vec<EntityInfo>>> {
        let payload = self.query("getEntities", vec![distance.into(), type_id.unwrap_or("").into()])?;
        Ok(Parsed::from_payload(payload, parse_entities))
    }

    /// Number of entities removed
    pub fn remove_entities(&mut self, distance: u32, type_id: Option<&str>) -> Result<Parsed<i64>> {
        let payload = self.query("removeEntities", vec![distance.into(), type_id.unwrap_or("").into()])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    /// 0 is adult, negative is baby
    pub fn get_age(&mut self) -> Result<Parsed<i64>> {
        let payload = self.entity_query("getAge", vec![])?;
        Ok(Parsed::from_payload(payload, parse_int))
    }

    /// Setters below return the server's reply text
    pub fn set_age(&mut self, age: i64) -> Result<String> {
        self.entity_query("setAge", vec![age.into()])
    }

    pub fn get_age_lock(&mut self) -> Result<Parsed<bool>> {
        let payload = self.entity_query("getAgeLock", vec![])?;
        Ok(Parsed::from_payload(payload, parse_bool))
    }

    pub fn set_age_lock(&mut self, locked: bool) -> Result<String> {
        self.entity_query("setAgeLock", vec![locked.into()])
    }

    pub fn set_baby(&mut self) -> Result<String> {
        self.entity_query("setBaby", vec![])
    }

    pub fn set_adult(&mut self) -> Result<String> {
        self.entity_query("setAdult", vec![])
    }

    pub fn is_adult(&mut self) -> Result<Parsed<bool>> {
        let payload = self.entity_query("isAdult", vec![])?;
        Ok(Parsed::from_payload(payload, parse_bool))
    }

    pub fn is_tamed(&mut self) -> Result<Parsed<bool>> {
        let payload = self.entity_query("isTamed", vec![])?;
        Ok(Parsed::from_payload(payload, parse_bool))
    }

    pub fn set_tamed(&mut self, tamed: bool) -> Result<String> {
        self.entity_query("setTamed", vec![tamed.into()])
    }

    /// Owner name of a tameable entity
    pub fn get_owner(&mut self) -> Result<String> {
        self.entity_query("getOwner", vec![])
    }

    /// Give a tameable entity an owner
    pub fn set_owner(&mut self, owner: &PlayerRef) -> Result<String> {
        let owner_id = match owner.resolve(self.conn)? {
            Target::Id(id) => id,
            Target::Default => {
                return Err(McError::Argument("owner must name a player".to_string()))
            }
        };
        self.entity_query("setOwner", vec![owner_id.into()])
    }

    /// Invoke a named method on the server-side entity object
    pub fn call_method(&mut self, method: &str, args: Vec<Arg>) -> Result<String> {
        let mut all = vec![Arg::from(method)];
        all.extend(args);
        self.entity_query("callMethod", all)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn poll_block_hits(&mut self) -> Result<Parsed<Vec<BlockHit>>> {
        events::poll(self.conn, self.pkg, &self.target.arg(), "block.hits", parse_block_hits)
    }

    pub fn poll_chat_posts(&mut self) -> Result<Parsed<Vec<ChatPost>>> {
        events::poll(self.conn, self.pkg, &self.target.arg(), "chat.posts", parse_chat_posts)
    }

    pub fn poll_projectile_hits(&mut self) -> Result<Parsed<Vec<ProjectileHit>>> {
        events::poll(
            self.conn,
            self.pkg,
            &self.target.arg(),
            "projectile.hits",
            parse_projectile_hits,
        )
    }

    pub fn clear_events(&mut self) -> Result<()> {
        self.send("events.clear", vec![])
    }
}
