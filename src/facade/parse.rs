//! Structural parsing of response payloads
//!
//! The protocol has no schema. A payload that does not have the expected
//! shape is handed back as `Parsed::Raw` instead of being an error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{McError, Result};
use crate::protocol::RECORD_SEPARATOR;
use crate::vec3::Vec3;

use super::events::{BlockHit, ChatPost, ProjectileHit};

/// Outcome of parsing a response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parsed<T> {
    /// Payload had the expected shape
    Parsed(T),

    /// Payload returned unchanged
    Raw(String),
}

impl<T> Parsed<T> {
    /// Run `parse` over `payload`, keeping the payload if it fails
    pub fn from_payload(payload: String, parse: impl FnOnce(&str) -> Option<T>) -> Self {
        match parse(&payload) {
            Some(value) => Parsed::Parsed(value),
            None => {
                tracing::debug!("Unparsed response kept raw: {:?}", payload);
                Parsed::Raw(payload)
            }
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Parsed::Parsed(_))
    }

    pub fn parsed(self) -> Option<T> {
        match self {
            Parsed::Parsed(v) => Some(v),
            Parsed::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Parsed::Parsed(_) => None,
            Parsed::Raw(s) => Some(s),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Parsed::Parsed(v) => Parsed::Parsed(f(v)),
            Parsed::Raw(s) => Parsed::Raw(s),
        }
    }

    /// Treat a raw payload as a protocol error
    pub fn into_result(self) -> Result<T> {
        match self {
            Parsed::Parsed(v) => Ok(v),
            Parsed::Raw(s) => Err(McError::Protocol(format!("unexpected response: {:?}", s))),
        }
    }
}

/// One entry of an entity listing: `id,type,x,y,z`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: i64,
    pub type_id: String,
    pub pos: Vec3,
}

// =============================================================================
// Field Parsers
// =============================================================================

fn field<T: FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

/// Non-empty `|`-separated records
fn records(payload: &str) -> impl Iterator<Item = &str> {
    payload.split(RECORD_SEPARATOR).filter(|r| !r.is_empty())
}

fn collect_records<T>(payload: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    records(payload).map(parse).collect()
}

pub fn parse_f64(payload: &str) -> Option<f64> {
    field(payload)
}

pub fn parse_int(payload: &str) -> Option<i64> {
    field(payload)
}

/// `true` / `false`, any case
pub fn parse_bool(payload: &str) -> Option<bool> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// `x,y,z` as floats
pub fn parse_vec3(payload: &str) -> Option<Vec3> {
    payload.parse().ok()
}

/// `x,y,z` as integers (block coordinates)
pub fn parse_tile(payload: &str) -> Option<Vec3> {
    let mut fields = payload.split(',');
    let mut out = [0i64; 3];
    for slot in out.iter_mut() {
        *slot = field(fields.next()?)?;
    }
    if fields.next().is_some() {
        return None;
    }
    Some(Vec3::from(out))
}

/// Comma-separated list, empty items dropped
pub fn parse_csv(payload: &str) -> Vec<String> {
    payload
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `|`-separated integers
pub fn parse_int_list(payload: &str) -> Option<Vec<i64>> {
    collect_records(payload, field)
}

/// `id,type,x,y,z|id,type,x,y,z|...`
pub fn parse_entities(payload: &str) -> Option<Vec<EntityInfo>> {
    collect_records(payload, |record| {
        let f: Vec<&str> = record.split(',').collect();
        if f.len() != 5 {
            return None;
        }
        Some(EntityInfo {
            id: field(f[0])?,
            type_id: f[1].to_string(),
            pos: Vec3::new(field(f[2])?, field(f[3])?, field(f[4])?),
        })
    })
}

/// `x,y,z,face,entityId|...`
pub fn parse_block_hits(payload: &str) -> Option<Vec<BlockHit>> {
    collect_records(payload, |record| {
        let f: Vec<i64> = record.split(',').map(field).collect::<Option<_>>()?;
        match f.as_slice() {
            &[x, y, z, face, entity_id] => Some(BlockHit {
                pos: Vec3::from([x, y, z]),
                face,
                entity_id,
            }),
            _ => None,
        }
    })
}

/// `entityId,message|...`; the message keeps any commas after the first
pub fn parse_chat_posts(payload: &str) -> Option<Vec<ChatPost>> {
    collect_records(payload, |record| {
        let (id, message) = record.split_once(',')?;
        Some(ChatPost {
            entity_id: field(id)?,
            message: message.to_string(),
        })
    })
}

/// `x,y,z,originName,targetId,targetType|...`
pub fn parse_projectile_hits(payload: &str) -> Option<Vec<ProjectileHit>> {
    collect_records(payload, |record| {
        let f: Vec<&str> = record.split(',').collect();
        if f.len() != 6 {
            return None;
        }
        Some(ProjectileHit {
            pos: Vec3::from([field::<i64>(f[0])?, field(f[1])?, field(f[2])?]),
            origin_name: f[3].to_string(),
            target_id: field(f[4])?,
            target_type: f[5].to_string(),
        })
    })
}
