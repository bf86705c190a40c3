//! Session index records
//!
//! Index streams live in the same log store as sessions and map a room
//! code or an owner to session stream names, so lookups do not have to scan
//! the whole store listing.

use super::room_code::RoomCode;
use super::stream_name::StreamName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A record in an index stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndexRecord {
    /// Appended to `index.room.{code}` when a session takes the code
    RoomClaimed {
        stream_name: StreamName,
        owner_id: String,
        claimed_at: DateTime<Utc>,
    },
    /// Appended to `index.user.{owner}` for every session the owner creates
    SessionRegistered {
        stream_name: StreamName,
        room_code: RoomCode,
        registered_at: DateTime<Utc>,
    },
}

impl IndexRecord {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored body; foreign bodies yield `None`
    pub fn decode(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Stream holding the most recent claim of a room code.
///
/// Later claims win; equal timestamps are broken by stream order.
pub fn latest_claim(records: &[IndexRecord]) -> Option<&StreamName> {
    records
        .iter()
        .filter_map(|r| match r {
            IndexRecord::RoomClaimed {
                stream_name,
                claimed_at,
                ..
            } => Some((claimed_at, stream_name)),
            _ => None,
        })
        .fold(None, |best: Option<(&DateTime<Utc>, &StreamName)>, cur| match best {
            Some(b) if b.0 > cur.0 => Some(b),
            _ => Some(cur),
        })
        .map(|(_, name)| name)
}

/// Session streams registered in an owner index, first registration order,
/// without duplicates
pub fn registered_streams(records: &[IndexRecord]) -> Vec<StreamName> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| match r {
            IndexRecord::SessionRegistered { stream_name, .. } => Some(stream_name),
            _ => None,
        })
        .filter(|name| seen.insert((*name).clone()))
        .cloned()
        .collect()
}
