//! Stream naming rules
//!
//! The log store addresses streams by name only, so the name carries the
//! session's ownership and room code:
//!
//! | Kind        | Pattern                         |
//! |-------------|---------------------------------|
//! | Session     | `user-{owner}-room-{code}`      |
//! | Legacy      | `room-{code}`                   |
//! | Room index  | `index.room.{code}`             |
//! | Owner index | `index.user.{owner}`            |
//!
//! Index names use `.` separators so they can never match the session
//! prefix or the `-room-{code}` suffix scan.

use super::room_code::RoomCode;
use serde::{Deserialize, Serialize};

const OWNER_PREFIX: &str = "user-";
const ROOM_INFIX: &str = "-room-";
const LEGACY_PREFIX: &str = "room-";
const ROOM_INDEX_PREFIX: &str = "index.room.";
const OWNER_INDEX_PREFIX: &str = "index.user.";

/// Name of a stream in the log store (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamName(String);

impl StreamName {
    /// Wrap a name returned by the store
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Session stream owned by `owner_id`
    pub fn for_owner(owner_id: &str, code: &RoomCode) -> Self {
        Self(format!("{OWNER_PREFIX}{owner_id}{ROOM_INFIX}{code}"))
    }

    /// Bare `room-{code}` name used by sessions created before ownership
    /// was encoded in the name
    pub fn legacy(code: &RoomCode) -> Self {
        Self(format!("{LEGACY_PREFIX}{code}"))
    }

    /// Index stream recording which session streams claimed `code`
    pub fn room_index(code: &RoomCode) -> Self {
        Self(format!("{ROOM_INDEX_PREFIX}{code}"))
    }

    /// Index stream recording every session registered by `owner_id`
    pub fn owner_index(owner_id: &str) -> Self {
        Self(format!("{OWNER_INDEX_PREFIX}{owner_id}"))
    }

    /// Prefix shared by all session streams of `owner_id`
    pub fn owner_prefix(owner_id: &str) -> String {
        format!("{OWNER_PREFIX}{owner_id}{ROOM_INFIX}")
    }

    /// Suffix shared by every owned session stream using `code`
    pub fn room_suffix(code: &RoomCode) -> String {
        format!("{ROOM_INFIX}{code}")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this is an owned session stream for `code`
    pub fn matches_room(&self, code: &RoomCode) -> bool {
        !self.is_index() && self.0.ends_with(&Self::room_suffix(code))
    }

    /// True when this is a session stream owned by `owner_id`
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.0.starts_with(&Self::owner_prefix(owner_id))
    }

    /// True for index streams
    pub fn is_index(&self) -> bool {
        self.0.starts_with(ROOM_INDEX_PREFIX) || self.0.starts_with(OWNER_INDEX_PREFIX)
    }

    /// Room code taken from the last `-` separated segment of the name
    pub fn room_code_hint(&self) -> Option<RoomCode> {
        let last = self.0.rsplit('-').next()?;
        RoomCode::parse(last).ok()
    }
}

impl std::fmt::Display for StreamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
