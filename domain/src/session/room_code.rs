//! Room code value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of digits in every room code
pub const ROOM_CODE_LEN: usize = 4;

/// Smallest generated room code (codes never start with a zero)
pub const MIN_GENERATED_CODE: u16 = 1000;

/// Largest generated room code
pub const MAX_GENERATED_CODE: u16 = 9999;

/// A 4-digit public identifier participants use to reach a session (Value Object)
///
/// Codes are not globally unique over time: two presenters may hold the
/// same code. Resolution of a bare code is handled by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomCode(String);

impl RoomCode {
    /// Parse a room code, accepting exactly four ASCII digits
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::missing("room_code"));
        }
        if trimmed.len() != ROOM_CODE_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidRoomCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build a room code from any number, clamped into `1000..=9999`
    pub fn clamped(n: u16) -> Self {
        Self(n.clamp(MIN_GENERATED_CODE, MAX_GENERATED_CODE).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RoomCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RoomCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoomCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RoomCode::parse(&s).map_err(serde::de::Error::custom)
    }
}
