//! Room code source port

use pulse_domain::RoomCode;

/// Source of candidate room codes for new sessions.
///
/// Candidates carry no uniqueness guarantee; the caller checks them.
pub trait RoomCodeGenerator: Send + Sync {
    fn next_code(&self) -> RoomCode;
}
