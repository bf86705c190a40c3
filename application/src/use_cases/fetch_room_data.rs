//! Fetch room data use case
//!
//! Public read of a session stream by room code, returned record by record
//! in append order.

use super::resolve_room::RoomResolver;
use crate::error::PulseError;
use pulse_domain::{RoomCode, StoredRecord, StreamName};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RoomData {
    pub stream: StreamName,
    pub records: Vec<StoredRecord>,
}

pub struct FetchRoomDataUseCase {
    resolver: Arc<RoomResolver>,
}

impl FetchRoomDataUseCase {
    pub fn new(resolver: Arc<RoomResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, room_code: &str) -> Result<RoomData, PulseError> {
        let code = RoomCode::parse(room_code)?;
        let room = self.resolver.resolve(&code).await?;
        debug!(room_code = %code, records = room.records.len(), "Room data fetched");
        Ok(RoomData {
            stream: room.stream,
            records: room.records,
        })
    }
}
