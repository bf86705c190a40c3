//! Room code to session stream resolution
//!
//! Resolution order:
//! 1. the stream named by the latest claim in `index.room.{code}`
//! 2. the first stream in the store listing whose name ends in `-room-{code}`
//! 3. the legacy stream `room-{code}`
//!
//! The first candidate that has any records wins. Two owners can hold the
//! same code at once; only the index tells them apart, the scan takes
//! whichever the store lists first.

use super::session_index::SessionIndex;
use crate::error::PulseError;
use crate::ports::log_store::LogStore;
use pulse_domain::{RoomCode, StoredRecord, StreamName};
use std::sync::Arc;
use tracing::debug;

/// A room code resolved to a stream and its records
#[derive(Debug, Clone)]
pub struct ResolvedRoom {
    pub stream: StreamName,
    pub records: Vec<StoredRecord>,
}

pub struct RoomResolver {
    store: Arc<dyn LogStore>,
    index: Arc<SessionIndex>,
    read_limit: usize,
}

impl RoomResolver {
    pub fn new(store: Arc<dyn LogStore>, index: Arc<SessionIndex>, read_limit: usize) -> Self {
        Self {
            store,
            index,
            read_limit,
        }
    }

    pub async fn resolve(&self, code: &RoomCode) -> Result<ResolvedRoom, PulseError> {
        if let Some(stream) = self.index.claimed_stream(code).await {
            if let Some(room) = self.read_candidate(stream).await? {
                return Ok(room);
            }
        }

        let listing = self
            .store
            .list_streams()
            .await
            .map_err(|e| PulseError::upstream("list streams", e))?;
        if let Some(info) = listing.into_iter().find(|s| s.name.matches_room(code)) {
            if let Some(room) = self.read_candidate(info.name).await? {
                return Ok(room);
            }
        }

        if let Some(room) = self.read_candidate(StreamName::legacy(code)).await? {
            return Ok(room);
        }

        Err(PulseError::RoomNotFound(code.to_string()))
    }

    /// Resolve a room and read its stream to the end, past `read_limit`.
    /// Status checks need every record; a later `status_changed` may sit
    /// beyond the first page.
    pub async fn resolve_full(&self, code: &RoomCode) -> Result<ResolvedRoom, PulseError> {
        let mut room = self.resolve(code).await?;
        if room.records.len() >= self.read_limit {
            let rest = self
                .store
                .read_from(&room.stream, room.records.len() as u64, self.read_limit)
                .await
                .map_err(|e| PulseError::upstream("read session", e))?;
            debug!(stream = %room.stream, extra = rest.len(), "Read remainder of stream");
            room.records.extend(rest);
        }
        Ok(room)
    }

    async fn read_candidate(&self, stream: StreamName) -> Result<Option<ResolvedRoom>, PulseError> {
        let records = self
            .store
            .read(&stream, self.read_limit)
            .await
            .map_err(|e| PulseError::upstream("read session", e))?;
        debug!(stream = %stream, records = records.len(), "Read candidate stream");
        Ok((!records.is_empty()).then_some(ResolvedRoom { stream, records }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockStore, code, definition, submission};
    use std::sync::atomic::Ordering;

    fn resolver(store: &Arc<MockStore>, use_index: bool) -> RoomResolver {
        let index = Arc::new(SessionIndex::new(store.clone(), 100, use_index));
        RoomResolver::new(store.clone(), index, 100)
    }

    #[tokio::test]
    async fn test_scan_finds_owner_stream() {
        let store = Arc::new(MockStore::new());
        store.push("user-t1-room-4821", &definition("t1", "4821", 0));

        let room = resolver(&store, false).resolve(&code("4821")).await.unwrap();

        assert_eq!(room.stream.as_str(), "user-t1-room-4821");
        assert_eq!(room.records.len(), 1);
    }

    #[tokio::test]
    async fn test_index_claim_beats_listing_order() {
        let store = Arc::new(MockStore::new());
        store.push("user-t1-room-4821", &definition("t1", "4821", 0));
        store.push("user-t2-room-4821", &definition("t2", "4821", 5));
        let index = SessionIndex::new(store.clone(), 100, true);
        index
            .claim_room("t2", &StreamName::new("user-t2-room-4821"), &code("4821"))
            .await
            .unwrap();

        let room = resolver(&store, true).resolve(&code("4821")).await.unwrap();

        assert_eq!(room.stream.as_str(), "user-t2-room-4821");
        assert_eq!(store.lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_legacy_stream_fallback() {
        let store = Arc::new(MockStore::new());
        store.push("room-1234", &definition("t1", "1234", 0));

        let room = resolver(&store, true).resolve(&code("1234")).await.unwrap();

        assert_eq!(room.stream.as_str(), "room-1234");
    }

    #[tokio::test]
    async fn test_index_streams_never_resolve_as_rooms() {
        let store = Arc::new(MockStore::new());
        store.push_body("index.room.4821", "{}");

        let err = resolver(&store, false)
            .resolve(&code("4821"))
            .await
            .unwrap_err();

        assert!(matches!(err, PulseError::RoomNotFound(c) if c == "4821"));
    }

    #[tokio::test]
    async fn test_resolve_full_reads_past_the_limit() {
        let store = Arc::new(MockStore::new());
        store.push("user-t1-room-4821", &definition("t1", "4821", 0));
        for n in 0..4 {
            store.push(
                "user-t1-room-4821",
                &submission(&format!("p{n}"), &[(1, "x")]),
            );
        }
        let index = Arc::new(SessionIndex::new(store.clone(), 2, false));
        let resolver = RoomResolver::new(store.clone(), index, 2);

        assert_eq!(resolver.resolve(&code("4821")).await.unwrap().records.len(), 2);
        assert_eq!(resolver.resolve_full(&code("4821")).await.unwrap().records.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_room() {
        let store = Arc::new(MockStore::new());
        let err = resolver(&store, true)
            .resolve(&code("9999"))
            .await
            .unwrap_err();
        assert!(matches!(err, PulseError::RoomNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_failure_is_upstream() {
        let store = Arc::new(MockStore::new());
        store.push("user-t1-room-4821", &definition("t1", "4821", 0));
        store.fail_reads_of("user-t1-room-4821");

        let err = resolver(&store, false)
            .resolve(&code("4821"))
            .await
            .unwrap_err();

        assert!(matches!(err, PulseError::Upstream { .. }));
    }
}
