//! In-memory log store.
//!
//! Keeps every stream in process memory. Used for local development
//! (`--store memory`) and tests; nothing survives a restart.

use async_trait::async_trait;
use pulse_application::ports::log_store::{LogStore, StoreError, StreamInfo};
use pulse_domain::StreamName;
use tokio::sync::RwLock;

/// Streams in creation order, each holding its bodies in append order
#[derive(Default)]
pub struct InMemoryLogStore {
    streams: RwLock<Vec<(StreamName, Vec<String>)>>,
}

impl InMemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of streams created so far
    pub async fn stream_count(&self) -> usize {
        self.streams.read().await.len()
    }

    /// Number of records in `stream` (zero if it does not exist)
    pub async fn record_count(&self, stream: &StreamName) -> usize {
        self.streams
            .read()
            .await
            .iter()
            .find(|(name, _)| name == stream)
            .map_or(0, |(_, bodies)| bodies.len())
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn append_body(&self, stream: &StreamName, body: String) -> Result<(), StoreError> {
        let mut streams = self.streams.write().await;
        match streams.iter_mut().find(|(name, _)| name == stream) {
            Some((_, bodies)) => bodies.push(body),
            None => streams.push((stream.clone(), vec![body])),
        }
        Ok(())
    }

    async fn read_bodies(
        &self,
        stream: &StreamName,
        start_seq: u64,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        let streams = self.streams.read().await;
        streams
            .iter()
            .find(|(name, _)| name == stream)
            .map(|(_, bodies)| {
                bodies
                    .iter()
                    .skip(start_seq as usize)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .ok_or_else(|| StoreError::Http {
                status: 404,
                body: format!("stream {stream} not found"),
            })
    }

    async fn list_streams(&self) -> Result<Vec<StreamInfo>, StoreError> {
        Ok(self
            .streams
            .read()
            .await
            .iter()
            .map(|(name, _)| StreamInfo { name: name.clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{StoredRecord, StreamRecord, StatusChange, SessionStatus};

    #[tokio::test]
    async fn test_append_then_read_in_order() {
        let store = InMemoryLogStore::new();
        let stream = StreamName::new("room-1234");

        store.append_body(&stream, "a".into()).await.unwrap();
        store.append_body(&stream, "b".into()).await.unwrap();
        store.append_body(&stream, "c".into()).await.unwrap();

        assert_eq!(store.read_bodies(&stream, 0, 2).await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.read_bodies(&stream, 2, 2).await.unwrap(), vec!["c"]);
        assert!(store.read_bodies(&stream, 3, 2).await.unwrap().is_empty());
        assert_eq!(store.record_count(&stream).await, 3);
    }

    #[tokio::test]
    async fn test_paged_read_reaches_the_end_of_the_stream() {
        let store = InMemoryLogStore::new();
        let stream = StreamName::new("user-t1-room-4821");
        for n in 0..7 {
            store.append_body(&stream, format!("{n}")).await.unwrap();
        }

        let all = store.read_all_bodies(&stream, 0, 3).await.unwrap();
        assert_eq!(all, vec!["0", "1", "2", "3", "4", "5", "6"]);
        let tail = store.read_all_bodies(&stream, 5, 3).await.unwrap();
        assert_eq!(tail, vec!["5", "6"]);
        assert!(store
            .read_from(&StreamName::new("room-0000"), 0, 3)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_stream_reads_as_empty() {
        let store = InMemoryLogStore::new();
        let stream = StreamName::new("room-0000");

        let err = store.read_bodies(&stream, 0, 10).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.read(&stream, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_typed_round_trip_and_listing() {
        let store = InMemoryLogStore::new();
        let stream = StreamName::new("user-t1-room-4821");
        let record = StreamRecord::StatusChanged(StatusChange {
            status: SessionStatus::Completed,
            changed_at: chrono::Utc::now(),
        });

        store.append(&stream, &record).await.unwrap();
        store
            .append_body(&StreamName::new("room-1111"), "x".into())
            .await
            .unwrap();

        let read = store.read(&stream, 10).await.unwrap();
        assert_eq!(read, vec![StoredRecord::Known(record)]);
        let names: Vec<_> = store
            .list_streams()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name.to_string())
            .collect();
        assert_eq!(names, vec!["user-t1-room-4821", "room-1111"]);
    }
}
