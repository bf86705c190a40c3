//! Room and owner index streams
//!
//! Every session creation appends a `room_claimed` record to
//! `index.room.{code}` and a `session_registered` record to
//! `index.user.{owner}`. Lookups read those streams instead of listing the
//! whole store. The room claim is part of creation; the owner entry and
//! every index read are best-effort, with the caller falling back to
//! scanning.

use crate::ports::log_store::{LogStore, StoreError};
use chrono::Utc;
use pulse_domain::session::index::{latest_claim, registered_streams};
use pulse_domain::{IndexRecord, RoomCode, StreamName};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SessionIndex {
    store: Arc<dyn LogStore>,
    read_limit: usize,
    enabled: bool,
}

impl SessionIndex {
    pub fn new(store: Arc<dyn LogStore>, read_limit: usize, enabled: bool) -> Self {
        Self {
            store,
            read_limit,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Point `code` at a new session stream. Resolution trusts the latest
    /// claim, so a failure here must stop the session from being created.
    pub async fn claim_room(
        &self,
        owner_id: &str,
        stream: &StreamName,
        code: &RoomCode,
    ) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }
        let record = IndexRecord::RoomClaimed {
            stream_name: stream.clone(),
            owner_id: owner_id.to_string(),
            claimed_at: Utc::now(),
        };
        let body = record
            .encode()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store
            .append_body(&StreamName::room_index(code), body)
            .await
    }

    /// Add a session to its owner's index. Best-effort: the directory also
    /// scans the store listing.
    pub async fn register_owner(&self, owner_id: &str, stream: &StreamName, code: &RoomCode) {
        if !self.enabled {
            return;
        }
        let index_stream = StreamName::owner_index(owner_id);
        let record = IndexRecord::SessionRegistered {
            stream_name: stream.clone(),
            room_code: code.clone(),
            registered_at: Utc::now(),
        };
        let body = match record.encode() {
            Ok(body) => body,
            Err(e) => {
                warn!(index = %index_stream, error = %e, "Failed to encode index record");
                return;
            }
        };
        if let Err(e) = self.store.append_body(&index_stream, body).await {
            warn!(index = %index_stream, error = %e, "Failed to update session index");
        }
    }

    /// Stream that most recently claimed `code`, if the index knows one
    pub async fn claimed_stream(&self, code: &RoomCode) -> Option<StreamName> {
        if !self.enabled {
            return None;
        }
        let records = self.read_index(&StreamName::room_index(code)).await?;
        let claimed = latest_claim(&records).cloned();
        debug!(room_code = %code, stream = ?claimed, "Room index lookup");
        claimed
    }

    /// Session streams registered for `owner_id`, in registration order
    pub async fn owner_streams(&self, owner_id: &str) -> Vec<StreamName> {
        if !self.enabled {
            return Vec::new();
        }
        let Some(records) = self.read_index(&StreamName::owner_index(owner_id)).await else {
            return Vec::new();
        };
        registered_streams(&records)
            .into_iter()
            .filter(|name| name.is_owned_by(owner_id))
            .collect()
    }

    async fn read_index(&self, index_stream: &StreamName) -> Option<Vec<IndexRecord>> {
        match self
            .store
            .read_all_bodies(index_stream, 0, self.read_limit)
            .await
        {
            Ok(bodies) => Some(
                bodies
                    .iter()
                    .filter_map(|b| IndexRecord::decode(b))
                    .collect(),
            ),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                warn!(index = %index_stream, error = %e, "Failed to read session index");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockStore, code};

    #[tokio::test]
    async fn test_register_then_lookup() {
        let store = Arc::new(MockStore::new());
        let index = SessionIndex::new(store.clone(), 100, true);
        let stream = StreamName::for_owner("t1", &code("4821"));

        index.claim_room("t1", &stream, &code("4821")).await.unwrap();
        index.register_owner("t1", &stream, &code("4821")).await;

        assert_eq!(index.claimed_stream(&code("4821")).await, Some(stream.clone()));
        assert_eq!(index.owner_streams("t1").await, vec![stream]);
        assert_eq!(
            store.stream_names(),
            vec!["index.room.4821".to_string(), "index.user.t1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_latest_claim_wins() {
        let store = Arc::new(MockStore::new());
        let index = SessionIndex::new(store.clone(), 100, true);
        let first = StreamName::for_owner("t1", &code("4821"));
        let second = StreamName::for_owner("t2", &code("4821"));

        index.claim_room("t1", &first, &code("4821")).await.unwrap();
        index.claim_room("t2", &second, &code("4821")).await.unwrap();

        assert_eq!(index.claimed_stream(&code("4821")).await, Some(second));
    }

    #[tokio::test]
    async fn test_disabled_index_touches_nothing() {
        let store = Arc::new(MockStore::new());
        let index = SessionIndex::new(store.clone(), 100, false);
        let stream = StreamName::for_owner("t1", &code("4821"));

        index.claim_room("t1", &stream, &code("4821")).await.unwrap();
        index.register_owner("t1", &stream, &code("4821")).await;

        assert!(store.stream_names().is_empty());
        assert_eq!(index.claimed_stream(&code("4821")).await, None);
    }

    #[tokio::test]
    async fn test_foreign_owner_entries_are_ignored() {
        let store = Arc::new(MockStore::new());
        let index = SessionIndex::new(store.clone(), 100, true);
        let foreign = StreamName::for_owner("t2", &code("1111"));
        let body = IndexRecord::SessionRegistered {
            stream_name: foreign,
            room_code: code("1111"),
            registered_at: Utc::now(),
        }
        .encode()
        .unwrap();
        store.push_body("index.user.t1", &body);

        assert!(index.owner_streams("t1").await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_owner_write_is_swallowed() {
        let store = Arc::new(MockStore::new());
        store.fail_appends_to("index.user.");
        let index = SessionIndex::new(store.clone(), 100, true);

        index
            .register_owner("t1", &StreamName::for_owner("t1", &code("4821")), &code("4821"))
            .await;

        assert!(store.stream_names().is_empty());
    }

    #[tokio::test]
    async fn test_failed_room_claim_is_reported() {
        let store = Arc::new(MockStore::new());
        store.fail_appends_to("index.room.");
        let index = SessionIndex::new(store.clone(), 100, true);

        let result = index
            .claim_room("t1", &StreamName::for_owner("t1", &code("4821")), &code("4821"))
            .await;

        assert!(result.is_err());
        assert!(store.stream_names().is_empty());
    }

    #[tokio::test]
    async fn test_owner_index_is_read_past_one_page() {
        let store = Arc::new(MockStore::new());
        let index = SessionIndex::new(store.clone(), 2, true);
        for room in ["1111", "2222", "3333"] {
            index
                .register_owner("t1", &StreamName::for_owner("t1", &code(room)), &code(room))
                .await;
        }

        assert_eq!(index.owner_streams("t1").await.len(), 3);
    }
}
