//! Session directory use case
//!
//! Lists the calling presenter's sessions, newest first. Candidate streams
//! are the owner index entries plus a prefix scan of the store listing, so
//! sessions whose index entry was never written still appear. Each stream
//! is read to the end to fold its status. A stream that fails to read is
//! skipped.

use super::session_index::SessionIndex;
use crate::config::SessionParams;
use crate::error::PulseError;
use crate::ports::log_store::LogStore;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use pulse_domain::identity::UNKNOWN_PRESENTER_NAME;
use pulse_domain::{
    Identity, SessionLog, SessionStatus, StoredRecord, StreamName, head_definition,
    require_presenter,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// One session in the presenter's directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub stream_name: StreamName,
    pub room_code: String,
    pub lecture_text: String,
    pub quiz_count: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDirectory {
    pub sessions: Vec<SessionSummary>,
    pub user_id: String,
    pub total_count: usize,
}

pub struct ListSessionsUseCase {
    store: Arc<dyn LogStore>,
    index: Arc<SessionIndex>,
    params: SessionParams,
}

impl ListSessionsUseCase {
    pub fn new(store: Arc<dyn LogStore>, index: Arc<SessionIndex>, params: SessionParams) -> Self {
        Self {
            store,
            index,
            params,
        }
    }

    pub async fn execute(
        &self,
        identity: Option<&Identity>,
        status: Option<SessionStatus>,
    ) -> Result<SessionDirectory, PulseError> {
        let presenter = require_presenter(identity)?;
        let owner = presenter.user_id.as_str();

        let streams = self.candidate_streams(owner).await?;
        debug!(owner, candidates = streams.len(), "Listing sessions");

        let reads = join_all(streams.iter().map(|stream| async move {
            (
                stream,
                self.store.read_from(stream, 0, self.params.read_limit).await,
            )
        }))
        .await;

        let mut sessions: Vec<SessionSummary> = reads
            .into_iter()
            .filter_map(|(stream, result)| match result {
                Ok(records) => summarize(stream, &records),
                Err(e) => {
                    warn!(stream = %stream, error = %e, "Skipping unreadable session");
                    None
                }
            })
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .collect();

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(SessionDirectory {
            total_count: sessions.len(),
            sessions,
            user_id: owner.to_string(),
        })
    }

    /// Owner index entries followed by scanned streams the index missed
    async fn candidate_streams(&self, owner: &str) -> Result<Vec<StreamName>, PulseError> {
        let mut streams = self.index.owner_streams(owner).await;
        let listing = match self.store.list_streams().await {
            Ok(listing) => listing,
            Err(e) if !streams.is_empty() => {
                warn!(owner, error = %e, "Stream listing failed, using the owner index only");
                return Ok(streams);
            }
            Err(e) => return Err(PulseError::upstream("list streams", e)),
        };

        let mut seen: HashSet<StreamName> = streams.iter().cloned().collect();
        for info in listing {
            if info.name.is_owned_by(owner) && seen.insert(info.name.clone()) {
                streams.push(info.name);
            }
        }
        Ok(streams)
    }
}

/// Directory entry for a stream whose first record is a definition
fn summarize(stream: &StreamName, records: &[StoredRecord]) -> Option<SessionSummary> {
    let definition = head_definition(records)?;
    let status = SessionLog::from_records(records)
        .status()
        .unwrap_or_default();
    let metadata = definition.session_metadata.as_ref();
    let room_code = metadata
        .map(|m| m.room_code.to_string())
        .or_else(|| stream.room_code_hint().map(|c| c.to_string()))
        .unwrap_or_default();

    Some(SessionSummary {
        stream_name: stream.clone(),
        room_code,
        lecture_text: definition.lecture_text.clone(),
        quiz_count: definition.quiz.len(),
        created_at: metadata.map(|m| m.created_at),
        status,
        user_name: metadata
            .map(|m| m.user_name.clone())
            .unwrap_or_else(|| UNKNOWN_PRESENTER_NAME.to_string()),
    })
}
