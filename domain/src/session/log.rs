//! Session log model - classifying a stream's records
//!
//! Producers always append the definition first, but readers classify
//! each record by its `type` tag instead of trusting positions.

use super::record::{
    ParticipantSubmission, SessionDefinition, SessionStatus, StatusChange, StoredRecord,
    StreamRecord,
};
use std::collections::HashSet;

/// A session stream partitioned by record kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionLog {
    definition: Option<SessionDefinition>,
    submissions: Vec<ParticipantSubmission>,
    status_changes: Vec<StatusChange>,
    /// Records that were not typed session records (raw, unknown, or a
    /// second definition)
    skipped: usize,
}

impl SessionLog {
    /// Classify every record of a stream
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a StoredRecord>) -> Self {
        let mut log = SessionLog::default();
        for stored in records {
            match stored.as_known() {
                Some(StreamRecord::SessionDefinition(def)) if log.definition.is_none() => {
                    log.definition = Some(def.clone());
                }
                Some(StreamRecord::ParticipantSubmission(sub)) => {
                    log.submissions.push(sub.clone());
                }
                Some(StreamRecord::StatusChanged(change)) => {
                    log.status_changes.push(change.clone());
                }
                _ => log.skipped += 1,
            }
        }
        log
    }

    /// The session definition; `None` means the session does not exist
    pub fn definition(&self) -> Option<&SessionDefinition> {
        self.definition.as_ref()
    }

    pub fn submissions(&self) -> &[ParticipantSubmission] {
        &self.submissions
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Effective status: the definition's status folded over every
    /// `status_changed` record in stream order
    pub fn status(&self) -> Option<SessionStatus> {
        let initial = self.definition.as_ref()?.initial_status();
        Some(
            self.status_changes
                .iter()
                .fold(initial, |_, change| change.status),
        )
    }

    /// Number of submission records (duplicates included)
    pub fn total_responses(&self) -> usize {
        self.submissions.len()
    }

    /// Number of distinct participant ids across submissions
    pub fn distinct_participants(&self) -> usize {
        self.submissions
            .iter()
            .map(|s| s.student_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// The definition at the head of a stream, if the first record is one
pub fn head_definition(records: &[StoredRecord]) -> Option<&SessionDefinition> {
    records.first()?.as_definition()
}
