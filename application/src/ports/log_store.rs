//! Log store port
//!
//! The append-only, stream-partitioned store every session lives in.
//! Adapters only move opaque record bodies; the provided methods on
//! [`LogStore`] do the typed encoding and decoding.

use async_trait::async_trait;
use pulse_domain::{StoredRecord, StreamName, StreamRecord};
use thiserror::Error;

/// Errors from the log store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("log store returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("log store unreachable: {0}")]
    Transport(String),

    #[error("unexpected log store response: {0}")]
    InvalidResponse(String),

    #[error("record serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// The stream does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Http { status: 404, .. })
    }
}

/// One entry of a stream listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub name: StreamName,
}

impl StreamInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: StreamName::new(name),
        }
    }
}

/// Append-only log store
///
/// Streams are created implicitly by their first append. Records are
/// numbered from zero in append order; reads return bodies in that order.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append one raw record body
    async fn append_body(&self, stream: &StreamName, body: String) -> Result<(), StoreError>;

    /// Read at most `limit` record bodies starting at `start_seq`.
    /// Reading at or past the end of the stream returns an empty page.
    async fn read_bodies(
        &self,
        stream: &StreamName,
        start_seq: u64,
        limit: usize,
    ) -> Result<Vec<String>, StoreError>;

    /// List every stream in the basin
    async fn list_streams(&self) -> Result<Vec<StreamInfo>, StoreError>;

    /// Encode and append a typed session record
    async fn append(&self, stream: &StreamName, record: &StreamRecord) -> Result<(), StoreError> {
        let body = record
            .encode()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.append_body(stream, body).await
    }

    /// Every body from `start_seq` to the end of the stream, fetched
    /// `page_size` records at a time
    async fn read_all_bodies(
        &self,
        stream: &StreamName,
        start_seq: u64,
        page_size: usize,
    ) -> Result<Vec<String>, StoreError> {
        let page_size = page_size.max(1);
        let mut bodies = Vec::new();
        let mut next = start_seq;
        loop {
            let page = self.read_bodies(stream, next, page_size).await?;
            if page.is_empty() {
                break;
            }
            next += page.len() as u64;
            bodies.extend(page);
        }
        Ok(bodies)
    }

    /// Read and decode the first `limit` records of a stream. A stream that
    /// does not exist reads as empty.
    async fn read(&self, stream: &StreamName, limit: usize) -> Result<Vec<StoredRecord>, StoreError> {
        decode_page(self.read_bodies(stream, 0, limit).await)
    }

    /// Read and decode everything from `start_seq` on. A stream that does
    /// not exist reads as empty.
    async fn read_from(
        &self,
        stream: &StreamName,
        start_seq: u64,
        page_size: usize,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        decode_page(self.read_all_bodies(stream, start_seq, page_size).await)
    }
}

fn decode_page(page: Result<Vec<String>, StoreError>) -> Result<Vec<StoredRecord>, StoreError> {
    match page {
        Ok(bodies) => Ok(bodies.iter().map(|b| StoredRecord::decode(b)).collect()),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
