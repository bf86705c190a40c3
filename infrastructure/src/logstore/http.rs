//! HTTP log store client
//!
//! Talks to the basin's REST API with a bearer token. Every request is
//! bounded by the client timeout.

use super::protocol::{AppendRequest, ListStreamsResponse, ReadResponse};
use async_trait::async_trait;
use pulse_application::ports::log_store::{LogStore, StoreError, StreamInfo};
use pulse_domain::StreamName;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, trace};

/// Page size requested when listing streams
const LIST_PAGE_SIZE: usize = 1000;

pub struct HttpLogStore {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl HttpLogStore {
    pub fn new(
        base_url: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StoreError::InvalidResponse(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
        })
    }

    /// `{base}/streams[/{stream}/records]` with the stream name escaped as
    /// one path segment
    fn url(&self, stream: Option<&StreamName>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidResponse("base url cannot have a path".into()))?;
            segments.push("streams");
            if let Some(stream) = stream {
                segments.push(stream.as_str()).push("records");
            }
        }
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

#[async_trait]
impl LogStore for HttpLogStore {
    async fn append_body(&self, stream: &StreamName, body: String) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url(Some(stream))?)
            .bearer_auth(&self.access_token)
            .json(&AppendRequest::single(&body))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        debug!(stream = %stream, bytes = body.len(), "Appended record");
        Ok(())
    }

    async fn read_bodies(
        &self,
        stream: &StreamName,
        start_seq: u64,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        let mut url = self.url(Some(stream))?;
        url.query_pairs_mut()
            .append_pair("seq_num", &start_seq.to_string())
            .append_pair("count", &limit.to_string());

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport)?;
        // The store answers 416 when `seq_num` is past the tail
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            trace!(stream = %stream, start_seq, "Read past end of stream");
            return Ok(Vec::new());
        }
        let page: ReadResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        debug!(stream = %stream, start_seq, records = page.records.len(), "Read stream");
        Ok(page.records.into_iter().map(|r| r.body).collect())
    }

    async fn list_streams(&self) -> Result<Vec<StreamInfo>, StoreError> {
        let mut streams = Vec::new();
        let mut start_after: Option<String> = None;
        loop {
            let mut url = self.url(None)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("limit", &LIST_PAGE_SIZE.to_string());
                if let Some(after) = &start_after {
                    query.append_pair("start_after", after);
                }
            }
            let response = self
                .client
                .get(url)
                .bearer_auth(&self.access_token)
                .send()
                .await
                .map_err(transport)?;
            let page: ListStreamsResponse = Self::check(response)
                .await?
                .json()
                .await
                .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

            trace!(page = page.streams.len(), has_more = page.has_more, "Listed streams");
            start_after = page.streams.last().map(|s| s.name.clone());
            streams.extend(page.streams.into_iter().map(|s| StreamInfo::new(s.name)));
            if !page.has_more || start_after.is_none() {
                break;
            }
        }
        Ok(streams)
    }
}
