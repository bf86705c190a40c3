//! Wire types for the log store's REST API
//!
//! Record bodies travel as JSON strings inside the envelope; the envelope
//! itself never carries typed session data.

use serde::{Deserialize, Serialize};

/// `POST /streams/{stream}/records`
#[derive(Debug, Serialize)]
pub struct AppendRequest<'a> {
    pub records: Vec<AppendRecord<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AppendRecord<'a> {
    pub body: &'a str,
    pub headers: Vec<[String; 2]>,
    pub timestamp: Option<u64>,
}

impl<'a> AppendRequest<'a> {
    /// A batch holding a single body
    pub fn single(body: &'a str) -> Self {
        Self {
            records: vec![AppendRecord {
                body,
                headers: Vec::new(),
                timestamp: None,
            }],
        }
    }
}

/// `GET /streams/{stream}/records?seq_num=0&count=N`
#[derive(Debug, Default, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub records: Vec<ReadRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ReadRecord {
    #[serde(default)]
    pub seq_num: Option<u64>,
    pub body: String,
}

/// `GET /streams`
#[derive(Debug, Default, Deserialize)]
pub struct ListStreamsResponse {
    #[serde(default)]
    pub streams: Vec<StreamEntry>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct StreamEntry {
    pub name: String,
}
