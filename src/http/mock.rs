//! In-memory transport for unit tests
//!
//! Replies are keyed by `(path, after)` so interleaved callers get
//! deterministic answers. Every request is recorded.

use super::transport::{SendRequest, Transport};
use crate::error::{Error, Result};
use crate::pagination::CURSOR_PARAM;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted reply
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json(JsonValue),
    Status(u16, String),
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<(String, Option<String>), Reply>>,
    requests: Mutex<Vec<SendRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `path` (with the given `after` cursor) with a JSON body
    pub(crate) fn on(self, path: &str, after: Option<&str>, body: JsonValue) -> Self {
        self.reply(path, after, Reply::Json(body))
    }

    /// Answer `path` (with the given `after` cursor) with an HTTP error
    pub(crate) fn fail(self, path: &str, after: Option<&str>, status: u16, body: &str) -> Self {
        self.reply(path, after, Reply::Status(status, body.to_string()))
    }

    fn reply(self, path: &str, after: Option<&str>, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((path.to_string(), after.map(str::to_string)), reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<SendRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: SendRequest) -> Result<JsonValue> {
        let key = (
            request.path.clone(),
            request.query_value(CURSOR_PARAM).map(str::to_string),
        );
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status, body)) => Err(Error::http_status(status, body)),
            None => Err(Error::Other(format!("no scripted reply for {key:?}"))),
        }
    }
}
