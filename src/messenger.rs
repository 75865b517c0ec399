//! Mailbox API of the GC messenger
//!
//! Every route is a JSON `POST` to `<base url><route>`; the reply body is
//! JSON. Only the read-only whitelist route is used by the terminal.

use crate::errors::{TerminalError, TerminalResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace};

/// Account allowed to receive messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub id: u64,
    pub address: String,
    /// Public encryption key of the account
    pub open_key: String,
    pub name: String,
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn whitelist(&self) -> TerminalResult<Vec<WhitelistEntry>>;
}

/// HTTP client of the mailbox API
pub struct MessengerClient {
    client: reqwest::Client,
    base_url: String,
}

impl MessengerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn route_url(&self, route: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, route)
        } else {
            format!("{}/{}", self.base_url, route)
        }
    }

    /// POST `body` to `route` and decode the reply
    pub async fn request<T: DeserializeOwned>(&self, route: &str, body: Value) -> TerminalResult<T> {
        let url = self.route_url(route);
        debug!(route, url = %url, "messenger request");
        let reply: Value = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        trace!(reply = %reply, "messenger reply");
        decode_reply(route, reply)
    }
}

fn decode_reply<T: DeserializeOwned>(route: &str, reply: Value) -> TerminalResult<T> {
    serde_json::from_value(reply).map_err(|e| {
        TerminalError::external(format!("Unexpected messenger reply to '{}': {}", route, e))
    })
}

#[async_trait]
impl Messenger for MessengerClient {
    async fn whitelist(&self) -> TerminalResult<Vec<WhitelistEntry>> {
        self.request("whitelist", json!({})).await
    }
}
