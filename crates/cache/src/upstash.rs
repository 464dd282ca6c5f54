//! Upstash Redis over its REST interface.
//!
//! Every command is a `POST` of a JSON array (`["SET", "k", "v"]`) with a
//! bearer token. Replies are `{"result": ...}` or `{"error": "..."}`.

use crate::client::KvCache;
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Upstash REST client.
#[derive(Clone)]
pub struct UpstashCache {
    http: reqwest::Client,
    url: Url,
    token: String,
}

impl UpstashCache {
    pub fn new(url: &str, token: &str) -> CacheResult<Self> {
        let url = Url::parse(url)
            .map_err(|e| CacheError::Config(format!("invalid cache url '{url}': {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url,
            token: token.to_string(),
        })
    }

    /// Run one command and return its `result` value.
    async fn command(&self, args: &[&str]) -> CacheResult<Value> {
        let response = self
            .http
            .post(self.url.clone())
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // Command errors arrive as 400 with an `error` member, so inspect the body first.
        if let Ok(reply) = serde_json::from_str::<Reply>(&body) {
            if let Some(error) = reply.error {
                return Err(CacheError::Command(error));
            }
            if status.is_success() {
                return Ok(reply.result.unwrap_or(Value::Null));
            }
        }
        if !status.is_success() {
            return Err(CacheError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Err(CacheError::UnexpectedReply(body))
    }
}

fn optional_string(value: Value) -> CacheResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(CacheError::UnexpectedReply(other.to_string())),
    }
}

#[async_trait]
impl KvCache for UpstashCache {
    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.command(&["SET", key, value]).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        optional_string(self.command(&["GET", key]).await?)
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> CacheResult<()> {
        self.command(&["HSET", key, field, value]).await?;
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        optional_string(self.command(&["HGET", key, field]).await?)
    }

    async fn del(&self, keys: &[&str]) -> CacheResult<u64> {
        // DEL without keys is a Redis syntax error.
        if keys.is_empty() {
            return Ok(0);
        }
        let mut args = Vec::with_capacity(keys.len() + 1);
        args.push("DEL");
        args.extend_from_slice(keys);
        match self.command(&args).await? {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| CacheError::UnexpectedReply(n.to_string())),
            other => Err(CacheError::UnexpectedReply(other.to_string())),
        }
    }
}
