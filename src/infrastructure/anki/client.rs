use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AnkiError;
use super::request_queue::{RequestQueue, RetryPolicy};

pub const DEFAULT_ANKI_CONNECT_URL: &str = "http://127.0.0.1:8765";

/// AnkiConnect API version this client speaks.
pub const ANKI_CONNECT_VERSION: u8 = 6;

#[derive(Debug, Serialize)]
pub struct AnkiRequest<'a> {
    pub action: &'a str,
    pub version: u8,
    pub params: &'a Value,
}

#[derive(Debug, Deserialize)]
pub struct AnkiResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// HTTP client for the AnkiConnect add-on.
///
/// Every action goes through a shared [`RequestQueue`], so callers can invoke it
/// from many tasks at once and Anki still sees one paced request at a time.
pub struct AnkiConnectClient {
    url: String,
    http_client: reqwest::Client,
    queue: RequestQueue,
}

impl AnkiConnectClient {
    pub fn new(url: String, policy: RetryPolicy) -> Self {
        Self {
            url,
            http_client: reqwest::Client::new(),
            queue: RequestQueue::new(policy),
        }
    }

    /// Invoke an action and decode its `result`.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Value,
    ) -> Result<T, AnkiError> {
        let result = self
            .queue
            .run(action, || self.send(action, &params))
            .await
            .map_err(|e| AnkiError::RetriesExhausted {
                action: action.to_string(),
                attempts: self.queue.policy().max_attempts.max(1),
                source: Box::new(e),
            })?;

        serde_json::from_value(result).map_err(|e| AnkiError::Decode {
            action: action.to_string(),
            message: e.to_string(),
        })
    }

    async fn send(&self, action: &str, params: &Value) -> Result<Value, AnkiError> {
        let payload = AnkiRequest {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        tracing::debug!(action = action, url = %self.url, "Sending AnkiConnect request");

        let response = self.http_client.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(AnkiError::Status {
                action: action.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: AnkiResponse = response.json().await?;
        match body.error {
            Some(message) => Err(AnkiError::Api {
                action: action.to_string(),
                message,
            }),
            None => Ok(body.result),
        }
    }
}
