use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::SendError;
use crate::state::Message;

/// Used when a successful reply carries none of the known text fields
pub const FALLBACK_REPLY: &str = "The mail has been sent successfully.";

/// Reply fields checked in order of preference
const REPLY_FIELDS: [&str; 3] = ["response", "message", "output"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookRequest<'a> {
    message: &'a str,
    user_id: &'a str,
    timestamp: String,
    chat_history: &'a [Message],
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
    user_id: String,
}

impl WebhookClient {
    pub fn new(url: &str, user_id: &str, timeout: Option<Duration>) -> Result<Self, SendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
            user_id: user_id.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one message with its history and return the reply text
    pub async fn send(&self, message: &str, history: &[Message]) -> Result<String, SendError> {
        let request = WebhookRequest {
            message,
            user_id: &self.user_id,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            chat_history: history,
        };

        tracing::debug!(url = %self.url, history = history.len(), "posting to webhook");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SendError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| SendError::Decode(e.to_string()))?;
        tracing::debug!(response = %data, "webhook replied");

        Ok(extract_reply(&data))
    }
}

/// Pick the reply text out of a webhook response body
pub fn extract_reply(data: &Value) -> String {
    REPLY_FIELDS
        .iter()
        .filter_map(|field| data.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(FALLBACK_REPLY)
        .to_string()
}
