use crate::relay::types::WebhookPayload;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Posts enquiries on to the workflow-automation webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    /// Create a client for `url`; each forward gives up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward one payload. Whatever happens downstream is only logged;
    /// nothing is retried.
    pub async fn deliver(&self, payload: &WebhookPayload) {
        debug!("POST {}", self.url);

        let response = match self.client.post(&self.url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Webhook delivery to {} failed: {}", self.url, err);
                return;
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) if status.is_success() => info!("Webhook response: {} {}", status, body),
            Ok(body) => warn!("Webhook response: {} {}", status, body),
            Err(err) => warn!("Webhook replied {} but the body could not be read: {}", status, err),
        }
    }
}
