use crate::models::EnquiryRecord;
use crate::store::traits::EnquiryStore;
use crate::store::types::{PersistenceError, StoreErrorBody};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Enquiry store backed by a hosted PostgREST table (`/rest/v1/<table>`)
pub struct RestTableStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestTableStore {
    /// Create a store client for `table` on the project at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

#[async_trait]
impl EnquiryStore for RestTableStore {
    async fn insert(&self, record: &EnquiryRecord) -> Result<(), PersistenceError> {
        let url = self.endpoint();
        debug!("Inserting enquiry into {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .context("Failed to reach enquiry store")?;

        let status = response.status();
        if status.is_success() {
            info!("Stored enquiry in {} ({})", self.table, status);
            return Ok(());
        }

        let text = response
            .text()
            .await
            .context("Failed to read store error body")?;
        let body: StoreErrorBody = serde_json::from_str(&text).unwrap_or_default();
        warn!(
            "Store rejected enquiry: {} code={:?} details={:?} hint={:?}",
            status, body.code, body.details, body.hint
        );

        Err(PersistenceError::Rejected {
            code: body.code,
            message: body
                .message
                .unwrap_or_else(|| format!("store returned {}", status)),
        })
    }

    fn store_name(&self) -> &'static str {
        "rest"
    }
}
