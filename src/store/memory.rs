use crate::models::EnquiryRecord;
use crate::store::traits::EnquiryStore;
use crate::store::types::{PersistenceError, StoredEnquiry};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// In-process enquiry store, for tests and for running without a backend
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<StoredEnquiry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything inserted so far, oldest first
    pub fn rows(&self) -> Vec<StoredEnquiry> {
        self.rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl EnquiryStore for MemoryStore {
    async fn insert(&self, record: &EnquiryRecord) -> Result<(), PersistenceError> {
        let stored = StoredEnquiry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            record: record.clone(),
        };
        info!("Stored enquiry {} in memory", stored.id);

        self.rows
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?
            .push(stored);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
