use crate::models::EnquiryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why an insert did not go through
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store answered and refused the write (constraint violation, bad
    /// credentials, unknown table, ...)
    #[error("store rejected the enquiry: {message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },
    /// Anything else: the store could not be reached, the reply was
    /// unreadable, the store itself broke
    #[error("unexpected store failure: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

/// An enquiry as it sits in the store, with the identity the store gave it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEnquiry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: EnquiryRecord,
}

/// Error body returned by a PostgREST-style table endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}
