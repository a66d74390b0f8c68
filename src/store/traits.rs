use crate::models::EnquiryRecord;
use crate::store::types::PersistenceError;
use async_trait::async_trait;

/// Append-only sink for submitted enquiries.
/// The form depends on nothing but `insert`, so any table-like backend fits.
#[async_trait]
pub trait EnquiryStore: Send + Sync {
    /// Append one enquiry; the store assigns its id and timestamp
    async fn insert(&self, record: &EnquiryRecord) -> Result<(), PersistenceError>;

    /// Get the name of the backing store, for logs
    fn store_name(&self) -> &'static str;
}
