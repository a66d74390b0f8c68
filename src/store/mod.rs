pub mod memory;
pub mod rest;
pub mod traits;
pub mod types;

pub use memory::MemoryStore;
pub use rest::RestTableStore;
pub use traits::EnquiryStore;
pub use types::{PersistenceError, StoredEnquiry};
