pub mod fields;
pub mod prompt;

pub use fields::{FormError, FormField, FormSnapshot};

use crate::models::EnquiryRecord;
use crate::store::{EnquiryStore, PersistenceError};
use crate::validation::{is_valid_email, is_valid_phone};
use std::fmt;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Short non-blocking message for the person filling in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const INVALID_MOBILE: &str = "Please enter a valid mobile number (at least 10 digits).";
pub const SUBMITTED: &str = "Enquiry submitted successfully!";
pub const STORE_FAILED: &str = "Failed to submit enquiry. Please try again.";
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Holds the `submitting` flag up for as long as it lives, so a submit
/// future dropped mid-insert does not leave the form locked.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// The property enquiry questionnaire: current answers plus where the
/// submission stands.
#[derive(Debug, Clone, Default)]
pub struct EnquiryForm {
    snapshot: FormSnapshot,
    submitting: bool,
    submitted: bool,
}

impl EnquiryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// The submit control is disabled while a submission is in flight
    pub fn is_submit_enabled(&self) -> bool {
        !self.submitting
    }

    pub fn on_field_change(&mut self, field: FormField, value: impl Into<String>) {
        self.snapshot = self.snapshot.with(field, value.into());
    }

    /// Same as [`Self::on_field_change`], addressed by input name
    pub fn on_named_change(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse::<FormField>()?;
        self.on_field_change(field, value);
        Ok(())
    }

    /// Validate the answers and hand them to `store`.
    ///
    /// Returns `None` when the submission was ignored because one is already
    /// in flight. Answers are kept on every failure so the user can retry.
    pub async fn on_submit(&mut self, store: &dyn EnquiryStore) -> Option<Notification> {
        if !self.is_submit_enabled() {
            debug!("Submit ignored, a submission is already in flight");
            return None;
        }

        let record = match EnquiryRecord::try_from(&self.snapshot) {
            Ok(record) => record,
            Err(err) => {
                debug!("Submission blocked: {}", err);
                return Some(Notification::error(format!("{}.", err)));
            }
        };

        let in_flight = InFlight::start(&mut self.submitting);

        if !is_valid_email(&record.email) {
            return Some(Notification::error(INVALID_EMAIL));
        }

        if !is_valid_phone(&record.mobile) {
            return Some(Notification::error(INVALID_MOBILE));
        }

        let outcome = store.insert(&record).await;
        drop(in_flight);

        match outcome {
            Ok(()) => {
                info!("Enquiry submitted via {} store", store.store_name());
                self.submitted = true;
                Some(Notification::success(SUBMITTED))
            }
            Err(PersistenceError::Rejected { code, message }) => {
                warn!("Error submitting enquiry: {} (code {:?})", message, code);
                Some(Notification::error(STORE_FAILED))
            }
            Err(err @ PersistenceError::Unexpected(_)) => {
                error!("Unexpected error: {}", err);
                Some(Notification::error(UNEXPECTED_FAILURE))
            }
        }
    }

    /// Start a fresh enquiry after a successful one
    pub fn on_reset(&mut self) {
        self.submitted = false;
        self.snapshot = FormSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::fields::filled_snapshot;
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Store double that fails every insert the same way
    struct FailingStore {
        unexpected: bool,
        calls: AtomicUsize,
    }

    impl FailingStore {
        fn rejecting() -> Self {
            Self {
                unexpected: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn broken() -> Self {
            Self {
                unexpected: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EnquiryStore for FailingStore {
        async fn insert(&self, _record: &EnquiryRecord) -> Result<(), PersistenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unexpected {
                Err(anyhow::anyhow!("connection reset").into())
            } else {
                Err(PersistenceError::Rejected {
                    code: Some("23502".to_string()),
                    message: "null value in column".to_string(),
                })
            }
        }

        fn store_name(&self) -> &'static str {
            "failing"
        }
    }

    /// Store whose insert never completes
    struct HangingStore;

    #[async_trait]
    impl EnquiryStore for HangingStore {
        async fn insert(&self, _record: &EnquiryRecord) -> Result<(), PersistenceError> {
            std::future::pending().await
        }

        fn store_name(&self) -> &'static str {
            "hanging"
        }
    }

    fn filled_form() -> EnquiryForm {
        let mut form = EnquiryForm::new();
        let snapshot = filled_snapshot();
        for field in FormField::ALL {
            form.on_field_change(field, snapshot.get(field));
        }
        form
    }

    #[tokio::test]
    async fn successful_submit_marks_form_submitted() {
        let store = MemoryStore::new();
        let mut form = filled_form();

        let note = form.on_submit(&store).await.unwrap();

        assert_eq!(note, Notification::success(SUBMITTED));
        assert!(form.is_submitted());
        assert!(!form.is_submitting());
        assert_eq!(store.rows().len(), 1);
        assert_eq!(store.rows()[0].record.mobile, "+91 98450 12345");
    }

    #[tokio::test]
    async fn missing_field_never_reaches_store() {
        let store = MemoryStore::new();
        let mut form = filled_form();
        form.on_field_change(FormField::SiteVisit, "");

        let note = form.on_submit(&store).await.unwrap();

        assert!(note.is_error());
        assert_eq!(note.message, "Consultation Readiness is required.");
        assert!(store.rows().is_empty());
        assert!(!form.is_submitted());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_store() {
        let store = MemoryStore::new();
        let mut form = filled_form();
        form.on_field_change(FormField::Email, "not-an-email");

        let note = form.on_submit(&store).await.unwrap();

        assert_eq!(note, Notification::error(INVALID_EMAIL));
        assert!(store.rows().is_empty());
        assert!(!form.is_submitting());
        assert!(!form.is_submitted());
    }

    #[tokio::test]
    async fn short_mobile_never_reaches_store() {
        let store = MemoryStore::new();
        let mut form = filled_form();
        form.on_field_change(FormField::Mobile, "12345");

        let note = form.on_submit(&store).await.unwrap();

        assert_eq!(note, Notification::error(INVALID_MOBILE));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn rejected_insert_keeps_answers() {
        let store = FailingStore::rejecting();
        let mut form = filled_form();

        let note = form.on_submit(&store).await.unwrap();

        assert_eq!(note, Notification::error(STORE_FAILED));
        assert!(!form.is_submitted());
        assert!(!form.is_submitting());
        assert_eq!(form.snapshot(), &filled_snapshot());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unexpected_fault_gets_generic_message() {
        let store = FailingStore::broken();
        let mut form = filled_form();

        let note = form.on_submit(&store).await.unwrap();

        assert_eq!(note, Notification::error(UNEXPECTED_FAILURE));
        assert!(!form.is_submitted());
        assert_eq!(form.snapshot(), &filled_snapshot());
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_ignored() {
        let store = MemoryStore::new();
        let mut form = filled_form();
        form.submitting = true;

        assert!(!form.is_submit_enabled());
        assert!(form.on_submit(&store).await.is_none());
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn abandoned_submit_unlocks_form() {
        let mut form = filled_form();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), form.on_submit(&HangingStore)).await;
        assert!(abandoned.is_err());

        assert!(form.is_submit_enabled());
        assert!(!form.is_submitted());
        assert_eq!(form.snapshot(), &filled_snapshot());

        let store = MemoryStore::new();
        let note = form.on_submit(&store).await.unwrap();
        assert_eq!(note, Notification::success(SUBMITTED));
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn reset_returns_to_blank_form() {
        let store = MemoryStore::new();
        let mut form = filled_form();
        form.on_submit(&store).await.unwrap();

        form.on_reset();

        assert!(!form.is_submitted());
        assert!(!form.is_submitting());
        assert_eq!(form.snapshot(), &FormSnapshot::default());
    }

    #[test]
    fn named_change_routes_to_field() {
        let mut form = EnquiryForm::new();
        form.on_named_change("decision_maker", "Sole").unwrap();

        assert_eq!(form.snapshot().decision_maker, "Sole");
        assert!(form.on_named_change("postcode", "560001").is_err());
    }
}
