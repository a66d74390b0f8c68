use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TRIGGERED: &str = "Webhook triggered successfully";

/// Enquiry as posted to the relay. Every field must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub timeline: String,
    pub financing: String,
    pub purpose: String,
    pub decision_maker: String,
    pub activity: String,
    pub budget: String,
    pub site_visit: String,
}

/// What the automation webhook receives: the enquiry plus arrival time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(flatten)]
    pub enquiry: RelayRequest,
    /// ISO-8601, UTC, millisecond precision
    pub submitted_at: String,
}

/// Uniform reply envelope of the relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayAck {
    pub fn triggered() -> Self {
        Self {
            success: true,
            message: Some(TRIGGERED.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Faults raised by the relay itself, before or while building the forward
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayAck::failed(self.to_string())),
        )
            .into_response()
    }
}
