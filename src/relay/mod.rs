pub mod forward;
pub mod types;

pub use forward::WebhookClient;
pub use types::{RelayAck, RelayError, RelayRequest, WebhookPayload};

use anyhow::{Context, Result};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(Clone)]
struct RelayState {
    webhook: Arc<WebhookClient>,
}

/// Router for the relay endpoint: `POST /`, plus `OPTIONS` on any path
pub fn build_router(webhook: WebhookClient) -> Router {
    Router::new()
        .route("/", post(relay_enquiry).options(preflight))
        .fallback(unrouted)
        .layer(middleware::from_fn(cors_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(RelayState {
            webhook: Arc::new(webhook),
        })
}

/// Bind `addr` and serve the relay until the process stops
pub async fn serve(addr: &str, webhook: WebhookClient) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind relay on {}", addr))?;
    info!(
        "Relay listening on {}, forwarding to {}",
        listener.local_addr().context("Failed to read bound address")?,
        webhook.url()
    );

    axum::serve(listener, build_router(webhook))
        .await
        .context("Relay server stopped")?;
    Ok(())
}

/// Browsers call the relay cross-origin, so every reply is tagged
async fn cors_headers(req: Request<Body>, next: Next) -> Response {
    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    resp
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Pre-flight checks may target any path; everything else unrouted is 404
async fn unrouted(method: Method) -> StatusCode {
    if method == Method::OPTIONS {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn relay_enquiry(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let enquiry: RelayRequest = serde_json::from_slice(&body).map_err(|err| {
        error!("Error triggering webhook: {}", err);
        RelayError::from(err)
    })?;

    let payload = WebhookPayload {
        enquiry,
        submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    info!("Sending to webhook: {:?}", payload);

    // Downstream status never changes what the caller sees
    state.webhook.deliver(&payload).await;

    Ok(Json(RelayAck::triggered()).into_response())
}
