use std::time::Duration;

use serde::de::DeserializeOwned;
use theia_core::AlertRequest;

use crate::error::{BackendError, Result};
use crate::types::{
    AlertAck, Hallway, HallwayStatus, HallwayUpdate, LoginRequest, LoginResponse, Ping, Route,
    RouteRequest,
};

/// Default per-request timeout. Long enough for a slow prototype backend,
/// short enough that a dead network surfaces while the user is still
/// looking at the screen.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─── BackendClient ────────────────────────────────────────────────────────

/// Typed client for the Theia backend. One method per endpoint; cheap to
/// clone (the underlying HTTP client is reference-counted).
///
/// Non-2xx responses become [`BackendError::Rejected`] with the
/// body-provided detail message when the server sent one.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    /// `GET ping` — backend reachability check.
    pub async fn ping(&self) -> Result<Ping> {
        let response = self.http.get(self.endpoint("ping")).send().await?;
        decode(response).await
    }

    /// `POST alerts/fall` — dispatch one fall alert.
    pub async fn send_fall_alert(&self, alert: &AlertRequest) -> Result<AlertAck> {
        tracing::debug!(subject = alert.subject_id, "posting fall alert");
        let response = self
            .http
            .post(self.endpoint("alerts/fall"))
            .json(alert)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST manager/login` — building-manager credential check.
    ///
    /// The backend answers 404 for unknown credentials; that surfaces as
    /// [`BackendError::Rejected`] like any other refusal.
    pub async fn manager_login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.endpoint("manager/login"))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// `GET building-map/hallways` — every hallway with its current status.
    pub async fn list_hallways(&self) -> Result<Vec<Hallway>> {
        let response = self
            .http
            .get(self.endpoint("building-map/hallways"))
            .send()
            .await?;
        decode(response).await
    }

    /// `PUT building-map/hallways/{id}` — set one hallway's status.
    /// Returns the hallway as the server reconciled it.
    pub async fn update_hallway(&self, id: i64, status: HallwayStatus) -> Result<Hallway> {
        tracing::debug!(id, status = status.as_str(), "updating hallway");
        let response = self
            .http
            .put(self.endpoint(&format!("building-map/hallways/{id}")))
            .json(&HallwayUpdate { status })
            .send()
            .await?;
        decode(response).await
    }

    /// `POST guidance/route` — step-by-step guidance between two locations.
    pub async fn plan_route(&self, current_location: &str, destination: &str) -> Result<Route> {
        let body = RouteRequest {
            current_location: current_location.to_string(),
            destination: destination.to_string(),
        };
        let response = self
            .http
            .post(self.endpoint("guidance/route"))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

// ─── Response decoding ────────────────────────────────────────────────────

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status, &body);
    tracing::warn!(status = status.as_u16(), %message, "backend rejected request");
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body. FastAPI-style
/// backends put it under `detail`; fall back to the reason phrase.
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────
