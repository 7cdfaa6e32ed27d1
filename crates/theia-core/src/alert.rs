use serde::{Deserialize, Serialize};

// ─── AlertRequest ─────────────────────────────────────────────────────────

/// One fall-alert payload, shaped for `POST alerts/fall`.
///
/// Immutable once constructed; the controller builds a fresh one for every
/// send attempt (via its request factory) so location data is current at
/// dispatch time, not at arming time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    /// Opaque identifier of the person the alert concerns.
    /// The backend calls this `user_id`.
    #[serde(rename = "user_id")]
    pub subject_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form tag identifying the origin client.
    pub source: String,
}

impl AlertRequest {
    pub fn new(subject_id: i64, latitude: f64, longitude: f64, source: impl Into<String>) -> Self {
        Self {
            subject_id,
            latitude,
            longitude,
            source: source.into(),
        }
    }
}

// ─── AlertOutcome ─────────────────────────────────────────────────────────

/// The terminal result of one send attempt. Produced exactly once per
/// dispatched request; the controller returns to `Idle` in all three cases.
/// Failed sends are never retried automatically — retry is a manual
/// re-trigger by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlertOutcome {
    /// The server accepted the alert.
    Sent { message: String },
    /// The server was reachable but refused the request.
    Rejected { status: u16, message: String },
    /// The server could not be reached (timeout, connection error).
    TransportFailed { reason: String },
}

impl AlertOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, AlertOutcome::Sent { .. })
    }

    /// Human-readable status line for presenters.
    pub fn describe(&self) -> String {
        match self {
            AlertOutcome::Sent { message } => format!("Success: {message}"),
            AlertOutcome::Rejected { status, message } => format!("Error {status}: {message}"),
            AlertOutcome::TransportFailed { reason } => format!("Network error: {reason}"),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
