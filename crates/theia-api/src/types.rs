use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BackendError;

// ─── alerts/fall ──────────────────────────────────────────────────────────

/// Acknowledgement body from `POST alerts/fall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// One receipt per emergency contact the backend notified.
    #[serde(default)]
    pub notifications: Vec<NotificationReceipt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub contact: String,
    pub channel: String,
    pub status: String,
}

// ─── manager/login ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
}

// ─── building-map/hallways ────────────────────────────────────────────────

/// The two-valued availability enum the backend stores per hallway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallwayStatus {
    Available,
    UnderConstruction,
}

impl HallwayStatus {
    /// The wire value (`available` / `under_construction`).
    pub fn as_str(self) -> &'static str {
        match self {
            HallwayStatus::Available => "available",
            HallwayStatus::UnderConstruction => "under_construction",
        }
    }

    /// The other status — the client only ever flips between the two.
    pub fn toggled(self) -> Self {
        match self {
            HallwayStatus::Available => HallwayStatus::UnderConstruction,
            HallwayStatus::UnderConstruction => HallwayStatus::Available,
        }
    }
}

impl fmt::Display for HallwayStatus {
    /// Human-readable form: wire value with underscores spaced out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HallwayStatus::Available => f.write_str("available"),
            HallwayStatus::UnderConstruction => f.write_str("under construction"),
        }
    }
}

impl std::str::FromStr for HallwayStatus {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(HallwayStatus::Available),
            "under_construction" => Ok(HallwayStatus::UnderConstruction),
            _ => Err(BackendError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hallway {
    pub id: i64,
    pub name: String,
    pub status: HallwayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT building-map/hallways/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct HallwayUpdate {
    pub status: HallwayStatus,
}

// ─── guidance/route ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest {
    pub current_location: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStep {
    pub order: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub summary: String,
    pub steps: Vec<RouteStep>,
}

// ─── ping ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ping {
    pub message: String,
}

// ─── Tests ────────────────────────────────────────────────────────────────
