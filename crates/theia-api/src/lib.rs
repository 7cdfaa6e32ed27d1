//! `theia-api` — typed client for the Theia backend HTTP API.
//!
//! The backend owns all business logic (route planning, alert handling,
//! authentication, hallway state); this crate only composes requests and
//! decodes responses. One method per endpoint on [`BackendClient`], plus
//! [`BackendTransport`], the production [`theia_core::AlertTransport`]
//! implementation that bridges `POST alerts/fall` into the arming
//! controller's outcome model.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::BackendClient;
pub use error::{BackendError, Result};
pub use transport::BackendTransport;
pub use types::{
    AlertAck, Hallway, HallwayStatus, HallwayUpdate, LoginRequest, LoginResponse,
    NotificationReceipt, Ping, Route, RouteRequest, RouteStep,
};
