//! `theia-core` — the arming state machine behind the Theia fall-alert flow.
//!
//! Converts a user's "trigger" intent into, after a configurable countdown,
//! exactly one outbound alert request, while allowing the user to abort
//! before dispatch. No UI framework, no HTTP: rendering lives in whatever
//! presenter subscribes to the state channel, and the network call lives
//! behind the [`AlertTransport`] seam.
//!
//! # Architecture
//!
//! ```text
//! arm() / cancel()
//!     │
//!     ▼
//! AlertController  ← one Tokio task owning an ArmingMachine; commands,
//!     │              ticks, and the in-flight send resolve serially
//!     ▼
//! ArmingState      ← published via tokio::sync::watch for presenters
//! AlertOutcome     ← exactly one per completed send, via OutcomeStream
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use theia_core::{AlertController, AlertRequest, ArmingConfig};
//!
//! let config = ArmingConfig::new(5)?;
//! let (controller, mut outcomes) =
//!     AlertController::spawn(transport, || AlertRequest::new(1, 47.12, -122.56, "demo"), config);
//!
//! controller.arm();
//! if let Some(outcome) = outcomes.next().await {
//!     println!("{}", outcome.describe());
//! }
//! ```

pub mod alert;
pub mod arming;
pub mod controller;
pub mod error;
pub mod transport;

pub use alert::{AlertOutcome, AlertRequest};
pub use arming::{ArmingMachine, ArmingState, Tick};
pub use controller::{AlertController, ArmingConfig, OutcomeStream};
pub use error::{CoreError, Result};
pub use transport::AlertTransport;
