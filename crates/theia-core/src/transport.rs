use futures::future::BoxFuture;

use crate::alert::{AlertOutcome, AlertRequest};

/// The collaborator that performs the actual network call for one alert.
///
/// Injected into [`crate::AlertController`] at construction — never reached
/// through a process-wide singleton — so the controller stays testable with
/// fakes. The returned future must resolve exactly once, to exactly one
/// [`AlertOutcome`]; transport-level failures are reported as
/// [`AlertOutcome::TransportFailed`], not as panics or errors.
///
/// The future is `'static` so the controller's actor can hold it across
/// `select!` iterations; implementations clone whatever handles they need
/// into it (an HTTP client handle is cheap to clone).
pub trait AlertTransport: Send + Sync + 'static {
    fn send_alert(&self, request: AlertRequest) -> BoxFuture<'static, AlertOutcome>;
}
