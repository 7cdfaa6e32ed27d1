use futures::future::BoxFuture;
use theia_core::{AlertOutcome, AlertRequest, AlertTransport};

use crate::client::BackendClient;
use crate::error::BackendError;

/// Message used when the backend acknowledges an alert without one.
const DEFAULT_SENT_MESSAGE: &str = "Fall alert sent.";

// ─── BackendTransport ─────────────────────────────────────────────────────

/// Production [`AlertTransport`] backed by [`BackendClient`].
///
/// Maps the client's result onto the controller's outcome model: 2xx →
/// `Sent` (with the body's `message` when provided), non-2xx → `Rejected`,
/// transport-level failures → `TransportFailed` with a short reason.
pub struct BackendTransport {
    client: BackendClient,
}

impl BackendTransport {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl AlertTransport for BackendTransport {
    fn send_alert(&self, request: AlertRequest) -> BoxFuture<'static, AlertOutcome> {
        let client = self.client.clone();
        Box::pin(async move {
            match client.send_fall_alert(&request).await {
                Ok(ack) => AlertOutcome::Sent {
                    message: ack
                        .message
                        .unwrap_or_else(|| DEFAULT_SENT_MESSAGE.to_string()),
                },
                Err(BackendError::Rejected { status, message }) => {
                    AlertOutcome::Rejected { status, message }
                }
                Err(BackendError::Http(err)) => AlertOutcome::TransportFailed {
                    reason: transport_reason(err),
                },
                Err(other) => AlertOutcome::TransportFailed {
                    reason: other.to_string(),
                },
            }
        })
    }
}

fn transport_reason(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "timeout".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        // Strip the URL; presenters show a one-line reason, not a debug dump.
        err.without_url().to_string()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request() -> AlertRequest {
        AlertRequest::new(1, 47.1234, -122.5678, "test")
    }

    #[tokio::test]
    async fn success_with_message_maps_to_sent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/alerts/fall")
            .with_status(200)
            .with_body(r#"{"status": "ok", "message": "Fall alert received. Contacts notified."}"#)
            .create_async()
            .await;

        let transport = BackendTransport::new(BackendClient::new(server.url()).unwrap());
        let outcome = transport.send_alert(request()).await;
        assert_eq!(
            outcome,
            AlertOutcome::Sent {
                message: "Fall alert received. Contacts notified.".into()
            }
        );
    }

    #[tokio::test]
    async fn success_without_message_uses_default() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/alerts/fall")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let transport = BackendTransport::new(BackendClient::new(server.url()).unwrap());
        let outcome = transport.send_alert(request()).await;
        assert_eq!(
            outcome,
            AlertOutcome::Sent {
                message: "Fall alert sent.".into()
            }
        );
    }

    #[tokio::test]
    async fn server_error_maps_to_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/alerts/fall")
            .with_status(500)
            .with_body("")
            .create_async()
            .await;

        let transport = BackendTransport::new(BackendClient::new(server.url()).unwrap());
        let outcome = transport.send_alert(request()).await;
        assert_eq!(
            outcome,
            AlertOutcome::Rejected {
                status: 500,
                message: "Internal Server Error".into()
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_transport_failed() {
        // Nothing listens on this port
        let client =
            BackendClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let transport = BackendTransport::new(client);
        let outcome = transport.send_alert(request()).await;
        assert!(matches!(outcome, AlertOutcome::TransportFailed { .. }));
    }

    #[tokio::test]
    async fn timeout_reports_the_literal_reason() {
        // A deliberately unroutable address forces a connect timeout.
        let client =
            BackendClient::with_timeout("http://10.255.255.1", Duration::from_millis(100)).unwrap();
        let transport = BackendTransport::new(client);
        let outcome = transport.send_alert(request()).await;
        match outcome {
            AlertOutcome::TransportFailed { reason } => {
                assert!(reason == "timeout" || reason == "connection failed");
            }
            other => panic!("expected TransportFailed, got {other:?}"),
        }
    }
}
