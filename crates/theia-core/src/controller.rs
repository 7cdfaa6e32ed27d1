use std::future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Sleep};

use crate::alert::{AlertOutcome, AlertRequest};
use crate::arming::{ArmingMachine, ArmingState, Tick};
use crate::error::{CoreError, Result};
use crate::transport::AlertTransport;

// ─── ArmingConfig ─────────────────────────────────────────────────────────

/// Countdown parameters for an [`AlertController`].
#[derive(Debug, Clone)]
pub struct ArmingConfig {
    countdown_seconds: u32,
    tick_interval: Duration,
}

impl ArmingConfig {
    pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 5;

    /// A countdown of `countdown_seconds` ticks, one second apart.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCountdown`] for a zero-length countdown;
    /// every alert must leave the user a window to cancel.
    pub fn new(countdown_seconds: u32) -> Result<Self> {
        if countdown_seconds == 0 {
            return Err(CoreError::InvalidCountdown(countdown_seconds));
        }
        Ok(Self {
            countdown_seconds,
            tick_interval: Duration::from_secs(1),
        })
    }

    /// Override the wall-clock length of one tick (tests use short ticks).
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }
}

impl Default for ArmingConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: Self::DEFAULT_COUNTDOWN_SECONDS,
            tick_interval: Duration::from_secs(1),
        }
    }
}

// ─── OutcomeStream ────────────────────────────────────────────────────────

/// An async stream of [`AlertOutcome`]s, one per completed send attempt.
///
/// Backed by the controller's outcome channel. Ends (yields `None`) once the
/// controller actor has shut down and all pending outcomes are consumed.
pub struct OutcomeStream {
    rx: mpsc::UnboundedReceiver<AlertOutcome>,
}

impl Stream for OutcomeStream {
    type Item = AlertOutcome;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

// ─── AlertController ──────────────────────────────────────────────────────

enum Command {
    Arm,
    Cancel,
}

/// Handle to the arming actor.
///
/// `arm` and `cancel` return immediately; the actor task applies them in
/// arrival order together with its own countdown ticks and the transport
/// outcome, so no two events ever interleave — the host runtime may call
/// the handle from any thread without extra locking.
///
/// Dropping the handle shuts the actor down; anything still in flight is
/// dropped with it, so keep the handle alive until the outcome arrives.
pub struct AlertController {
    commands: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ArmingState>,
}

impl AlertController {
    /// Spawn the actor task.
    ///
    /// `request_factory` is evaluated at dispatch time — not at arming
    /// time — so each attempt captures current location data. Returns the
    /// handle plus the stream of outcomes.
    pub fn spawn<T, F>(
        transport: T,
        request_factory: F,
        config: ArmingConfig,
    ) -> (Self, OutcomeStream)
    where
        T: AlertTransport,
        F: Fn() -> AlertRequest + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ArmingState::Idle);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_actor(
            Arc::new(transport),
            request_factory,
            config,
            cmd_rx,
            state_tx,
            outcome_tx,
        ));

        (
            Self {
                commands: cmd_tx,
                state_rx,
            },
            OutcomeStream { rx: outcome_rx },
        )
    }

    /// Start the countdown. A no-op while already armed or sending, so a
    /// rapid double-tap cannot queue a second dispatch.
    pub fn arm(&self) {
        let _ = self.commands.send(Command::Arm);
    }

    /// Abort the countdown. A no-op while idle or once sending has begun.
    pub fn cancel(&self) {
        let _ = self.commands.send(Command::Cancel);
    }

    /// The state as of the last published transition.
    pub fn state(&self) -> ArmingState {
        *self.state_rx.borrow()
    }

    /// Subscribe to state transitions (for presenters).
    pub fn watch(&self) -> watch::Receiver<ArmingState> {
        self.state_rx.clone()
    }
}

// ─── Actor ────────────────────────────────────────────────────────────────

async fn run_actor<F>(
    transport: Arc<dyn AlertTransport>,
    request_factory: F,
    config: ArmingConfig,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<ArmingState>,
    outcome_tx: mpsc::UnboundedSender<AlertOutcome>,
) where
    F: Fn() -> AlertRequest + Send + 'static,
{
    let mut machine = ArmingMachine::new();
    // Pending countdown tick; `None` whenever the machine is not armed, so
    // no tick can fire after cancel or dispatch.
    let mut next_tick: Option<Pin<Box<Sleep>>> = None;
    let mut in_flight: Option<BoxFuture<'static, AlertOutcome>> = None;

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                // All handles dropped — shut down.
                None => break,
                Some(Command::Arm) => {
                    if machine.arm(config.countdown_seconds) {
                        tracing::debug!(seconds = config.countdown_seconds, "alert armed");
                        next_tick = Some(Box::pin(time::sleep(config.tick_interval)));
                        let _ = state_tx.send(machine.state());
                    }
                }
                Some(Command::Cancel) => {
                    if machine.cancel() {
                        tracing::debug!("countdown cancelled");
                        next_tick = None;
                        let _ = state_tx.send(machine.state());
                    }
                }
            },
            _ = tick_elapsed(&mut next_tick), if next_tick.is_some() => {
                match machine.tick() {
                    Tick::Counting(remaining) => {
                        tracing::debug!(remaining, "countdown tick");
                        next_tick = Some(Box::pin(time::sleep(config.tick_interval)));
                        let _ = state_tx.send(machine.state());
                    }
                    Tick::Dispatch => {
                        next_tick = None;
                        let _ = state_tx.send(machine.state());
                        let request = request_factory();
                        tracing::debug!(subject = request.subject_id, "dispatching alert");
                        in_flight = Some(transport.send_alert(request));
                    }
                    Tick::Ignored => {
                        next_tick = None;
                    }
                }
            },
            outcome = send_resolved(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                machine.settle();
                if !outcome.is_sent() {
                    tracing::warn!(outcome = %outcome.describe(), "alert not delivered");
                }
                let _ = state_tx.send(machine.state());
                let _ = outcome_tx.send(outcome);
            }
        }
    }
}

/// Await the pending tick. Only polled under a `next_tick.is_some()` guard;
/// the `None` arm keeps the future well-formed without unwrapping.
async fn tick_elapsed(next_tick: &mut Option<Pin<Box<Sleep>>>) {
    match next_tick.as_mut() {
        Some(sleep) => sleep.await,
        None => future::pending().await,
    }
}

/// Await the in-flight send. Same guard discipline as [`tick_elapsed`].
async fn send_resolved(in_flight: &mut Option<BoxFuture<'static, AlertOutcome>>) -> AlertOutcome {
    match in_flight.as_mut() {
        Some(fut) => fut.await,
        None => future::pending().await,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
