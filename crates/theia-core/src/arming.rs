use serde::{Deserialize, Serialize};
use std::fmt;

// ─── ArmingState ──────────────────────────────────────────────────────────

/// Where the alert flow currently stands.
///
/// At most one of {countdown, in-flight request} is active at any instant:
/// `Armed` and `Sending` are mutually exclusive by construction. The machine
/// is cyclic — `Idle` is re-entered after every cancel and after every
/// completed send, so it is reusable across repeated alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ArmingState {
    /// No countdown in progress, no send in flight.
    #[default]
    Idle,
    /// Countdown ticking; `remaining_seconds` is strictly decreasing.
    Armed { remaining_seconds: u32 },
    /// Request in flight; no countdown. Cancellation no longer has effect.
    Sending,
}

impl ArmingState {
    pub fn is_idle(self) -> bool {
        matches!(self, ArmingState::Idle)
    }

    pub fn is_armed(self) -> bool {
        matches!(self, ArmingState::Armed { .. })
    }

    pub fn is_sending(self) -> bool {
        matches!(self, ArmingState::Sending)
    }
}

impl fmt::Display for ArmingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmingState::Idle => f.write_str("idle"),
            ArmingState::Armed { remaining_seconds } => {
                write!(f, "armed ({remaining_seconds} s)")
            }
            ArmingState::Sending => f.write_str("sending"),
        }
    }
}

// ─── Tick ─────────────────────────────────────────────────────────────────

/// What a single countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown still running; seconds remaining after the decrement.
    Counting(u32),
    /// Countdown reached zero: the caller must dispatch exactly one request.
    Dispatch,
    /// Not armed; nothing happened.
    Ignored,
}

// ─── ArmingMachine ────────────────────────────────────────────────────────

/// The pure transition table of the arming flow. No timers, no I/O — the
/// driving layer supplies ticks and performs the dispatch; this type only
/// decides what each event means in the current state.
///
/// Misuse never panics and never errors: arming while armed or sending,
/// cancelling while idle or sending, and ticking outside a countdown are
/// all silent no-ops, so a rapid double-tap can never queue a second send.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmingMachine {
    state: ArmingState,
}

impl ArmingMachine {
    pub fn new() -> Self {
        Self {
            state: ArmingState::Idle,
        }
    }

    pub fn state(&self) -> ArmingState {
        self.state
    }

    /// Start a countdown of `countdown_seconds` ticks.
    ///
    /// Returns `true` if the machine transitioned to `Armed`; `false` if the
    /// call was ignored (already armed, already sending, or a zero-length
    /// countdown).
    pub fn arm(&mut self, countdown_seconds: u32) -> bool {
        match self.state {
            ArmingState::Idle if countdown_seconds >= 1 => {
                self.state = ArmingState::Armed {
                    remaining_seconds: countdown_seconds,
                };
                true
            }
            _ => false,
        }
    }

    /// Abort the countdown. Returns `true` if a countdown was stopped;
    /// `false` if there was nothing to cancel. Has no effect once `Sending`
    /// has begun — a safety alert already dispatched is not interrupted.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            ArmingState::Armed { .. } => {
                self.state = ArmingState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Advance the countdown by one tick.
    pub fn tick(&mut self) -> Tick {
        match self.state {
            ArmingState::Armed {
                remaining_seconds: 1,
            } => {
                self.state = ArmingState::Sending;
                Tick::Dispatch
            }
            ArmingState::Armed { remaining_seconds } => {
                let remaining = remaining_seconds - 1;
                self.state = ArmingState::Armed {
                    remaining_seconds: remaining,
                };
                Tick::Counting(remaining)
            }
            _ => Tick::Ignored,
        }
    }

    /// Record that the in-flight request has resolved, returning to `Idle`.
    /// Returns `false` if no send was in flight.
    pub fn settle(&mut self) -> bool {
        match self.state {
            ArmingState::Sending => {
                self.state = ArmingState::Idle;
                true
            }
            _ => false,
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
