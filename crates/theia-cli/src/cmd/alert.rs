use anyhow::Context;
use chrono::Local;
use clap::Subcommand;
use futures::StreamExt;
use std::task::Poll;
use theia_api::{BackendClient, BackendTransport};
use theia_core::{AlertController, AlertOutcome, ArmingConfig, ArmingState};

use crate::config::ClientConfig;
use crate::output::print_json;

#[derive(Subcommand, Debug)]
pub enum AlertSubcommand {
    /// Arm the fall alert: count down, then send (press Enter to cancel)
    Trigger {
        /// Countdown length in seconds (default from config)
        #[arg(long)]
        countdown: Option<u32>,
    },
}

pub fn run(cfg: &ClientConfig, subcommand: AlertSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        AlertSubcommand::Trigger { countdown } => trigger(cfg, countdown, json),
    }
}

fn trigger(cfg: &ClientConfig, countdown: Option<u32>, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(trigger_async(cfg, countdown, json));
    // The stdin listener may still sit in a blocking read; don't wait for it.
    rt.shutdown_background();
    result
}

async fn trigger_async(cfg: &ClientConfig, countdown: Option<u32>, json: bool) -> anyhow::Result<()> {
    let seconds = countdown.unwrap_or(cfg.countdown_seconds);
    let arming = ArmingConfig::new(seconds)?;
    let client = BackendClient::with_timeout(&cfg.server, cfg.timeout())?;
    let request = cfg.alert_request();
    let (controller, mut outcomes) = AlertController::spawn(
        BackendTransport::new(client),
        move || request.clone(),
        arming,
    );
    let mut states = controller.watch();

    controller.arm();
    if !json {
        println!("Trigger armed. Sending shortly... press Enter to cancel.");
    }

    let mut cancel = Box::pin(enter_pressed());
    let mut cancel_spent = false;

    loop {
        tokio::select! {
            outcome = outcomes.next() => {
                let outcome = outcome.context("alert flow ended without an outcome")?;
                return report(outcome, json);
            }
            changed = states.changed() => {
                if changed.is_err() {
                    anyhow::bail!("alert flow ended without an outcome");
                }
                let state = *states.borrow_and_update();
                match state {
                    ArmingState::Armed { remaining_seconds } => {
                        if !json {
                            println!("Sending fall alert in {remaining_seconds} s...");
                        }
                    }
                    ArmingState::Sending => {
                        if !json {
                            println!("Sending fall alert...");
                        }
                    }
                    ArmingState::Idle => {
                        // Idle either follows a successful cancel (no outcome
                        // will ever come) or accompanies an outcome that is
                        // already queued — check the queue before concluding.
                        if let Poll::Ready(Some(outcome)) = futures::poll!(outcomes.next()) {
                            return report(outcome, json);
                        }
                        if json {
                            print_json(&serde_json::json!({ "outcome": "cancelled" }))?;
                        } else {
                            println!("Cancelled");
                        }
                        return Ok(());
                    }
                }
            }
            _ = &mut cancel, if !cancel_spent => {
                cancel_spent = true;
                controller.cancel();
            }
        }
    }
}

fn report(outcome: AlertOutcome, json: bool) -> anyhow::Result<()> {
    let at = Local::now();
    if json {
        #[derive(serde::Serialize)]
        struct Report {
            at: String,
            #[serde(flatten)]
            outcome: AlertOutcome,
        }
        print_json(&Report {
            at: at.to_rfc3339(),
            outcome: outcome.clone(),
        })?;
    }
    if outcome.is_sent() {
        if !json {
            println!("[{}] {}", at.format("%H:%M:%S"), outcome.describe());
        }
        return Ok(());
    }
    anyhow::bail!("{}", outcome.describe());
}

/// Resolves when the user presses Enter. On EOF (piped stdin) cancellation
/// is simply unavailable, so the future stays pending forever.
async fn enter_pressed() {
    let pressed = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0)
    })
    .await
    .unwrap_or(false);

    if !pressed {
        std::future::pending::<()>().await;
    }
}
