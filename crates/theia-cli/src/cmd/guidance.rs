use anyhow::Context;
use theia_api::BackendClient;

use crate::config::ClientConfig;
use crate::output::print_json;

pub fn run(
    cfg: &ClientConfig,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = BackendClient::with_timeout(&cfg.server, cfg.timeout())?;
        let current = or_default(from, "Current hallway");
        let destination = or_default(to, "Next classroom");

        let route = client
            .plan_route(&current, &destination)
            .await
            .context("guidance request failed")?;

        if json {
            return print_json(&route);
        }

        println!("Summary:");
        println!("{}", route.summary);
        if !route.steps.is_empty() {
            println!();
            println!("Steps:");
            for step in &route.steps {
                println!("  {}. {}", step.order, step.instruction);
            }
        }
        Ok(())
    })
}

/// Blank inputs fall back to the prototype's placeholder locations.
fn or_default(value: Option<String>, fallback: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
