use anyhow::Context;
use theia_api::BackendClient;

use crate::config::ClientConfig;
use crate::output::print_json;

pub fn run(cfg: &ClientConfig, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = BackendClient::with_timeout(&cfg.server, cfg.timeout())?;
        let ping = client.ping().await.context("backend unreachable")?;
        if json {
            return print_json(&ping);
        }
        println!("{}", ping.message);
        Ok(())
    })
}
