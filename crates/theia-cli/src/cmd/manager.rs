use anyhow::Context;
use clap::Subcommand;
use theia_api::{BackendClient, BackendError, Hallway, HallwayStatus};

use crate::config::ClientConfig;
use crate::output::{print_json, print_table};

#[derive(Subcommand, Debug)]
pub enum ManagerSubcommand {
    /// Log in with building-manager credentials
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Inspect and update hallway availability
    Hallways {
        #[command(subcommand)]
        subcommand: HallwaySubcommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum HallwaySubcommand {
    /// List hallways with their current status
    List,

    /// Set a hallway to an explicit status ('available' or 'under_construction')
    Set { id: i64, status: String },

    /// Flip a hallway between available and under construction
    Toggle { id: i64 },
}

pub fn run(cfg: &ClientConfig, subcommand: ManagerSubcommand, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = BackendClient::with_timeout(&cfg.server, cfg.timeout())?;
        match subcommand {
            ManagerSubcommand::Login { username, password } => {
                login(&client, &username, &password, json).await
            }
            ManagerSubcommand::Hallways { subcommand } => match subcommand {
                HallwaySubcommand::List => list(&client, json).await,
                HallwaySubcommand::Set { id, status } => {
                    let status: HallwayStatus = status.parse()?;
                    update(&client, id, status, json).await
                }
                HallwaySubcommand::Toggle { id } => toggle(&client, id, json).await,
            },
        }
    })
}

async fn login(
    client: &BackendClient,
    username: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<()> {
    if username.trim().is_empty() || password.trim().is_empty() {
        anyhow::bail!("please enter a username and password");
    }

    match client.manager_login(username, password).await {
        Ok(response) if response.success => {
            if json {
                return print_json(&response);
            }
            println!("Login successful");
            Ok(())
        }
        // The backend answers 404 for unknown credentials
        Ok(_) => anyhow::bail!("Invalid credentials"),
        Err(BackendError::Rejected {
            status: 401 | 404, ..
        }) => anyhow::bail!("Invalid credentials"),
        Err(err) => Err(err).context("login request failed"),
    }
}

async fn list(client: &BackendClient, json: bool) -> anyhow::Result<()> {
    let hallways = client
        .list_hallways()
        .await
        .context("failed to load hallways")?;

    if json {
        return print_json(&hallways);
    }

    if hallways.is_empty() {
        println!("No hallways.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = hallways.iter().map(hallway_row).collect();
    print_table(&["ID", "NAME", "STATUS", "DESCRIPTION"], rows);
    Ok(())
}

async fn update(
    client: &BackendClient,
    id: i64,
    status: HallwayStatus,
    json: bool,
) -> anyhow::Result<()> {
    let hallway = client
        .update_hallway(id, status)
        .await
        .context("hallway update failed")?;

    if json {
        return print_json(&hallway);
    }
    // Echo the server's reconciled state, not what we asked for
    println!("Set {} to {}", hallway.name, hallway.status);
    Ok(())
}

async fn toggle(client: &BackendClient, id: i64, json: bool) -> anyhow::Result<()> {
    let hallways = client
        .list_hallways()
        .await
        .context("failed to load hallways")?;
    let current = hallways
        .iter()
        .find(|h| h.id == id)
        .with_context(|| format!("hallway {id} not found"))?;

    update(client, id, current.status.toggled(), json).await
}

fn hallway_row(hallway: &Hallway) -> Vec<String> {
    vec![
        hallway.id.to_string(),
        hallway.name.clone(),
        hallway.status.to_string(),
        hallway.description.clone().unwrap_or_default(),
    ]
}
