mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use cmd::{alert::AlertSubcommand, manager::ManagerSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "theia",
    about = "Theia assistive-navigation client — fall alerts, guidance, and hallway management",
    version,
    propagate_version = true
)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = "THEIA_SERVER")]
    server: Option<String>,

    /// Config file (default: ~/.config/theia/config.yaml)
    #[arg(long, global = true, env = "THEIA_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend reachability
    Ping,

    /// Fall-alert flow: arm, count down, then send or cancel
    Alert {
        #[command(subcommand)]
        subcommand: AlertSubcommand,
    },

    /// Request step-by-step guidance between two locations
    Guidance {
        /// Starting location
        #[arg(long)]
        from: Option<String>,

        /// Destination
        #[arg(long)]
        to: Option<String>,
    },

    /// Building-manager actions: login and hallway status
    Manager {
        #[command(subcommand)]
        subcommand: ManagerSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cfg = match config::ClientConfig::resolve(cli.config.as_deref(), cli.server.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Ping => cmd::ping::run(&cfg, cli.json),
        Commands::Alert { subcommand } => cmd::alert::run(&cfg, subcommand, cli.json),
        Commands::Guidance { from, to } => cmd::guidance::run(&cfg, from, to, cli.json),
        Commands::Manager { subcommand } => cmd::manager::run(&cfg, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
