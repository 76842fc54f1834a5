mod check_cmd;
mod output;
mod roles_cmd;
mod status_cmd;
mod validate_cmd;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use hireforge_config::{config_dir, config_file_path, load_and_prepare, HireForgeConfig};
use hireforge_gateway::{build_router, GateState};
use logging::{init_logger, LogSettings};

#[derive(Parser)]
#[command(name = "hireforge")]
#[command(about = "HireForge: role-based access gate for the HR admin area")]
#[command(version)]
struct Cli {
    /// Config file (default: $HIREFORGE_CONFIG_DIR/config.yaml or ~/.hireforge/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gated HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the gate decision for a path
    Check {
        /// Request path, e.g. /admin/jobs
        #[arg(long)]
        path: String,
        /// Session role; omit to simulate an anonymous caller
        #[arg(long)]
        role: Option<String>,
    },
    /// Print the effective role → capability table
    Roles {
        /// Only list roles holding this capability
        #[arg(long)]
        capability: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate the config file
    Validate,
    /// Query a running server's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Validate => validate_cmd::run(&config_path).await,
        Commands::Serve { port } => {
            let config = load_and_prepare(&config_path).await?;
            init_logger(&log_settings(&config));
            run_server(config, port).await
        }
        Commands::Check { path, role } => {
            let config = load_and_prepare(&config_path).await?;
            check_cmd::run(&config, &path, role.as_deref())
        }
        Commands::Roles { capability, json } => {
            let config = load_and_prepare(&config_path).await?;
            roles_cmd::run(&config, capability.as_deref(), json)
        }
        Commands::Status => {
            let config = load_and_prepare(&config_path).await?;
            status_cmd::run(config.host(), config.port()).await
        }
    }
}

fn log_settings(config: &HireForgeConfig) -> LogSettings {
    LogSettings {
        level: config.log_level().to_string(),
        json: config.log_json(),
        dir: config.log_dir().map(PathBuf::from),
    }
}

async fn run_server(config: HireForgeConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port());
    let addr: SocketAddr = format!("{}:{}", config.host(), port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host(), port))?;

    let (gate, _sessions) = GateState::from_config(&config).await?;
    let prefixes: Vec<&str> = gate
        .gate
        .policy()
        .rules()
        .iter()
        .map(|r| r.prefix.as_str())
        .collect();
    info!(
        addr = %addr,
        prefixes = ?prefixes,
        "Starting HireForge gateway"
    );

    let app = build_router(gate, Router::new()).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
