//! Noughts - unified CLI.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use noughts_server::{
    JsonFileBackend, LeaderboardClient, LeaderboardStore, PlaySession, ResultReporter,
    ServerConfig, render_leaderboard, router,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            data_file,
        } => {
            initialize_tracing("info,noughts_server=debug");
            run_server(config, host, port, data_file).await
        }
        Command::Play { server_url, name } => {
            initialize_tracing("warn");
            run_play(server_url, name).await
        }
        Command::Leaderboard { server_url, name } => {
            initialize_tracing("warn");
            show_leaderboard(server_url, name).await
        }
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the leaderboard HTTP server
#[instrument]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> Result<()> {
    let config =
        ServerConfig::load(config_path.as_deref())?.with_overrides(host, port, data_file);

    let store = LeaderboardStore::new(JsonFileBackend::new(config.data_file()));
    store.initialize().await?;

    let app = router(Arc::new(store), *config.top_n());

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        "Leaderboard server running on http://{}:{}",
        config.host(),
        config.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

/// Run the terminal game
#[instrument]
async fn run_play(server_url: Option<String>, name: Option<String>) -> Result<()> {
    let client = server_url.map(LeaderboardClient::new);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session =
        PlaySession::new(stdin, tokio::io::stdout()).with_player_name(name.as_deref())?;
    if let Some(client) = &client {
        session = session.with_reporter(client as &dyn ResultReporter);
    }
    session.run().await
}

/// Print the leaderboard from a running server
#[instrument]
async fn show_leaderboard(server_url: String, name: Option<String>) -> Result<()> {
    let records = LeaderboardClient::new(&server_url).fetch_top().await?;
    println!("{}", render_leaderboard(&records, name.as_deref()));
    Ok(())
}
