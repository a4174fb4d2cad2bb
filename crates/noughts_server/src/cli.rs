//! Command-line interface for noughts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Noughts - tic-tac-toe against a perfect opponent, with a leaderboard
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a minimax opponent and a leaderboard server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the leaderboard HTTP server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Leaderboard JSON file (created if it doesn't exist)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Play against the computer in the terminal
    Play {
        /// Leaderboard server URL. Results are not submitted without one.
        #[arg(long)]
        server_url: Option<String>,

        /// Name to submit results under
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the current leaderboard
    Leaderboard {
        /// Leaderboard server URL
        #[arg(long, default_value = "http://localhost:3000")]
        server_url: String,

        /// Highlight this player's row
        #[arg(short, long)]
        name: Option<String>,
    },
}
