//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pokermind", version, about = "Texas Hold'em hand engine")]
pub struct PokermindCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a session at the table with per-hand output
    Play {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Number of hands to play (overrides the configuration)
        #[arg(long)]
        hands: Option<u64>,
        /// Deck RNG seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a headless session, optionally recording results
    Sim {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Number of hands to simulate (overrides the configuration)
        #[arg(long)]
        hands: Option<u64>,
        /// Deck RNG seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
        /// SQLite database to record results into
        #[arg(long)]
        db: Option<String>,
    },
    /// Show recorded standings from the results database
    Leaderboard {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// SQLite database to read
        #[arg(long)]
        db: Option<String>,
        /// Maximum number of rows to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}
