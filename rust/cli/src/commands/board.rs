//! Leaderboard command handler: print standings from the results database.

use crate::commands::resolve_config;
use crate::error::CliError;
use crate::leaderboard::LeaderboardStore;
use std::io::Write;

/// Handle the leaderboard command.
pub fn handle_leaderboard_command(
    config: Option<String>,
    db: Option<String>,
    limit: u32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = resolve_config(config.as_deref(), None, None, db)?;
    let Some(path) = cfg.db_path else {
        return Err(CliError::InvalidInput(
            "no database path; pass --db or set db_path in the configuration".to_string(),
        ));
    };

    let store = LeaderboardStore::open(&path)?;
    let rows = store.leaderboard(limit)?;
    if rows.is_empty() {
        writeln!(out, "No recorded hands in {path}")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:>6} {:>7} {:>10} {:>8} {:>9}",
        "name", "games", "hands", "net", "win%", "bb/100"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<20} {:>6} {:>7} {:>10} {:>8.2} {:>9.2}",
            row.name,
            row.games_played,
            row.hands_played,
            row.net_profit,
            row.win_rate,
            row.bb_per_100
        )?;
    }
    Ok(())
}
