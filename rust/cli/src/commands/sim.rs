//! Sim command handler: run a headless session, optionally recording results.

use crate::commands::{game_config, resolve_config, roster};
use crate::error::CliError;
use crate::leaderboard::LeaderboardStore;
use pokermind_engine::engine::Engine;
use pokermind_engine::record::{HandRecorder, NullRecorder};
use std::io::Write;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Handle the sim command.
///
/// Runs a full game without per-hand output. When a database path is
/// configured, every hand result is recorded for the leaderboard.
pub fn handle_sim_command(
    config: Option<String>,
    hands: Option<u64>,
    seed: Option<u64>,
    db: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = resolve_config(config.as_deref(), hands, seed, db)?;

    let recorder: Arc<dyn HandRecorder> = match &cfg.db_path {
        Some(path) => Arc::new(LeaderboardStore::open(path)?),
        None => Arc::new(NullRecorder),
    };

    let game_id = session_id();
    let mut engine =
        Engine::new(game_config(&cfg, game_id.clone()), roster(&cfg)).with_recorder(recorder);

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(engine.play_game())?;

    writeln!(out, "Game {game_id}: {} hand(s) played", summary.hands_played)?;
    for stack in &summary.stacks {
        writeln!(out, "  {}: {}", stack.name, stack.stack)?;
    }
    let total: u64 = summary.stacks.iter().map(|s| u64::from(s.stack)).sum();
    let expected = u64::from(cfg.starting_stack) * cfg.seats.len() as u64;
    writeln!(out, "Chips in play: {total} (expected {expected})")?;
    Ok(())
}

/// Unique-enough id for one recorded session.
fn session_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("sim-{nanos}")
}
