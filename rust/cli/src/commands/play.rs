//! Play command handler: run a session hand by hand with printed output.

use crate::commands::{game_config, resolve_config, roster};
use crate::error::CliError;
use pokermind_engine::engine::{Engine, HandStatus};
use std::io::Write;

/// Handle the play command.
///
/// Plays up to the configured number of hands and prints each hand's action
/// log and the resulting stacks. Ends early when fewer than two seats can
/// still post blinds.
pub fn handle_play_command(
    config: Option<String>,
    hands: Option<u64>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = resolve_config(config.as_deref(), hands, seed, None)?;
    let mut engine = Engine::new(game_config(&cfg, "local".to_string()), roster(&cfg));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        for _ in 0..cfg.num_hands {
            match engine.play_hand().await? {
                HandStatus::Completed => {}
                HandStatus::NotEnoughPlayers => {
                    writeln!(err, "Not enough players to continue")?;
                    break;
                }
            }
            writeln!(out, "=== Hand {} ===", engine.table().hand_number())?;
            for line in engine.table().action_log() {
                writeln!(out, "  {line}")?;
            }
            writeln!(out, "Stacks:")?;
            for p in engine.table().players() {
                writeln!(out, "  {}: {}", p.name(), p.stack())?;
            }
        }
        Ok::<(), CliError>(())
    })?;

    writeln!(out, "Session complete")?;
    Ok(())
}
