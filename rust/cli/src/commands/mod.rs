//! Command handlers and the shared configuration-to-engine plumbing.

pub mod board;
pub mod play;
pub mod sim;

pub use board::handle_leaderboard_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::config::{self, Config, SeatConfig};
use crate::error::CliError;
use pokermind_ai::{build_provider, SeatSpec};
use pokermind_engine::engine::{GameConfig, PacingConfig};
use pokermind_engine::provider::DecisionProvider;

const DEFAULT_MODEL_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Load the configuration and fold in command-line overrides.
pub(crate) fn resolve_config(
    path: Option<&str>,
    hands: Option<u64>,
    seed: Option<u64>,
    db: Option<String>,
) -> Result<Config, CliError> {
    let mut cfg = config::load(path).map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(hands) = hands {
        cfg.num_hands = hands;
    }
    if let Some(seed) = seed {
        cfg.seed = Some(seed);
    }
    if let Some(db) = db {
        cfg.db_path = Some(db);
    }
    Ok(cfg)
}

fn seat_spec(seat: &SeatConfig) -> SeatSpec {
    match &seat.model {
        Some(model) => SeatSpec::Model {
            name: seat.name.clone(),
            endpoint: seat
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_string()),
            model: model.clone(),
            api_key: seat
                .api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .unwrap_or_default(),
        },
        None => SeatSpec::Rules {
            name: seat.name.clone(),
        },
    }
}

pub(crate) fn roster(cfg: &Config) -> Vec<(String, Box<dyn DecisionProvider>)> {
    cfg.seats
        .iter()
        .map(|seat| build_provider(&seat_spec(seat)))
        .collect()
}

pub(crate) fn game_config(cfg: &Config, game_id: String) -> GameConfig {
    GameConfig {
        game_id,
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind,
        starting_stack: cfg.starting_stack,
        num_hands: cfg.num_hands,
        seed: cfg.seed,
        pacing: PacingConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_without_model_uses_the_rule_policy() {
        let seat = SeatConfig {
            name: "local".into(),
            model: None,
            endpoint: None,
            api_key: None,
        };
        assert!(matches!(seat_spec(&seat), SeatSpec::Rules { .. }));
    }

    #[test]
    fn model_seat_falls_back_to_the_default_endpoint() {
        let seat = SeatConfig {
            name: "llm".into(),
            model: Some("gpt-4o".into()),
            endpoint: None,
            api_key: Some("key".into()),
        };
        match seat_spec(&seat) {
            SeatSpec::Model { endpoint, model, .. } => {
                assert_eq!(endpoint, DEFAULT_MODEL_ENDPOINT);
                assert_eq!(model, "gpt-4o");
            }
            other => panic!("unexpected spec: {other:?}"),
        }
    }
}
