//! HTTP handlers for the game lifecycle endpoints.

use crate::session::{CreateGameSpec, GameManager, SessionError};
use pokermind_ai::SeatSpec;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

const DEFAULT_MODEL_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// One seat in the roster. A seat with a `model` plays through the remote
/// provider; without one it runs the built-in rule policy.
#[derive(Debug, Clone, Deserialize)]
pub struct SeatRequest {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub small_blind: u32,
    pub big_blind: u32,
    pub player_stack: u32,
    pub num_hands: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub action_delay_ms: u64,
    #[serde(default)]
    pub street_delay_ms: u64,
    pub players: Vec<SeatRequest>,
}

impl CreateGameRequest {
    fn into_spec(self) -> CreateGameSpec {
        let seats = self
            .players
            .into_iter()
            .map(|seat| match seat.model {
                Some(model) => SeatSpec::Model {
                    name: seat.name,
                    endpoint: seat
                        .endpoint
                        .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_string()),
                    model,
                    api_key: seat
                        .api_key
                        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                        .unwrap_or_default(),
                },
                None => SeatSpec::Rules { name: seat.name },
            })
            .collect();
        CreateGameSpec {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.player_stack,
            num_hands: self.num_hands,
            seed: self.seed,
            action_delay: Duration::from_millis(self.action_delay_ms),
            street_delay: Duration::from_millis(self.street_delay_ms),
            seats,
        }
    }
}

pub async fn create_game(manager: GameManager, request: CreateGameRequest) -> Response {
    match manager.create_game(request.into_spec()) {
        Ok(game_id) => reply::with_status(
            reply::json(&serde_json::json!({
                "game_id": game_id,
                "message": "Game created successfully",
            })),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn start_game(manager: GameManager, game_id: String) -> Response {
    match manager.start_game(&game_id) {
        Ok(()) => reply::json(&serde_json::json!({
            "message": format!("Game {game_id} started"),
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_game(manager: GameManager, game_id: String) -> Response {
    match manager.state(&game_id) {
        Ok(state) => reply::json(&state).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_game(manager: GameManager, game_id: String) -> Response {
    match manager.delete_game(&game_id) {
        Ok(()) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: SessionError) -> Response {
    #[derive(Serialize)]
    struct ErrorBody {
        error: &'static str,
        message: String,
    }

    let (status, error) = match &err {
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "game_not_found"),
        SessionError::AlreadyStarted(_) => (StatusCode::CONFLICT, "game_already_started"),
        SessionError::TooFewSeats(_) | SessionError::InvalidBlinds => {
            (StatusCode::BAD_REQUEST, "invalid_game_config")
        }
    };
    reply::with_status(
        reply::json(&ErrorBody {
            error,
            message: err.to_string(),
        }),
        status,
    )
    .into_response()
}
