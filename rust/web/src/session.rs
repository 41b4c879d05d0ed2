//! Game lifecycle management: create, start, observe and tear down games.
//!
//! Each game runs on its own tokio task; the manager keeps a status and a
//! live snapshot per game, both updated from the engine's event stream, so
//! state queries never touch the running engine.

use crate::events::{BusSink, EventBus, GameId};
use pokermind_engine::cards::Card;
use pokermind_engine::engine::{Engine, GameConfig, PacingConfig};
use pokermind_engine::events::{EventSink, GameEvent, SeatStack};
use pokermind_ai::{build_provider, SeatSpec};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game `{0}` was not found")]
    NotFound(GameId),
    #[error("game `{0}` was already started")]
    AlreadyStarted(GameId),
    #[error("a game needs at least 2 seats, got {0}")]
    TooFewSeats(usize),
    #[error("blinds must be positive")]
    InvalidBlinds,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Created,
    Running,
    Completed,
    Failed,
}

/// Everything needed to build one game.
#[derive(Debug, Clone)]
pub struct CreateGameSpec {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub num_hands: u64,
    pub seed: Option<u64>,
    pub action_delay: Duration,
    pub street_delay: Duration,
    pub seats: Vec<SeatSpec>,
}

/// Table state as last reported by the event stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameSnapshot {
    pub hand_number: u64,
    pub pot: u32,
    pub community: Vec<Card>,
    pub players: Vec<SeatStack>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStateResponse {
    pub game_id: GameId,
    pub status: GameStatus,
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
}

struct GameEntry {
    status: GameStatus,
    snapshot: Arc<Mutex<GameSnapshot>>,
    stop: Arc<AtomicBool>,
    // Present until the game is started, then moved onto its task.
    engine: Option<Engine>,
}

#[derive(Clone, Default)]
pub struct GameManager {
    inner: Arc<ManagerInner>,
}

#[derive(Default)]
struct ManagerInner {
    bus: EventBus,
    games: RwLock<HashMap<GameId, GameEntry>>,
}

impl GameManager {
    pub fn new(bus: EventBus) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                bus,
                games: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn bus(&self) -> EventBus {
        self.inner.bus.clone()
    }

    /// Build a game and park it until started.
    pub fn create_game(&self, spec: CreateGameSpec) -> Result<GameId, SessionError> {
        if spec.seats.len() < 2 {
            return Err(SessionError::TooFewSeats(spec.seats.len()));
        }
        if spec.small_blind == 0 || spec.big_blind == 0 {
            return Err(SessionError::InvalidBlinds);
        }

        let game_id = Uuid::new_v4().to_string();
        let roster: Vec<_> = spec.seats.iter().map(build_provider).collect();

        let snapshot = Arc::new(Mutex::new(GameSnapshot {
            players: roster
                .iter()
                .enumerate()
                .map(|(seat, (name, _))| SeatStack {
                    seat,
                    name: name.clone(),
                    stack: spec.starting_stack,
                })
                .collect(),
            ..GameSnapshot::default()
        }));

        let config = GameConfig {
            game_id: game_id.clone(),
            small_blind: spec.small_blind,
            big_blind: spec.big_blind,
            starting_stack: spec.starting_stack,
            num_hands: spec.num_hands,
            seed: spec.seed,
            pacing: PacingConfig {
                action_delay: spec.action_delay,
                street_delay: spec.street_delay,
            },
        };
        let sink = TrackingSink {
            bus: BusSink::new(self.inner.bus.clone(), game_id.clone()),
            snapshot: Arc::clone(&snapshot),
        };
        let engine = Engine::new(config, roster).with_sink(Arc::new(sink));
        let stop = engine.stop_handle();

        let entry = GameEntry {
            status: GameStatus::Created,
            snapshot,
            stop,
            engine: Some(engine),
        };
        self.inner
            .games
            .write()
            .expect("games lock poisoned")
            .insert(game_id.clone(), entry);

        tracing::info!(game_id = %game_id, seats = spec.seats.len(), "game created");
        Ok(game_id)
    }

    /// Move a created game onto its own task and let it play out.
    pub fn start_game(&self, game_id: &GameId) -> Result<(), SessionError> {
        let mut engine = {
            let mut guard = self.inner.games.write().expect("games lock poisoned");
            let entry = guard
                .get_mut(game_id)
                .ok_or_else(|| SessionError::NotFound(game_id.clone()))?;
            let engine = entry
                .engine
                .take()
                .ok_or_else(|| SessionError::AlreadyStarted(game_id.clone()))?;
            entry.status = GameStatus::Running;
            engine
        };

        let manager = self.clone();
        let game_id = game_id.clone();
        tokio::spawn(async move {
            let status = match engine.play_game().await {
                Ok(summary) => {
                    tracing::info!(
                        game_id = %game_id,
                        hands_played = summary.hands_played,
                        "game finished"
                    );
                    GameStatus::Completed
                }
                Err(err) => {
                    tracing::error!(game_id = %game_id, %err, "game failed");
                    GameStatus::Failed
                }
            };
            manager.set_status(&game_id, status);
        });
        Ok(())
    }

    pub fn state(&self, game_id: &GameId) -> Result<GameStateResponse, SessionError> {
        let guard = self.inner.games.read().expect("games lock poisoned");
        let entry = guard
            .get(game_id)
            .ok_or_else(|| SessionError::NotFound(game_id.clone()))?;
        let snapshot = entry
            .snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        Ok(GameStateResponse {
            game_id: game_id.clone(),
            status: entry.status,
            snapshot,
        })
    }

    pub fn exists(&self, game_id: &GameId) -> bool {
        self.inner
            .games
            .read()
            .expect("games lock poisoned")
            .contains_key(game_id)
    }

    /// Request a stop (honored between hands) and forget the game.
    pub fn delete_game(&self, game_id: &GameId) -> Result<(), SessionError> {
        let entry = self
            .inner
            .games
            .write()
            .expect("games lock poisoned")
            .remove(game_id)
            .ok_or_else(|| SessionError::NotFound(game_id.clone()))?;
        entry.stop.store(true, Ordering::Relaxed);
        self.inner.bus.drop_game(game_id);
        tracing::info!(game_id = %game_id, "game deleted");
        Ok(())
    }

    pub fn game_count(&self) -> usize {
        self.inner.games.read().expect("games lock poisoned").len()
    }

    fn set_status(&self, game_id: &GameId, status: GameStatus) {
        let mut guard = self.inner.games.write().expect("games lock poisoned");
        if let Some(entry) = guard.get_mut(game_id) {
            entry.status = status;
        }
    }
}

/// Sink that folds events into the snapshot before broadcasting them.
struct TrackingSink {
    bus: BusSink,
    snapshot: Arc<Mutex<GameSnapshot>>,
}

impl EventSink for TrackingSink {
    fn emit(&self, event: GameEvent) {
        if let Ok(mut snap) = self.snapshot.lock() {
            match &event {
                GameEvent::HandStarted {
                    hand_number,
                    stacks,
                    ..
                } => {
                    snap.hand_number = *hand_number;
                    snap.pot = 0;
                    snap.community.clear();
                    snap.players = stacks.clone();
                }
                GameEvent::BlindsPosted { pot, .. }
                | GameEvent::BettingStarted { pot, .. }
                | GameEvent::PlayerAction { pot, .. } => snap.pot = *pot,
                GameEvent::CommunityCardsDealt { board, .. } => {
                    snap.community = board.clone();
                }
                GameEvent::HandComplete { stacks, .. } | GameEvent::GameComplete { stacks, .. } => {
                    snap.pot = 0;
                    snap.players = stacks.clone();
                }
                GameEvent::HoleCardsDealt { .. } => {}
            }
        }
        self.bus.emit(event);
    }
}
