use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One-time description of a game sent to the record keeper before the
/// first hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRegistration {
    pub game_id: String,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub num_hands: u64,
    pub participants: Vec<String>,
}

/// Per-participant result of a single hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatOutcome {
    pub name: String,
    pub chips_before: u32,
    pub chips_after: u32,
    pub profit_loss: i64,
    pub won: bool,
}

/// Final chip count for one participant when a game completes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalChips {
    pub name: String,
    pub chips: u32,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record storage failure: {0}")]
    Storage(String),
}

/// External record-keeping collaborator (leaderboard, hand history).
///
/// The store owns its own persistence and must tolerate writers from
/// multiple concurrent tables. Failures here never abort a hand; the
/// orchestrator logs and continues, since settlement correctness does not
/// depend on bookkeeping.
pub trait HandRecorder: Send + Sync {
    fn register_game(&self, registration: &GameRegistration) -> Result<(), RecordError>;

    fn record_hand(
        &self,
        game_id: &str,
        hand_number: u64,
        big_blind: u32,
        outcomes: &[SeatOutcome],
    ) -> Result<(), RecordError>;

    fn complete_game(&self, game_id: &str, final_chips: &[FinalChips]) -> Result<(), RecordError>;
}

/// Recorder that keeps nothing. Default for tests and ad-hoc play.
#[derive(Debug, Default)]
pub struct NullRecorder;

impl HandRecorder for NullRecorder {
    fn register_game(&self, _registration: &GameRegistration) -> Result<(), RecordError> {
        Ok(())
    }

    fn record_hand(
        &self,
        _game_id: &str,
        _hand_number: u64,
        _big_blind: u32,
        _outcomes: &[SeatOutcome],
    ) -> Result<(), RecordError> {
        Ok(())
    }

    fn complete_game(
        &self,
        _game_id: &str,
        _final_chips: &[FinalChips],
    ) -> Result<(), RecordError> {
        Ok(())
    }
}
