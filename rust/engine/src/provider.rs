use crate::cards::Card;
use crate::player::PlayerStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a decision provider may answer with.
///
/// This is deliberately narrower than the engine's action vocabulary: a
/// provider never says "check" or "bet" directly. The betting round engine
/// maps `Call` with nothing to call onto a check, and `Raise` onto an opening
/// bet or a re-raise depending on whether a bet is already open.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    Fold,
    Call,
    Raise { amount: u32 },
}

/// Public state of one seat as exposed to every decision provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
    pub round_bet: u32,
    pub status: PlayerStatus,
    pub is_dealer: bool,
}

/// Read-only snapshot of the hand from one seat's point of view, assembled
/// by the table right before that seat is asked to act.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Seat index of the acting participant
    pub seat: usize,
    /// The acting participant's hole cards
    pub hand: Vec<Card>,
    /// Community cards dealt so far
    pub community: Vec<Card>,
    pub pot: u32,
    /// The amount every active seat must match this round
    pub table_bet: u32,
    /// Chips the acting seat still owes to match the table bet
    pub to_call: u32,
    /// Minimum legal raise increment over the table bet
    pub min_raise: u32,
    /// The acting seat's remaining stack
    pub stack: u32,
    /// Chips the acting seat has already committed this round
    pub round_bet: u32,
    pub seats: Vec<SeatView>,
    /// Chronological human-readable action history for the current hand
    pub action_log: Vec<String>,
}

/// A source of betting decisions for one seat.
///
/// Two families implement this: synchronous local policies (rule-based bots)
/// and external providers whose calls may be slow or fail. Implementations
/// resolve their own failures: by the time `decide` returns, retries and
/// fallbacks have already happened, so the engine never sees a provider
/// error mid-hand.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn decide(&self, ctx: &DecisionContext) -> Decision;

    /// Identity used in events, the action log and outcome records.
    fn name(&self) -> &str;
}
