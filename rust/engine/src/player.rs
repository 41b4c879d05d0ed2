use crate::cards::Card;
use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a seat during a hand.
///
/// `Out` is entered only at hand reset when the stack has reached zero and is
/// sticky for the rest of the session (stacks are never replenished).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Eligible to act this hand
    Active,
    /// Surrendered the current hand
    Folded,
    /// Entire stack committed; still eligible to win
    AllIn,
    /// No chips left; skipped for the rest of the session
    Out,
}

/// An action as applied by the betting round engine, with the chips it
/// actually moved. This is the engine's full vocabulary; decision providers
/// speak the narrower [`crate::provider::Decision`] set which the engine maps
/// onto these variants.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerAction {
    Fold,
    Check,
    Call { amount: u32 },
    Bet { amount: u32 },
    Raise { to: u32, by: u32 },
    AllIn { amount: u32 },
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Fold => write!(f, "folds"),
            PlayerAction::Check => write!(f, "checks"),
            PlayerAction::Call { amount } => write!(f, "calls {amount}"),
            PlayerAction::Bet { amount } => write!(f, "bets {amount}"),
            PlayerAction::Raise { to, by } => write!(f, "raises by {by} to {to}"),
            PlayerAction::AllIn { amount } => write!(f, "goes all-in for {amount}"),
        }
    }
}

/// One seat at the table: identity, chips, hole cards and per-hand state.
/// Owned exclusively by the [`crate::table::Table`]; other components mutate
/// it only through the bet/fold primitives.
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    stack: u32,
    seat: usize,
    hand: Vec<Card>,
    current_bet: u32,
    status: PlayerStatus,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
}

impl Participant {
    pub fn new(name: impl Into<String>, stack: u32, seat: usize) -> Self {
        Self {
            name: name.into(),
            stack,
            seat,
            hand: Vec::with_capacity(2),
            current_bet: 0,
            status: if stack > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::Out
            },
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }

    /// Still contends for the pot (has not folded and is not out).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Clear per-hand state. Status becomes `Out` when the stack is empty,
    /// otherwise `Active`.
    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.status = if self.stack > 0 {
            PlayerStatus::Active
        } else {
            PlayerStatus::Out
        };
    }

    pub(crate) fn receive_cards(&mut self, cards: Vec<Card>) -> Result<(), EngineError> {
        if !self.hand.is_empty() {
            return Err(EngineError::HoleCardsFull {
                name: self.name.clone(),
            });
        }
        self.hand = cards;
        Ok(())
    }

    /// Commit chips to the current betting round.
    ///
    /// The requested amount is clamped to the stack; the clamped amount is
    /// debited, credited to `current_bet`, and returned. Callers must account
    /// with the returned value, not the request. Transitions to `AllIn` when
    /// the stack reaches exactly zero. Betting on a non-`Active` seat is a
    /// caller defect and fails with [`EngineError::InvalidState`].
    pub fn place_bet(&mut self, amount: u32) -> Result<u32, EngineError> {
        if self.status != PlayerStatus::Active {
            return Err(EngineError::InvalidState {
                name: self.name.clone(),
                status: self.status,
            });
        }
        let actual = amount.min(self.stack);
        self.stack -= actual;
        self.current_bet += actual;
        if self.stack == 0 {
            self.status = PlayerStatus::AllIn;
        }
        Ok(actual)
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub(crate) fn award(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn clear_round_bet(&mut self) {
        self.current_bet = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_bet_clamps_and_goes_all_in() {
        let mut p = Participant::new("Alice", 100, 0);
        let actual = p.place_bet(250).expect("bet");
        assert_eq!(actual, 100);
        assert_eq!(p.stack(), 0);
        assert_eq!(p.current_bet(), 100);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn betting_while_folded_is_an_error() {
        let mut p = Participant::new("Bob", 100, 1);
        p.fold();
        let err = p.place_bet(10).expect_err("folded players cannot bet");
        assert!(matches!(err, EngineError::InvalidState { .. }));
    }

    #[test]
    fn reset_marks_busted_players_out() {
        let mut p = Participant::new("Carol", 50, 2);
        p.place_bet(50).expect("bet");
        p.reset_for_hand();
        assert_eq!(p.status(), PlayerStatus::Out);
        assert!(!p.in_hand());

        let mut q = Participant::new("Dave", 50, 3);
        q.fold();
        q.reset_for_hand();
        assert_eq!(q.status(), PlayerStatus::Active);
    }

    #[test]
    fn second_deal_into_full_hand_fails() {
        use crate::cards::{Rank, Suit};
        let mut p = Participant::new("Erin", 100, 4);
        let cards = vec![
            Card {
                suit: Suit::Hearts,
                rank: Rank::Ace,
            },
            Card {
                suit: Suit::Clubs,
                rank: Rank::Ace,
            },
        ];
        p.receive_cards(cards.clone()).expect("first deal");
        assert!(p.receive_cards(cards).is_err());
    }
}
