use crate::cards::Card;
use crate::player::PlayerAction;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A betting street in Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

/// One seat's chip count, embedded in several event payloads.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatStack {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
}

/// Chips paid out to one winner at settlement.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatPayout {
    pub seat: usize,
    pub name: String,
    pub amount: u32,
}

/// Lifecycle events emitted while a hand runs. Consumers are external
/// (a network broadcaster, a test harness); the engine never waits on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    HandStarted {
        hand_number: u64,
        dealer_seat: usize,
        stacks: Vec<SeatStack>,
    },
    BlindsPosted {
        small_blind_seat: usize,
        small_blind: u32,
        big_blind_seat: usize,
        big_blind: u32,
        pot: u32,
    },
    HoleCardsDealt {
        seat: usize,
        name: String,
        cards: Vec<Card>,
    },
    BettingStarted {
        street: Street,
        pot: u32,
    },
    PlayerAction {
        seat: usize,
        name: String,
        action: PlayerAction,
        pot: u32,
    },
    CommunityCardsDealt {
        street: Street,
        cards: Vec<Card>,
        board: Vec<Card>,
    },
    HandComplete {
        hand_number: u64,
        winners: Vec<usize>,
        payouts: Vec<SeatPayout>,
        pot: u32,
        /// Whether the ranking oracle was consulted (false for uncontested pots)
        ranked: bool,
        stacks: Vec<SeatStack>,
    },
    GameComplete {
        hands_played: u64,
        stacks: Vec<SeatStack>,
    },
}

/// Destination for lifecycle events. `emit` must not block the hand: sinks
/// that fan out to consumers drop rather than wait.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GameEvent);
}

/// Discards every event. Default sink for headless runs and tests that do
/// not assert on the stream.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: GameEvent) {}
}

/// Buffers events in memory for inspection. Test harness sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<GameEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: GameEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tags() {
        let event = GameEvent::BettingStarted {
            street: Street::Flop,
            pot: 30,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "betting_started");
        assert_eq!(json["street"], "flop");
        assert_eq!(json["pot"], 30);
    }

    #[test]
    fn memory_sink_preserves_order() {
        let sink = MemorySink::new();
        sink.emit(GameEvent::BettingStarted {
            street: Street::Preflop,
            pot: 15,
        });
        sink.emit(GameEvent::BettingStarted {
            street: Street::Flop,
            pot: 40,
        });
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            GameEvent::BettingStarted {
                street: Street::Preflop,
                ..
            }
        ));
    }
}
