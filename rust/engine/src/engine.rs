//! Hand orchestration: stage sequencing from blinds through settlement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::betting::run_betting_round;
use crate::cards::format_cards;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::events::{EventSink, GameEvent, NullSink, SeatStack, Street};
use crate::oracle::{NativeOracle, RankingOracle};
use crate::player::{Participant, PlayerStatus};
use crate::provider::DecisionProvider;
use crate::record::{FinalChips, GameRegistration, HandRecorder, NullRecorder, SeatOutcome};
use crate::showdown;
use crate::table::Table;

/// Stages a hand moves through, in order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Setup,
    Dealing,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

/// Presentational delays between actions and streets. Zero by default so
/// tests and headless simulations run at full speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacingConfig {
    pub action_delay: Duration,
    pub street_delay: Duration,
}

impl PacingConfig {
    pub(crate) async fn pause_before_action(&self) {
        if !self.action_delay.is_zero() {
            sleep(self.action_delay).await;
        }
    }

    pub(crate) async fn pause_between_streets(&self) {
        if !self.street_delay.is_zero() {
            sleep(self.street_delay).await;
        }
    }
}

/// Session parameters fixed at table creation.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub game_id: String,
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub num_hands: u64,
    pub seed: Option<u64>,
    pub pacing: PacingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_id: "local".to_string(),
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1000,
            num_hands: 10,
            seed: None,
            pacing: PacingConfig::default(),
        }
    }
}

/// How a single hand ended from the session's point of view.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HandStatus {
    Completed,
    /// Fewer than two seats could play; the session is over
    NotEnoughPlayers,
}

/// Final state of a finished game.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub hands_played: u64,
    pub stacks: Vec<SeatStack>,
}

/// Drives hands for one table: owns the deck, the table, one decision
/// provider per seat, and the external collaborators (ranking oracle,
/// record keeper, event sink).
///
/// Action within a hand is strictly sequential; the only suspension points
/// are decision-provider calls and configured pacing delays. Multiple
/// engines may run concurrently as independent tables.
pub struct Engine {
    config: GameConfig,
    table: Table,
    deck: Deck,
    providers: Vec<Box<dyn DecisionProvider>>,
    oracle: Box<dyn RankingOracle>,
    recorder: Arc<dyn HandRecorder>,
    sink: Arc<dyn EventSink>,
    stage: Stage,
    stop: Arc<AtomicBool>,
}

impl Engine {
    /// Build an engine from a roster of named decision providers. Seats are
    /// assigned in roster order; every seat starts with the configured stack.
    pub fn new(config: GameConfig, roster: Vec<(String, Box<dyn DecisionProvider>)>) -> Self {
        let mut players = Vec::with_capacity(roster.len());
        let mut providers = Vec::with_capacity(roster.len());
        for (seat, (name, provider)) in roster.into_iter().enumerate() {
            players.push(Participant::new(name, config.starting_stack, seat));
            providers.push(provider);
        }
        let deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        };
        Self {
            table: Table::new(players, config.small_blind, config.big_blind),
            deck,
            providers,
            oracle: Box::new(NativeOracle::new()),
            recorder: Arc::new(NullRecorder),
            sink: Arc::new(NullSink),
            stage: Stage::Setup,
            stop: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    pub fn with_oracle(mut self, oracle: Box<dyn RankingOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn HandRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Handle for requesting a stop; honored only between hands.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Play a complete game of up to `num_hands` hands, recording outcomes
    /// and emitting `game_complete` at the end. Ends early when a stop was
    /// requested or when fewer than two seats can still play.
    pub async fn play_game(&mut self) -> Result<GameSummary, EngineError> {
        let registration = GameRegistration {
            game_id: self.config.game_id.clone(),
            starting_stack: self.config.starting_stack,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            num_hands: self.config.num_hands,
            participants: self
                .table
                .players()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
        };
        if let Err(err) = self.recorder.register_game(&registration) {
            tracing::warn!(game_id = %self.config.game_id, %err, "game registration failed");
        }

        let mut hands_played = 0;
        for _ in 0..self.config.num_hands {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!(game_id = %self.config.game_id, "stop requested; ending game");
                break;
            }
            match self.play_hand().await? {
                HandStatus::Completed => hands_played += 1,
                HandStatus::NotEnoughPlayers => break,
            }
        }

        let final_chips: Vec<FinalChips> = self
            .table
            .players()
            .iter()
            .map(|p| FinalChips {
                name: p.name().to_string(),
                chips: p.stack(),
            })
            .collect();
        if let Err(err) = self.recorder.complete_game(&self.config.game_id, &final_chips) {
            tracing::warn!(game_id = %self.config.game_id, %err, "game completion record failed");
        }

        let stacks = self.seat_stacks();
        self.sink.emit(GameEvent::GameComplete {
            hands_played,
            stacks: stacks.clone(),
        });

        Ok(GameSummary {
            hands_played,
            stacks,
        })
    }

    /// Drive one hand from blind posting through settlement.
    pub async fn play_hand(&mut self) -> Result<HandStatus, EngineError> {
        self.stage = Stage::Setup;
        if self.table.begin_hand() < 2 {
            return Ok(HandStatus::NotEnoughPlayers);
        }
        self.deck.shuffle();
        self.table.rotate_dealer();

        let chips_before: Vec<u32> = self.table.players().iter().map(|p| p.stack()).collect();

        self.sink.emit(GameEvent::HandStarted {
            hand_number: self.table.hand_number(),
            dealer_seat: self.table.dealer_pos(),
            stacks: self.seat_stacks(),
        });

        let blinds = match self.table.post_blinds() {
            Ok(post) => post,
            Err(EngineError::InsufficientPlayers) => {
                tracing::warn!(
                    hand = self.table.hand_number(),
                    "could not post blinds; aborting hand"
                );
                return Ok(HandStatus::NotEnoughPlayers);
            }
            Err(err) => return Err(err),
        };
        self.sink.emit(GameEvent::BlindsPosted {
            small_blind_seat: blinds.small_blind_seat,
            small_blind: blinds.small_blind,
            big_blind_seat: blinds.big_blind_seat,
            big_blind: blinds.big_blind,
            pot: self.table.pot(),
        });

        self.stage = Stage::Dealing;
        self.deal_hole_cards()?;

        self.stage = Stage::Preflop;
        run_betting_round(
            &mut self.table,
            &self.providers,
            Street::Preflop,
            self.sink.as_ref(),
            &self.config.pacing,
        )
        .await?;

        for (street, stage, count) in [
            (Street::Flop, Stage::Flop, 3),
            (Street::Turn, Stage::Turn, 1),
            (Street::River, Stage::River, 1),
        ] {
            if self.table.contenders() <= 1 {
                break;
            }
            self.config.pacing.pause_between_streets().await;
            self.stage = stage;
            self.deal_street(street, count)?;
            run_betting_round(
                &mut self.table,
                &self.providers,
                street,
                self.sink.as_ref(),
                &self.config.pacing,
            )
            .await?;
        }

        self.stage = Stage::Showdown;
        let settlement = showdown::settle(&mut self.table, self.oracle.as_ref());
        self.sink.emit(GameEvent::HandComplete {
            hand_number: self.table.hand_number(),
            winners: settlement.winners.clone(),
            payouts: settlement.payouts.clone(),
            pot: settlement.pot,
            ranked: settlement.ranked,
            stacks: self.seat_stacks(),
        });

        self.record_outcomes(&chips_before, &settlement.winners);
        self.stage = Stage::HandComplete;
        Ok(HandStatus::Completed)
    }

    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        for seat in 0..self.table.seat_count() {
            if self.table.players()[seat].status() == PlayerStatus::Out {
                continue;
            }
            let cards = self.deck.deal(2)?;
            self.table.players_mut()[seat].receive_cards(cards.clone())?;
            let name = self.table.players()[seat].name().to_string();
            self.sink.emit(GameEvent::HoleCardsDealt { seat, name, cards });
        }
        Ok(())
    }

    fn deal_street(&mut self, street: Street, count: usize) -> Result<(), EngineError> {
        self.deck.burn();
        let cards = self.deck.deal(count)?;
        self.table.community.extend(cards.iter().copied());
        let board = self.table.community().to_vec();
        self.table
            .log(format!("{street:?}: {}", format_cards(&board)));
        self.sink.emit(GameEvent::CommunityCardsDealt {
            street,
            cards,
            board,
        });
        Ok(())
    }

    fn record_outcomes(&self, chips_before: &[u32], winners: &[usize]) {
        let outcomes: Vec<SeatOutcome> = self
            .table
            .players()
            .iter()
            .zip(chips_before)
            .map(|(p, &before)| SeatOutcome {
                name: p.name().to_string(),
                chips_before: before,
                chips_after: p.stack(),
                profit_loss: i64::from(p.stack()) - i64::from(before),
                won: winners.contains(&p.seat()),
            })
            .collect();
        if let Err(err) = self.recorder.record_hand(
            &self.config.game_id,
            self.table.hand_number(),
            self.config.big_blind,
            &outcomes,
        ) {
            tracing::warn!(
                game_id = %self.config.game_id,
                hand = self.table.hand_number(),
                %err,
                "hand result record failed"
            );
        }
    }

    fn seat_stacks(&self) -> Vec<SeatStack> {
        self.table
            .players()
            .iter()
            .map(|p| SeatStack {
                seat: p.seat(),
                name: p.name().to_string(),
                stack: p.stack(),
            })
            .collect()
    }
}
