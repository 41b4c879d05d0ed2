//! # pokermind-engine: Texas Hold'em Hand Engine Core
//!
//! A multi-seat Texas Hold'em hand engine that drives complete hands among
//! seated participants, where each seat's decisions come from a pluggable
//! [`provider::DecisionProvider`]. Decision providers may be in-process
//! policies or remote model-backed services; the engine treats them
//! uniformly and stays correct however slowly or erratically they answer.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deck shuffling with ChaCha20 RNG, seedable for replay
//! - [`player`] - Seat state, the bet/fold primitives, and action vocabulary
//! - [`table`] - Shared hand state: pot, positions, blinds, community cards
//! - [`betting`] - Re-entrant betting round resolution in seat order
//! - [`engine`] - Hand and game orchestration
//! - [`provider`] - The decision provider boundary and its context snapshot
//! - [`oracle`] - Hand ranking boundary plus the in-process evaluator
//! - [`showdown`] - Settlement: scoring, split pots, payouts
//! - [`hand`] - Seven-card poker hand evaluation
//! - [`events`] - Observable game event stream and sink trait
//! - [`record`] - Record-keeping boundary for leaderboards and history
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokermind_engine::engine::{Engine, GameConfig};
//! use pokermind_engine::provider::{Decision, DecisionContext, DecisionProvider};
//!
//! struct AlwaysCall;
//!
//! #[async_trait::async_trait]
//! impl DecisionProvider for AlwaysCall {
//!     async fn decide(&self, _ctx: &DecisionContext) -> Decision {
//!         Decision::Call
//!     }
//!     fn name(&self) -> &str {
//!         "always-call"
//!     }
//! }
//!
//! # async fn run() {
//! let roster: Vec<(String, Box<dyn DecisionProvider>)> = vec![
//!     ("alice".to_string(), Box::new(AlwaysCall) as Box<dyn DecisionProvider>),
//!     ("bob".to_string(), Box::new(AlwaysCall)),
//! ];
//! let mut engine = Engine::new(GameConfig::default(), roster);
//! let summary = engine.play_game().await.expect("game");
//! println!("played {} hands", summary.hands_played);
//! # }
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hand;
pub mod oracle;
pub mod player;
pub mod provider;
pub mod record;
pub mod showdown;
pub mod table;
