//! # pokermind_web: HTTP/SSE surface for the hand engine
//!
//! Thin glue between HTTP clients and [`pokermind_engine`]: create a game
//! from a roster of rule-based or model-backed seats, start it on its own
//! task, poll its state, and follow the live event stream over SSE.
//!
//! ## Endpoints
//!
//! - `POST /games` - create a game from a roster
//! - `POST /games/{id}/start` - start a created game
//! - `GET /games/{id}` - current status and table snapshot
//! - `GET /games/{id}/events` - SSE stream of game events
//! - `DELETE /games/{id}` - stop (between hands) and forget a game
//! - `GET /health` - liveness probe

pub mod events;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod session;

pub use events::EventBus;
pub use logging::init_logging;
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use session::{GameManager, GameStatus, SessionError};
