pub mod game;
pub mod health;
pub mod sse;

pub use game::{
    create_game, delete_game, get_game, start_game, CreateGameRequest, SeatRequest,
};
