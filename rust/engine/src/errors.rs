use crate::player::PlayerStatus;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot deal {requested} cards, only {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("not enough eligible players to post blinds")]
    InsufficientPlayers,
    #[error("player {name} cannot bet while {status:?}")]
    InvalidState { name: String, status: PlayerStatus },
    #[error("player {name} already holds hole cards")]
    HoleCardsFull { name: String },
    #[error("cannot score a hand of {hole} hole and {community} community cards")]
    UnscorableHand { hole: usize, community: usize },
}
