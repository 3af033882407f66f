pub mod game_service;
pub mod room_service;

use thiserror::Error;

/// Failures of the session layer. The transition engine itself never fails;
/// everything here is about rooms, transport bookkeeping, or the command
/// validator contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("room {0} not found")]
    RoomNotFound(String),
    #[error("room {0} is not open")]
    RoomClosed(String),
    #[error("room {0} is full")]
    RoomFull(String),
    #[error("no game in room {0}")]
    GameNotFound(String),
    #[error("the guard cannot protect the same player on consecutive nights")]
    GuardRepeatRejected,
}
