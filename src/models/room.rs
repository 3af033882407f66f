use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoomStatus {
    Open,
    InProgress,
    Closed,
}

/// Transport-level room metadata. The room code is only a namespace key for
/// the synchronization channel; it has no bearing on game logic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    pub name: Option<String>,
    pub max_players: usize,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(code: String, name: Option<String>, max_players: Option<usize>) -> Self {
        Room {
            code,
            name,
            max_players: max_players.unwrap_or(18),
            status: RoomStatus::Open,
            created_at: Utc::now(),
        }
    }
}

/// Join request from a late-arriving device. The (name, timestamp) pair
/// doubles as the retry key for at-least-once delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub name: String,
    pub assigned_id: u32,
}
