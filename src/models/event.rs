use serde::{Deserialize, Serialize};

/// Append-only narrative log entry. Never mutated or removed once pushed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub phase: String,
    pub round: u32,
    pub description: String,
}

impl GameEvent {
    pub fn new(phase: impl Into<String>, round: u32, description: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            round,
            description: description.into(),
        }
    }

    pub fn night(round: u32, description: impl Into<String>) -> Self {
        Self::new("night", round, description)
    }

    pub fn day(round: u32, description: impl Into<String>) -> Self {
        Self::new("day", round, description)
    }
}
