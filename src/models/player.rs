use serde::{Deserialize, Serialize};

use super::role::{RoleId, Team};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// None until roles are assigned, then set exactly once per game.
    pub role: Option<RoleId>,
    pub alive: bool,
    pub voted_out: bool,
    pub has_voting_rights: bool,
}

impl Player {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            role: None,
            alive: true,
            voted_out: false,
            has_voting_rights: true,
        }
    }

    /// Unassigned players count as non-wolves for victory purposes.
    pub fn is_wolf(&self) -> bool {
        self.role.map(|r| r.team() == Team::Wolf).unwrap_or(false)
    }

    /// Strip per-game state while keeping identity, for fast replay.
    pub fn reset(&mut self) {
        self.role = None;
        self.alive = true;
        self.voted_out = false;
        self.has_voting_rights = true;
    }
}
