use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::player::Player;
use super::role::{RoleId, Team};

pub const DEFAULT_DISCUSSION_TIME_SECS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    Lobby,
    RoleSelection,
    RoleAssignment,
    Night,
    Day,
    Victory,
}

/// The witch is the only multi-verb role; everyone else acts by role alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WitchAction {
    Heal,
    Poison,
}

/// A recorded night intent. Collected during one night, consumed by resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NightAction {
    pub role: RoleId,
    #[serde(default)]
    pub player_id: Option<u32>,
    #[serde(default)]
    pub target_id: Option<u32>,
    #[serde(default)]
    pub action: Option<WitchAction>,
}

/// The replicated aggregate: everything a mirror needs to render the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    /// Role multiset chosen during setup. Never stores explicit zeros.
    pub selected_roles: HashMap<RoleId, u32>,
    /// Cursor for the single-device sequential reveal flow.
    pub current_player_index: usize,
    pub round: u32,
    pub night_step: u32,
    pub night_actions: Vec<NightAction>,
    /// voter id -> target id, at most one entry per voter.
    pub votes: HashMap<u32, u32>,
    /// Replaced wholesale by each night resolution.
    pub eliminated_last_night: Vec<u32>,
    pub events: Vec<GameEvent>,
    pub winner: Option<Team>,
    /// Day discussion timer, seconds.
    pub discussion_time: u32,
    pub last_guarded_player_id: Option<u32>,
    pub used_heal_potion: bool,
    pub used_poison_potion: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Lobby,
            players: Vec::new(),
            selected_roles: HashMap::new(),
            current_player_index: 0,
            round: 1,
            night_step: 0,
            night_actions: Vec::new(),
            votes: HashMap::new(),
            eliminated_last_night: Vec::new(),
            events: Vec::new(),
            winner: None,
            discussion_time: DEFAULT_DISCUSSION_TIME_SECS,
            last_guarded_player_id: None,
            used_heal_potion: false,
            used_poison_potion: false,
        }
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_name(&self, id: u32) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameState {{ phase: {:?}, round: {}, players: {}, alive: {}, winner: {:?} }}",
            self.phase,
            self.round,
            self.players.len(),
            self.players.iter().filter(|p| p.alive).count(),
            self.winner,
        )
    }
}

/// The full command surface consumed by the transition engine.
///
/// Every command is total: invalid input is a no-op, never an error. The
/// presentation layer relies on safe-to-call-anytime semantics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameCommand {
    SetPhase {
        phase: GamePhase,
    },
    SetPlayers {
        players: Vec<Player>,
    },
    /// Without an id the next free one is assigned; a duplicate supplied id
    /// makes the command a no-op so retried joins stay idempotent.
    AddPlayer {
        name: String,
        #[serde(default)]
        id: Option<u32>,
    },
    RemovePlayer {
        id: u32,
    },
    SetSelectedRoles {
        roles: HashMap<RoleId, u32>,
    },
    IncrementRole {
        role: RoleId,
    },
    DecrementRole {
        role: RoleId,
    },
    LoadTemplate {
        roles: HashMap<RoleId, u32>,
    },
    AssignRoles,
    NextPlayer,
    SetNightStep {
        step: u32,
    },
    AddNightAction {
        action: NightAction,
    },
    ResolveNight,
    CastVote {
        voter_id: u32,
        target_id: u32,
    },
    ResolveVotes,
    /// Direct host override, bypasses vote and night logic.
    EliminatePlayer {
        player_id: u32,
    },
    AddEvent {
        event: GameEvent,
    },
    CheckVictory,
    NextRound,
    SetDiscussionTime {
        time: u32,
    },
    ResetGame,
    /// Wholesale snapshot replace, used only by non-authoritative mirrors.
    SyncState {
        state: Box<GameState>,
    },
}
