use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Team alignment of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Wolf,
    Villager,
    Neutral,
}

/// Closed set of role identities. Wire ids are kebab-case ("white-wolf").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleId {
    Werewolf,
    AlphaWolf,
    WhiteWolf,
    WolfBeauty,
    HiddenWolf,
    Villager,
    Seer,
    Witch,
    Hunter,
    Guard,
    Idiot,
    Elder,
    LittleGirl,
    Knight,
    Cupid,
    Thief,
    Fox,
    Piper,
}

impl RoleId {
    pub fn team(self) -> Team {
        lookup(self).team
    }

    /// Wolf-kill-shaped roles: the ones whose night action is the pack kill.
    pub fn is_wolf_kill(self) -> bool {
        matches!(self, RoleId::Werewolf | RoleId::WhiteWolf)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", lookup(*self).name)
    }
}

/// Static catalog row for a role. Shared by every player holding the role.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: &'static str,
    pub team: Team,
    /// Night call order, lower acts earlier. None for roles with no night action.
    pub night_order: Option<u8>,
    pub description: &'static str,
}

pub static ROLES: &[Role] = &[
    Role {
        id: RoleId::Werewolf,
        name: "Werewolf",
        team: Team::Wolf,
        night_order: Some(20),
        description: "Each night the werewolves collectively pick one player to eliminate.",
    },
    Role {
        id: RoleId::AlphaWolf,
        name: "Alpha Werewolf",
        team: Team::Wolf,
        night_order: Some(20),
        description: "When eliminated, drags one player down with them.",
    },
    Role {
        id: RoleId::WhiteWolf,
        name: "White Wolf",
        team: Team::Wolf,
        night_order: Some(21),
        description: "Every other night may eliminate an additional player.",
    },
    Role {
        id: RoleId::WolfBeauty,
        name: "Wolf Beauty",
        team: Team::Wolf,
        night_order: Some(22),
        description: "Charms a player; if the Wolf Beauty dies, so does the charmed player.",
    },
    Role {
        id: RoleId::HiddenWolf,
        name: "Hidden Wolf",
        team: Team::Wolf,
        night_order: Some(20),
        description: "Appears as a villager to the Seer.",
    },
    Role {
        id: RoleId::Villager,
        name: "Villager",
        team: Team::Villager,
        night_order: None,
        description: "No special ability; finds wolves by deduction.",
    },
    Role {
        id: RoleId::Seer,
        name: "Seer",
        team: Team::Villager,
        night_order: Some(10),
        description: "Each night checks one player's true identity.",
    },
    Role {
        id: RoleId::Witch,
        name: "Witch",
        team: Team::Villager,
        night_order: Some(30),
        description: "Holds one healing potion and one poison potion, each single-use.",
    },
    Role {
        id: RoleId::Hunter,
        name: "Hunter",
        team: Team::Villager,
        night_order: None,
        description: "Upon death (except by poison) shoots one player.",
    },
    Role {
        id: RoleId::Guard,
        name: "Guard",
        team: Team::Villager,
        night_order: Some(25),
        description: "Protects one player per night; never the same player twice in a row.",
    },
    Role {
        id: RoleId::Idiot,
        name: "Idiot",
        team: Team::Villager,
        night_order: None,
        description: "If voted out, reveals the role, survives, but loses voting rights.",
    },
    Role {
        id: RoleId::Elder,
        name: "Elder",
        team: Team::Villager,
        night_order: Some(35),
        description: "Survives one extra werewolf attack.",
    },
    Role {
        id: RoleId::LittleGirl,
        name: "Little Girl",
        team: Team::Villager,
        night_order: Some(20),
        description: "May peek during the wolf phase at the risk of being caught.",
    },
    Role {
        id: RoleId::Knight,
        name: "Knight",
        team: Team::Villager,
        night_order: None,
        description: "May duel a player by day; the wrong call costs the Knight's life.",
    },
    Role {
        id: RoleId::Cupid,
        name: "Cupid",
        team: Team::Neutral,
        night_order: Some(1),
        description: "Links two players as lovers on the first night; they die together.",
    },
    Role {
        id: RoleId::Thief,
        name: "Thief",
        team: Team::Neutral,
        night_order: Some(0),
        description: "Swaps their card with one of two spare role cards on the first night.",
    },
    Role {
        id: RoleId::Fox,
        name: "Fox",
        team: Team::Neutral,
        night_order: Some(5),
        description: "Checks three adjacent players each night; loses the power on a miss.",
    },
    Role {
        id: RoleId::Piper,
        name: "Piper",
        team: Team::Neutral,
        night_order: Some(40),
        description: "Charms two players per night; wins once every living player is charmed.",
    },
];

/// Catalog lookup. Total: every `RoleId` has exactly one row in `ROLES`.
pub fn lookup(id: RoleId) -> &'static Role {
    ROLES
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| unreachable!("role {:?} missing from catalog", id))
}

/// Living roles that act tonight, ordered by their night call order.
///
/// Mirrors the presentation layer's night-step walk so a host device can
/// drive the steps for the whole table.
pub fn night_call_order(players: &[Player]) -> Vec<RoleId> {
    let mut acting: Vec<RoleId> = Vec::new();
    for p in players {
        if !p.alive {
            continue;
        }
        if let Some(role) = p.role {
            if lookup(role).night_order.is_some() && !acting.contains(&role) {
                acting.push(role);
            }
        }
    }
    acting.sort_by_key(|r| lookup(*r).night_order);
    acting
}

/// Quick-start role presets. The `roles` map feeds `LoadTemplate` directly.
#[derive(Debug, Clone, Serialize)]
pub struct GameTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub player_count: usize,
    pub roles: HashMap<RoleId, u32>,
}

pub fn templates() -> Vec<GameTemplate> {
    vec![
        GameTemplate {
            id: "classic-8",
            name: "Classic 8-Player",
            player_count: 8,
            roles: [
                (RoleId::Werewolf, 2),
                (RoleId::Villager, 3),
                (RoleId::Seer, 1),
                (RoleId::Witch, 1),
                (RoleId::Hunter, 1),
            ]
            .into_iter()
            .collect(),
        },
        GameTemplate {
            id: "classic-10",
            name: "Classic 10-Player",
            player_count: 10,
            roles: [
                (RoleId::Werewolf, 3),
                (RoleId::Villager, 3),
                (RoleId::Seer, 1),
                (RoleId::Witch, 1),
                (RoleId::Hunter, 1),
                (RoleId::Guard, 1),
            ]
            .into_iter()
            .collect(),
        },
        GameTemplate {
            id: "advanced-12",
            name: "Advanced 12-Player",
            player_count: 12,
            roles: [
                (RoleId::Werewolf, 3),
                (RoleId::AlphaWolf, 1),
                (RoleId::Villager, 3),
                (RoleId::Seer, 1),
                (RoleId::Witch, 1),
                (RoleId::Hunter, 1),
                (RoleId::Guard, 1),
                (RoleId::Cupid, 1),
            ]
            .into_iter()
            .collect(),
        },
    ]
}
