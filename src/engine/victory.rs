//! Victory evaluation, a pure function of the roster.

use crate::models::player::Player;
use crate::models::role::Team;

/// Partition the living players into wolves and everyone else.
///
/// No living wolves: villagers win. Wolves matching or outnumbering the rest:
/// wolves win (ties go to the wolves). Otherwise the game continues. The
/// evaluator is only consulted where the callers invoke it, after night and
/// vote resolution; it is not automatic on every transition.
pub fn evaluate(players: &[Player]) -> Option<Team> {
    let alive: Vec<&Player> = players.iter().filter(|p| p.alive).collect();
    let wolves = alive.iter().filter(|p| p.is_wolf()).count();
    let others = alive.len() - wolves;

    if wolves == 0 {
        Some(Team::Villager)
    } else if wolves >= others {
        Some(Team::Wolf)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::RoleId;

    fn players(roster: &[(RoleId, bool)]) -> Vec<Player> {
        roster.iter()
            .enumerate()
            .map(|(i, (role, alive))| {
                let mut p = Player::new(i as u32 + 1, format!("P{}", i + 1));
                p.role = Some(*role);
                p.alive = *alive;
                p
            })
            .collect()
    }

    #[test]
    fn no_living_wolves_means_villager_win() {
        let roster = players(&[
            (RoleId::Werewolf, false),
            (RoleId::Villager, true),
            (RoleId::Seer, true),
            (RoleId::Witch, true),
        ]);
        assert_eq!(evaluate(&roster), Some(Team::Villager));
    }

    #[test]
    fn wolves_win_ties() {
        let roster = players(&[
            (RoleId::Werewolf, true),
            (RoleId::Werewolf, true),
            (RoleId::Werewolf, true),
            (RoleId::Werewolf, true),
            (RoleId::Villager, true),
            (RoleId::Villager, true),
            (RoleId::Seer, true),
            (RoleId::Witch, true),
        ]);
        assert_eq!(evaluate(&roster), Some(Team::Wolf));
    }

    #[test]
    fn game_continues_while_wolves_are_outnumbered() {
        let roster = players(&[
            (RoleId::Werewolf, true),
            (RoleId::Villager, true),
            (RoleId::Seer, true),
        ]);
        assert_eq!(evaluate(&roster), None);
    }

    #[test]
    fn neutral_roles_count_against_the_wolves() {
        let roster = players(&[
            (RoleId::Werewolf, true),
            (RoleId::Piper, true),
            (RoleId::Villager, true),
        ]);
        assert_eq!(evaluate(&roster), None);
    }

    #[test]
    fn dead_players_are_ignored() {
        let roster = players(&[
            (RoleId::Werewolf, true),
            (RoleId::Villager, false),
            (RoleId::Villager, false),
            (RoleId::Villager, true),
        ]);
        assert_eq!(evaluate(&roster), Some(Team::Wolf));
    }

    #[test]
    fn evaluation_is_pure_and_repeatable() {
        let roster = players(&[(RoleId::Werewolf, false), (RoleId::Villager, true)]);
        let first = evaluate(&roster);
        assert_eq!(first, Some(Team::Villager));
        assert_eq!(evaluate(&roster), first);
    }
}
