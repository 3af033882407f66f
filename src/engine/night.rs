//! Night resolution: wolf kill vs. guard protection vs. witch potions.

use crate::models::event::GameEvent;
use crate::models::game::{GamePhase, GameState, WitchAction};
use crate::models::role::RoleId;

/// Consume the night's recorded actions and produce the elimination list.
///
/// At most one action of each kind is meaningful per night; when several
/// exist, the first in scan order wins. That also means only one wolf kill is
/// honored even when both a werewolf and a white wolf acted.
///
/// Precedence: the wolf target survives if guarded or healed (or both, which
/// is redundant protection, not a double save). The heal potion is spent on
/// the declared intent to heal, whether or not it matched the wolf target.
/// Poison is unblockable and stacks with the wolf kill without duplicating
/// the victim.
pub fn resolve_night(mut state: GameState) -> GameState {
    let actions = &state.night_actions;
    let wolf_kill = actions.iter().find(|a| a.role.is_wolf_kill());
    let guard = actions.iter().find(|a| a.role == RoleId::Guard);
    let heal = actions
        .iter()
        .find(|a| a.role == RoleId::Witch && a.action == Some(WitchAction::Heal));
    let poison = actions
        .iter()
        .find(|a| a.role == RoleId::Witch && a.action == Some(WitchAction::Poison));

    let mut eliminated: Vec<u32> = Vec::new();

    if let Some(target) = wolf_kill.and_then(|a| a.target_id) {
        let is_guarded = guard.and_then(|a| a.target_id) == Some(target);
        let is_healed = heal.and_then(|a| a.target_id) == Some(target);
        if heal.is_some() {
            state.used_heal_potion = true;
        }
        if !is_guarded && !is_healed {
            eliminated.push(target);
        }
    }

    if let Some(target) = poison.and_then(|a| a.target_id) {
        if !eliminated.contains(&target) {
            eliminated.push(target);
        }
        state.used_poison_potion = true;
    }

    state.last_guarded_player_id = guard.and_then(|a| a.target_id);

    for p in &mut state.players {
        if eliminated.contains(&p.id) {
            p.alive = false;
        }
    }

    let event = if eliminated.is_empty() {
        GameEvent::night(state.round, "Peaceful night — no one was eliminated.")
    } else {
        let names: Vec<&str> = eliminated
            .iter()
            .filter_map(|id| state.player_name(*id))
            .collect();
        GameEvent::night(
            state.round,
            format!("{} was eliminated during the night.", names.join(", ")),
        )
    };
    state.events.push(event);

    state.eliminated_last_night = eliminated;
    state.night_actions.clear();
    state.night_step = 0;
    state.phase = GamePhase::Day;
    state
}
