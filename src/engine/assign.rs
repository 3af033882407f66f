//! Secret role assignment: the engine's single point of randomness.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::game::{GamePhase, GameState};
use crate::models::role::RoleId;

/// Deal the selected roles onto the roster.
///
/// The multiset is expanded into a flat list, padded with plain villagers if
/// the selection undercounts the roster (tolerated, never an error), shuffled
/// uniformly, then zipped onto the players in roster order. Per-game player
/// flags are reset and the game moves to round 1 of the night phase.
pub fn assign_roles<R: Rng>(mut state: GameState, rng: &mut R) -> GameState {
    let mut deck: Vec<RoleId> = Vec::with_capacity(state.players.len());
    for (role, count) in &state.selected_roles {
        for _ in 0..*count {
            deck.push(*role);
        }
    }
    while deck.len() < state.players.len() {
        deck.push(RoleId::Villager);
    }

    deck.shuffle(rng);

    for (player, role) in state.players.iter_mut().zip(deck) {
        player.role = Some(role);
        player.alive = true;
        player.voted_out = false;
        player.has_voting_rights = true;
    }

    state.current_player_index = 0;
    state.phase = GamePhase::Night;
    state.round = 1;
    state.events.clear();
    state
}
