//! The transition engine: a pure reducer over the game aggregate.
//!
//! `apply` is total. Invalid input (duplicate ids, decrements below zero,
//! unknown players) is a no-op, never an error or panic; the calling layers
//! depend on being able to dispatch anything at any time. The only
//! nondeterministic step in the whole engine is the role shuffle, isolated
//! behind `apply_with_rng` so tests can seed it.

pub mod assign;
pub mod night;
pub mod victory;
pub mod vote;

use rand::Rng;

use crate::models::game::{GameCommand, GamePhase, GameState};
use crate::models::player::Player;
use crate::models::role::RoleId;

pub fn apply(state: GameState, command: GameCommand) -> GameState {
    apply_with_rng(state, command, &mut rand::thread_rng())
}

pub fn apply_with_rng<R: Rng>(
    mut state: GameState,
    command: GameCommand,
    rng: &mut R,
) -> GameState {
    match command {
        GameCommand::SetPhase { phase } => {
            state.phase = phase;
            state
        }
        GameCommand::SetPlayers { players } => {
            state.players = players;
            state
        }
        GameCommand::AddPlayer { name, id } => add_player(state, name, id),
        GameCommand::RemovePlayer { id } => {
            state.players.retain(|p| p.id != id);
            state
        }
        GameCommand::SetSelectedRoles { roles } | GameCommand::LoadTemplate { roles } => {
            state.selected_roles = roles;
            state
        }
        GameCommand::IncrementRole { role } => increment_role(state, role),
        GameCommand::DecrementRole { role } => decrement_role(state, role),
        GameCommand::AssignRoles => assign::assign_roles(state, rng),
        GameCommand::NextPlayer => {
            state.current_player_index += 1;
            state
        }
        GameCommand::SetNightStep { step } => {
            state.night_step = step;
            state
        }
        GameCommand::AddNightAction { action } => {
            state.night_actions.push(action);
            state
        }
        GameCommand::ResolveNight => night::resolve_night(state),
        GameCommand::CastVote { voter_id, target_id } => {
            state.votes.insert(voter_id, target_id);
            state
        }
        GameCommand::ResolveVotes => vote::resolve_votes(state),
        GameCommand::EliminatePlayer { player_id } => {
            for p in &mut state.players {
                if p.id == player_id {
                    p.alive = false;
                }
            }
            state
        }
        GameCommand::AddEvent { event } => {
            state.events.push(event);
            state
        }
        GameCommand::CheckVictory => {
            if let Some(team) = victory::evaluate(&state.players) {
                state.winner = Some(team);
                state.phase = GamePhase::Victory;
            }
            state
        }
        GameCommand::NextRound => next_round(state),
        GameCommand::SetDiscussionTime { time } => {
            state.discussion_time = time;
            state
        }
        GameCommand::ResetGame => reset_game(state),
        GameCommand::SyncState { state: snapshot } => *snapshot,
    }
}

fn add_player(mut state: GameState, name: String, id: Option<u32>) -> GameState {
    let id = match id {
        Some(id) => {
            if state.players.iter().any(|p| p.id == id) {
                return state;
            }
            id
        }
        None => state.players.iter().map(|p| p.id).max().map_or(1, |m| m + 1),
    };
    state.players.push(Player::new(id, name));
    state
}

fn increment_role(mut state: GameState, role: RoleId) -> GameState {
    let total: u32 = state.selected_roles.values().sum();
    if total as usize >= state.players.len() {
        return state;
    }
    *state.selected_roles.entry(role).or_insert(0) += 1;
    state
}

fn decrement_role(mut state: GameState, role: RoleId) -> GameState {
    match state.selected_roles.get(&role).copied().unwrap_or(0) {
        0 => state,
        1 => {
            // A count reaching zero removes the key; the map never stores zeros.
            state.selected_roles.remove(&role);
            state
        }
        n => {
            state.selected_roles.insert(role, n - 1);
            state
        }
    }
}

fn next_round(mut state: GameState) -> GameState {
    state.round += 1;
    state.phase = GamePhase::Night;
    state.night_step = 0;
    state.night_actions.clear();
    state.eliminated_last_night.clear();
    // Votes and the event log persist across rounds.
    state
}

fn reset_game(state: GameState) -> GameState {
    let mut next = GameState::new();
    next.players = state
        .players
        .into_iter()
        .map(|mut p| {
            p.reset();
            p
        })
        .collect();
    // Retain the role selection for a fast replay with the same group.
    next.selected_roles = state.selected_roles;
    next
}
