//! Day-vote resolution: plurality with tie handling and the idiot override.

use crate::models::event::GameEvent;
use crate::models::game::GameState;
use crate::models::role::RoleId;

/// Tally the votes and eliminate the unique plurality target, if any.
///
/// A strict tie at the maximum eliminates no one. The tie flag is set by an
/// entry equalling the running max and cleared whenever a later entry
/// strictly exceeds it. The idiot survives being voted out but permanently
/// loses voting rights. Votes are cleared unconditionally.
pub fn resolve_votes(mut state: GameState) -> GameState {
    let mut tally: Vec<(u32, u32)> = Vec::new();
    for target in state.votes.values() {
        match tally.iter_mut().find(|(id, _)| id == target) {
            Some((_, count)) => *count += 1,
            None => tally.push((*target, 1)),
        }
    }

    let mut max_votes = 0;
    let mut leader: Option<u32> = None;
    let mut tie = false;
    for (id, count) in tally {
        if count > max_votes {
            max_votes = count;
            leader = Some(id);
            tie = false;
        } else if count == max_votes {
            tie = true;
        }
    }

    let target = leader
        .filter(|_| !tie)
        .and_then(|id| state.player(id).cloned());

    match target {
        Some(player) if player.role == Some(RoleId::Idiot) => {
            for p in &mut state.players {
                if p.id == player.id {
                    p.has_voting_rights = false;
                }
            }
            state.events.push(GameEvent::day(
                state.round,
                format!(
                    "{} was voted out, but revealed as the Idiot and survived (lost voting rights).",
                    player.name
                ),
            ));
        }
        Some(player) => {
            for p in &mut state.players {
                if p.id == player.id {
                    p.alive = false;
                    p.voted_out = true;
                }
            }
            state
                .events
                .push(GameEvent::day(state.round, format!("{} was voted out.", player.name)));
        }
        None => {
            state.events.push(GameEvent::day(
                state.round,
                "Vote was tied — no one was eliminated.",
            ));
        }
    }

    state.votes.clear();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply;
    use crate::models::game::GameCommand;
    use crate::models::player::Player;

    fn day_state(count: u32) -> GameState {
        let mut state = GameState::new();
        for i in 1..=count {
            let mut p = Player::new(i, format!("P{}", i));
            p.role = Some(RoleId::Villager);
            state.players.push(p);
        }
        state
    }

    fn vote(state: GameState, voter: u32, target: u32) -> GameState {
        apply(
            state,
            GameCommand::CastVote {
                voter_id: voter,
                target_id: target,
            },
        )
    }

    #[test]
    fn unique_plurality_target_is_voted_out() {
        let mut state = day_state(5);
        state = vote(state, 1, 4);
        state = vote(state, 2, 4);
        state = vote(state, 3, 5);

        let state = apply(state, GameCommand::ResolveVotes);
        let target = state.player(4).unwrap();
        assert!(!target.alive);
        assert!(target.voted_out);
        assert!(state.votes.is_empty());
        assert_eq!(state.events.last().unwrap().description, "P4 was voted out.");
    }

    #[test]
    fn two_way_tie_at_the_max_eliminates_no_one() {
        let mut state = day_state(5);
        state = vote(state, 1, 4);
        state = vote(state, 2, 4);
        state = vote(state, 3, 5);
        state = vote(state, 5, 5);

        let state = apply(state, GameCommand::ResolveVotes);
        assert!(state.players.iter().all(|p| p.alive));
        assert!(state.votes.is_empty());
        assert_eq!(
            state.events.last().unwrap().description,
            "Vote was tied — no one was eliminated."
        );
    }

    #[test]
    fn later_strict_maximum_clears_an_earlier_tie() {
        // 1 vote each on targets 2 and 3, then 3 votes on target 4: no tie.
        let mut state = day_state(6);
        state = vote(state, 1, 2);
        state = vote(state, 2, 3);
        state = vote(state, 3, 4);
        state = vote(state, 5, 4);
        state = vote(state, 6, 4);

        let state = apply(state, GameCommand::ResolveVotes);
        assert!(!state.player(4).unwrap().alive);
    }

    #[test]
    fn revoting_overwrites_the_previous_ballot() {
        let mut state = day_state(3);
        state = vote(state, 1, 2);
        state = vote(state, 1, 3);
        assert_eq!(state.votes.len(), 1);
        assert_eq!(state.votes.get(&1), Some(&3));
    }

    #[test]
    fn no_votes_resolves_to_a_tie_event() {
        let state = apply(day_state(4), GameCommand::ResolveVotes);
        assert!(state.players.iter().all(|p| p.alive));
        assert_eq!(
            state.events.last().unwrap().description,
            "Vote was tied — no one was eliminated."
        );
    }

    #[test]
    fn resolving_again_with_empty_votes_is_idempotent_on_players() {
        let mut state = day_state(4);
        state = vote(state, 1, 2);
        state = vote(state, 3, 2);
        let state = apply(state, GameCommand::ResolveVotes);
        let players_after = state.players.clone();

        let state = apply(state, GameCommand::ResolveVotes);
        assert_eq!(state.players, players_after);
    }

    #[test]
    fn idiot_survives_the_vote_but_loses_voting_rights() {
        let mut state = day_state(5);
        state.players[3].role = Some(RoleId::Idiot);
        state = vote(state, 1, 4);
        state = vote(state, 2, 4);

        let state = apply(state, GameCommand::ResolveVotes);
        let idiot = state.player(4).unwrap();
        assert!(idiot.alive);
        assert!(!idiot.voted_out);
        assert!(!idiot.has_voting_rights);
        assert!(state
            .events
            .last()
            .unwrap()
            .description
            .contains("revealed as the Idiot"));
    }

    #[test]
    fn votes_for_a_missing_player_eliminate_no_one() {
        let mut state = day_state(3);
        state = vote(state, 1, 99);
        state = vote(state, 2, 99);

        let state = apply(state, GameCommand::ResolveVotes);
        assert!(state.players.iter().all(|p| p.alive));
        assert!(state.votes.is_empty());
    }
}
