use crate::{
    engine,
    models::{
        game::{GameCommand, GameState},
        role::RoleId,
        room::RoomStatus,
    },
    services::ServiceError,
    state::AppState,
};

/// Apply one command to a room's aggregate as the session authority.
///
/// Transitions are serialized through the `games` lock; the resulting
/// snapshot is scheduled for (debounced) publication to the mirrors. After
/// night and vote resolution the victory evaluator is consulted; the engine
/// does not do this on its own.
pub async fn dispatch(
    state: AppState,
    code: &str,
    command: GameCommand,
) -> Result<GameState, ServiceError> {
    let mut games = state.games.lock().await;
    let game = games
        .get_mut(code)
        .ok_or_else(|| ServiceError::GameNotFound(code.to_string()))?;
    validate(game, &command)?;

    let check_victory = matches!(
        command,
        GameCommand::ResolveNight | GameCommand::ResolveVotes
    );
    let game_started = matches!(command, GameCommand::AssignRoles);

    let mut next = engine::apply(game.clone(), command);
    if check_victory {
        next = engine::apply(next, GameCommand::CheckVictory);
    }
    *game = next.clone();
    drop(games);

    if game_started {
        set_room_status(&state, code, RoomStatus::InProgress).await;
    }
    if next.winner.is_some() {
        set_room_status(&state, code, RoomStatus::Closed).await;
    }

    log::debug!("room {}: {}", code, next);
    state.schedule_sync(code).await;
    Ok(next)
}

/// The command validator contract sits here, outside the reducer: a guard
/// action targeting the previously guarded player is rejected before it ever
/// reaches the engine, which itself only records the value.
fn validate(game: &GameState, command: &GameCommand) -> Result<(), ServiceError> {
    if let GameCommand::AddNightAction { action } = command {
        if action.role == RoleId::Guard
            && action.target_id.is_some()
            && action.target_id == game.last_guarded_player_id
        {
            return Err(ServiceError::GuardRepeatRejected);
        }
    }
    Ok(())
}

pub async fn get_game_state(state: AppState, code: &str) -> Result<GameState, ServiceError> {
    let games = state.games.lock().await;
    games
        .get(code)
        .cloned()
        .ok_or_else(|| ServiceError::GameNotFound(code.to_string()))
}

async fn set_room_status(state: &AppState, code: &str, status: RoomStatus) {
    let mut rooms = state.rooms.lock().await;
    if let Some(room) = rooms.get_mut(code) {
        if room.status != status {
            log::info!("room {}: {:?} -> {:?}", code, room.status, status);
            room.status = status;
        }
    }
}
