use std::collections::HashMap;

use crate::{
    engine,
    models::{
        game::{GameCommand, GameState},
        room::{JoinRequest, JoinResponse, Room, RoomStatus},
    },
    services::ServiceError,
    state::AppState,
    utils::room_code,
};

/// Create a room under a fresh code together with its lobby aggregate.
pub async fn create_room(
    state: AppState,
    name: Option<String>,
    max_players: Option<usize>,
) -> String {
    let mut rooms = state.rooms.lock().await;
    let mut code = room_code::generate();
    while rooms.contains_key(&code) {
        code = room_code::generate();
    }
    rooms.insert(code.clone(), Room::new(code.clone(), name, max_players));
    drop(rooms);

    state.games.lock().await.insert(code.clone(), GameState::new());
    log::info!("room {} created", code);
    code
}

/// Fold a join request into the aggregate.
///
/// Retries are expected under at-least-once delivery: the (name, timestamp)
/// pair of a request is remembered per room and a duplicate is answered with
/// the originally assigned id instead of a second seat.
pub async fn join_room(
    state: AppState,
    code: &str,
    request: JoinRequest,
) -> Result<JoinResponse, ServiceError> {
    let max_players = {
        let rooms = state.rooms.lock().await;
        let room = rooms
            .get(code)
            .ok_or_else(|| ServiceError::RoomNotFound(code.to_string()))?;
        if room.status != RoomStatus::Open {
            return Err(ServiceError::RoomClosed(code.to_string()));
        }
        room.max_players
    };

    let response = {
        // Both locks are held across the dedup check and the roster change so
        // a racing retry cannot claim a second seat.
        let mut games = state.games.lock().await;
        let mut join_log = state.join_log.lock().await;

        let game = games
            .get_mut(code)
            .ok_or_else(|| ServiceError::GameNotFound(code.to_string()))?;
        let requests = join_log.entry(code.to_string()).or_insert_with(HashMap::new);
        let key = (request.name.clone(), request.timestamp);

        if let Some(assigned_id) = requests.get(&key) {
            return Ok(JoinResponse {
                name: request.name,
                assigned_id: *assigned_id,
            });
        }

        if game.players.len() >= max_players {
            return Err(ServiceError::RoomFull(code.to_string()));
        }

        let assigned_id = game.players.iter().map(|p| p.id).max().map_or(1, |m| m + 1);
        *game = engine::apply(
            game.clone(),
            GameCommand::AddPlayer {
                name: request.name.clone(),
                id: Some(assigned_id),
            },
        );
        requests.insert(key, assigned_id);

        JoinResponse {
            name: request.name,
            assigned_id,
        }
    };

    log::info!("{} joined room {} as {}", response.name, code, response.assigned_id);
    state.schedule_sync(code).await;
    Ok(response)
}

/// Remove a player. A deliberate host action, never timeout-driven.
pub async fn leave_room(state: AppState, code: &str, player_id: u32) -> Result<(), ServiceError> {
    {
        let mut games = state.games.lock().await;
        let game = games
            .get_mut(code)
            .ok_or_else(|| ServiceError::RoomNotFound(code.to_string()))?;
        *game = engine::apply(game.clone(), GameCommand::RemovePlayer { id: player_id });
    }
    state.schedule_sync(code).await;
    Ok(())
}

pub async fn get_rooms(state: &AppState) -> HashMap<String, Room> {
    state.rooms.lock().await.clone()
}

pub async fn get_room_info(state: &AppState, code: &str) -> Result<Room, ServiceError> {
    let rooms = state.rooms.lock().await;
    rooms
        .get(code)
        .cloned()
        .ok_or_else(|| ServiceError::RoomNotFound(code.to_string()))
}

pub async fn delete_room(state: AppState, code: &str) -> bool {
    state.remove_session(code).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_setup::setup_test_env;
    use chrono::Utc;

    fn join(name: &str, timestamp: chrono::DateTime<Utc>) -> JoinRequest {
        JoinRequest {
            name: name.to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn create_room_registers_a_lobby_aggregate() {
        setup_test_env();
        let state = AppState::new();
        let code = create_room(state.clone(), Some("Friday".to_string()), None).await;

        assert_eq!(code.len(), room_code::ROOM_CODE_LEN);
        let room = get_room_info(&state, &code).await.unwrap();
        assert_eq!(room.status, RoomStatus::Open);
        let games = state.games.lock().await;
        assert!(games.get(&code).unwrap().players.is_empty());
    }

    #[tokio::test]
    async fn duplicate_join_requests_are_idempotent() {
        setup_test_env();
        let state = AppState::new();
        let code = create_room(state.clone(), None, None).await;
        let timestamp = Utc::now();

        let first = join_room(state.clone(), &code, join("Ana", timestamp))
            .await
            .unwrap();
        let retry = join_room(state.clone(), &code, join("Ana", timestamp))
            .await
            .unwrap();
        assert_eq!(first.assigned_id, retry.assigned_id);

        let games = state.games.lock().await;
        assert_eq!(games.get(&code).unwrap().players.len(), 1);
    }

    #[tokio::test]
    async fn same_name_different_request_gets_a_new_seat() {
        setup_test_env();
        let state = AppState::new();
        let code = create_room(state.clone(), None, None).await;

        let first = join_room(state.clone(), &code, join("Ana", Utc::now()))
            .await
            .unwrap();
        let second = join_room(state.clone(), &code, join("Ana", Utc::now()))
            .await
            .unwrap();
        assert_ne!(first.assigned_id, second.assigned_id);
    }

    #[tokio::test]
    async fn full_room_rejects_joins() {
        setup_test_env();
        let state = AppState::new();
        let code = create_room(state.clone(), None, Some(1)).await;

        join_room(state.clone(), &code, join("Ana", Utc::now()))
            .await
            .unwrap();
        let overflow = join_room(state.clone(), &code, join("Bo", Utc::now())).await;
        assert_eq!(overflow, Err(ServiceError::RoomFull(code)));
    }

    #[tokio::test]
    async fn leave_and_delete_clean_up() {
        setup_test_env();
        let state = AppState::new();
        let code = create_room(state.clone(), None, None).await;
        let joined = join_room(state.clone(), &code, join("Ana", Utc::now()))
            .await
            .unwrap();

        leave_room(state.clone(), &code, joined.assigned_id)
            .await
            .unwrap();
        {
            let games = state.games.lock().await;
            assert!(games.get(&code).unwrap().players.is_empty());
        }

        assert!(delete_room(state.clone(), &code).await);
        assert!(!delete_room(state.clone(), &code).await);
        assert!(get_room_info(&state, &code).await.is_err());
    }
}
