use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::routes::error_status;
use crate::services::room_service;
use crate::state::AppState;
use crate::{models::room::JoinRequest, utils::websocket};

#[derive(Debug, Default, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
    pub max_players: Option<usize>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        // curl -X POST http://localhost:8080/api/room/create
        .route("/create", post(create_room))
        // curl http://localhost:8080/api/room/rooms
        .route("/rooms", get(get_rooms))
        // curl http://localhost:8080/api/room/{code}
        .route("/:code", get(get_room_info))
        // curl -X POST http://localhost:8080/api/room/{code}/join \
        //   -H 'content-type: application/json' -d '{"name":"Ana","timestamp":"..."}'
        .route("/:code/join", post(join_room))
        // curl -X POST http://localhost:8080/api/room/{code}/leave/{playerid}
        .route("/:code/leave/:player_id", post(leave_room))
        // curl -X DELETE http://localhost:8080/api/room/{code}/delete
        .route("/:code/delete", delete(delete_room))
        // websocat ws://localhost:8080/api/room/{code}/ws
        .route("/:code/ws", get(websocket::handler))
        .with_state(state)
}

pub async fn create_room(
    State(state): State<AppState>,
    body: Option<Json<CreateRoomRequest>>,
) -> impl IntoResponse {
    let Json(request) = body.unwrap_or_default();
    let code = room_service::create_room(state, request.name, request.max_players).await;
    (StatusCode::OK, Json(code))
}

async fn get_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let rooms = room_service::get_rooms(&state).await;
    (StatusCode::OK, Json(rooms))
}

async fn get_room_info(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match room_service::get_room_info(&state, &code).await {
        Ok(room) => (StatusCode::OK, Json(room)).into_response(),
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

pub async fn join_room(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<JoinRequest>,
) -> Response {
    match room_service::join_room(state, &code, request).await {
        Ok(accepted) => (StatusCode::OK, Json(accepted)).into_response(),
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

pub async fn leave_room(
    State(state): State<AppState>,
    Path((code, player_id)): Path<(String, u32)>,
) -> Response {
    match room_service::leave_room(state, &code, player_id).await {
        Ok(()) => (StatusCode::OK, Json("left room")).into_response(),
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

async fn delete_room(State(state): State<AppState>, Path(code): Path<String>) -> impl IntoResponse {
    if room_service::delete_room(state, &code).await {
        (StatusCode::OK, Json(format!("room {} deleted", code)))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(format!("room {} not found", code)),
        )
    }
}
