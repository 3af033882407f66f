use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::models::{game::GameCommand, role};
use crate::routes::error_status;
use crate::services::game_service;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        // Role catalog and quick-start presets for the presentation layer
        // curl http://localhost:8080/api/game/roles
        .route("/roles", get(list_roles))
        .route("/templates", get(list_templates))
        .nest(
            "/:code",
            Router::new()
                // The engine's command surface
                // curl -X POST http://localhost:8080/api/game/{code}/command \
                //   -H 'content-type: application/json' -d '{"type":"assign_roles"}'
                .route("/command", post(dispatch_command))
                // Snapshot on demand for late joiners
                .route("/state", get(get_game_state))
                // Tonight's role call, ordered by night action order
                .route("/night-order", get(get_night_order)),
        )
        .with_state(state)
}

async fn dispatch_command(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(command): Json<GameCommand>,
) -> Response {
    match game_service::dispatch(state, &code, command).await {
        Ok(game) => (StatusCode::OK, Json(game)).into_response(),
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

async fn get_game_state(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    match game_service::get_game_state(state, &code).await {
        Ok(game) => (StatusCode::OK, Json(game)).into_response(),
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

async fn get_night_order(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    match game_service::get_game_state(state, &code).await {
        Ok(game) => {
            let order = role::night_call_order(&game.players);
            (StatusCode::OK, Json(order)).into_response()
        }
        Err(e) => (error_status(&e), Json(e.to_string())).into_response(),
    }
}

async fn list_roles() -> impl IntoResponse {
    Json(role::ROLES)
}

async fn list_templates() -> impl IntoResponse {
    Json(role::templates())
}
