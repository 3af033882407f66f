use axum::http::StatusCode;
use axum::Router;

use crate::services::ServiceError;
use crate::state::AppState;

mod game;
mod room;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .nest("/api/room", room::routes(state.clone()))
        .nest("/api/game", game::routes(state.clone()))
}

pub(crate) fn error_status(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::RoomNotFound(_) | ServiceError::GameNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::RoomClosed(_)
        | ServiceError::RoomFull(_)
        | ServiceError::GuardRepeatRejected => StatusCode::BAD_REQUEST,
    }
}
