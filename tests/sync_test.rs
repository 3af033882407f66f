//! Synchronization channel behavior: snapshot on connect, broadcast on change.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use wolfnight_server::app;
use wolfnight_server::models::game::GameCommand;
use wolfnight_server::services::{game_service, room_service};
use wolfnight_server::state::AppState;
use wolfnight_server::utils::test_setup::setup_test_env;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(state: AppState) -> std::net::SocketAddr {
    let app = app::create_app_with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn next_snapshot<S>(read: &mut S) -> serde_json::Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = timeout(RECV_TIMEOUT, read.next())
            .await
            .expect("timed out waiting for snapshot")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            let envelope: serde_json::Value = serde_json::from_str(&text).unwrap();
            if envelope["message_type"] == "snapshot" {
                return envelope;
            }
        }
    }
}

#[tokio::test]
async fn late_joiner_receives_the_current_snapshot_on_connect() {
    setup_test_env();
    let state = AppState::new();
    let addr = serve(state.clone()).await;

    let code = room_service::create_room(state.clone(), None, None).await;
    game_service::dispatch(
        state.clone(),
        &code,
        GameCommand::AddPlayer {
            name: "Ana".to_string(),
            id: None,
        },
    )
    .await
    .unwrap();

    let url = format!("ws://{}/api/room/{}/ws", addr, code);
    let (ws, _) = connect_async(url.as_str()).await.expect("websocket connect");
    let (_, mut read) = ws.split();

    let envelope = next_snapshot(&mut read).await;
    assert_eq!(envelope["room_id"], code.as_str());
    assert_eq!(envelope["state"]["players"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn transitions_are_broadcast_to_connected_mirrors() {
    setup_test_env();
    let state = AppState::new();
    let addr = serve(state.clone()).await;
    let code = room_service::create_room(state.clone(), None, None).await;

    let url = format!("ws://{}/api/room/{}/ws", addr, code);
    let (ws, _) = connect_async(url.as_str()).await.expect("websocket connect");
    let (_, mut read) = ws.split();

    // Connect-time snapshot of the empty lobby.
    let envelope = next_snapshot(&mut read).await;
    assert_eq!(envelope["state"]["players"].as_array().unwrap().len(), 0);

    // Debounced publication: a burst of transitions reaches the mirror as a
    // small number of snapshots whose last one carries the final roster.
    for name in ["Ana", "Bo", "Cy"] {
        game_service::dispatch(
            state.clone(),
            &code,
            GameCommand::AddPlayer {
                name: name.to_string(),
                id: None,
            },
        )
        .await
        .unwrap();
    }

    let mut players = 0;
    for _ in 0..5 {
        let envelope = next_snapshot(&mut read).await;
        players = envelope["state"]["players"].as_array().unwrap().len();
        if players == 3 {
            break;
        }
    }
    assert_eq!(players, 3);
}

#[tokio::test]
async fn sync_request_re_pushes_the_snapshot() {
    setup_test_env();
    let state = AppState::new();
    let addr = serve(state.clone()).await;
    let code = room_service::create_room(state.clone(), None, None).await;

    let url = format!("ws://{}/api/room/{}/ws", addr, code);
    let (ws, _) = connect_async(url.as_str()).await.expect("websocket connect");
    let (mut write, mut read) = ws.split();

    let _connect_snapshot = next_snapshot(&mut read).await;

    write
        .send(Message::Text(
            r#"{"message_type":"sync_request"}"#.to_string(),
        ))
        .await
        .unwrap();

    let envelope = next_snapshot(&mut read).await;
    assert_eq!(envelope["room_id"], code.as_str());
}
