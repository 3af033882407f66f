use axum::extract::ws::Message;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};

use chrono::{DateTime, Utc};

use crate::models::{game::GameState, room::Room};
use crate::utils::config::CONFIG;

/// Retry key for join requests: the (name, timestamp) pair of the request.
pub type JoinKey = (String, DateTime<Utc>);

/// Shared session registry. This process is the single transition authority:
/// commands are serialized through the `games` lock and mirrors only ever
/// receive snapshots.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<Mutex<HashMap<String, Room>>>,
    pub games: Arc<Mutex<HashMap<String, GameState>>>,
    pub channel: Arc<Mutex<HashMap<String, broadcast::Sender<Message>>>>,
    pub join_log: Arc<Mutex<HashMap<String, HashMap<JoinKey, u32>>>>,
    pending_sync: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            games: Arc::new(Mutex::new(HashMap::new())),
            channel: Arc::new(Mutex::new(HashMap::new())),
            join_log: Arc::new(Mutex::new(HashMap::new())),
            pending_sync: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub async fn get_or_create_room_channel(&self, code: &str) -> broadcast::Sender<Message> {
        let mut channels = self.channel.lock().await;
        if let Some(channel) = channels.get(code) {
            channel.clone()
        } else {
            let (tx, _) = broadcast::channel(1000);
            channels.insert(code.to_string(), tx.clone());
            tx
        }
    }

    /// Serialize the room's current aggregate into a snapshot envelope.
    pub async fn snapshot_message(&self, code: &str) -> Option<Message> {
        let games = self.games.lock().await;
        let game = games.get(code)?;
        let envelope = serde_json::json!({
            "message_type": "snapshot",
            "room_id": code,
            "state": game,
            "timestamp": Utc::now().to_rfc3339(),
        });
        serde_json::to_string(&envelope).ok().map(Message::Text)
    }

    /// Broadcast the current snapshot to every connected mirror immediately.
    pub async fn broadcast_snapshot(&self, code: &str) {
        if let Some(message) = self.snapshot_message(code).await {
            let tx = self.get_or_create_room_channel(code).await;
            if let Err(e) = tx.send(message) {
                // No mirror is listening; the next joiner pulls the snapshot.
                log::debug!("no snapshot receivers for room {}: {}", code, e);
            }
        }
    }

    /// Debounced snapshot publication: rapid successive transitions coalesce
    /// into one broadcast per debounce window, bounding transport traffic.
    pub async fn schedule_sync(&self, code: &str) {
        {
            let mut pending = self.pending_sync.lock().await;
            if !pending.insert(code.to_string()) {
                return;
            }
        }
        let state = self.clone();
        let code = code.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(CONFIG.sync_debounce_ms)).await;
            state.pending_sync.lock().await.remove(&code);
            state.broadcast_snapshot(&code).await;
        });
    }

    /// Drop everything tied to a room: aggregate, channel, join history.
    pub async fn remove_session(&self, code: &str) -> bool {
        let existed = self.rooms.lock().await.remove(code).is_some();
        self.games.lock().await.remove(code);
        self.channel.lock().await.remove(code);
        self.join_log.lock().await.remove(code);
        existed
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
