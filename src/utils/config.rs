use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub struct Config {
    pub bind_addr: String,
    pub allowed_origin: String,
    /// Snapshot publications within this window coalesce into one broadcast.
    pub sync_debounce_ms: u64,
}

impl Config {
    fn from_env() -> Self {
        Self {
            bind_addr: env::var("WOLFNIGHT_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            allowed_origin: env::var("WOLFNIGHT_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            sync_debounce_ms: env::var("WOLFNIGHT_SYNC_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(150),
        }
    }
}
