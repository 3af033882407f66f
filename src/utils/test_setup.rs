use std::sync::Once;

static INIT: Once = Once::new();

/// Test environment defaults. Must run before the first CONFIG read so the
/// short debounce window takes effect.
pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        if std::env::var("WOLFNIGHT_SYNC_DEBOUNCE_MS").is_err() {
            std::env::set_var("WOLFNIGHT_SYNC_DEBOUNCE_MS", "25");
        }
        if std::env::var("WOLFNIGHT_ADDR").is_err() {
            std::env::set_var("WOLFNIGHT_ADDR", "127.0.0.1:0");
        }
    });
}
