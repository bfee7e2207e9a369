use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging with appropriate log level
///
/// Defaults to `error` to keep test output quiet; override with the
/// LOG_LEVEL environment variable when debugging a test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
