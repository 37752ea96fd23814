#[cfg(test)]
pub mod test_utils {
    use crate::remote::RemoteClient;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use model::fixtures::Dataset;
    use moka::future::Cache;
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Base URL nothing listens on, for tests that never reach the remote service.
    pub const UNREACHABLE_REMOTE: &str = "http://127.0.0.1:9";

    /// Create AppState for testing, backed by the embedded fixtures
    pub fn setup_test_app_state(remote_url: &str) -> AppState {
        let dataset = Dataset::embedded().expect("Failed to load embedded fixtures");
        let remote = RemoteClient::new(remote_url, Duration::from_secs(5))
            .expect("Failed to build remote client");
        let cache = Cache::new(100);

        AppState {
            dataset: Arc::new(dataset),
            remote,
            cache,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set. Logging stays active while the returned
    /// guard is alive.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing with the remote service at `remote_url`
    pub fn setup_test_app(remote_url: &str) -> Router {
        create_router(setup_test_app_state(remote_url))
    }
}
