// src/util/testing.rs

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::remote::RemoteBookmarkSource;
use crate::domain::repositories::store::StateStore;
use crate::infrastructure::repositories::memory_store::MemoryKeyValueStore;

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// URL handed to services as the configured remote document
    pub server_url: &'static str,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and sets up logging.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            server_url: "https://remote.example/bookmarks.json",
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["reqwest", "hyper_util", "rustls", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `ORIBY_*` environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    store_path: Option<String>,
    fetch_timeout: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            store_path: env::var("ORIBY_STORE_PATH").ok(),
            fetch_timeout: env::var("ORIBY_FETCH_TIMEOUT").ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var("ORIBY_STORE_PATH");
        env::remove_var("ORIBY_FETCH_TIMEOUT");
        if let Some(val) = &self.store_path {
            env::set_var("ORIBY_STORE_PATH", val);
        }
        if let Some(val) = &self.fetch_timeout {
            env::set_var("ORIBY_FETCH_TIMEOUT", val);
        }
    }
}

/// Fresh in-memory store with all namespaces seeded.
pub fn setup_test_store() -> StateStore {
    let store = StateStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.initialize().expect("Failed to initialize test store");
    store
}

/// Remote source answering every fetch with the same canned outcome.
#[derive(Debug)]
pub struct StaticRemoteSource {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl StaticRemoteSource {
    pub fn ok(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteBookmarkSource for StaticRemoteSource {
    fn fetch(&self, url: &str) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("Static remote fetch of {}", url);
        self.response
            .clone()
            .map_err(DomainError::FetchFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_static_source_when_fetched_then_counts_calls() {
        let _ = init_test_env();
        let source = StaticRemoteSource::failing("down");
        assert!(source.fetch("https://x").is_err());
        assert!(source.fetch("https://x").is_err());
        assert_eq!(source.calls(), 2);
    }
}
