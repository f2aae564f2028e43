// src/infrastructure/di/test_container.rs
use crate::domain::repositories::remote::RemoteBookmarkSource;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::repositories::memory_store::MemoryKeyValueStore;
use crate::util::testing::{init_test_env, StaticRemoteSource};
use std::sync::Arc;

/// Services over a fresh in-memory store, one per test.
pub struct TestServiceContainer;

impl TestServiceContainer {
    /// Remote document is an empty array
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> ServiceContainer {
        Self::with_remote(Arc::new(StaticRemoteSource::ok("[]")))
    }

    pub fn with_remote(remote: Arc<dyn RemoteBookmarkSource>) -> ServiceContainer {
        let _env = init_test_env();
        match ServiceContainer::with_parts(Arc::new(MemoryKeyValueStore::new()), remote) {
            Ok(container) => container,
            Err(e) => panic!("Failed to create test services: {}", e),
        }
    }
}
