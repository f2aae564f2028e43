// src/infrastructure/http.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::remote::RemoteBookmarkSource;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Retrieves the remote bookmark document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpBookmarkSource {
    client: reqwest::blocking::Client,
}

impl Default for HttpBookmarkSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpBookmarkSource {
    /// Without a timeout the client's own defaults apply.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("oriby/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: build_client(builder),
        }
    }
}

fn build_client(builder: reqwest::blocking::ClientBuilder) -> reqwest::blocking::Client {
    builder.build().unwrap_or_else(|e| {
        warn!("HTTP client setup failed, using defaults without timeout: {}", e);
        reqwest::blocking::Client::new()
    })
}

impl RemoteBookmarkSource for HttpBookmarkSource {
    #[instrument(skip(self), level = "debug")]
    fn fetch(&self, url: &str) -> DomainResult<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::FetchFailed(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        let body = response
            .text()
            .map_err(|e| DomainError::FetchFailed(e.to_string()))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
