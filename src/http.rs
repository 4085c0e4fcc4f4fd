//! Shared reqwest client for all outbound GitHub API calls.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("notehub-backend/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build shared HTTP client")
});

/// Get the shared HTTP client (connection pool reused across requests)
pub fn shared_client() -> &'static Client {
    &SHARED_CLIENT
}
