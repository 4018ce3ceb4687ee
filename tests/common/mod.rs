#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use rentals_api::auth::{generate_jwt, Claims};
use rentals_api::database::{MemoryPropertyStore, Property, PropertyInput, PropertyStore};
use rentals_api::middleware::session::JwtSessionResolver;
use rentals_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const SESSION_COOKIE: &str = "session_token";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryPropertyStore,
}

impl TestServer {
    /// Serve the full router on an unused local port, backed by an in-memory store.
    ///
    /// Each tokio test owns its runtime, so every test starts its own server.
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryPropertyStore::new();
        let state = AppState::new(
            Arc::new(store.clone()),
            Arc::new(JwtSessionResolver::new(JWT_SECRET, SESSION_COOKIE)),
        );

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state, 1024 * 1024)).await;
        });

        let server = Self { port, base_url, store };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Insert a listing owned by `owner` directly into the store
    pub async fn seed(&self, owner: &str, name: &str) -> Result<Property> {
        let input = PropertyInput {
            name: Some(name.to_string()),
            beds: Some("2".to_string()),
            amenities: vec!["wifi".to_string()],
            ..Default::default()
        };
        Ok(self.store.insert(owner, input).await?)
    }
}

/// Session token for `user_id`, signed with the server's secret
pub fn token_for(user_id: &str) -> String {
    generate_jwt(&Claims::new(user_id, 1), JWT_SECRET).expect("failed to sign test token")
}

pub fn assert_cors(resp: &reqwest::Response) {
    let headers = resp.headers();
    assert_eq!(
        headers.get("access-control-allow-credentials").and_then(|v| v.to_str().ok()),
        Some("true")
    );
    assert_eq!(
        headers.get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        headers.get("access-control-allow-methods").and_then(|v| v.to_str().ok()),
        Some("GET,DELETE,PATCH,POST,PUT")
    );
    assert_eq!(
        headers.get("access-control-allow-headers").and_then(|v| v.to_str().ok()),
        Some("X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version")
    );
}
