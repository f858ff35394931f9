#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use response_service::config::{MongoConfig, ResponseConfig, StaticConfig, UpstreamConfig};
use response_service::services::MongoDb;
use response_service::startup::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

/// Nothing listens on port 1, and the short selection timeout keeps the
/// failing database calls quick.
pub const UNREACHABLE_MONGODB_URI: &str =
    "mongodb://127.0.0.1:1/response_test?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

/// Nothing listens here either; used as an upstream that refuses connections.
pub const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:1";

pub fn test_config(mongodb_uri: &str, upstream_base: &str, static_root: PathBuf) -> ResponseConfig {
    ResponseConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            uri: Secret::new(mongodb_uri.to_string()),
        },
        upstream: UpstreamConfig {
            base_url: upstream_base.to_string(),
            timeout: Duration::from_secs(5),
        },
        static_files: StaticConfig { root: static_root },
    }
}

/// A fresh database URI on the live test server, one database per test.
pub fn live_mongodb_uri() -> (String, String) {
    let base = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let db_name = format!("response_test_{}", Uuid::new_v4().simple());
    (format!("{}/{}", base.trim_end_matches('/'), db_name), db_name)
}

/// Router wired to an unreachable database, for tests that never touch it.
pub async fn offline_router(upstream_base: &str) -> Router {
    let config = test_config(UNREACHABLE_MONGODB_URI, upstream_base, empty_static_root());
    router_for(config).await
}

pub async fn router_for(config: ResponseConfig) -> Router {
    let state = AppState::new(config)
        .await
        .expect("Failed to build application state");
    build_router(state)
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("Router returned an error")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body was not JSON")
}

pub fn empty_static_root() -> PathBuf {
    std::env::temp_dir().join("response-service-empty-root")
}

/// A scratch document root removed on drop.
pub struct StaticRoot {
    pub path: PathBuf,
}

impl StaticRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("response-service-root-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("Failed to create static root");
        Self { path }
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(file, contents).expect("Failed to write static file");
    }
}

impl Drop for StaticRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
}

impl TestApp {
    pub async fn spawn(config: ResponseConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the listener to accept by polling a route that never hits the database
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .request(reqwest::Method::OPTIONS, format!("{}/db-status", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address, port, db }
    }

    /// Drops the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.database().drop(None).await;
    }
}
