use crate::config::ResponseConfig;
use crate::handlers;
use crate::services::{MongoDb, UpstreamClient};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    cors_headers_middleware, preflight, request_log_middleware, REQUEST_ID_HEADER,
};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Process-wide handles, built once and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ResponseConfig,
    pub db: MongoDb,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub async fn new(config: ResponseConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(config.mongodb.uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to initialise MongoDB client: {}", e);
                e
            })?;
        let upstream = UpstreamClient::new(&config.upstream)?;

        tracing::info!(
            upstream = %upstream.completions_url(),
            static_root = %config.static_files.root.display(),
            "Application state ready"
        );

        Ok(Self {
            config,
            db,
            upstream,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/db-status",
            get(handlers::db_status).options(preflight),
        )
        .route(
            "/save-response",
            post(handlers::save_response).options(preflight),
        )
        .route(
            "/responses",
            get(handlers::list_responses).options(preflight),
        )
        .route(
            "/v1/chat/completions",
            post(handlers::chat_completions).options(preflight),
        )
        .route(
            "/",
            get(handlers::serve_index)
                .options(preflight)
                .fallback(handlers::static_not_found),
        )
        .route(
            "/*path",
            get(handlers::serve_path)
                .options(preflight)
                .fallback(handlers::static_not_found),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_log_middleware))
        .layer(from_fn(cors_headers_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>,
    state: AppState,
}

impl Application {
    pub async fn build(config: ResponseConfig) -> Result<Self, AppError> {
        let state = AppState::new(config).await?;
        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(async move { server.await }),
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
