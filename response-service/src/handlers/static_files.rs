//! Static front-end served from the configured document root.
//!
//! Paths are resolved against the canonical root and must stay inside it;
//! hidden entries (any segment starting with `.`) are never served, which
//! keeps `.env` and VCS metadata out of reach when the root is the working
//! directory.

use crate::startup::AppState;
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Request, State},
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use std::path::{Path as FsPath, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;

pub const INDEX_FILE: &str = "index.html";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

pub async fn serve_index(State(state): State<AppState>, request: Request) -> Response {
    serve(
        &state.config.static_files.root,
        INDEX_FILE,
        request,
        "index.html not found",
    )
    .await
}

pub async fn serve_path(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    request: Request,
) -> Response {
    // Undecodable paths (e.g. invalid UTF-8) cannot name a file.
    let Ok(Path(path)) = path else {
        return static_not_found().await;
    };
    serve(&state.config.static_files.root, &path, request, NOT_FOUND_MESSAGE).await
}

/// Answer for methods the static responder does not serve.
pub async fn static_not_found() -> Response {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string()).into_response()
}

async fn serve(root: &FsPath, relative: &str, request: Request, not_found: &str) -> Response {
    let Some(file) = resolve(root, relative).await else {
        return AppError::NotFound(not_found.to_string()).into_response();
    };

    match ServeFile::new(file).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

/// Maps a request path to a regular file under `root`, or `None` when the
/// path is hidden, escapes the root, or does not name a file.
pub async fn resolve(root: &FsPath, relative: &str) -> Option<PathBuf> {
    let relative = relative.trim_start_matches('/');
    if relative.split(['/', '\\']).any(|segment| segment.starts_with('.')) {
        tracing::debug!(path = %relative, "Refusing hidden or relative path");
        return None;
    }

    let root = match tokio::fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "Static root not accessible");
            return None;
        }
    };

    let candidate = tokio::fs::canonicalize(root.join(relative)).await.ok()?;
    if !candidate.starts_with(&root) {
        tracing::warn!(path = %relative, "Refusing path outside static root");
        return None;
    }

    let metadata = tokio::fs::metadata(&candidate).await.ok()?;
    metadata.is_file().then_some(candidate)
}
