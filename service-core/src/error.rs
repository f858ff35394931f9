use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{context}: {cause}")]
    PersistenceError {
        context: String,
        cause: anyhow::Error,
    },

    #[error("Upstream proxy error: {0}")]
    UpstreamError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn persistence(context: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        AppError::PersistenceError {
            context: context.into(),
            cause: cause.into(),
        }
    }

    /// Replaces the caller-facing message of a persistence failure.
    /// Other variants pass through untouched.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            AppError::PersistenceError { cause, .. } => AppError::PersistenceError {
                context: context.into(),
                cause,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::PersistenceError { .. }
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::persistence("Database error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
        }

        let status = self.status_code();

        let (message, error) = match self {
            // Static file misses answer in plain text, not JSON.
            AppError::NotFound(msg) => {
                return (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    msg,
                )
                    .into_response();
            }
            AppError::ValidationError(msg) => (msg, None),
            AppError::PersistenceError { context, cause } => (context, Some(cause.to_string())),
            AppError::UpstreamError(err) => {
                tracing::warn!(error = %err, "Upstream proxy error");
                ("Upstream proxy error".to_string(), Some(err.to_string()))
            }
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                ("Internal server error".to_string(), Some(err.to_string()))
            }
            AppError::ConfigError(err) => {
                ("Configuration error".to_string(), Some(err.to_string()))
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}
